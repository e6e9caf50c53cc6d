use actix_web::http::{header, Method, StatusCode};
use actix_web::middleware::from_fn;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use kasir_api::api;
use kasir_api::api::middleware::{cors, API_KEY_HEADER};

mod support;

use support::API_KEY;

macro_rules! test_app {
    ($pool:expr) => {
        test_app!($pool, Some(API_KEY))
    };
    ($pool:expr, $key:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(support::build_state($pool.clone(), $key)))
                .wrap(from_fn(cors))
                .configure(api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn checkout_requires_valid_api_key() {
    let db = support::init_test_db().await;
    let app = test_app!(db.pool);
    let body = json!({ "items": [{ "product_id": 1, "quantity": 1 }] });

    let req = test::TestRequest::post()
        .uri("/api/checkout")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let err: Value = test::read_body_json(resp).await;
    assert!(err["error"].as_str().unwrap().contains("API Key required"));

    let req = test::TestRequest::post()
        .uri("/api/checkout")
        .insert_header((API_KEY_HEADER, "salah"))
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: Value = test::read_body_json(resp).await;
    assert!(err["error"].as_str().unwrap().contains("Invalid API Key"));
}

#[actix_web::test]
async fn no_configured_key_leaves_routes_open() {
    let db = support::init_test_db().await;
    let category = support::seed_category(&db.pool, "Umum").await;
    let product = support::seed_product(&db.pool, category, "Sabun", 4_500.0, 3).await;
    let app = test_app!(db.pool, None);

    let req = test::TestRequest::get()
        .uri(&format!("/api/produk/{product}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn checkout_flow_over_http() {
    let db = support::init_test_db().await;
    let app = test_app!(db.pool);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({ "category": "Elektronik", "description": "Barang elektronik" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = test::read_body_json(resp).await;
    let category_id = category["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/produk")
        .set_json(json!({
            "name": "Laptop",
            "price": 15000000.0,
            "stock": 10,
            "category_id": category_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = test::read_body_json(resp).await;
    let product_id = product["id"].as_i64().unwrap();
    assert_eq!(product["category"]["category"], "Elektronik");

    let req = test::TestRequest::post()
        .uri("/api/checkout")
        .insert_header((API_KEY_HEADER, API_KEY))
        .set_json(json!({ "items": [{ "product_id": product_id, "quantity": 3 }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let transaction: Value = test::read_body_json(resp).await;
    assert_eq!(transaction["total_price"].as_f64(), Some(45_000_000.0));
    assert_eq!(transaction["details"][0]["product_name"], "Laptop");
    assert_eq!(transaction["details"][0]["quantity"], 3);
    let transaction_id = transaction["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/produk/{product_id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let product: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(product["stock"], 7);

    let req = test::TestRequest::get()
        .uri(&format!("/api/transactions/{transaction_id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let stored: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored, transaction);

    sqlx::query("UPDATE transactions SET created_at = '2001-03-10 09:00:00'")
        .execute(&db.pool)
        .await
        .expect("backdate transaction");

    let req = test::TestRequest::get()
        .uri("/api/report?start_date=2001-03-10&end_date=2001-03-10")
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report["total_transaksi"], 1);
    assert_eq!(report["total_revenue"].as_f64(), Some(45_000_000.0));
    assert_eq!(report["produk_terlaris"]["nama"], "Laptop");
    assert_eq!(report["produk_terlaris"]["qty_terjual"], 3);
    assert!(report["produk_terlaris"].get("product_id").is_none());
}

#[actix_web::test]
async fn checkout_errors_map_to_status_codes() {
    let db = support::init_test_db().await;
    let category = support::seed_category(&db.pool, "Minuman").await;
    let teh = support::seed_product(&db.pool, category, "Teh", 4_000.0, 2).await;
    let app = test_app!(db.pool);

    let cases = [
        (json!({ "items": [{ "product_id": teh, "quantity": 5 }] }), StatusCode::BAD_REQUEST),
        (json!({ "items": [{ "product_id": 404, "quantity": 1 }] }), StatusCode::NOT_FOUND),
        (json!({ "items": [] }), StatusCode::BAD_REQUEST),
        (json!({ "items": [{ "product_id": teh, "quantity": 0 }] }), StatusCode::BAD_REQUEST),
        (json!({ "barang": [] }), StatusCode::BAD_REQUEST),
    ];

    for (body, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/checkout")
            .insert_header((API_KEY_HEADER, API_KEY))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "body: {body}");
        let err: Value = test::read_body_json(resp).await;
        assert!(err["error"].is_string(), "body: {body}");
    }

    assert_eq!(support::stock_of(&db.pool, teh).await, 2);
    assert_eq!(support::count_rows(&db.pool, "transactions").await, 0);
}

#[actix_web::test]
async fn empty_report_is_zero_not_error() {
    let db = support::init_test_db().await;
    let app = test_app!(db.pool);

    for uri in [
        "/api/report/hari-ini",
        "/api/report",
        "/api/report?start_date=2001-01-01&end_date=2001-01-31",
        "/api/report?start_date=2001-01-01",
        "/api/report?end_date=2001-01-31",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let report: Value = test::read_body_json(resp).await;
        assert_eq!(report["total_transaksi"], 0, "{uri}");
        assert_eq!(report["total_revenue"].as_f64(), Some(0.0), "{uri}");
        assert!(report["produk_terlaris"].is_null(), "{uri}");
    }
}

#[actix_web::test]
async fn invalid_report_ranges_are_rejected() {
    let db = support::init_test_db().await;
    let app = test_app!(db.pool);

    for uri in [
        "/api/report?start_date=kemarin&end_date=2026-01-31",
        "/api/report?start_date=2026-02-01&end_date=2026-01-01",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn product_crud() {
    let db = support::init_test_db().await;
    let makanan = support::seed_category(&db.pool, "Makanan").await;
    let minuman = support::seed_category(&db.pool, "Minuman").await;
    support::seed_product(&db.pool, makanan, "Mie Goreng", 3_500.0, 40).await;
    support::seed_product(&db.pool, minuman, "Es Teh", 5_000.0, 20).await;
    let app = test_app!(db.pool);

    let req = test::TestRequest::get().uri("/api/produk").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/produk?name=MIE").to_request();
    let filtered: Value = test::call_and_read_body_json(&app, req).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["name"], "Mie Goreng");

    let req = test::TestRequest::get().uri("/api/produk?name=sepatu").to_request();
    let none: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(none, json!([]));

    let req = test::TestRequest::post()
        .uri("/api/produk")
        .set_json(json!({ "name": "Kopi", "price": 8000.0, "stock": 10, "category_id": 999 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/produk")
        .set_json(json!({ "name": "Kopi", "price": -1.0, "stock": 10, "category_id": minuman }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/produk")
        .set_json(json!({ "name": "Kopi", "price": 8000.0, "stock": 10, "category_id": minuman }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/produk/{id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .set_json(json!({ "name": "Kopi Hitam", "price": 9000.0, "stock": 12, "category_id": minuman }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Kopi Hitam");
    assert_eq!(updated["price"].as_f64(), Some(9_000.0));
    assert_eq!(updated["stock"], 12);
    assert_eq!(updated["category"]["id"].as_i64(), Some(minuman));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/produk/{id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/produk/{id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/produk/{id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/produk/abc")
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn referenced_rows_cannot_be_deleted() {
    let db = support::init_test_db().await;
    let category = support::seed_category(&db.pool, "Snack").await;
    let product = support::seed_product(&db.pool, category, "Keripik", 10_000.0, 5).await;
    kasir_api::checkout::checkout(
        &db.pool,
        &[kasir_api::models::transaction::CheckoutItem {
            product_id: product,
            quantity: 1,
        }],
    )
    .await
    .expect("checkout");
    let app = test_app!(db.pool);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{category}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/produk/{product}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    assert_eq!(support::count_rows(&db.pool, "products").await, 1);
    assert_eq!(support::count_rows(&db.pool, "categories").await, 1);
}

#[actix_web::test]
async fn category_crud() {
    let db = support::init_test_db().await;
    let app = test_app!(db.pool);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({ "category": "Sembako" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["description"], "");

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({ "category": "Sembako" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({ "category": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/categories/{id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .set_json(json!({ "category": "Kebutuhan Pokok", "description": "Beras, gula, minyak" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["category"], "Kebutuhan Pokok");

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/categories/{id}"))
        .insert_header((API_KEY_HEADER, API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn system_routes_and_cors() {
    let db = support::init_test_db().await;
    let app = test_app!(db.pool);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let health: Value = test::read_body_json(resp).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"]["status"], "healthy");

    let req = test::TestRequest::get().uri("/").to_request();
    let info: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(info["name"], "Kasir API");
    assert!(info["endpoints"].as_array().unwrap().len() > 10);

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/checkout")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let allowed = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(allowed.contains("X-API-Key"));
}

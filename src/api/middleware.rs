use actix_web::body::{BoxBody, EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse, ResponseError};

use crate::errors::AppError;
use crate::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Compare the configured key with the one sent by the client.
/// No configured key disables the check.
pub fn check_api_key(expected: Option<&str>, provided: Option<&str>) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match provided.map(str::trim) {
        None | Some("") => Err(AppError::Auth("API Key required".into())),
        Some(key) if key != expected => Err(AppError::Auth("Invalid API Key".into())),
        Some(_) => Ok(()),
    }
}

/// Tolak request tanpa `X-API-Key` yang valid.
pub async fn require_api_key<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let expected = req
        .app_data::<web::Data<AppState>>()
        .and_then(|state| state.api_key.clone());
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(err) = check_api_key(expected.as_deref(), provided) {
        tracing::warn!(target: "http", path = %req.path(), "{}", err);
        let response = err.error_response();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

/// CORS headers on every response; preflight requests are answered directly.
pub async fn cors<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    if req.method() == Method::OPTIONS {
        let res = req.into_response(HttpResponse::NoContent().finish());
        return Ok(with_cors_headers(res));
    }

    let res = next.call(req).await?;
    Ok(with_cors_headers(res.map_into_boxed_body()))
}

fn with_cors_headers(mut res: ServiceResponse<BoxBody>) -> ServiceResponse<BoxBody> {
    let headers = res.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, X-API-Key"),
    );
    res
}

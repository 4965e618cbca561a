use axum::Json;
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;

use crate::api::rest::problem::Problem;

/// Handler result; the error arm renders as a problem document.
pub type ApiResult<T> = Result<T, Problem>;

pub type JsonBody<T> = Json<T>;

/// 201 Created with a `Location` pointing at the new resource.
pub fn created_json<T: serde::Serialize>(
    value: T,
    uri: &Uri,
    new_id: &str,
) -> impl IntoResponse + use<T> {
    let location = [uri.path().trim_end_matches('/'), new_id].join("/");
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(value),
    )
}

/// 204 No Content
#[must_use]
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

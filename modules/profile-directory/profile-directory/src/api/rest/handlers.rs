use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use profile_directory_sdk::ProfileId;
use serde_json::Value;
use utoipa::OpenApi;

use crate::api::rest::dto::{
    CreateProfileReq, LocationQuery, ProfileDto, SearchQuery, UpdateProfileReq,
};
use crate::api::rest::error::{domain_error_to_problem, invalid_id_problem, malformed_body_problem};
use crate::api::rest::openapi::ApiDoc;
use crate::api::rest::problem::Problem;
use crate::api::rest::response::{ApiResult, JsonBody, created_json, no_content};
use crate::domain::error::DomainError;
use crate::domain::schema;
use crate::domain::service::ProfilesService;

/// Strict decimal id: optional minus sign followed by digits, within `i32`.
fn parse_id(raw: &str, uri: &Uri) -> ApiResult<ProfileId> {
    if raw.starts_with('+') {
        return Err(invalid_id_problem(raw, uri.path()));
    }
    raw.parse::<ProfileId>()
        .map_err(|_| invalid_id_problem(raw, uri.path()))
}

fn decode_body(body: Result<Json<Value>, JsonRejection>, uri: &Uri) -> ApiResult<Value> {
    body.map(|Json(v)| v)
        .map_err(|rejection| malformed_body_problem(&rejection, uri.path()))
}

fn problem_at(uri: &Uri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

/// First value of `key` in the query string. Repeats and unknown keys are ignored.
fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn to_dtos(profiles: Vec<profile_directory_sdk::Profile>) -> Vec<ProfileDto> {
    profiles.into_iter().map(ProfileDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "profiles",
    responses(
        (status = 200, description = "All profiles", body = [ProfileDto]),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.list", skip_all)]
pub async fn list_profiles(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
) -> ApiResult<JsonBody<Vec<ProfileDto>>> {
    let profiles = svc.list_profiles().await.map_err(problem_at(&uri))?;
    Ok(Json(to_dtos(profiles)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(("id" = i32, Path, description = "Profile id")),
    responses(
        (status = 200, description = "The profile", body = ProfileDto),
        (status = 400, description = "Non-numeric id", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Unknown id", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.get", skip_all, fields(raw_id = %raw_id))]
pub async fn get_profile(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
    Path(raw_id): Path<String>,
) -> ApiResult<JsonBody<ProfileDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let profile = svc.get_profile(id).await.map_err(problem_at(&uri))?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "profiles",
    request_body = CreateProfileReq,
    responses(
        (status = 201, description = "Created", body = ProfileDto,
            headers(("Location" = String, description = "Path of the new profile"))),
        (status = 400, description = "Validation failed or malformed JSON", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.create", skip_all)]
pub async fn create_profile(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let value = decode_body(body, &uri)?;
    let new_profile = schema::validate_new_profile(&value).map_err(problem_at(&uri))?;
    let profile = svc
        .create_profile(new_profile)
        .await
        .map_err(problem_at(&uri))?;
    let id_str = profile.id.to_string();
    Ok(created_json(ProfileDto::from(profile), &uri, &id_str).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(("id" = i32, Path, description = "Profile id")),
    request_body = UpdateProfileReq,
    responses(
        (status = 200, description = "The merged profile", body = ProfileDto),
        (status = 400, description = "Non-numeric id, validation failed or malformed JSON", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Unknown id", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.update", skip_all, fields(raw_id = %raw_id))]
pub async fn update_profile(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<JsonBody<ProfileDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let value = decode_body(body, &uri)?;
    let patch = schema::validate_profile_patch(&value).map_err(problem_at(&uri))?;
    let profile = svc
        .update_profile(id, patch)
        .await
        .map_err(problem_at(&uri))?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(("id" = i32, Path, description = "Profile id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Non-numeric id", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Unknown id", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.delete", skip_all, fields(raw_id = %raw_id))]
pub async fn delete_profile(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&raw_id, &uri)?;
    svc.delete_profile(id).await.map_err(problem_at(&uri))?;
    Ok(no_content().into_response())
}

#[utoipa::path(
    get,
    path = "/api/profiles/search",
    tag = "profiles",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching profiles", body = [ProfileDto]),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.search", skip_all)]
pub async fn search_profiles(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<JsonBody<Vec<ProfileDto>>> {
    let profiles = svc
        .search_profiles(first_param(&pairs, "q"))
        .await
        .map_err(problem_at(&uri))?;
    Ok(Json(to_dtos(profiles)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/filter/location",
    tag = "profiles",
    params(LocationQuery),
    responses(
        (status = 200, description = "Profiles at the location", body = [ProfileDto]),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.filter_by_location", skip_all)]
pub async fn filter_profiles_by_location(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<JsonBody<Vec<ProfileDto>>> {
    let profiles = svc
        .filter_profiles_by_location(first_param(&pairs, "location"))
        .await
        .map_err(problem_at(&uri))?;
    Ok(Json(to_dtos(profiles)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/locations",
    tag = "profiles",
    responses(
        (status = 200, description = "Distinct locations, sorted", body = [String]),
        (status = 500, description = "Storage fault", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(name = "profiles.locations", skip_all)]
pub async fn list_locations(
    uri: Uri,
    Extension(svc): Extension<Arc<ProfilesService>>,
) -> ApiResult<JsonBody<Vec<String>>> {
    let locations = svc.list_locations().await.map_err(problem_at(&uri))?;
    Ok(Json(locations))
}

/// `PATCH`/`DELETE` on `search` or `locations`: the segment is a bad profile id.
#[tracing::instrument(name = "profiles.static_segment_as_id", skip_all)]
pub async fn static_segment_as_id(uri: Uri) -> Problem {
    let raw = uri.path().rsplit('/').next().unwrap_or_default();
    invalid_id_problem(raw, uri.path())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

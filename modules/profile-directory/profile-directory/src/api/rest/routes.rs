use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::ProfilesService;

/// Build the `/api` router.
///
/// Static segments (`search`, `filter/location`, `locations`) win over the
/// `{id}` capture, so they are never read as profile ids. The single-segment
/// ones still answer `PATCH`/`DELETE` with the invalid-id problem `{id}` would
/// have produced.
pub fn router(service: Arc<ProfilesService>) -> Router {
    Router::new()
        .route(
            "/api/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route(
            "/api/profiles/search",
            get(handlers::search_profiles)
                .patch(handlers::static_segment_as_id)
                .delete(handlers::static_segment_as_id),
        )
        .route(
            "/api/profiles/filter/location",
            get(handlers::filter_profiles_by_location),
        )
        .route(
            "/api/profiles/locations",
            get(handlers::list_locations)
                .patch(handlers::static_segment_as_id)
                .delete(handlers::static_segment_as_id),
        )
        .route(
            "/api/profiles/{id}",
            get(handlers::get_profile)
                .patch(handlers::update_profile)
                .delete(handlers::delete_profile),
        )
        .route("/api/openapi.json", get(handlers::openapi_json))
        .layer(Extension(service))
}

use utoipa::OpenApi;

use crate::api::rest::dto::{CreateProfileReq, ProfileDto, UpdateProfileReq};
use crate::api::rest::handlers;
use crate::api::rest::problem::{Problem, ValidationViolation};

#[derive(OpenApi)]
#[openapi(
    info(title = "Profile Directory API", description = "Browse, search and edit people profiles"),
    paths(
        handlers::list_profiles,
        handlers::get_profile,
        handlers::create_profile,
        handlers::update_profile,
        handlers::delete_profile,
        handlers::search_profiles,
        handlers::filter_profiles_by_location,
        handlers::list_locations,
    ),
    components(schemas(
        ProfileDto,
        CreateProfileReq,
        UpdateProfileReq,
        Problem,
        ValidationViolation
    )),
    tags((name = "profiles", description = "Profile directory operations"))
)]
pub struct ApiDoc;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use profile_directory_sdk::{NewProfile, NewUser, Profile, ProfileId, ProfilePatch, User, UserId};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api::rest::dto::CreateProfileReq;
use crate::api::rest::problem::APPLICATION_PROBLEM_JSON;
use crate::api::rest::routes;
use crate::domain::error::DomainError;
use crate::domain::repo::ProfileStore;
use crate::domain::service::ProfilesService;
use crate::test_support::seeded_router;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn count(app: &Router) -> usize {
    let resp = send(app, "GET", "/api/profiles", None).await;
    json_body(resp).await.as_array().unwrap().len()
}

fn create_req() -> CreateProfileReq {
    CreateProfileReq {
        name: "Grace Hopper".to_owned(),
        title: "Rear Admiral".to_owned(),
        company: "US Navy".to_owned(),
        location: "Arlington".to_owned(),
        description: "Compiler pioneer".to_owned(),
        email: "grace@example.com".to_owned(),
        phone: None,
        website: Some("https://example.com/grace".to_owned()),
        linkedin: None,
        experience: Some("40+ years".to_owned()),
        latitude: 38.88,
        longitude: -77.1,
        image_url: "https://example.com/grace.jpg".to_owned(),
    }
}

fn assert_problem(resp: &Response, status: StatusCode) {
    assert_eq!(resp.status(), status);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        APPLICATION_PROBLEM_JSON
    );
}

#[tokio::test]
async fn list_returns_seeded_profiles_in_id_order() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/profiles", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(body[0]["name"], "John Doe");
    assert!(body[0].get("imageUrl").is_some());
}

#[tokio::test]
async fn get_by_id() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/profiles/3", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["location"], "London");
}

#[tokio::test]
async fn get_rejects_non_numeric_ids() {
    let app = seeded_router();

    for raw in ["abc", "1.5", "+1", "99999999999"] {
        let resp = send(&app, "GET", &format!("/api/profiles/{raw}"), None).await;
        assert_problem(&resp, StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["detail"], "Invalid profile ID", "id {raw}");
        assert_eq!(body["code"], "profile_directory.invalid_id");
    }
}

#[tokio::test]
async fn get_unknown_is_404() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/profiles/999", None).await;
    assert_problem(&resp, StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["code"], "profile_directory.profile_not_found");
    assert_eq!(body["instance"], "/api/profiles/999");
}

#[tokio::test]
async fn create_returns_201_with_location() {
    let app = seeded_router();

    let resp = send(
        &app,
        "POST",
        "/api/profiles",
        Some(serde_json::to_value(create_req()).unwrap()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/api/profiles/5"
    );

    let body = json_body(resp).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["name"], "Grace Hopper");
    assert_eq!(body["phone"], Value::Null);

    let fetched = json_body(send(&app, "GET", "/api/profiles/5", None).await).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = seeded_router();
    let mut payload = serde_json::to_value(create_req()).unwrap();
    payload["id"] = json!(1);

    let resp = send(&app, "POST", "/api/profiles", Some(payload)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json_body(resp).await["id"], 5);
}

#[tokio::test]
async fn create_with_out_of_range_latitude_names_the_field() {
    let app = seeded_router();
    let before = count(&app).await;

    let mut payload = serde_json::to_value(create_req()).unwrap();
    payload["latitude"] = json!(200);

    let resp = send(&app, "POST", "/api/profiles", Some(payload)).await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["code"], "profile_directory.validation");
    assert!(body["detail"].as_str().unwrap().contains("latitude"));
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "latitude");

    assert_eq!(count(&app).await, before);
}

#[tokio::test]
async fn create_reports_every_violation() {
    let app = seeded_router();

    let resp = send(
        &app,
        "POST",
        "/api/profiles",
        Some(json!({ "name": "", "latitude": "north" })),
    )
    .await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_owned())
        .collect();
    assert!(fields.contains(&"name".to_owned()));
    assert!(fields.contains(&"latitude".to_owned()));
    assert!(fields.contains(&"email".to_owned()));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = seeded_router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/profiles")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_problem(&resp, StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["code"], "profile_directory.malformed_body");
}

#[tokio::test]
async fn patch_updates_single_field() {
    let app = seeded_router();
    let before = json_body(send(&app, "GET", "/api/profiles/2", None).await).await;

    let resp = send(
        &app,
        "PATCH",
        "/api/profiles/2",
        Some(json!({ "company": "Studio North" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let after = json_body(resp).await;

    assert_eq!(after["company"], "Studio North");
    let mut expected = before;
    expected["company"] = json!("Studio North");
    assert_eq!(after, expected);
}

#[tokio::test]
async fn patch_null_clears_optional_field() {
    let app = seeded_router();

    let resp = send(&app, "PATCH", "/api/profiles/1", Some(json!({ "phone": null }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["phone"], Value::Null);
}

#[tokio::test]
async fn patch_validation_and_not_found() {
    let app = seeded_router();

    let resp = send(
        &app,
        "PATCH",
        "/api/profiles/1",
        Some(json!({ "longitude": 181 })),
    )
    .await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["errors"][0]["field"], "longitude");

    let snapshot = json_body(send(&app, "GET", "/api/profiles", None).await).await;
    let resp = send(
        &app,
        "PATCH",
        "/api/profiles/999",
        Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_problem(&resp, StatusCode::NOT_FOUND);
    let after = json_body(send(&app, "GET", "/api/profiles", None).await).await;
    assert_eq!(snapshot, after);

    let resp = send(&app, "PATCH", "/api/profiles/x", Some(json!({}))).await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = seeded_router();

    let resp = send(&app, "DELETE", "/api/profiles/4", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, "GET", "/api/profiles/4", None).await;
    assert_problem(&resp, StatusCode::NOT_FOUND);

    let resp = send(&app, "DELETE", "/api/profiles/4", None).await;
    assert_problem(&resp, StatusCode::NOT_FOUND);

    let resp = send(&app, "DELETE", "/api/profiles/four", None).await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_is_not_shadowed_by_id_route() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/profiles/search?q=data", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_owned())
        .collect();
    assert!(names.contains(&"Sarah Martinez".to_owned()));

    let all = send(&app, "GET", "/api/profiles/search", None).await;
    assert_eq!(json_body(all).await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn filter_by_location_is_exact_and_case_insensitive() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/profiles/filter/location?location=london", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Michael Chang");

    let resp = send(&app, "GET", "/api/profiles/filter/location?location=Lon", None).await;
    assert!(json_body(resp).await.as_array().unwrap().is_empty());

    let resp = send(&app, "GET", "/api/profiles/filter/location?location=", None).await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn locations_are_distinct_and_sorted() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/profiles/locations", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!(["Berlin", "London", "New York", "San Francisco"])
    );
}

#[tokio::test]
async fn repeated_query_parameters_use_the_first_value() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/profiles/search?q=data&q=zzz", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["Michael Chang", "Sarah Martinez"]);

    let resp = send(&app, "GET", "/api/profiles/search?q=a&q=b&extra=1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        &app,
        "GET",
        "/api/profiles/filter/location?location=London&location=Berlin",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Michael Chang");
}

#[tokio::test]
async fn mutating_static_segments_is_an_invalid_id() {
    let app = seeded_router();

    for (method, segment) in [
        ("PATCH", "search"),
        ("DELETE", "search"),
        ("PATCH", "locations"),
        ("DELETE", "locations"),
    ] {
        let uri = format!("/api/profiles/{segment}");
        let body = (method == "PATCH").then(|| json!({ "title": "x" }));
        let resp = send(&app, method, &uri, body).await;
        assert_problem(&resp, StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["detail"], "Invalid profile ID", "{method} {uri}");
        assert_eq!(body["code"], "profile_directory.invalid_id");
        assert_eq!(body["instance"], uri);
    }
    assert_eq!(count(&app).await, 4);
}

#[tokio::test]
async fn openapi_document_lists_profile_paths() {
    let app = seeded_router();

    let resp = send(&app, "GET", "/api/openapi.json", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await;
    assert!(doc["paths"].get("/api/profiles").is_some());
    assert!(doc["paths"].get("/api/profiles/{id}").is_some());
    assert!(doc["paths"].get("/api/profiles/search").is_some());
    assert!(doc["components"]["schemas"].get("ProfileDto").is_some());
}

struct FailingStore;

#[async_trait]
impl ProfileStore for FailingStore {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        Err(DomainError::database("disk I/O error at /var/lib/profiles.db"))
    }
    async fn get_profile(&self, _id: ProfileId) -> Result<Option<Profile>, DomainError> {
        Err(DomainError::database("disk I/O error"))
    }
    async fn create_profile(&self, _p: NewProfile) -> Result<Profile, DomainError> {
        Err(DomainError::database("disk I/O error"))
    }
    async fn update_profile(
        &self,
        _id: ProfileId,
        _patch: ProfilePatch,
    ) -> Result<Option<Profile>, DomainError> {
        Err(DomainError::database("disk I/O error"))
    }
    async fn delete_profile(&self, _id: ProfileId) -> Result<bool, DomainError> {
        Err(DomainError::database("disk I/O error"))
    }
    async fn get_user(&self, _id: UserId) -> Result<Option<User>, DomainError> {
        Ok(None)
    }
    async fn get_user_by_username(&self, _username: &str) -> Result<Option<User>, DomainError> {
        Ok(None)
    }
    async fn create_user(&self, _u: NewUser) -> Result<User, DomainError> {
        Err(DomainError::database("disk I/O error"))
    }
}

#[tokio::test]
#[tracing_test::traced_test]
async fn storage_fault_is_500_without_details() {
    let app = routes::router(Arc::new(ProfilesService::new(Arc::new(FailingStore))));

    for uri in [
        "/api/profiles",
        "/api/profiles/1",
        "/api/profiles/search?q=a",
        "/api/profiles/locations",
    ] {
        let resp = send(&app, "GET", uri, None).await;
        assert_problem(&resp, StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(resp).await;
        assert!(!body["detail"].as_str().unwrap().contains("disk"), "{uri}");
    }

    assert!(logs_contain("Database error occurred"));
}

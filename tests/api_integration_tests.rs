//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cat_tracker::{create_router, AppState, CatStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const IMAGE: &str = "https://images.unsplash.com/photo-1529778873920-4da4926a72c2";

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::new(CatStore::new()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn felix() -> Value {
    json!({
        "cat": {
            "name": "Felix",
            "age": 2,
            "enjoys": "Long naps on the couch, and a warm fire.",
            "image": IMAGE
        }
    })
}

/// Creates Felix and returns the response body.
async fn create_felix(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/cats", felix()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

async fn list_cats(app: &Router) -> Vec<Value> {
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/cats"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body())
        .await
        .as_array()
        .cloned()
        .unwrap()
}

// == Index Endpoint Tests ==

#[tokio::test]
async fn test_index_empty() {
    let app = create_test_app();
    assert!(list_cats(&app).await.is_empty());
}

#[tokio::test]
async fn test_index_lists_created_cats() {
    let app = create_test_app();
    for _ in 0..3 {
        create_felix(&app).await;
    }

    let cats = list_cats(&app).await;
    assert_eq!(cats.len(), 3);
    let ids: Vec<u64> = cats.iter().map(|c| c["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_returns_record() {
    let app = create_test_app();

    let cat = create_felix(&app).await;
    assert_eq!(cat["id"], 1);
    assert_eq!(cat["name"], "Felix");
    assert_eq!(cat["age"], 2);
    assert_eq!(cat["enjoys"], "Long naps on the couch, and a warm fire.");
    assert_eq!(cat["image"], IMAGE);
    assert!(cat["created_at"].is_string());
}

#[tokio::test]
async fn test_create_without_image() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/cats",
            json!({"cat": {"name": "Tobey", "age": "6", "enjoys": "teasing the dogs"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cat = body_to_json(response.into_body()).await;
    assert_eq!(cat["age"], 6);
    assert!(cat["image"].is_null());
}

#[tokio::test]
async fn test_create_missing_each_required_field() {
    for field in ["name", "age", "enjoys"] {
        let app = create_test_app();
        let mut body = felix();
        body["cat"].as_object_mut().unwrap().remove(field);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/cats", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{field}");
        let errors = body_to_json(response.into_body()).await;
        assert_eq!(errors[field], json!(["can't be blank"]), "{field}");
        assert_eq!(errors.as_object().unwrap().len(), 1, "{field}");
        assert!(list_cats(&app).await.is_empty());
    }
}

#[tokio::test]
async fn test_create_all_blank_reports_every_field() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/cats",
            json!({"cat": {"name": "", "age": null, "enjoys": "   "}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body_to_json(response.into_body()).await;
    assert_eq!(
        errors,
        json!({
            "age": ["can't be blank"],
            "enjoys": ["can't be blank"],
            "name": ["can't be blank"]
        })
    );
}

#[tokio::test]
async fn test_create_missing_envelope() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/cats",
            json!({"name": "Felix", "age": 2, "enjoys": "naps"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "param is missing or the value is empty: cat");
}

#[tokio::test]
async fn test_create_invalid_json() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cats")
                .header("content-type", "application/json")
                .body(Body::from("not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_create_without_content_type() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cats")
                .body(Body::from(felix().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_create_casts_scalar_attributes() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/cats",
            json!({"cat": {"name": 5, "age": "2.5", "enjoys": "naps", "image": 42}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cat = body_to_json(response.into_body()).await;
    assert_eq!(cat["name"], "5");
    assert_eq!(cat["age"], 2);
    assert_eq!(cat["image"], "42");
}

#[tokio::test]
async fn test_create_structured_attributes_report_field_map() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/cats",
            json!({"cat": {"name": {"first": "Felix"}, "age": [2], "enjoys": "naps"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body_to_json(response.into_body()).await;
    assert_eq!(
        errors,
        json!({"age": ["can't be blank"], "name": ["can't be blank"]})
    );
}

#[tokio::test]
async fn test_non_object_or_empty_envelope_is_missing() {
    let app = create_test_app();

    for body in [
        json!({"cat": "Felix"}),
        json!({"cat": {}}),
        json!({"cat": 7}),
        json!(["Felix"]),
        json!("Felix"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/cats", body.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["error"], "param is missing or the value is empty: cat");
    }
}

#[tokio::test]
async fn test_update_with_empty_envelope_leaves_record() {
    let app = create_test_app();
    let created = create_felix(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("PATCH", "/cats/1", json!({"cat": {}})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(list_cats(&app).await[0]["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn test_update_accepts_negative_age() {
    let app = create_test_app();
    create_felix(&app).await;

    let response = app
        .oneshot(json_request("PATCH", "/cats/1", json!({"cat": {"age": -1}})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["age"], -1);
}

// == Show Endpoint Tests ==

#[tokio::test]
async fn test_show_existing() {
    let app = create_test_app();
    let created = create_felix(&app).await;

    let response = app
        .oneshot(empty_request("GET", "/cats/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, created);
}

#[tokio::test]
async fn test_show_unknown_and_malformed_ids() {
    let app = create_test_app();

    for uri in ["/cats/1", "/cats/felix", "/cats/-3"] {
        let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

// == Update Endpoint Tests ==

#[tokio::test]
async fn test_update_age() {
    let app = create_test_app();
    create_felix(&app).await;

    let mut body = felix();
    body["cat"]["age"] = json!(3);
    let response = app
        .clone()
        .oneshot(json_request("PATCH", "/cats/1", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["age"], 3);

    let response = app
        .oneshot(empty_request("GET", "/cats/1"))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["age"], 3);
}

#[tokio::test]
async fn test_partial_update_via_put() {
    let app = create_test_app();
    create_felix(&app).await;

    let response = app
        .oneshot(json_request("PUT", "/cats/1", json!({"cat": {"enjoys": "yarn"}})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cat = body_to_json(response.into_body()).await;
    assert_eq!(cat["enjoys"], "yarn");
    assert_eq!(cat["name"], "Felix");
    assert_eq!(cat["age"], 2);
}

#[tokio::test]
async fn test_update_blank_field() {
    let app = create_test_app();
    create_felix(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("PATCH", "/cats/1", json!({"cat": {"name": ""}})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body_to_json(response.into_body()).await;
    assert_eq!(errors["name"], json!(["can't be blank"]));

    assert_eq!(list_cats(&app).await[0]["name"], "Felix");
}

#[tokio::test]
async fn test_update_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PATCH", "/cats/42", felix()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Couldn't find Cat with 'id'=42");
}

// == Delete Endpoint Tests ==

#[tokio::test]
async fn test_delete_success() {
    let app = create_test_app();
    create_felix(&app).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/cats/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["name"], "Felix");
    assert!(list_cats(&app).await.is_empty());
}

#[tokio::test]
async fn test_delete_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request("DELETE", "/cats/7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Lifecycle ==

#[tokio::test]
async fn test_create_update_delete_lifecycle() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/cats",
            json!({"cat": {"name": "Felix", "age": 2, "enjoys": "naps"}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_to_json(response.into_body()).await["id"].as_u64().unwrap();
    assert_eq!(list_cats(&app).await.len(), 1);

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/cats/{id}"),
            json!({"cat": {"age": 3}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/cats/{id}")))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["age"], 3);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/cats/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(list_cats(&app).await.is_empty());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();
    create_felix(&app).await;

    let response = app
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["cats"], 1);
}

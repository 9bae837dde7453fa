//! Route table

use axum::{routing::get, Router};

use crate::{
    handlers::{hub_client, role},
    health,
    state::AppState,
};

/// Full application router: health probes plus the `/api` collections
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::readiness))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hub_clients",
            get(hub_client::list).post(hub_client::create),
        )
        .route("/hub_clients/paginate", get(hub_client::paginate))
        .route(
            "/hub_clients/{id}",
            get(hub_client::show)
                .put(hub_client::update)
                .delete(hub_client::destroy),
        )
        .route("/roles", get(role::list).post(role::create))
        .route("/roles/paginate", get(role::paginate))
        .route(
            "/roles/{id}",
            get(role::show).put(role::update).delete(role::destroy),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_role(app: &Router, name: &str, slug: &str) -> Value {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/roles",
            Some(json!({"name": name, "slug": slug})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    #[tokio::test]
    async fn test_create_and_fetch_hub_client() {
        let app = router(AppState::in_memory());

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/hub_clients",
            Some(json!({"name": "Acme", "external_id": 42})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Acme");
        assert_eq!(created["external_id"], 42);
        assert_eq!(created["active"], true);
        assert!(created.get("is_deleted").is_none());
        assert!(created.get("deleted_at").is_none());
        assert!(created["created_at"].is_string());

        let uri = format!("/api/hub_clients/{}", created["id"]);
        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_external_id_is_409() {
        let app = router(AppState::in_memory());
        let payload = json!({"name": "Acme", "external_id": 42});

        send(&app, Method::POST, "/api/hub_clients", Some(payload.clone())).await;
        let (status, body) = send(&app, Method::POST, "/api/hub_clients", Some(payload)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            json!({
                "status": 409,
                "code": "duplicate_entry",
                "message": "A record with this value already exists"
            })
        );
    }

    #[tokio::test]
    async fn test_create_validation_failure_is_422() {
        let app = router(AppState::in_memory());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/hub_clients",
            Some(json!({"name": "Ac"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "validation_failed");
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(
            body["details"],
            json!([
                {"field": "external_id", "tag": "required", "value": ""},
                {"field": "name", "tag": "length", "value": "Ac"}
            ])
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let app = router(AppState::in_memory());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/roles")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Invalid request body");
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let app = router(AppState::in_memory());
        let (status, body) = send(&app, Method::GET, "/api/roles/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid ID format");
        assert_eq!(body["details"], json!({"field": "id", "value": "abc"}));
    }

    #[tokio::test]
    async fn test_put_missing_id_is_404() {
        let app = router(AppState::in_memory());
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/hub_clients/999",
            Some(json!({"name": "Nobody"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], "Record not found");
    }

    #[tokio::test]
    async fn test_put_applies_partial_update() {
        let app = router(AppState::in_memory());
        let created = create_role(&app, "Editor", "editor").await;

        let uri = format!("/api/roles/{}", created["id"]);
        let (status, updated) =
            send(&app, Method::PUT, &uri, Some(json!({"active": false}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Editor");
        assert_eq!(updated["slug"], "editor");
        assert_eq!(updated["active"], false);
    }

    #[tokio::test]
    async fn test_delete_soft_deletes_then_404s() {
        let app = router(AppState::in_memory());
        let created = create_role(&app, "Editor", "editor").await;
        let uri = format!("/api/roles/{}", created["id"]);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_role_search_sorted_desc() {
        let app = router(AppState::in_memory());
        create_role(&app, "Administrator", "admin").await;
        create_role(&app, "Editor", "editor").await;
        create_role(&app, "Viewer", "viewer-adm").await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/roles?search=ADM&sort_field=name&sort_order=DESC",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|role| role["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Viewer", "Administrator"]);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_sort_field() {
        let app = router(AppState::in_memory());
        let (status, body) =
            send(&app, Method::GET, "/api/roles?sort_field=external_id", None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "sort_field");
        assert_eq!(body["details"][0]["tag"], "oneof");
        assert_eq!(body["details"][0]["value"], "external_id");
        assert_eq!(
            body["details"][0]["allowed_values"],
            json!(["id", "name", "slug", "active", "created_at", "updated_at"])
        );
    }

    #[tokio::test]
    async fn test_list_ignores_unparseable_active() {
        let app = router(AppState::in_memory());
        create_role(&app, "Editor", "editor").await;

        let (status, body) = send(&app, Method::GET, "/api/roles?active=perhaps", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_paginate_envelope() {
        let app = router(AppState::in_memory());
        for i in 1..=5 {
            send(
                &app,
                Method::POST,
                "/api/hub_clients",
                Some(json!({"name": format!("Client {i}"), "external_id": i})),
            )
            .await;
        }

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/hub_clients/paginate?page=2&page_size=2",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["external_id"], 3);

        let meta = &body["meta"];
        assert_eq!(meta["total"], 5);
        assert_eq!(meta["current_page"], 2);
        assert_eq!(meta["per_page"], 2);
        assert_eq!(meta["total_pages"], 3);
        assert_eq!(meta["previous"], 1);
        assert_eq!(meta["next"], 3);
        assert_eq!(meta["has_more"], true);
        assert_eq!(meta["has_previous"], true);
        assert_eq!(meta["next_page_url"], "?page=3&page_size=2");
        assert_eq!(meta["previous_page_url"], "?page=1&page_size=2");
    }

    #[tokio::test]
    async fn test_paginate_bounds_are_validated() {
        let app = router(AppState::in_memory());
        let (status, body) = send(
            &app,
            Method::GET,
            "/api/roles/paginate?page=0&page_size=500",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["page", "page_size"]);
    }

    #[tokio::test]
    async fn test_paginate_non_numeric_page_uses_default() {
        let app = router(AppState::in_memory());
        let (status, body) =
            send(&app, Method::GET, "/api/roles/paginate?page=abc", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["current_page"], 1);
        assert_eq!(body["meta"]["per_page"], 10);
        assert_eq!(body["meta"]["is_empty"], true);
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let app = router(AppState::in_memory());

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&app, Method::GET, "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
    }
}

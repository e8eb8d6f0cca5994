pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::context::handlers as context;
use crate::generation::handlers as generation;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::view::handlers as view;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // State container
        .route("/api/v1/state", get(context::handle_get_state))
        .route("/api/v1/actions", post(context::handle_dispatch))
        // View router
        .route(
            "/api/v1/view",
            get(view::handle_get_view).put(view::handle_set_view),
        )
        .route("/api/v1/dashboard", get(view::handle_dashboard))
        // Form editors
        .route("/api/v1/portfolio", get(context::handle_get_portfolio))
        .route(
            "/api/v1/portfolio/analysis",
            get(context::handle_get_analysis),
        )
        .route(
            "/api/v1/portfolio/personal-info",
            patch(context::handle_patch_personal_info),
        )
        .route(
            "/api/v1/portfolio/summary",
            patch(context::handle_patch_summary),
        )
        .route("/api/v1/portfolio/export", get(context::handle_export))
        .route("/api/v1/portfolio/import", post(context::handle_import))
        .route(
            "/api/v1/portfolio/:section",
            get(context::handle_list_section).post(context::handle_add_record),
        )
        .route(
            "/api/v1/portfolio/:section/:id",
            patch(context::handle_update_record)
                .delete(context::handle_delete_record),
        )
        // Discovery chat
        .route(
            "/api/v1/chat",
            get(chat::handle_get_chat).delete(chat::handle_clear_chat),
        )
        .route("/api/v1/chat/messages", post(chat::handle_send_message))
        .route("/api/v1/chat/continue", post(chat::handle_continue))
        // Resume generation
        .route("/api/v1/resumes/catalog", get(generation::handle_catalog))
        .route("/api/v1/resumes/templates", get(generation::handle_templates))
        .route(
            "/api/v1/resumes/wizard/check",
            post(generation::handle_step_check),
        )
        .route(
            "/api/v1/resumes/wizard/selection",
            post(generation::handle_edit_selection),
        )
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        .route("/api/v1/resumes/jd/analyze", post(generation::handle_analyze_jd))
        .route("/api/v1/resumes/tailor", post(generation::handle_tailor))
        // Resume manager
        .route("/api/v1/resumes", get(resumes::handle_list_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/select",
            post(resumes::handle_select_resume),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(resumes::handle_download_resume),
        )
        .route(
            "/api/v1/resumes/:id/duplicate",
            post(resumes::handle_duplicate_resume),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::for_tests())
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "zcv");
    }

    #[tokio::test]
    async fn test_action_endpoint_dispatches_tagged_actions() {
        let app = app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/actions",
            Some(json!({ "type": "ADD_SKILL", "payload": { "name": "Rust" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["portfolio"]["skills"][0]["name"], "Rust");
        assert_eq!(body["portfolio"]["completeness"], 10);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/actions",
            Some(json!({ "type": "ADD_SKILL", "payload": { "name": "Rust" } })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_section_crud() {
        let app = app();
        let (status, created) = call(
            &app,
            Method::POST,
            "/api/v1/portfolio/experiences",
            Some(json!({ "title": "Engineer", "achievements": ["Cut costs 20%", ""] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["achievements"], json!(["Cut costs 20%"]));

        let (status, updated) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/portfolio/experiences/{id}"),
            Some(json!({ "company": "Acme", "id": "hijack" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["company"], "Acme");

        let (_, portfolio) = call(&app, Method::GET, "/api/v1/portfolio", None).await;
        assert_eq!(portfolio["completeness"], 25);

        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/portfolio/experiences/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/portfolio/experiences/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_section_is_not_found() {
        let (status, _) = call(&app(), Method::GET, "/api/v1/portfolio/hobbies", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_view_round_trip_and_dashboard() {
        let app = app();
        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/v1/view",
            Some(json!({ "view": "resume-manager" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "resume-manager");

        let (_, body) = call(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(body["nextStep"]["targetView"], "chat");
        assert_eq!(body["insights"][0]["title"], "Start with AI Discovery");
    }

    #[tokio::test]
    async fn test_generate_download_and_duplicate() {
        let app = app();
        call(
            &app,
            Method::PATCH,
            "/api/v1/portfolio/personal-info",
            Some(json!({ "name": "Ada" })),
        )
        .await;
        let (_, exp) = call(
            &app,
            Method::POST,
            "/api/v1/portfolio/experiences",
            Some(json!({ "title": "Engineer", "achievements": ["Shipped 3 services"] })),
        )
        .await;

        let (status, resume) = call(
            &app,
            Method::POST,
            "/api/v1/resumes/generate",
            Some(json!({
                "role": "sde",
                "template": "tech",
                "content": { "experiences": [exp["id"].clone()] }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resume["type"], "role-based");
        let id = resume["id"].as_str().unwrap().to_string();

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/resumes/{id}/download"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains(".tex"));
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Shipped 3 services"));

        let (_, fetched) = call(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(fetched["downloadCount"], 1);

        let (status, copy) = call(
            &app,
            Method::POST,
            &format!("/api/v1/resumes/{id}/duplicate"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(copy["parentResumeId"], id.as_str());
        assert_eq!(copy["downloadCount"], 0);

        let (_, list) = call(&app, Method::GET, "/api/v1/resumes?sort=downloads", None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
        assert_eq!(list[0]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_import_then_export() {
        let app = app();
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/portfolio/import")
                    .body(Body::from(
                        json!({
                            "personalInfo": { "name": "Grace" },
                            "skills": [{ "name": "COBOL" }],
                            "completeness": 99
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/portfolio/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let disposition = resp.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Grace_"));
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let exported: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(exported["completeness"], 15);
    }
}

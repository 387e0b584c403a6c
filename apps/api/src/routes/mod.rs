pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::ats::handlers as ats;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless scoring
        .route("/api/v1/ats/score", post(ats::handle_score))
        .route("/api/v1/ats/diff", post(ats::handle_diff))
        .route("/api/v1/job-analysis", post(analysis::handle_job_analysis))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/edits",
            post(sessions::handle_apply_edit),
        )
        .route(
            "/api/v1/sessions/:id/report",
            get(sessions::handle_session_report),
        )
        .route("/api/v1/sessions/:id/preview", get(sessions::handle_preview))
        .route(
            "/api/v1/sessions/:id/navigate",
            post(sessions::handle_navigate),
        )
        .route("/api/v1/sessions/:id/back", post(sessions::handle_back))
        .route("/api/v1/sessions/:id/home", post(sessions::handle_home))
        .route(
            "/api/v1/sessions/:id/preferences",
            put(sessions::handle_preferences),
        )
        .route(
            "/api/v1/sessions/:id/job-analysis",
            post(analysis::handle_session_job_analysis),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use chrono::Duration;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::analysis::job_analyzer::KeywordJobAnalyzer;
    use crate::config::Config;
    use crate::session::store::SessionStore;

    fn app_with_capacity(max_sessions: usize) -> Router {
        let config = Config {
            max_sessions,
            ..Config::default()
        };
        build_router(AppState {
            sessions: SessionStore::new(
                config.max_sessions,
                Duration::seconds(config.session_ttl_secs),
            ),
            config,
            analyzer: Arc::new(KeywordJobAnalyzer),
        })
    }

    fn app() -> Router {
        app_with_capacity(16)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.expect("route executes")
    }

    async fn read_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    async fn create_session(app: &Router) -> String {
        let response = send(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await["id"].as_str().unwrap().to_string()
    }

    async fn edit(app: &Router, id: &str, edit: Value) -> Value {
        let response = send(
            app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(edit),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app();
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["active_sessions"], 0);
        assert_eq!(body["max_sessions"], 16);
    }

    #[tokio::test]
    async fn stateless_score_of_empty_profile_is_20() {
        let app = app();
        let response = send(&app, Method::POST, "/api/v1/ats/score", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["overall_score"], 20);
        assert_eq!(body["status"], "poor");
        assert_eq!(body["categories"].as_array().unwrap().len(), 6);
        assert_eq!(body["categories"][0]["category"], "contact_information");
    }

    #[tokio::test]
    async fn stateless_diff_reports_overall_change() {
        let app = app();
        let empty = read_json(send(&app, Method::POST, "/api/v1/ats/score", Some(json!({}))).await).await;
        let named = read_json(
            send(
                &app,
                Method::POST,
                "/api/v1/ats/score",
                Some(json!({"personal_info": {"full_name": "Ayesha Rahman"}})),
            )
            .await,
        )
        .await;

        let response = send(
            &app,
            Method::POST,
            "/api/v1/ats/diff",
            Some(json!({"previous": empty, "current": named})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["overall_change"], 9);
    }

    #[tokio::test]
    async fn session_edit_flow_updates_profile_and_report() {
        let app = app();
        let id = create_session(&app).await;

        let body = edit(
            &app,
            &id,
            json!({"op": "set_personal_field", "field": "full_name", "value": "Ayesha Rahman"}),
        )
        .await;
        assert_eq!(body["profile"]["personal_info"]["full_name"], "Ayesha Rahman");
        assert_eq!(body["report"]["overall_score"], 29);
        assert_eq!(body["delta"]["overall_change"], 9);

        let body = edit(&app, &id, json!({"op": "add_entry", "section": "experience"})).await;
        let exp_id = body["created_id"].as_str().unwrap().to_string();

        let body = edit(
            &app,
            &id,
            json!({
                "op": "update_experience",
                "id": exp_id,
                "patch": {"start_date": "2021-01-01", "end_date": "2022-01-01"}
            }),
        )
        .await;
        assert_eq!(body["profile"]["experience"][0]["duration"], "1 year");

        let response = send(&app, Method::GET, &format!("/api/v1/sessions/{id}/report"), None).await;
        let report = read_json(response).await;
        assert_eq!(report["overall_score"], body["report"]["overall_score"]);
    }

    #[tokio::test]
    async fn edit_with_unknown_entry_is_404_and_leaves_profile() {
        let app = app();
        let id = create_session(&app).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({"op": "remove_entry", "section": "awards", "id": Uuid::new_v4()})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["error"]["code"], "NOT_FOUND");

        let session = read_json(send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await).await;
        assert!(session["profile"]["awards"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn permanent_address_edit_rejected_while_mirrored() {
        let app = app();
        let id = create_session(&app).await;
        edit(
            &app,
            &id,
            json!({"op": "set_present_address", "address": {"district": "Dhaka"}}),
        )
        .await;
        edit(&app, &id, json!({"op": "set_same_as_present_address", "same": true})).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({"op": "set_permanent_address", "address": {"district": "Sylhet"}})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let session = read_json(send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await).await;
        let info = &session["profile"]["personal_info"];
        assert_eq!(info["permanent_address"]["district"], "Dhaka");
        assert_eq!(info["present_address"], info["permanent_address"]);
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let app = app();
        let response = send(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn session_capacity_is_enforced() {
        let app = app_with_capacity(1);
        create_session(&app).await;
        let response = send(&app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn delete_session_then_get_is_404() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}");

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn navigation_back_and_home() {
        let app = app();
        let id = create_session(&app).await;

        for step in ["build", "preview"] {
            send(
                &app,
                Method::POST,
                &format!("/api/v1/sessions/{id}/navigate"),
                Some(json!({"step": step})),
            )
            .await;
        }

        let view = read_json(send(&app, Method::POST, &format!("/api/v1/sessions/{id}/back"), None).await).await;
        assert_eq!(view["current_step"], "build");
        assert_eq!(view["history"], json!(["style", "build"]));

        let view = read_json(send(&app, Method::POST, &format!("/api/v1/sessions/{id}/home"), None).await).await;
        assert_eq!(view["current_step"], "style");
        assert_eq!(view["history"], json!(["style"]));
    }

    #[tokio::test]
    async fn preferences_update_theme_and_language() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/preferences");

        let response = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"theme": "classic", "language": "bn"})),
        )
        .await;
        let view = read_json(response).await;
        assert_eq!(view["theme"], "classic");
        assert_eq!(view["language"], "bn");

        let response = send(&app, Method::PUT, &uri, Some(json!({"theme": "  "}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn preview_returns_markdown() {
        let app = app();
        let id = create_session(&app).await;
        edit(
            &app,
            &id,
            json!({"op": "set_personal_field", "field": "full_name", "value": "Ayesha Rahman"}),
        )
        .await;

        let response = send(&app, Method::GET, &format!("/api/v1/sessions/{id}/preview"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/markdown; charset=utf-8"
        );
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        assert!(String::from_utf8(body.to_vec()).unwrap().starts_with("# Ayesha Rahman"));
    }

    #[tokio::test]
    async fn session_job_analysis_uses_profile_skills() {
        let app = app();
        let id = create_session(&app).await;
        edit(&app, &id, json!({"op": "add_skill", "category": "technical"})).await;
        edit(
            &app,
            &id,
            json!({"op": "update_skill", "category": "technical", "index": 0, "value": "Python"}),
        )
        .await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/job-analysis"),
            Some(json!({"job_description": "We use Python and Docker"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let analysis = read_json(response).await;
        assert_eq!(analysis["matching_skills"], json!(["Python"]));
        assert_eq!(analysis["missing_skills"], json!(["Docker"]));
    }

    #[tokio::test]
    async fn blank_job_description_is_400() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/job-analysis",
            Some(json!({"job_description": ""})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }
}

//! Axum router configuration with middleware.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the gateway router.
///
/// The run-task callback lands on `POST /` (the gateway fronts a single
/// run task, as a Lambda function URL would); `GET /health` is unsigned.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::receive_run_task))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use rungate_core::signature;
    use rungate_types::run_task::SIGNATURE_HEADER;

    use super::*;
    use crate::state::GatewayConfig;

    const SECRET_VAR: &str = "RUNGATE_ROUTER_TEST_HMAC";
    const SECRET: &str = "router-test-secret";

    fn test_router() -> Router {
        // SAFETY: every test in this module writes the same value, and
        // nothing else in the test binary reads this variable.
        unsafe { std::env::set_var(SECRET_VAR, SECRET) };

        build_router(AppState::init(&GatewayConfig {
            hmac_secret_param: SECRET_VAR.to_string(),
            sidecar_port: 2773,
            session_token: secrecy::SecretString::from(""),
            outbound_timeout: Duration::from_secs(1),
            env_secrets: true,
        }))
    }

    fn signed_post(body: String) -> Request<Body> {
        let sig = signature::sign(SECRET.as_bytes(), body.as_bytes());
        Request::builder()
            .method("POST")
            .uri("/")
            .header(SIGNATURE_HEADER, sig)
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_responds_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn handshake_request_answers_configuration_successful() {
        let body = json!({"task_result_enforcement_level": "test"}).to_string();
        let response = test_router().oneshot(signed_post(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["type"], "task-results");
        assert_eq!(body["data"]["attributes"]["status"], "passed");
        assert_eq!(body["data"]["attributes"]["message"], "Configuration successful");
    }

    #[tokio::test]
    async fn bad_signature_answers_401() {
        let body = json!({"task_result_enforcement_level": "test"}).to_string();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(SIGNATURE_HEADER, "deadbeef")
            .body(Body::from(body))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body, json!({"message": "Invalid signature"}));
    }

    #[tokio::test]
    async fn missing_signature_header_answers_401() {
        let body = json!({"task_result_enforcement_level": "test"}).to_string();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn signature_header_lookup_is_case_insensitive() {
        let body = json!({"task_result_enforcement_level": "test"}).to_string();
        let sig = signature::sign(SECRET.as_bytes(), body.as_bytes());
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("X-TFC-Task-Signature", sig)
            .body(Body::from(body))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_with_valid_signature_answers_500() {
        let response = test_router()
            .oneshot(signed_post("this is not json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Internal error: "));
    }
}

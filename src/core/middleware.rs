//! Session gate for the internal-data namespace.
//!
//! Three path categories: the auth endpoints always pass, anything outside
//! the internal-data namespace passes untouched, and every other internal
//! path requires a present and decodable session cookie. The gate holds no
//! state and revokes nothing; a well-formed token is the session.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_cookies::Cookies;

use crate::session::{token, Session, SESSION_COOKIE};
use crate::shared::envelope::ApiError;

pub const INTERNAL_PREFIX: &str = "/api/internal";

/// Whether a request path must carry a valid session to proceed.
pub fn requires_session(path: &str) -> bool {
    let in_namespace = path == INTERNAL_PREFIX || path.starts_with("/api/internal/");
    if !in_namespace {
        return false;
    }
    !matches!(
        path,
        "/api/internal/login" | "/api/internal/session" | "/api/internal/logout"
    )
}

pub async fn session_gate(cookies: Cookies, mut request: Request, next: Next) -> Response {
    if !requires_session(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(cookie) = cookies.get(SESSION_COOKIE) else {
        return ApiError::NotAuthenticated.into_response();
    };

    match token::decode::<Session>(cookie.value()) {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => ApiError::BadSession.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionUser;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;
    use tower_cookies::CookieManagerLayer;

    #[test]
    fn path_policy() {
        assert!(!requires_session("/api/internal/login"));
        assert!(!requires_session("/api/internal/session"));
        assert!(!requires_session("/api/internal/logout"));
        assert!(!requires_session("/health"));
        assert!(!requires_session("/api/other/thing"));
        assert!(requires_session("/api/internal/tickets"));
        assert!(requires_session("/api/internal/tickets/42"));
        assert!(requires_session("/api/internal/macros"));
    }

    /// Router whose only data handler counts how often the "store layer"
    /// is reached.
    fn gated_app(counter: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/api/internal/users",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .route("/health", get(|| async { "up" }))
            .layer(axum::middleware::from_fn(session_gate))
            .layer(CookieManagerLayer::new())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_token_is_401_and_never_reaches_the_store() {
        let counter = Arc::new(AtomicUsize::new(0));
        let response = gated_app(counter.clone())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/internal/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Not authenticated" }));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn undecodable_token_is_401_bad_session() {
        let counter = Arc::new(AtomicUsize::new(0));
        let response = gated_app(counter.clone())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/internal/users")
                    .header("cookie", format!("{SESSION_COOKIE}=!!!garbage!!!"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Bad session" }));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_token_passes_through() {
        let counter = Arc::new(AtomicUsize::new(0));
        let session = Session {
            user: SessionUser {
                email: "ops@example.com".to_string(),
                name: "Ops".to_string(),
            },
        };
        let response = gated_app(counter.clone())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/internal/users")
                    .header("cookie", format!("{SESSION_COOKIE}={}", token::encode(&session)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn paths_outside_the_namespace_pass_untouched() {
        let counter = Arc::new(AtomicUsize::new(0));
        let response = gated_app(counter)
            .oneshot(
                HttpRequest::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

//! Login, session-check, and logout endpoints.
//!
//! The encoded cookie IS the session: created on a successful credential
//! check, read on every gated request, cleared by logout or client discard.
//! Nothing is persisted server-side.

pub mod token;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use tracing::info;

use crate::shared::envelope::ApiError;
use crate::shared::state::AppState;

pub const SESSION_COOKIE: &str = "desk_session";

/// Client-held session payload: `{ user: { email, name } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Session>, ApiError> {
    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    let admin = &state.config.admin;
    if !email.eq_ignore_ascii_case(&admin.email) || password != admin.password {
        return Err(ApiError::InvalidCredentials);
    }

    let session = Session {
        user: SessionUser {
            email: admin.email.clone(),
            name: admin.name.clone(),
        },
    };

    let mut cookie = Cookie::new(SESSION_COOKIE, token::encode(&session));
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    info!("console login for {}", admin.email);
    Ok(Json(session))
}

pub async fn session_info(cookies: Cookies) -> Result<Json<Session>, ApiError> {
    let cookie = cookies.get(SESSION_COOKIE).ok_or(ApiError::NotAuthenticated)?;
    let session = token::decode::<Session>(cookie.value()).ok_or(ApiError::BadSession)?;
    Ok(Json(session))
}

pub async fn logout(cookies: Cookies) -> Json<Value> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);
    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_token() {
        let session = Session {
            user: SessionUser {
                email: "ops@example.com".to_string(),
                name: "Ops".to_string(),
            },
        };
        let decoded: Session = token::decode(&token::encode(&session)).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn session_serializes_to_expected_shape() {
        let session = Session {
            user: SessionUser {
                email: "ops@example.com".to_string(),
                name: "Ops".to_string(),
            },
        };
        let body = serde_json::to_value(&session).unwrap();
        assert_eq!(
            body,
            json!({ "user": { "email": "ops@example.com", "name": "Ops" } })
        );
    }
}

//! Session provider endpoints
//!
//! Implements the OAuth 2.0 authorization code flow with Google plus the
//! sign-out and session lookup endpoints used by the pages.

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::middleware::MaybeUser;
use super::session::Session;
use crate::AppState;
use crate::error::AppError;

/// Create authentication router
///
/// Routes:
/// - GET /api/auth/signin/google - Start Google sign-in
/// - GET /api/auth/callback/google - OAuth callback
/// - POST /api/auth/signout - Sign out
/// - GET /api/auth/session - Current session as JSON
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signin/google", get(google_signin))
        .route("/api/auth/callback/google", get(google_callback))
        .route("/api/auth/signout", post(signout))
        .route("/api/auth/session", get(session))
}

/// `callbackUrl` carried by the sign-in and sign-out triggers
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

// =============================================================================
// Google OAuth
// =============================================================================

/// GET /api/auth/signin/google
///
/// Sets the CSRF state cookie and redirects to Google.
async fn google_signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    state
        .sessions
        .start_session(jar, params.callback_url.as_deref())
}

/// Query parameters from Google callback
#[derive(Debug, Deserialize)]
struct GoogleCallbackQuery {
    /// Authorization code
    #[serde(default)]
    code: String,
    /// CSRF state token
    state: Option<String>,
    /// Set by Google when the user denies consent
    error: Option<String>,
}

/// GET /api/auth/callback/google
///
/// Verifies CSRF state, exchanges the code, sets the session cookie and
/// redirects to the remembered callback URL. Flow cookies are cleared on
/// success and on failure.
async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<GoogleCallbackQuery>,
) -> (CookieJar, Result<Redirect, AppError>) {
    if let Some(error) = query.error {
        tracing::info!(%error, "Google sign-in was not completed");
        let jar = state.sessions.clear_flow_cookies(jar);
        return (jar, Err(AppError::Unauthorized));
    }

    state
        .sessions
        .complete_session(jar, &query.code, query.state.as_deref())
        .await
}

// =============================================================================
// Sign out / session
// =============================================================================

/// POST /api/auth/signout
async fn signout(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(params): Form<CallbackParams>,
) -> impl IntoResponse {
    state
        .sessions
        .end_session(jar, params.callback_url.as_deref())
}

/// GET /api/auth/session
async fn session(MaybeUser(session): MaybeUser) -> Json<Option<Session>> {
    Json(session)
}

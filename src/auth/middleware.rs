//! Authentication middleware
//!
//! Two layers of protection:
//! - [`route_guard`] runs in front of every route and applies the
//!   path-prefix policy from [`super::guard`].
//! - Page handlers take [`MaybeUser`] and call [`require_session`] so a
//!   protected page is never rendered without a session, even when reached
//!   without the guard.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::guard;
use super::session::Session;
use crate::AppState;
use crate::metrics::GUARD_DECISIONS_TOTAL;

/// Middleware applying the route protection policy
///
/// # Usage
/// ```ignore
/// let app = Router::new()
///     .route("/profile", ...)
///     .layer(middleware::from_fn_with_state(state, route_guard));
/// ```
pub async fn route_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    if guard::is_excluded(&path) {
        return next.run(request).await;
    }

    let is_logged_in = state.sessions.get_session(request.headers()).is_some();
    let decision = guard::decide(&path, is_logged_in);
    GUARD_DECISIONS_TOTAL
        .with_label_values(&[decision.as_str()])
        .inc();

    match decision.location() {
        Some(location) => {
            tracing::debug!(
                path = %path,
                decision = decision.as_str(),
                location = %location,
                "Route guard redirect"
            );
            Redirect::temporary(&location).into_response()
        }
        None => next.run(request).await,
    }
}

/// Optional current user extractor
///
/// Queries the session provider for this request; never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Session>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(MaybeUser(app_state.sessions.get_session(&parts.headers)))
    }
}

/// Per-page guard clause.
///
/// Returns the session, or a redirect to `/signin?callbackUrl=<self_path>`.
pub fn require_session(session: Option<Session>, self_path: &str) -> Result<Session, Redirect> {
    session.ok_or_else(|| {
        tracing::debug!(path = %self_path, "Page requires a session");
        Redirect::temporary(&guard::sign_in_url(self_path))
    })
}

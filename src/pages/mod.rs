//! Server-rendered pages
//!
//! Every handler receives the current session through [`MaybeUser`] and
//! passes it explicitly into its render function. Protected pages check it
//! again with [`require_session`] regardless of the route guard.
//!
//! [`MaybeUser`]: crate::auth::MaybeUser
//! [`require_session`]: crate::auth::require_session

mod dashboard;
mod home;
mod profile;
mod signin;
mod signout;

use axum::{Router, routing::get};

use crate::AppState;

/// Provider shown on the profile and dashboard pages.
pub(crate) const PROVIDER_NAME: &str = "Google";

/// Create pages router
///
/// Routes:
/// - GET / - Home
/// - GET /signin - Sign-in page
/// - GET /signout - Sign-out confirmation
/// - GET /profile - Profile (protected)
/// - GET /dashboard - Dashboard (protected)
pub fn pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/signin", get(signin::signin))
        .route("/signout", get(signout::signout))
        .route(profile::PATH, get(profile::profile))
        .route(dashboard::PATH, get(dashboard::dashboard))
}

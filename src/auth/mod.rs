//! Google sign-in and route protection
//!
//! Handles:
//! - Signed session tokens
//! - Google OAuth flow
//! - Route guard middleware and per-page session checks

pub mod google;
pub mod guard;
mod middleware;
mod oauth;
pub mod provider;
pub mod redirect;
pub mod session;

pub use guard::{GuardDecision, PROTECTED_ROUTES};
pub use middleware::{MaybeUser, require_session, route_guard};
pub use oauth::{CallbackParams, auth_router};
pub use provider::SessionProvider;
pub use session::{Session, SessionUser, create_session_token, verify_session_token};

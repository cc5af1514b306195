//! Route protection policy
//!
//! Coarse, path-prefix based access decisions evaluated for every inbound
//! request before it reaches a page. Pages repeat their own session check,
//! so this layer only needs to be fast and predictable.

/// Path prefixes that require a signed-in session.
pub const PROTECTED_ROUTES: &[&str] = &["/profile", "/dashboard"];

/// First path segments that bypass the guard entirely (assets, API, auth flow).
const EXCLUDED_PREFIXES: &[&str] = &["api", "static", "public", "favicon.ico"];

pub const SIGN_IN_PATH: &str = "/signin";
pub const PROFILE_PATH: &str = "/profile";

/// Outcome of the route guard for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Pass the request through unmodified.
    Allow,
    /// Send the visitor to the sign-in page, remembering where they were going.
    RedirectToSignIn { callback_url: String },
    /// Already signed in; skip the sign-in page.
    RedirectToProfile,
}

impl GuardDecision {
    /// Target of the redirect, if any.
    pub fn location(&self) -> Option<String> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToSignIn { callback_url } => Some(sign_in_url(callback_url)),
            GuardDecision::RedirectToProfile => Some(PROFILE_PATH.to_string()),
        }
    }

    /// Label used for logging and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardDecision::Allow => "allow",
            GuardDecision::RedirectToSignIn { .. } => "redirect_signin",
            GuardDecision::RedirectToProfile => "redirect_profile",
        }
    }
}

/// `/signin?callbackUrl=<percent-encoded callback>`
pub fn sign_in_url(callback_url: &str) -> String {
    format!(
        "{}?callbackUrl={}",
        SIGN_IN_PATH,
        urlencoding::encode(callback_url)
    )
}

/// Whether the guard should ignore this path altogether.
///
/// Static assets and API routes are never intercepted, nor is anything that
/// looks like a file (contains a `.`).
pub fn is_excluded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| rest.starts_with(prefix))
        || rest.contains('.')
}

/// Case-sensitive `starts_with` over [`PROTECTED_ROUTES`].
///
/// Not segment-aware: `/profileX` counts as protected.
pub fn is_protected(path: &str) -> bool {
    PROTECTED_ROUTES.iter().any(|route| path.starts_with(route))
}

/// Decide what to do with a request for `path`.
pub fn decide(path: &str, is_logged_in: bool) -> GuardDecision {
    if is_excluded(path) {
        return GuardDecision::Allow;
    }

    if is_protected(path) && !is_logged_in {
        return GuardDecision::RedirectToSignIn {
            callback_url: path.to_string(),
        };
    }

    if path == SIGN_IN_PATH && is_logged_in {
        return GuardDecision::RedirectToProfile;
    }

    GuardDecision::Allow
}

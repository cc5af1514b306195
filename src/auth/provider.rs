//! Session provider
//!
//! Owns the whole session lifecycle: reading the current session from a
//! request, starting one through Google sign-in and ending it. Pages and the
//! route guard only ever read sessions through [`SessionProvider::get_session`].

use axum::http::HeaderMap;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine as _;
use rand::RngCore;
use time::Duration;

use super::google::GoogleClient;
use super::redirect::resolve_callback;
use super::session::{Session, create_session_token, verify_session_token};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::metrics::{SIGNINS_TOTAL, SIGNOUTS_TOTAL};

pub const SESSION_COOKIE_NAME: &str = "session";
pub const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";
pub const CALLBACK_COOKIE_NAME: &str = "callback_url";

const FLOW_COOKIE_MINUTES: i64 = 10;

fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(ToOwned::to_owned)
        .or_else(|| {
            let jar = CookieJar::from_headers(headers);
            jar.get(SESSION_COOKIE_NAME)
                .map(|cookie| cookie.value().to_owned())
        })
        .filter(|token| !token.is_empty())
}

/// Constant-time comparison of two byte slices.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Generate a random CSRF state token
fn generate_oauth_state() -> String {
    let mut bytes = [0_u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

pub struct SessionProvider {
    secret: String,
    max_age: i64,
    secure_cookies: bool,
    base_url: String,
    google: GoogleClient,
}

impl SessionProvider {
    pub fn new(config: &AppConfig, http: reqwest::Client) -> Self {
        let google = GoogleClient::new(
            config.auth.google.clone(),
            config.google_redirect_uri(),
            http,
        );

        Self {
            secret: config.auth.session_secret.clone(),
            max_age: config.auth.session_max_age,
            secure_cookies: config.should_use_secure_cookies(),
            base_url: config.server.base_url(),
            google,
        }
    }

    /// Public origin used to vet redirect targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session for this request, if any.
    ///
    /// Missing, malformed, forged and expired tokens all read as `None`.
    pub fn get_session(&self, headers: &HeaderMap) -> Option<Session> {
        let token = extract_token_from_headers(headers)?;
        match verify_session_token(&token, &self.secret) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::debug!(%error, "Ignoring invalid session token");
                None
            }
        }
    }

    /// Begin Google sign-in, remembering where to land afterwards.
    pub fn start_session(&self, jar: CookieJar, callback_url: Option<&str>) -> (CookieJar, Redirect) {
        let callback = resolve_callback(callback_url, &self.base_url, "/");
        let oauth_state = generate_oauth_state();

        let jar = jar
            .add(self.flow_cookie(OAUTH_STATE_COOKIE_NAME, oauth_state.clone()))
            .add(self.flow_cookie(CALLBACK_COOKIE_NAME, callback.clone()));

        tracing::debug!(callback = %callback, "Starting Google sign-in");
        (
            jar,
            Redirect::temporary(&self.google.authorize_url(&oauth_state)),
        )
    }

    /// Finish Google sign-in: verify CSRF state, exchange the code, issue a session.
    ///
    /// The flow cookies are cleared whatever the outcome.
    pub async fn complete_session(
        &self,
        jar: CookieJar,
        code: &str,
        state: Option<&str>,
    ) -> (CookieJar, Result<Redirect, AppError>) {
        let result = self.complete_session_inner(&jar, code, state).await;
        let status = if result.is_ok() { "success" } else { "failure" };
        SIGNINS_TOTAL.with_label_values(&[status]).inc();

        let jar = self.clear_flow_cookies(jar);
        match result {
            Ok((token, callback)) => (
                jar.add(self.session_cookie(token)),
                Ok(Redirect::to(&callback)),
            ),
            Err(error) => (jar, Err(error)),
        }
    }

    /// Drop the `oauth_state` and `callback_url` cookies of an unfinished sign-in.
    pub fn clear_flow_cookies(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal_cookie(OAUTH_STATE_COOKIE_NAME))
            .add(self.removal_cookie(CALLBACK_COOKIE_NAME))
    }

    /// Returns the session token and the sanitized callback path.
    async fn complete_session_inner(
        &self,
        jar: &CookieJar,
        code: &str,
        state: Option<&str>,
    ) -> Result<(String, String), AppError> {
        let callback_state = state.ok_or(AppError::Unauthorized)?;
        let expected_state = jar
            .get(OAUTH_STATE_COOKIE_NAME)
            .map(Cookie::value)
            .unwrap_or_default();
        if expected_state.is_empty()
            || !constant_time_eq(expected_state.as_bytes(), callback_state.as_bytes())
        {
            tracing::warn!("OAuth state mismatch on callback");
            return Err(AppError::Unauthorized);
        }

        if code.is_empty() {
            return Err(AppError::Validation("code is required".to_string()));
        }

        let access_token = self.google.exchange_code(code).await?;
        let google_user = self.google.fetch_user(&access_token).await?;
        tracing::info!(sub = %google_user.sub, "Google sign-in completed");

        let session = Session::new(google_user.into(), self.max_age);
        let token = create_session_token(&session, &self.secret)?;

        let callback = resolve_callback(
            jar.get(CALLBACK_COOKIE_NAME).map(Cookie::value),
            &self.base_url,
            "/",
        );

        Ok((token, callback))
    }

    /// Sign out: drop the session cookie and redirect.
    pub fn end_session(&self, jar: CookieJar, callback_url: Option<&str>) -> (CookieJar, Redirect) {
        let callback = resolve_callback(callback_url, &self.base_url, "/");
        SIGNOUTS_TOTAL.inc();
        tracing::debug!(callback = %callback, "Session ended");

        let jar = jar.add(self.removal_cookie(SESSION_COOKIE_NAME));
        (jar, Redirect::to(&callback))
    }

    fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(Duration::seconds(self.max_age))
            .build()
    }

    fn flow_cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(Duration::minutes(FLOW_COOKIE_MINUTES))
            .build()
    }

    fn removal_cookie(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = Cookie::build((name, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .build();
        cookie.make_removal();
        cookie
    }
}

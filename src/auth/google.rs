//! Google OAuth client: authorize URL, code exchange, userinfo fetch.

use serde::Deserialize;

use super::session::SessionUser;
use crate::config::GoogleOAuthConfig;
use crate::error::AppError;

pub const GOOGLE_SCOPES: &str = "openid email profile";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Subset of the OpenID Connect userinfo response we keep.
#[derive(Debug, Deserialize)]
pub struct GoogleUser {
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl From<GoogleUser> for SessionUser {
    fn from(user: GoogleUser) -> Self {
        SessionUser {
            name: user.name,
            email: user.email,
            image: user.picture,
        }
    }
}

/// Google authorization-code flow bound to one OAuth client.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    config: GoogleOAuthConfig,
    redirect_uri: String,
    http: reqwest::Client,
}

impl GoogleClient {
    pub fn new(config: GoogleOAuthConfig, redirect_uri: String, http: reqwest::Client) -> Self {
        Self {
            config,
            redirect_uri,
            http,
        }
    }

    /// Build the Google authorization URL for `state`.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.config.authorize_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(GOOGLE_SCOPES),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let resp = self
            .http
            .post(&self.config.token_url)
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::OAuth(format!(
                "token exchange failed: {status}: {body}"
            )));
        }

        let body = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| AppError::OAuth(format!("unexpected token response: {body}")))?;
        Ok(token.access_token)
    }

    /// Fetch the signed-in user's profile.
    pub async fn fetch_user(&self, access_token: &str) -> Result<GoogleUser, AppError> {
        let resp = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::OAuth(format!("userinfo failed: {status}: {body}")));
        }

        resp.json::<GoogleUser>()
            .await
            .map_err(|e| AppError::OAuth(e.to_string()))
    }
}

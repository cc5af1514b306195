//! Common test utilities for E2E tests

#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use gatehouse::{AppState, config};
use serde::Deserialize;
use tokio::net::TcpListener;

pub const STUB_CODE: &str = "good-code";
pub const STUB_ACCESS_TOKEN: &str = "stub-access-token";

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server whose Google endpoints point at a local stub
    pub async fn new() -> Self {
        gatehouse::metrics::init_metrics();
        let google_addr = spawn(stub_google()).await;

        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                domain: "localhost".to_string(),
                protocol: "http".to_string(),
            },
            auth: config::AuthConfig {
                session_secret: "test-secret-key-32-bytes-long!!!".to_string(),
                session_max_age: 3600,
                google: config::GoogleOAuthConfig {
                    client_id: "test-client-id".to_string(),
                    client_secret: "test-client-secret".to_string(),
                    authorize_url: format!("{google_addr}/authorize"),
                    token_url: format!("{google_addr}/token"),
                    userinfo_url: format!("{google_addr}/userinfo"),
                },
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        let state = AppState::new(config).unwrap();
        let addr = spawn(gatehouse::build_router(state.clone())).await;

        // Redirects stay visible to the tests.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        Self {
            addr,
            state,
            client,
        }
    }

    /// Get base URL for requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// `Cookie` header value for a signed-in user
    pub fn session_cookie(&self, name: Option<&str>) -> String {
        use gatehouse::auth::{Session, SessionUser, create_session_token};

        let session = Session::new(
            SessionUser {
                name: name.map(str::to_string),
                email: Some("ada@example.com".to_string()),
                image: None,
            },
            3600,
        );

        let token = create_session_token(&session, &self.state.config.auth.session_secret)
            .expect("Failed to create test token");
        format!("session={token}")
    }
}

/// `Location` header of a response
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string()
}

/// All `Set-Cookie` header values of a response
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok().map(ToString::to_string))
        .collect()
}

/// Value of cookie `name` among `Set-Cookie` headers
pub fn cookie_value(set_cookies: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies.iter().find_map(|header| {
        header
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix(&prefix))
            .map(str::to_string)
    })
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[derive(Deserialize)]
struct TokenForm {
    code: String,
    grant_type: String,
}

fn stub_google() -> Router {
    Router::new()
        .route("/token", post(stub_token))
        .route("/userinfo", get(stub_userinfo))
}

async fn stub_token(Form(form): Form<TokenForm>) -> impl IntoResponse {
    if form.code != STUB_CODE || form.grant_type != "authorization_code" {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "invalid_grant" })),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "access_token": STUB_ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3599,
        })),
    )
}

async fn stub_userinfo(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {STUB_ACCESS_TOKEN}"));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid_token" })),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "sub": "1234567890",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "picture": "https://example.com/ada.png",
        })),
    )
}

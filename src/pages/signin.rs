//! GET /signin?callbackUrl=

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};

use crate::AppState;
use crate::auth::redirect::{resolve_callback, same_origin_path};
use crate::auth::{CallbackParams, MaybeUser};
use crate::ui::{document, sign_in_button};

/// Already signed-in visitors go to their callback (or `/profile`).
pub async fn signin(
    State(state): State<AppState>,
    MaybeUser(session): MaybeUser,
    Query(params): Query<CallbackParams>,
) -> Result<Html<String>, Redirect> {
    let base_url = state.sessions.base_url();

    if session.is_some() {
        let target = resolve_callback(params.callback_url.as_deref(), base_url, "/profile");
        return Err(Redirect::temporary(&target));
    }

    let callback = params
        .callback_url
        .as_deref()
        .and_then(|raw| same_origin_path(raw, base_url));
    Ok(render(callback.as_deref()))
}

fn render(callback_url: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<main class="card">
  <h2>Welcome Back</h2>
  <p>Sign in to access your account</p>
  {}
  <p class="fine-print">By signing in, you agree to our Terms of Service and Privacy Policy</p>
</main>"#,
        sign_in_button(callback_url, "w-full"),
    );

    document("Sign In", &body)
}

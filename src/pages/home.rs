//! GET /

use axum::response::Html;

use crate::auth::{MaybeUser, Session};
use crate::ui::{Avatar, document, sign_in_button};

pub async fn home(MaybeUser(session): MaybeUser) -> Html<String> {
    render(session.as_ref())
}

fn render(session: Option<&Session>) -> Html<String> {
    let header_action = match session {
        Some(session) => {
            let user = &session.user;
            format!(
                r#"<a class="user-chip" href="/profile">{}<span>{}</span></a>"#,
                Avatar::new(user.name.as_deref(), user.image.as_deref(), 32).render(),
                html_escape::encode_text(user.name.as_deref().unwrap_or_default()),
            )
        }
        None => sign_in_button(None, ""),
    };

    let call_to_action = match session {
        Some(_) => r#"<nav class="actions">
    <a class="button button-primary" href="/profile">View Profile</a>
    <a class="button" href="/dashboard">Go to Dashboard</a>
  </nav>"#
            .to_string(),
        None => format!(r#"<div class="actions">{}</div>"#, sign_in_button(None, "")),
    };

    let body = format!(
        r#"<header>
  <strong>Gatehouse</strong>
  {header_action}
</header>
<main>
  <h1>Welcome to Gatehouse</h1>
  <p>A small web application with Google sign-in and protected pages.</p>
  {call_to_action}
  <section class="features">
    <article><h3>Secure Authentication</h3><p>Google OAuth sign-in</p></article>
    <article><h3>Protected Routes</h3><p>Middleware-based route protection with redirects</p></article>
    <article><h3>Signed Sessions</h3><p>Stateless sessions in a signed cookie</p></article>
  </section>
</main>"#
    );

    document("Home", &body)
}

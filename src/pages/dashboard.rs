//! GET /dashboard (protected)

use axum::response::{Html, Redirect};

use super::PROVIDER_NAME;
use crate::auth::{MaybeUser, Session, require_session};
use crate::ui::document;

pub(super) const PATH: &str = "/dashboard";

pub async fn dashboard(MaybeUser(session): MaybeUser) -> Result<Html<String>, Redirect> {
    let session = require_session(session, PATH)?;
    Ok(render(&session))
}

fn render(session: &Session) -> Html<String> {
    let name = html_escape::encode_text(session.user.name.as_deref().unwrap_or_default());

    let body = format!(
        r#"<main>
  <header>
    <h1>Dashboard</h1>
    <a href="/profile">View Profile &rarr;</a>
  </header>
  <section class="cards">
    <article><h3>Welcome</h3><p>{name}</p></article>
    <article><h3>Account Status</h3><p class="status-active">Active</p></article>
    <article><h3>Provider</h3><p>{PROVIDER_NAME}</p></article>
  </section>
  <section>
    <h2>Protected Content</h2>
    <p>This page is only accessible to authenticated users.</p>
  </section>
</main>"#
    );

    document("Dashboard", &body)
}

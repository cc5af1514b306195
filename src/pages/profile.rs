//! GET /profile (protected)

use axum::response::{Html, Redirect};
use html_escape::encode_text;

use super::PROVIDER_NAME;
use crate::auth::{MaybeUser, Session, require_session};
use crate::ui::{Avatar, document, sign_out_button};

pub(super) const PATH: &str = "/profile";

pub async fn profile(MaybeUser(session): MaybeUser) -> Result<Html<String>, Redirect> {
    let session = require_session(session, PATH)?;
    Ok(render(&session))
}

fn render(session: &Session) -> Html<String> {
    let user = &session.user;
    let name = user.name.as_deref().filter(|n| !n.is_empty());
    let email = encode_text(user.email.as_deref().unwrap_or_default());

    let body = format!(
        r#"<main>
  <header>
    <h1>Profile</h1>
    <a href="/">&larr; Back to Home</a>
  </header>
  <section class="profile-banner">
    {avatar}
    <h2>{display_name}</h2>
    <p>{email}</p>
  </section>
  <section>
    <h3>Account Information</h3>
    <dl>
      <dt>Full Name</dt><dd>{full_name}</dd>
      <dt>Email Address</dt><dd>{email}</dd>
      <dt>Authentication Provider</dt><dd>{PROVIDER_NAME}</dd>
    </dl>
  </section>
  <footer>{sign_out}</footer>
  <section>
    <h3>Quick Links</h3>
    <ul><li><a href="/dashboard">Go to Dashboard &rarr;</a></li></ul>
  </section>
</main>"#,
        avatar = Avatar::new(name, user.image.as_deref(), 96).render(),
        display_name = encode_text(name.unwrap_or("Anonymous User")),
        full_name = encode_text(name.unwrap_or("Not provided")),
        sign_out = sign_out_button("w-full"),
    );

    document("Profile", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionUser;

    fn session(name: Option<&str>) -> Session {
        Session::new(
            SessionUser {
                name: name.map(str::to_string),
                email: Some("ada@example.com".to_string()),
                image: Some("https://example.com/ada.png".to_string()),
            },
            60,
        )
    }

    #[test]
    fn shows_user_details() {
        let Html(html) = render(&session(Some("Ada Lovelace")));
        assert!(html.contains("<h2>Ada Lovelace</h2>"));
        assert!(html.contains("ada@example.com"));
        assert!(html.contains(r#"src="https://example.com/ada.png""#));
        assert!(html.contains(r#"width="96""#));
        assert!(html.contains("<dd>Google</dd>"));
        assert!(html.contains("/api/auth/signout"));
    }

    #[test]
    fn anonymous_user_fallbacks() {
        let Html(html) = render(&session(None));
        assert!(html.contains("<h2>Anonymous User</h2>"));
        assert!(html.contains("<dd>Not provided</dd>"));
    }

    #[test]
    fn escapes_user_text() {
        let Html(html) = render(&session(Some("<script>alert(1)</script>")));
        assert!(!html.contains("<script>"));
    }
}

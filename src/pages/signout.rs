//! GET /signout

use axum::response::Html;

use crate::ui::{document, sign_out_button};

pub async fn signout() -> Html<String> {
    let body = format!(
        r#"<main class="card">
  <h2>Sign Out</h2>
  <p>Are you sure you want to sign out?</p>
  {}
  <a class="button" href="/">Cancel</a>
</main>"#,
        sign_out_button("w-full"),
    );

    document("Sign Out", &body)
}

//! Server-rendered HTML building blocks shared by the pages.

mod avatar;
mod triggers;

pub use avatar::{Avatar, initials};
pub use triggers::{
    SIGN_IN_ENDPOINT, SIGN_OUT_CALLBACK, SIGN_OUT_ENDPOINT, sign_in_button, sign_in_href,
    sign_out_button,
};

use axum::response::Html;

/// Wrap `body` in a complete HTML document.
pub fn document(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{} - Gatehouse</title>
</head>
<body>
{}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    ))
}

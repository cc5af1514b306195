//! Sign-in and sign-out controls.
//!
//! Both hand off to the session provider endpoints; the provider owns the
//! navigation that follows.

use html_escape::encode_double_quoted_attribute;

pub const SIGN_IN_ENDPOINT: &str = "/api/auth/signin/google";
pub const SIGN_OUT_ENDPOINT: &str = "/api/auth/signout";

/// Where sign-out always lands.
pub const SIGN_OUT_CALLBACK: &str = "/";

/// Link target starting Google sign-in; `callback_url` defaults to `/`.
pub fn sign_in_href(callback_url: Option<&str>) -> String {
    let callback = callback_url.filter(|c| !c.is_empty()).unwrap_or("/");
    format!(
        "{}?callbackUrl={}",
        SIGN_IN_ENDPOINT,
        urlencoding::encode(callback)
    )
}

pub fn sign_in_button(callback_url: Option<&str>, class: &str) -> String {
    format!(
        r#"<a class="button button-primary {}" href="{}">Sign in with Google</a>"#,
        encode_double_quoted_attribute(class),
        encode_double_quoted_attribute(&sign_in_href(callback_url)),
    )
}

pub fn sign_out_button(class: &str) -> String {
    format!(
        r#"<form method="post" action="{SIGN_OUT_ENDPOINT}">
  <input type="hidden" name="callbackUrl" value="{SIGN_OUT_CALLBACK}" />
  <button type="submit" class="button button-danger {}">Sign Out</button>
</form>"#,
        encode_double_quoted_attribute(class),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_href_defaults_to_root() {
        assert_eq!(sign_in_href(None), "/api/auth/signin/google?callbackUrl=%2F");
        assert_eq!(sign_in_href(Some("")), "/api/auth/signin/google?callbackUrl=%2F");
    }

    #[test]
    fn sign_in_href_encodes_callback() {
        assert_eq!(
            sign_in_href(Some("/dashboard?tab=a b")),
            "/api/auth/signin/google?callbackUrl=%2Fdashboard%3Ftab%3Da%20b"
        );
    }

    #[test]
    fn sign_in_button_escapes_attributes() {
        let html = sign_in_button(Some("/profile"), "w-full\"");
        assert!(html.contains("href=\"/api/auth/signin/google?callbackUrl=%2Fprofile\""));
        assert!(html.contains("w-full&quot;"));
    }

    #[test]
    fn sign_out_button_posts_fixed_callback() {
        let html = sign_out_button("");
        assert!(html.contains(r#"method="post" action="/api/auth/signout""#));
        assert!(html.contains(r#"name="callbackUrl" value="/""#));
        assert!(html.contains("Sign Out"));
    }
}

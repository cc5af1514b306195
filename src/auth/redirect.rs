//! Post-sign-in redirect targets (`callbackUrl`).

use url::Url;

/// Reduce a user-supplied `callbackUrl` to a same-origin path.
///
/// Relative paths must start with a single `/`. Absolute URLs are accepted
/// only when they share the origin of `base_url`, and are cut down to path,
/// query and fragment. Anything outside visible ASCII is rejected, so the
/// result is always a valid `Location` header value.
pub fn same_origin_path(raw: &str, base_url: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || !is_visible_ascii(raw) {
        return None;
    }

    let path = if raw.starts_with('/') {
        raw.to_string()
    } else {
        let base = Url::parse(base_url).ok()?;
        let target = Url::parse(raw).ok()?;
        if target.origin() != base.origin() {
            return None;
        }

        let mut path = target.path().to_string();
        if let Some(query) = target.query() {
            path.push('?');
            path.push_str(query);
        }
        if let Some(fragment) = target.fragment() {
            path.push('#');
            path.push_str(fragment);
        }
        path
    };

    is_local_path(&path).then_some(path)
}

/// Single leading `/`, no host hidden behind `//` or `/\`.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && is_visible_ascii(path)
}

fn is_visible_ascii(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_graphic())
}

/// [`same_origin_path`] with a fallback for missing or rejected input.
pub fn resolve_callback(raw: Option<&str>, base_url: &str, fallback: &str) -> String {
    raw.and_then(|value| same_origin_path(value, base_url))
        .unwrap_or_else(|| fallback.to_string())
}

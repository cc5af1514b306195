//! User avatar: the profile image when there is one, initials otherwise.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Visual identity derived from a user's name and image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Image { src: String, alt: String, size: u32 },
    Initials { text: String, size: u32 },
}

impl Avatar {
    /// Derive the avatar for `name`/`image` at `size`×`size` pixels.
    pub fn new(name: Option<&str>, image: Option<&str>, size: u32) -> Self {
        match image.filter(|src| !src.is_empty()) {
            Some(src) => Avatar::Image {
                src: src.to_string(),
                alt: name
                    .filter(|n| !n.is_empty())
                    .unwrap_or("User avatar")
                    .to_string(),
                size,
            },
            None => Avatar::Initials {
                text: initials(name),
                size,
            },
        }
    }

    pub fn render(&self) -> String {
        match self {
            Avatar::Image { src, alt, size } => format!(
                r#"<img class="avatar" src="{}" alt="{}" width="{size}" height="{size}" />"#,
                encode_double_quoted_attribute(src),
                encode_double_quoted_attribute(alt),
            ),
            Avatar::Initials { text, size } => format!(
                r#"<div class="avatar avatar-initials" style="width: {size}px; height: {size}px">{}</div>"#,
                encode_text(text),
            ),
        }
    }
}

/// Up to two uppercase initials, or `"?"` when the name yields none.
pub fn initials(name: Option<&str>) -> String {
    let letters: String = name
        .unwrap_or_default()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(2)
        .collect();

    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

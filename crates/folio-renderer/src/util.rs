//! Shared helpers.

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// ` class="..."` attribute joining a base class with a user class hook.
///
/// Returns an empty string when both are empty.
pub(crate) fn class_attr(base: &str, extra: &str) -> String {
    let extra = extra.trim();
    match (base.is_empty(), extra.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!(r#" class="{base}""#),
        (true, false) => format!(r#" class="{}""#, escape_html(extra)),
        (false, false) => format!(r#" class="{base} {}""#, escape_html(extra)),
    }
}

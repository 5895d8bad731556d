/// Escapes the five HTML special characters for interpolation into markup.
///
/// Already-escaped entities are escaped again: `&amp;` becomes `&amp;amp;`.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// A missing value renders as an empty string.
pub fn escape_html_opt(raw: Option<&str>) -> String {
    raw.map(escape_html).unwrap_or_default()
}

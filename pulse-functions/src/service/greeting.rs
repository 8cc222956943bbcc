//! Greeting service
//!
//! Formats the hello-world response. Names are HTML-escaped before being
//! echoed back.

/// Version string included in every greeting
const VERSION_LINE: &str = concat!(
    "You are on pulse-functions version ",
    env!("CARGO_PKG_VERSION")
);

/// Builds the greeting for an optional name
pub fn greet(name: &str) -> String {
    if name.is_empty() {
        format!("Hello, World!\n{}", VERSION_LINE)
    } else {
        format!("Hello there, {}!\n{}", escape_html(name), VERSION_LINE)
    }
}

/// Escapes `& < > " '`
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

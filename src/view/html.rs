//! HTML text helpers shared by the renderers.

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Serialize JSON for inlining inside a `<script>` element.
///
/// `</` is split so backend strings cannot close the script tag early.
pub fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// `<p>` wrapper used for the fixed status messages.
pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", escape(text))
}

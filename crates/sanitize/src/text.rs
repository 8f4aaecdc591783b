/// Escape plain text for HTML body content or a quoted attribute.
///
/// Not safe for unquoted attribute values.
pub fn escape_text(text: &str) -> String {
    let mut ret_val = String::with_capacity(usize::max(4, text.len()));
    for c in text.chars() {
        let replacement = match c {
            // starts a tag
            '<' => "&lt;",
            '>' => "&gt;",
            // end quoted attribute values
            '"' => "&quot;",
            '\'' => "&#39;",
            // starts a character reference
            '&' => "&amp;",
            '\0' => "&#65533;",
            _ => {
                ret_val.push(c);
                continue;
            }
        };
        ret_val.push_str(replacement);
    }
    ret_val
}

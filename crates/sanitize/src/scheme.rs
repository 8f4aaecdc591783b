use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::policy::{self, DANGEROUS_PROTOCOL};

static CHAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&#x?[0-9a-f]+;?").expect("CHAR_REFERENCE: hardcoded regex is valid")
});

// Stricter than CHAR_REFERENCE so `&#106avascript` decodes the way a browser reads it
static NUMERIC_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&#(?:x([0-9a-f]+)|([0-9]+));?").expect("NUMERIC_REFERENCE: hardcoded regex is valid")
});

static UNICODE_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\\u([0-9a-f]{4})").expect("UNICODE_ESCAPE: hardcoded regex is valid")
});

// Named references are case sensitive
static NAMED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(colon|Tab|NewLine);").expect("NAMED_REFERENCE: hardcoded regex is valid")
});

/// Check the value of a URL-bearing attribute.
///
/// Returns the value unchanged when it is safe, or an empty string when it
/// names a script-capable or embedded-data scheme. Attributes that don't
/// carry URLs are passed through untouched.
///
/// The attribute itself is kept either way, so markup that depends on its
/// presence doesn't change shape. This also empties `data:` images.
pub fn check_url_value<'a>(attr: &str, value: &'a str) -> &'a str {
    if !policy::is_url_attr(attr) {
        return value;
    }
    if is_dangerous_url(value) {
        trace!(attr, value, "emptying dangerous url");
        ""
    } else {
        value
    }
}

/// Whether a raw attribute value would resolve to a dangerous scheme.
///
/// Escapes are only interpreted for this test; the caller keeps the
/// original text. Both the escapes-removed and escapes-decoded spellings
/// are checked, since either can be what a browser ends up seeing.
pub fn is_dangerous_url(value: &str) -> bool {
    DANGEROUS_PROTOCOL.is_match(&strip_escapes(value))
        || DANGEROUS_PROTOCOL.is_match(&decode_escapes(value))
}

/// Drop numeric character references and `\uXXXX` escapes entirely.
fn strip_escapes(value: &str) -> Cow<'_, str> {
    match CHAR_REFERENCE.replace_all(value, "") {
        Cow::Borrowed(s) => UNICODE_ESCAPE.replace_all(s, ""),
        Cow::Owned(s) => Cow::Owned(UNICODE_ESCAPE.replace_all(&s, "").into_owned()),
    }
}

/// Replace escapes with the characters they name, then drop the tab and
/// newline characters that URL parsing ignores.
fn decode_escapes(value: &str) -> String {
    fn code_point(digits: &str, radix: u32) -> String {
        // Out of range or malformed references decode to nothing
        u32::from_str_radix(digits, radix).ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    }

    let decoded = NUMERIC_REFERENCE.replace_all(value, |caps: &Captures<'_>| {
        match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => code_point(hex.as_str(), 16),
            (None, Some(dec)) => code_point(dec.as_str(), 10),
            (None, None) => String::new(),
        }
    });
    let decoded = UNICODE_ESCAPE.replace_all(&decoded, |caps: &Captures<'_>| {
        code_point(&caps[1], 16)
    });
    let decoded = NAMED_REFERENCE.replace_all(&decoded, |caps: &Captures<'_>| {
        match &caps[1] {
            "colon" => ":",
            "Tab" => "\t",
            _ => "\n",
        }
    });

    decoded.chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_schemes() {
        assert_eq!(check_url_value("href", "javascript:alert(1)"), "");
        assert_eq!(check_url_value("href", "  JaVaScRiPt:alert(1)"), "");
        assert_eq!(check_url_value("src", "vbscript:msgbox(1)"), "");
        assert_eq!(check_url_value("action", "\0javascript:x"), "");
    }

    #[test]
    fn data_uris_are_always_emptied() {
        assert_eq!(check_url_value("src", "data:image/png;base64,iVBORw0KGgo="), "");
        assert_eq!(check_url_value("src", "data:text/html,<b>x</b>"), "");
    }

    #[test]
    fn safe_urls_pass_through() {
        assert_eq!(check_url_value("href", "https://example.com/"), "https://example.com/");
        assert_eq!(check_url_value("href", "/blog/post#javascript:"), "/blog/post#javascript:");
        assert_eq!(check_url_value("href", "mailto:someone@example.com"), "mailto:someone@example.com");
        assert_eq!(check_url_value("href", ""), "");
    }

    #[test]
    fn non_url_attributes_are_not_checked() {
        assert_eq!(check_url_value("title", "javascript:alert(1)"), "javascript:alert(1)");
        assert_eq!(check_url_value("alt", "data:"), "data:");
    }

    #[test]
    fn entity_obfuscation() {
        // Reference splitting the keyword
        assert_eq!(check_url_value("href", "java&#x09;script:alert(1)"), "");
        assert_eq!(check_url_value("href", "java&#9script:alert(1)"), "");
        // Reference spelling a letter of the keyword
        assert_eq!(check_url_value("href", "&#106;avascript:alert(1)"), "");
        assert_eq!(check_url_value("href", "&#106avascript:alert(1)"), "");
        assert_eq!(check_url_value("href", "&#0000106;avascript:alert(1)"), "");
        assert_eq!(check_url_value("href", "jav&#X61;script:alert(1)"), "");
        assert_eq!(check_url_value("href", "javascript&#58;alert(1)"), "");
        assert_eq!(check_url_value("href", "javascript&colon;alert(1)"), "");
    }

    #[test]
    fn unicode_escape_obfuscation() {
        assert_eq!(check_url_value("href", "\\u006aavascript:alert(1)"), "");
        assert_eq!(check_url_value("href", "java\\u0000script:alert(1)"), "");
    }

    #[test]
    fn embedded_whitespace() {
        assert_eq!(check_url_value("href", "java\tscript:alert(1)"), "");
        assert_eq!(check_url_value("href", "java\nscript:alert(1)"), "");
    }

    #[test]
    fn safe_value_is_returned_undecoded() {
        let value = "https://example.com/?q=&#x41;";
        assert_eq!(check_url_value("href", value), value);
    }

    #[test]
    fn malformed_references_do_not_panic() {
        assert!(!is_dangerous_url("&#xffffffffff;"));
        assert!(!is_dangerous_url("&#99999999999999999999;"));
        assert!(!is_dangerous_url("&#xd800;"));
        assert!(!is_dangerous_url("\\u12"));
    }
}

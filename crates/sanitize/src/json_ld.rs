//! Serialized structured data that is safe to paste inside `<script>`.
//!
//! The HTML parser ends a script element at the first `</script`, no matter
//! whether it sits inside a JSON string. Writing it as `<\/script` keeps
//! the JSON equivalent (`\/` is a valid escape for `/`) while breaking
//! the end tag.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SCRIPT_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(script)").expect("SCRIPT_END: hardcoded regex is valid")
});

/// Break every `</script` in already serialized JSON.
pub fn escape_script_json(serialized: &str) -> Cow<'_, str> {
    SCRIPT_END.replace_all(serialized, r"<\/${1}")
}

/// Serialize a JSON value for embedding in a script element.
pub fn escape_for_script_embedding(value: &serde_json::Value) -> String {
    // Display for Value is the compact serializer and can't fail
    escape_script_json(&value.to_string()).into_owned()
}

/// Serialize any record for embedding in a script element.
pub fn to_script_json<T>(value: &T) -> Result<String, crate::Error>
    where T: Serialize + ?Sized,
{
    let serialized = serde_json::to_string(value)?;
    Ok(escape_script_json(&serialized).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_records_are_unchanged() {
        let value = json!({ "@type": "MusicSchool", "name": "Test" });
        let out = escape_for_script_embedding(&value);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["@type"], "MusicSchool");
        assert_eq!(parsed, value);
    }

    #[test]
    fn script_end_is_broken() {
        let value = json!({ "title": "</script><script>alert(1)</script>" });
        let out = escape_for_script_embedding(&value);
        assert!(!out.contains("</script>"));
        assert!(out.contains(r"<\/script>"));
    }

    #[test]
    fn any_case_is_broken_and_case_is_kept() {
        let out = escape_for_script_embedding(&json!({ "desc": "</SCRIPT>" }));
        assert!(!out.to_ascii_lowercase().contains("</script"));
        assert!(out.contains(r"<\/SCRIPT>"));
    }

    #[test]
    fn end_tag_without_bracket_is_broken() {
        let out = escape_script_json(r#""</script ""#);
        assert_eq!(out, r#""<\/script ""#);
    }

    #[test]
    fn escaped_output_round_trips() {
        let value = json!({ "t": "a</script>b", "n": [1, 2, { "x": "</Script>" }] });
        let out = escape_for_script_embedding(&value);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn typed_records() {
        #[derive(serde::Serialize)]
        struct Post<'a> {
            headline: &'a str,
        }
        let out = to_script_json(&Post { headline: "x</script>" }).unwrap();
        assert_eq!(out, r#"{"headline":"x<\/script>"}"#);
    }

    #[test]
    fn unserializable_records_are_an_error() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(vec![1u8], "value");
        assert!(to_script_json(&map).is_err());
    }
}

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::policy;
use crate::scheme;

// name, then an optional double-quoted, single-quoted or bare value
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+([0-9A-Za-z_:-]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]*)))?"#)
        .expect("ATTRIBUTE: hardcoded regex is valid")
});

const NOOPENER: &str = "noopener noreferrer";

/// Split the attribute text of a tag into `(name, value)` pairs.
///
/// Names are lower-cased; a missing value is the empty string. Anything
/// that doesn't look like an attribute is skipped.
pub fn parse_attributes(source: &str) -> impl Iterator<Item = (String, &str)> {
    ATTRIBUTE.captures_iter(source).map(|caps| {
        let name = caps[1].to_ascii_lowercase();
        let value = caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or("");
        (name, value)
    })
}

fn escape_value(value: &str) -> String {
    value.replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Rebuild the opening tag for `tag` keeping only permitted attributes.
///
/// `tag` must already be lower-cased, and `source` is everything between
/// the tag name and the closing `>`.
pub fn filter_attributes(tag: &str, source: &str) -> String {
    let mut kept: Vec<(String, &str)> = Vec::new();
    for (name, value) in parse_attributes(source) {
        if !policy::is_allowed_attr(tag, &name) {
            trace!(tag, attr = %name, "dropping attribute");
            continue;
        }
        let value = scheme::check_url_value(&name, value);
        kept.push((name, value));
    }

    let opens_new_context = kept.iter()
        .any(|(name, value)| name == "target" && value.eq_ignore_ascii_case("_blank"));
    if opens_new_context {
        kept.retain(|(name, _)| name != "rel");
        kept.push(("rel".into(), NOOPENER));
    }

    let mut out = String::with_capacity(source.len() + tag.len() + 3);
    out.push('<');
    out.push_str(tag);
    for (name, value) in &kept {
        write!(out, " {}=\"{}\"", name, escape_value(value)).unwrap();
    }
    if source.trim_end().ends_with('/') {
        out.push_str(" />");
    } else {
        out.push('>');
    }
    out
}

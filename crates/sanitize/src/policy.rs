//! Fixed tag and attribute policy for rich-text markup.
//!
//! Everything here is read-only after first use. Callers pass lower-cased
//! tag and attribute names.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Elements removed together with their content, in the order they are stripped.
pub const BLOCKED_TAGS: &[&str] = &[
    "script", "iframe", "form", "object", "embed", "link", "meta", "style",
];

/// Elements that keep their markup; anything else loses the tag but keeps its text.
const ALLOWED_TAG_NAMES: &[&str] = &[
    "p", "br", "hr",
    "h1", "h2", "h3", "h4", "h5", "h6",
    "ul", "ol", "li",
    "strong", "em", "b", "i", "u", "s", "del", "ins", "mark",
    "blockquote", "pre", "code",
    "a", "img",
    "table", "thead", "tbody", "tr", "th", "td", "caption",
    "div", "span", "figure", "figcaption",
];

/// Allowed on every kept tag.
const GENERIC_ATTRIBUTES: &[&str] = &["class", "id"];

/// Attributes whose values are URLs and go through the scheme check.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action"];

static ALLOWED_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ALLOWED_TAG_NAMES.iter().copied().collect()
});

// Leading whitespace and NULs are ignored by browsers when resolving the scheme.
pub(crate) static DANGEROUS_PROTOCOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\s\x00]*(?:javascript|vbscript|data):")
        .expect("DANGEROUS_PROTOCOL: hardcoded regex is valid")
});

fn tag_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "title", "target", "rel"],
        "img" => &["src", "alt", "width", "height", "loading"],
        "td" => &["colspan", "rowspan"],
        "th" => &["colspan", "rowspan", "scope"],
        "ol" => &["start", "type"],
        "li" => &["value"],
        _ => &[],
    }
}

pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAGS.contains(tag)
}

pub fn is_blocked_tag(tag: &str) -> bool {
    BLOCKED_TAGS.contains(&tag)
}

/// Whether `attr` may appear on `tag`: the tag's own list plus the generic one.
pub fn is_allowed_attr(tag: &str, attr: &str) -> bool {
    GENERIC_ATTRIBUTES.contains(&attr) || tag_attributes(tag).contains(&attr)
}

pub fn is_url_attr(attr: &str) -> bool {
    URL_ATTRIBUTES.contains(&attr)
}

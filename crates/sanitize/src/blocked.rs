use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::policy::BLOCKED_TAGS;

struct BlockedPattern {
    name: &'static str,
    /// Start tag through the first matching end tag.
    element: Regex,
    /// Any start tag left over, including self-closed and unterminated ones.
    start_tag: Regex,
}

static BLOCKED_PATTERNS: LazyLock<Vec<BlockedPattern>> = LazyLock::new(|| {
    BLOCKED_TAGS.iter().map(|&name| BlockedPattern {
        name,
        element: Regex::new(&format!(r"(?is)<{name}.*?</{name}\s*>"))
            .expect("blocked element pattern is valid"),
        start_tag: Regex::new(&format!(r"(?i)<{name}[^>]*>"))
            .expect("blocked start tag pattern is valid"),
    }).collect()
});

fn remove_all(re: &Regex, text: &mut Cow<'_, str>) -> bool {
    let removed = match re.replace_all(text, "") {
        Cow::Owned(s) => s,
        Cow::Borrowed(_) => return false,
    };
    *text = Cow::Owned(removed);
    true
}

/// Remove blocked elements along with everything inside them.
///
/// Matching is lexical: an element nested inside another element of the
/// same name ends the outer match early and can leave residue behind.
pub fn remove_blocked(html: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(html);
    for pattern in BLOCKED_PATTERNS.iter() {
        if remove_all(&pattern.element, &mut out) {
            trace!(tag = pattern.name, "removed blocked element");
        }
        if remove_all(&pattern.start_tag, &mut out) {
            trace!(tag = pattern.name, "removed unterminated blocked tag");
        }
    }
    out
}

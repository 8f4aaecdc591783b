use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::attrs;
use crate::policy;

static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([0-9A-Za-z_-]+)([^>]*)>").expect("TAG_TOKEN: hardcoded regex is valid")
});

fn rewrite_token(caps: &Captures<'_>) -> String {
    let closing = !caps[1].is_empty();
    let name = caps[2].to_ascii_lowercase();

    if !policy::is_allowed_tag(&name) {
        if policy::is_blocked_tag(&name) {
            trace!(tag = %name, closing, "dropping leftover blocked tag");
        } else {
            trace!(tag = %name, closing, "dropping tag");
        }
        return String::new();
    }

    if closing {
        format!("</{name}>")
    } else {
        attrs::filter_attributes(&name, &caps[3])
    }
}

// Dropping a token can join the text on either side into a new tag
fn push_text(out: &mut String, text: &str) {
    out.push_str(&text.replace('<', "&lt;"));
}

/// Rewrite every tag-like token in a single pass.
///
/// Allowed start tags are rebuilt with filtered attributes, allowed end
/// tags are normalized to lower case, and everything else is dropped.
/// Any `<` in the text between tokens is written as `&lt;`, so every tag
/// left in the output is one this pass produced. No nesting is tracked.
pub fn rewrite_tags(html: &str) -> Cow<'_, str> {
    if !html.contains('<') {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in TAG_TOKEN.captures_iter(html) {
        let Some(token) = caps.get(0) else { continue };
        push_text(&mut out, &html[last..token.start()]);
        out.push_str(&rewrite_token(&caps));
        last = token.end();
    }
    push_text(&mut out, &html[last..]);
    Cow::Owned(out)
}

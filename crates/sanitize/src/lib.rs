//! Rewrites untrusted rich-text markup into a small safe subset of HTML.
//!
//! The pipeline is lexical: blocked elements are cut out with their content
//! first, then every remaining tag token is kept, rebuilt or dropped on its
//! own. There is no DOM and no attempt to balance tags.
//!
//! ```
//! let html = r#"<p onclick="x" class="c">Hi</p><script>alert(1)</script>"#;
//! assert_eq!(sanitize::sanitize(html), r#"<p class="c">Hi</p>"#);
//! ```

#[macro_use]
extern crate tracing;

mod attrs;
mod blocked;
mod scheme;
mod tags;
mod text;

pub mod json_ld;
pub mod policy;

pub use attrs::filter_attributes;
pub use blocked::remove_blocked;
pub use json_ld::{escape_for_script_embedding, to_script_json};
pub use scheme::{check_url_value, is_dangerous_url};
pub use tags::rewrite_tags;
pub use text::escape_text;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to serialize structured data")]
    Serialize(#[from] serde_json::Error),
}

/// Sanitize untrusted rich-text markup.
///
/// Never fails: anything that can't be interpreted is either passed through
/// as text or dropped.
pub fn sanitize(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let unblocked = remove_blocked(html);
    let out = rewrite_tags(&unblocked).into_owned();
    debug!(input_len = html.len(), output_len = out.len(), "sanitized markup");
    out
}

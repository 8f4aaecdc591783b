use sanitize::{escape_for_script_embedding, sanitize};
use serde_json::json;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn script_is_removed_with_content() {
    assert_eq!(sanitize("<p>Hi</p><script>alert(1)</script>"), "<p>Hi</p>");

    let out = sanitize("<p>テスト</p><script>alert(\"xss\")</script>");
    assert!(!out.contains("<script>"));
    assert!(!out.contains("alert"));
    assert!(out.contains("テスト"));
}

#[test]
fn javascript_link_in_new_tab() {
    assert_eq!(
        sanitize(r#"<a href="javascript:x" target="_blank" rel="nofollow">L</a>"#),
        r#"<a href="" target="_blank" rel="noopener noreferrer">L</a>"#,
    );
}

#[test]
fn unknown_tag_keeps_text() {
    assert_eq!(sanitize("<blink>text</blink>"), "text");
    assert_eq!(sanitize("<p>通常</p><blink>点滅テキスト</blink>"), "<p>通常</p>点滅テキスト");
}

#[test]
fn data_uri_image() {
    let out = sanitize(r#"<img src="data:text/html,<script>alert(1)</script>" alt="t">"#);
    assert!(out.contains(r#"src="""#), "{out}");
    assert!(out.contains(r#"alt="t""#), "{out}");
    assert!(!out.contains("data:text/html"));
}

#[test]
fn event_handler_is_dropped() {
    assert_eq!(sanitize(r#"<p onclick="x" class="c">T</p>"#), r#"<p class="c">T</p>"#);
}

#[test]
fn script_end_in_structured_data() {
    let out = escape_for_script_embedding(&json!({ "title": "</script><script>alert(1)</script>" }));
    assert!(out.contains(r"<\/script>"));
    assert!(!out.contains("</script>"));
}

#[test]
fn iframe_between_paragraphs() {
    let out = sanitize(r#"<p>前</p><iframe src="https://evil.example"></iframe><p>後</p>"#);
    assert_eq!(out, "<p>前</p><p>後</p>");
}

#[test]
fn allowed_structure_survives() {
    let html = "<h2>見出し</h2><ul><li>項目1</li></ul><blockquote>引用</blockquote>\
        <table><thead><tr><th scope=\"col\">a</th></tr></thead><tbody><tr><td colspan=2>b</td></tr></tbody></table>";
    assert_eq!(
        sanitize(html),
        "<h2>見出し</h2><ul><li>項目1</li></ul><blockquote>引用</blockquote>\
        <table><thead><tr><th scope=\"col\">a</th></tr></thead><tbody><tr><td colspan=\"2\">b</td></tr></tbody></table>",
    );
}

#[test]
fn regular_image_is_kept() {
    let out = sanitize(r#"<img src="https://images.example.com/test.jpg" alt="テスト" />"#);
    assert_eq!(out, r#"<img src="https://images.example.com/test.jpg" alt="テスト" />"#);
}

#[test]
fn mixed_case_scheme_is_emptied() {
    let out = sanitize(r#"<a href="  JaVaScRiPt:alert(1)">悪意リンク</a>"#);
    assert_eq!(out, r#"<a href="">悪意リンク</a>"#);
}

#[test]
fn obfuscated_schemes_are_emptied() {
    for href in [
        "&#106;avascript:alert(1)",
        "&#x6A;avascript:alert(1)",
        "java&#x09;script:alert(1)",
        "\\u006aavascript:alert(1)",
        "\u{0}javascript:alert(1)",
        "vbscript:msgbox(1)",
    ] {
        let out = sanitize(&format!(r#"<a href="{href}">x</a>"#));
        assert_eq!(out, r#"<a href="">x</a>"#, "input href {href:?}");
    }
}

#[test]
fn exactly_one_rel_with_blank_target() {
    for html in [
        r#"<a href="/" target="_blank">x</a>"#,
        r#"<a href="/" target="_blank" rel="nofollow">x</a>"#,
        r#"<a rel="a" href="/" rel="b" target="_blank" rel="c">x</a>"#,
        r#"<a target="_blank" rel="opener">x</a>"#,
    ] {
        let out = sanitize(html);
        assert_eq!(count(&out, "rel="), 1, "{out}");
        assert!(out.contains(r#"rel="noopener noreferrer""#), "{out}");
    }
}

#[test]
fn attributes_outside_allow_set_never_survive() {
    let html = r#"<div style="x" onmouseover="y" class="k" data-x="1"><a href="/" onclick="z" name="n" title="t">l</a><img src="/i.png" srcset="a" onerror="e" width=10></div>"#;
    let out = sanitize(html);
    for attr in ["style", "onmouseover", "data-x", "onclick", "name=", "srcset", "onerror"] {
        assert!(!out.contains(attr), "{attr} survived in {out}");
    }
    assert_eq!(
        out,
        r#"<div class="k"><a href="/" title="t">l</a><img src="/i.png" width="10"></div>"#,
    );
}

#[test]
fn text_outside_blocked_elements_is_verbatim() {
    let html = "before <b>bold</b> <style>.x{}</style> middle <form action=\"/x\"><input name=q></form> after";
    assert_eq!(sanitize(html), "before <b>bold</b>  middle  after");
}

#[test]
fn every_blocked_tag_is_removed() {
    for tag in sanitize::policy::BLOCKED_TAGS {
        let html = format!("a<{tag} x=\"1\">inner</{tag}>b<{tag}/>c<{}>d", tag.to_uppercase());
        assert_eq!(sanitize(&html), "abcd", "{tag}");
    }
}

#[test]
fn no_live_script_start_tag() {
    let inputs = [
        "<script>alert(1)</script>",
        "<SCRIPT SRC=//x.example/x.js></SCRIPT>",
        "<scr<script>ipt>alert(1)</script>",
        "<<script>script>alert(1)<</script>/script>",
        "<script\n>alert(1)",
        "<p>ok</p><script/src=x>",
        "<svg><script>alert(1)</script></svg>",
        "<<x>script>alert(1)</script>",
        "<<blink>script>alert(1)",
        "<<x>img src=x onerror=alert(1)>",
        "<a title=\"<script>\">t</a>",
    ];
    for input in inputs {
        let out = sanitize(input).to_ascii_lowercase();
        assert!(!out.contains("<script"), "{input:?} -> {out:?}");
    }
}

#[test]
fn malformed_markup_degrades() {
    assert_eq!(sanitize("<p>unclosed"), "<p>unclosed");
    assert_eq!(sanitize("<p"), "&lt;p");
    assert_eq!(sanitize("a < b > c"), "a &lt; b > c");
    assert_eq!(sanitize("</>"), "&lt;/>");
}

#[test]
fn dropped_tags_cannot_assemble_new_ones() {
    assert_eq!(sanitize("<<x>script>alert(1)</script>"), "&lt;script>alert(1)");

    let out = sanitize("<<x>img src=x onerror=alert(1)>");
    assert!(!out.contains("<img"), "{out}");
    assert_eq!(out, "&lt;img src=x onerror=alert(1)>");

    let out = sanitize(r#"<p><<span>a href="javascript:alert(1)">x</p>"#);
    assert!(!out.contains("<a "), "{out}");
}


use std::fmt::Write;

use serde::Serialize;
use time::OffsetDateTime;

use runtime::pagination::{pagination_range, PageItem};
use runtime::utils::{excerpt_from_content, format_date_iso, format_date_ja, to_slug};
use sanitize::escape_text;

use crate::config::Config;
use crate::content::BlogPost;

pub const PLACEHOLDER_EYECATCH: &str = "/images/blog-placeholder.jpg";
pub const EXCERPT_LENGTH: usize = 120;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Post {:?} has no usable slug", .0)]
    NoSlug(String),
    #[error("Failed to build structured data for post {:?}", .0)]
    StructuredData(String, #[source] sanitize::Error),
}

/// A post with every field made safe for direct insertion into a page.
#[derive(Debug, Clone)]
pub struct PreparedPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub category_slug: String,
    pub date: String,
    pub date_iso: String,
    pub eyecatch_url: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub content: String,
    pub json_ld: String,
}

#[derive(Serialize)]
struct Organization<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlogPosting<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    headline: &'a str,
    description: &'a str,
    image: &'a str,
    url: String,
    #[serde(with = "time::serde::rfc3339")]
    date_published: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    date_modified: OffsetDateTime,
    article_section: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keywords: Vec<&'a str>,
    publisher: Organization<'a>,
}

pub fn post_path(slug: &str) -> String {
    format!("/posts/{slug}.html")
}

/// Listing page `n`; `prefix` is empty for the main listing or `/category/{slug}`.
pub fn list_path(prefix: &str, n: usize) -> String {
    format!("{prefix}/page/{n}.html")
}

fn eyecatch_url(post: &BlogPost) -> &str {
    post.eyecatch.as_ref()
        .map(|image| sanitize::check_url_value("src", &image.url))
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_EYECATCH)
}

#[tracing::instrument(skip_all, fields(id = %post.id))]
pub fn prepare_post(post: &BlogPost, config: &Config) -> Result<PreparedPost, RenderError> {
    let slug = Some(to_slug(&post.slug))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| to_slug(&post.id));
    if slug.is_empty() {
        return Err(RenderError::NoSlug(post.id.clone()));
    }

    let content = sanitize::sanitize(&post.content);

    // Plain text, escaped only when written into the page
    let excerpt = match post.excerpt.trim() {
        "" => excerpt_from_content(&content, EXCERPT_LENGTH),
        text => text.to_owned(),
    };
    let eyecatch = eyecatch_url(post);
    if post.eyecatch.is_some() && eyecatch == PLACEHOLDER_EYECATCH {
        debug!("Eyecatch URL rejected, using placeholder");
    }

    let image_url = if eyecatch.starts_with('/') {
        config.url_for(eyecatch)
    } else {
        eyecatch.to_owned()
    };
    let posting = BlogPosting {
        context: "https://schema.org",
        kind: "BlogPosting",
        headline: &post.title,
        description: &excerpt,
        image: &image_url,
        url: config.url_for(&post_path(&slug)),
        date_published: post.published_at,
        date_modified: post.revised_at,
        article_section: &post.category.name,
        keywords: post.tags.iter().map(String::as_str).collect(),
        publisher: Organization { kind: "Organization", name: &config.site_name },
    };
    let json_ld = sanitize::to_script_json(&posting)
        .map_err(|e| RenderError::StructuredData(post.id.clone(), e))?;

    let category_slug = Some(to_slug(&post.category.slug))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| to_slug(&post.category.id));

    Ok(PreparedPost {
        id: post.id.clone(),
        title: escape_text(&post.title),
        category: escape_text(&post.category.name),
        category_slug,
        date: format_date_ja(&post.published_at, Some(config.utc_offset)),
        date_iso: format_date_iso(&post.published_at, Some(config.utc_offset)),
        eyecatch_url: escape_text(eyecatch),
        excerpt: escape_text(&excerpt),
        tags: post.tags.iter().map(|t| escape_text(t)).collect(),
        content,
        json_ld,
        slug,
    })
}

/// One page of a listing.
#[derive(Debug)]
pub struct ListPage<'a> {
    /// 1-based
    pub number: usize,
    pub total_pages: usize,
    pub posts: &'a [PreparedPost],
    pub nav: Vec<PageItem>,
}

/// Split a listing into pages of `per_page` posts. An empty listing still has one page.
pub fn paginate(posts: &[PreparedPost], per_page: usize, delta: usize) -> Vec<ListPage<'_>> {
    let per_page = per_page.max(1);
    let total_pages = posts.len().div_ceil(per_page).max(1);
    (1..=total_pages)
        .map(|number| {
            let start = (number - 1) * per_page;
            let end = (start + per_page).min(posts.len());
            ListPage {
                number,
                total_pages,
                posts: &posts[start..end],
                nav: pagination_range(number, total_pages, delta),
            }
        })
        .collect()
}

fn write_category_link(out: &mut String, post: &PreparedPost) {
    if post.category_slug.is_empty() {
        write!(out, r#"<span class="category">{}</span>"#, post.category).unwrap();
    } else {
        let href = list_path(&format!("/category/{}", post.category_slug), 1);
        write!(out, r#"<a class="category" href="{href}">{}</a>"#, post.category).unwrap();
    }
}

pub fn render_post_page(post: &PreparedPost) -> String {
    let mut out = String::with_capacity(post.content.len() + post.json_ld.len() + 512);
    out.push_str("<article class=\"post\">\n<header>\n");
    writeln!(out, "<h1>{}</h1>", post.title).unwrap();
    write!(out, r#"<p class="meta"><time datetime="{}">{}</time> "#, post.date_iso, post.date).unwrap();
    write_category_link(&mut out, post);
    out.push_str("</p>\n</header>\n");
    writeln!(out, r#"<img class="eyecatch" src="{}" alt="{}" loading="lazy">"#, post.eyecatch_url, post.title).unwrap();
    writeln!(out, "<div class=\"content\">\n{}\n</div>", post.content).unwrap();
    if !post.tags.is_empty() {
        out.push_str("<ul class=\"tags\">");
        for tag in &post.tags {
            write!(out, "<li>{tag}</li>").unwrap();
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</article>\n");
    writeln!(out, r#"<script type="application/ld+json">{}</script>"#, post.json_ld).unwrap();
    out
}

/// `heading` is plain text; `prefix` as for [`list_path`].
pub fn render_list_page(page: &ListPage<'_>, heading: &str, prefix: &str) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"post-list\">\n");
    writeln!(out, "<h1>{}</h1>", escape_text(heading)).unwrap();
    for post in page.posts {
        out.push_str("<article>\n");
        writeln!(out, r#"<a href="{}"><img src="{}" alt="" loading="lazy"><h2>{}</h2></a>"#,
            post_path(&post.slug), post.eyecatch_url, post.title).unwrap();
        write!(out, r#"<p class="meta"><time datetime="{}">{}</time> "#, post.date_iso, post.date).unwrap();
        write_category_link(&mut out, post);
        out.push_str("</p>\n");
        writeln!(out, "<p>{}</p>", post.excerpt).unwrap();
        out.push_str("</article>\n");
    }
    out.push_str("</section>\n");

    if page.total_pages > 1 {
        out.push_str("<nav class=\"pagination\">");
        for item in &page.nav {
            match *item {
                PageItem::Page(n) if n == page.number => {
                    write!(out, r#"<span aria-current="page">{n}</span>"#).unwrap();
                },
                PageItem::Page(n) => {
                    write!(out, r#"<a href="{}">{n}</a>"#, list_path(prefix, n)).unwrap();
                },
                PageItem::Gap => out.push_str(r#"<span class="gap">…</span>"#),
            }
        }
        out.push_str("</nav>\n");
    }
    out
}

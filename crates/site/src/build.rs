
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use runtime::utils::format_error_disp;

use crate::config::Config;
use crate::content::BlogList;
use crate::render::{self, PreparedPost};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub posts: usize,
    pub skipped: usize,
    pub list_pages: usize,
    pub category_pages: usize,
}

fn write_page(output: &Path, path: &str, html: &str) -> Result<(), anyhow::Error> {
    let file = output.join(path.trim_start_matches('/'));
    if let Some(parent) = file.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(&file, html)?;
    trace!("wrote {}", file.display());
    Ok(())
}

fn write_listing(
    config: &Config, posts: &[PreparedPost], heading: &str, prefix: &str,
) -> Result<usize, anyhow::Error> {
    let pages = render::paginate(posts, config.per_page, config.pagination_delta);
    for page in &pages {
        let html = render::render_list_page(page, heading, prefix);
        write_page(&config.output, &render::list_path(prefix, page.number), &html)?;
    }
    Ok(pages.len())
}

/// Prepare every post in the export and write post, listing and category pages.
///
/// Posts that can't be prepared are logged and skipped; I/O failures abort the build.
#[tracing::instrument(skip_all, fields(input = %config.input.display()))]
pub fn build_site(config: &Config) -> Result<BuildSummary, anyhow::Error> {
    let mut list = BlogList::load(&config.input)
        .with_context(|| format!("Loading posts from {}", config.input.display()))?;
    list.sort_newest_first();

    let mut summary = BuildSummary::default();
    let mut seen_slugs = HashSet::new();
    let mut prepared = Vec::with_capacity(list.contents.len());
    for post in &list.contents {
        match render::prepare_post(post, config) {
            Ok(p) if !seen_slugs.insert(p.slug.clone()) => {
                warn!("Skipping post {:?}: slug {:?} is already used", p.id, p.slug);
                summary.skipped += 1;
            },
            Ok(p) => prepared.push(p),
            Err(e) => {
                warn!("Skipping post: {}", format_error_disp(&e));
                summary.skipped += 1;
            },
        }
    }

    for post in &prepared {
        write_page(&config.output, &render::post_path(&post.slug), &render::render_post_page(post))
            .with_context(|| format!("Writing post {:?}", post.id))?;
    }
    summary.posts = prepared.len();

    summary.list_pages = write_listing(config, &prepared, &config.site_name, "")
        .context("Writing listing pages")?;

    let mut categories = BTreeMap::<&str, Vec<PreparedPost>>::new();
    for post in prepared.iter().filter(|p| !p.category_slug.is_empty()) {
        categories.entry(&post.category_slug).or_default().push(post.clone());
    }
    for (slug, posts) in &categories {
        let prefix = format!("/category/{slug}");
        // Prepared names are already escaped, the listing wants the raw one
        let heading = list.contents.iter()
            .find(|p| p.id == posts[0].id)
            .map_or(*slug, |p| p.category.name.as_str());
        summary.category_pages += write_listing(config, posts, heading, &prefix)
            .with_context(|| format!("Writing category {slug:?}"))?;
    }

    info!(
        "Built {} posts, {} listing pages, {} category pages ({} skipped)",
        summary.posts, summary.list_pages, summary.category_pages, summary.skipped,
    );
    Ok(summary)
}

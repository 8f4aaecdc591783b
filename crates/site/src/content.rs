
use std::path::Path;

use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read content export")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse content export")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// A blog record as exported by the content service.
///
/// `content` is author-supplied rich text and must be sanitized before use;
/// every other string field is plain text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub revised_at: OffsetDateTime,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub eyecatch: Option<Image>,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogList {
    pub contents: Vec<BlogPost>,
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
}

impl BlogList {
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, ContentError> {
        Ok(serde_json::from_reader(std::io::BufReader::new(reader))?)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let file = fs_err::File::open(path)?;
        let list = Self::from_reader(file)?;
        if list.contents.len() < list.total_count {
            warn!(
                "Export holds {} of {} posts, the rest will be missing",
                list.contents.len(), list.total_count,
            );
        }
        debug!("Loaded {} posts", list.contents.len());
        Ok(list)
    }

    /// Order posts by publication date, most recent first.
    pub fn sort_newest_first(&mut self) {
        self.contents.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    }

    pub fn in_category<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a BlogPost> + 'a {
        self.contents.iter().filter(move |post| post.category.id == category_id)
    }
}

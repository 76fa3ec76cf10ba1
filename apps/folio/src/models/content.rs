use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Blog,
    Study,
}

impl ContentKind {
    /// Subdirectory under the content root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Study => "studies",
        }
    }
}

/// YAML frontmatter block at the top of a blog post or case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    // Case-study fields
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub outcomes: Vec<String>,
}

/// Listing view: everything but the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub slug: String,
    pub kind: ContentKind,
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub reading_time_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub slug: String,
    pub kind: ContentKind,
    pub meta: Frontmatter,
    pub body: String,
    pub excerpt: String,
    pub word_count: usize,
    pub reading_time_minutes: u32,
}

impl Document {
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            slug: self.slug.clone(),
            kind: self.kind,
            title: self.meta.title.clone(),
            date: self.meta.date,
            excerpt: self.excerpt.clone(),
            tags: self.meta.tags.clone(),
            reading_time_minutes: self.reading_time_minutes,
        }
    }
}

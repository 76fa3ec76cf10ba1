// Markdown content: blog posts and case studies.
// Raw text comes from a key-value store; parsing happens on read.

pub mod frontmatter;
pub mod handlers;
pub mod reading;
pub mod store;

use thiserror::Error;

use crate::models::content::{ContentKind, Document};

pub use store::ContentStore;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("document has no frontmatter block")]
    MissingFrontmatter,

    #[error("frontmatter block is not closed")]
    UnclosedFrontmatter,

    #[error("invalid frontmatter: {0}")]
    InvalidFrontmatter(#[from] serde_yaml::Error),

    #[error("failed to load content: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses raw markdown into a document with derived reading stats.
pub fn parse_document(kind: ContentKind, slug: &str, raw: &str) -> Result<Document, ContentError> {
    let (meta, body) = frontmatter::parse(raw)?;
    let word_count = reading::word_count(body);
    let excerpt = match meta.description.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => reading::excerpt(body, reading::EXCERPT_CHARS),
    };

    Ok(Document {
        slug: slug.to_string(),
        kind,
        body: body.trim().to_string(),
        excerpt,
        word_count,
        reading_time_minutes: reading::reading_time_minutes(word_count),
        meta,
    })
}

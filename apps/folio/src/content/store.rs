use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::{info, warn};

use crate::content::{parse_document, ContentError};
use crate::models::content::{ContentKind, Document, DocumentSummary};

/// In-memory `(kind, slug) -> raw markdown` store. Documents are parsed on
/// read, so an edit to the raw text shows up on the next request.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    raw: HashMap<(ContentKind, String), String>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ContentKind, slug: impl Into<String>, raw: impl Into<String>) {
        self.raw.insert((kind, slug.into()), raw.into());
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Reads `<root>/blog/*.md` and `<root>/studies/*.md`; the file stem is
    /// the slug. Missing directories are treated as empty.
    pub fn load_dir(root: &Path) -> Result<Self, ContentError> {
        let mut store = Self::new();
        for kind in [ContentKind::Blog, ContentKind::Study] {
            let dir = root.join(kind.dir_name());
            if !dir.is_dir() {
                warn!("Content directory {} not found, skipping", dir.display());
                continue;
            }
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let raw = std::fs::read_to_string(&path)?;
                store.insert(kind, slug, raw);
            }
        }
        info!("Loaded {} content documents from {}", store.len(), root.display());
        Ok(store)
    }

    /// Published document by slug. Drafts read as absent.
    pub fn get(&self, kind: ContentKind, slug: &str) -> Result<Option<Document>, ContentError> {
        let Some(raw) = self.raw.get(&(kind, slug.to_string())) else {
            return Ok(None);
        };
        let doc = parse_document(kind, slug, raw)?;
        Ok((!doc.meta.draft).then_some(doc))
    }

    fn published(&self, kind: ContentKind) -> Vec<Document> {
        self.raw
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .filter_map(|((_, slug), raw)| match parse_document(kind, slug, raw) {
                Ok(doc) if !doc.meta.draft => Some(doc),
                Ok(_) => None,
                Err(e) => {
                    warn!("Skipping {}/{slug}: {e}", kind.dir_name());
                    None
                }
            })
            .collect()
    }

    /// Newest first; ties broken by slug. `tag` matches case-insensitively.
    pub fn list(&self, kind: ContentKind, tag: Option<&str>) -> Vec<DocumentSummary> {
        let mut docs: Vec<Document> = self
            .published(kind)
            .into_iter()
            .filter(|d| match tag {
                Some(t) => d.meta.tags.iter().any(|x| x.eq_ignore_ascii_case(t)),
                None => true,
            })
            .collect();
        docs.sort_by(|a, b| b.meta.date.cmp(&a.meta.date).then_with(|| a.slug.cmp(&b.slug)));
        docs.iter().map(Document::summary).collect()
    }

    /// Lowercased tag -> number of published documents carrying it.
    pub fn tag_counts(&self, kind: ContentKind) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for doc in self.published(kind) {
            for tag in &doc.meta.tags {
                *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, date: &str, tags: &str, draft: bool) -> String {
        format!("---\ntitle: {title}\ndate: {date}\ntags: [{tags}]\ndraft: {draft}\n---\nSome body text.\n")
    }

    fn store() -> ContentStore {
        let mut s = ContentStore::new();
        s.insert(ContentKind::Blog, "older", post("Older", "2023-01-10", "Rust", false));
        s.insert(ContentKind::Blog, "newer", post("Newer", "2024-06-01", "rust, web", false));
        s.insert(ContentKind::Blog, "draft", post("Draft", "2024-07-01", "rust", true));
        s.insert(ContentKind::Blog, "broken", "no frontmatter here");
        s.insert(ContentKind::Study, "case", post("Case", "2022-02-02", "automation", false));
        s
    }

    #[test]
    fn test_list_sorted_newest_first_without_drafts_or_broken() {
        let slugs: Vec<String> = store().list(ContentKind::Blog, None).into_iter().map(|d| d.slug).collect();
        assert_eq!(slugs, vec!["newer", "older"]);
    }

    #[test]
    fn test_list_filters_by_tag_case_insensitively() {
        let list = store().list(ContentKind::Blog, Some("WEB"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].slug, "newer");
    }

    #[test]
    fn test_kinds_are_separate() {
        let studies = store().list(ContentKind::Study, None);
        assert_eq!(studies.len(), 1);
        assert_eq!(studies[0].title, "Case");
    }

    #[test]
    fn test_get_hides_drafts_and_reports_parse_errors() {
        let s = store();
        assert!(s.get(ContentKind::Blog, "newer").unwrap().is_some());
        assert!(s.get(ContentKind::Blog, "draft").unwrap().is_none());
        assert!(s.get(ContentKind::Blog, "missing").unwrap().is_none());
        assert!(s.get(ContentKind::Blog, "broken").is_err());
    }

    #[test]
    fn test_tag_counts() {
        let counts = store().tag_counts(ContentKind::Blog);
        assert_eq!(counts.get("rust"), Some(&2));
        assert_eq!(counts.get("web"), Some(&1));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("blog")).unwrap();
        std::fs::write(dir.path().join("blog/first-post.md"), post("First", "2024-01-01", "", false)).unwrap();
        std::fs::write(dir.path().join("blog/notes.txt"), "ignored").unwrap();

        let s = ContentStore::load_dir(dir.path()).unwrap();
        assert_eq!(s.len(), 1);
        let doc = s.get(ContentKind::Blog, "first-post").unwrap().unwrap();
        assert_eq!(doc.meta.title, "First");
        assert!(doc.meta.tags.is_empty());
    }

    #[test]
    fn test_load_fixture_content() {
        let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
        let s = ContentStore::load_dir(&root).unwrap();
        assert_eq!(s.len(), 3);

        let posts = s.list(ContentKind::Blog, None);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "automating-the-boring-parts");
        assert!(posts[0].excerpt.starts_with("Notes from two years"));

        let study = s.get(ContentKind::Study, "warehouse-picking").unwrap().unwrap();
        assert_eq!(study.meta.role.as_deref(), Some("Lead architect"));
        assert_eq!(study.meta.outcomes.len(), 2);
    }
}

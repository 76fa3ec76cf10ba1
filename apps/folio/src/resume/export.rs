//! JSON data file for the UI to load at build time, in place of patching
//! component source.

use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::models::resume::ResumeDocument;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize résumé: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Writes through a temp file in the target directory and renames it into
/// place, so readers see either the old file or the new one. An existing
/// target keeps its permissions.
pub fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    match std::fs::metadata(path) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn to_json(resume: &ResumeDocument) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(resume)?;
    json.push('\n');
    Ok(json)
}

/// Serializes the document as pretty JSON to `path`.
pub fn export_json(resume: &ResumeDocument, path: &Path) -> Result<(), ExportError> {
    let json = to_json(resume)?;
    write_atomically(path, json.as_bytes()).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(
        "Wrote {} experience entries to {}",
        resume.experiences.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{build_resume, ParserProfile};

    #[test]
    fn test_export_reads_back_identical() {
        let doc = include_str!("../../fixtures/resume.md");
        let resume = build_resume(doc, &ParserProfile::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("resume.json");
        export_json(&resume, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: ResumeDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, resume);
    }

    #[test]
    fn test_export_json_shape() {
        let doc = include_str!("../../fixtures/resume.md");
        let resume = build_resume(doc, &ParserProfile::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&resume).unwrap()).unwrap();
        assert_eq!(value["header"]["name"], "Jane Doe");
        assert_eq!(value["experiences"][0]["end_date"]["status"], "current");
        assert_eq!(value["experiences"][0]["start_date"], "2021-03-01");
    }

    #[test]
    fn test_write_atomically_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old").unwrap();
        write_atomically(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomically_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_atomically(&path, b"{\"a\":1}").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\":1}");
    }
}

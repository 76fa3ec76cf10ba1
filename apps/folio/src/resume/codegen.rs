//! Code Generator: typed records back into object-literal source text, and
//! the delimited-region splice that writes it into a UI component.
//!
//! The splice replaces everything from the declaration through its
//! terminating line. Hand edits inside that region do not survive a sync.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::info;

use crate::models::resume::{EndDate, ExperienceRecord, ResumeHeader};
use crate::resume::export::write_atomically;

pub const EXPERIENCE_DECLARATION: &str = "const experiences: Experience[]";
pub const HERO_DECLARATION: &str = "const heroContent";

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("declaration '{marker}' not found in {path}")]
    DeclarationNotFound { marker: String, path: String },

    #[error("no line starting with '{terminator}' after '{marker}' in {path}")]
    UnterminatedRegion {
        marker: String,
        terminator: String,
        path: String,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a generated block lives inside a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    /// Text the region starts with; the generated block starts with it too.
    pub declaration: String,
    /// Line prefix that closes the region, included in the replaced span.
    pub terminator: String,
}

impl PatchTarget {
    pub fn experiences() -> Self {
        Self {
            declaration: EXPERIENCE_DECLARATION.to_string(),
            terminator: "];".to_string(),
        }
    }

    pub fn hero() -> Self {
        Self {
            declaration: HERO_DECLARATION.to_string(),
            terminator: "};".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Updated,
    Unchanged,
}

/// Single-quoted literal body: backslashes and quotes escaped, line breaks
/// collapsed to spaces.
pub fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

fn quote(s: &str) -> String {
    format!("'{}'", escape_literal(s))
}

fn date_literal(date: NaiveDate) -> String {
    format!("new Date({}, {}, 1)", date.year(), date.month0())
}

fn start_literal(date: Option<NaiveDate>) -> String {
    date.map(date_literal).unwrap_or_else(|| "null".to_string())
}

/// `null` means "present"; `undefined` means the end token was unreadable.
fn end_literal(end: &EndDate) -> String {
    match end {
        EndDate::Current => "null".to_string(),
        EndDate::Ended(d) => date_literal(*d),
        EndDate::Unknown => "undefined".to_string(),
    }
}

/// Renders `{declaration} = [ ... ];` for the given records, in order.
pub fn experience_literal(records: &[ExperienceRecord], declaration: &str) -> String {
    let mut out = format!("{declaration} = [\n");
    for r in records {
        out.push_str("  {\n");
        let _ = writeln!(out, "    id: {},", quote(&r.id));
        let _ = writeln!(out, "    position: {},", quote(&r.position));
        let _ = writeln!(out, "    company: {},", quote(&r.company));
        let _ = writeln!(out, "    startDate: {},", start_literal(r.start_date));
        let _ = writeln!(out, "    endDate: {},", end_literal(&r.end_date));
        let _ = writeln!(out, "    summary: {},", quote(&r.summary));
        let _ = writeln!(out, "    description: {},", quote(&r.description));
        if r.achievements.is_empty() {
            out.push_str("    achievements: [],\n");
        } else {
            out.push_str("    achievements: [\n");
            for a in &r.achievements {
                let _ = writeln!(out, "      {},", quote(a));
            }
            out.push_str("    ],\n");
        }
        let techs: Vec<String> = r.technologies.iter().map(|t| quote(t)).collect();
        let _ = writeln!(out, "    technologies: [{}],", techs.join(", "));
        out.push_str("  },\n");
    }
    out.push_str("];");
    out
}

/// Renders `{declaration} = { ... };` for the hero section.
pub fn hero_literal(header: &ResumeHeader, summary: &[String], declaration: &str) -> String {
    let opt = |v: &Option<String>| quote(v.as_deref().unwrap_or_default());
    let mut out = format!("{declaration} = {{\n");
    let _ = writeln!(out, "  name: {},", quote(&header.name));
    let _ = writeln!(out, "  title: {},", opt(&header.title));
    let _ = writeln!(out, "  location: {},", opt(&header.location));
    let _ = writeln!(out, "  email: {},", opt(&header.email));
    let _ = writeln!(out, "  summary: {},", quote(&summary.join(" ")));
    out.push_str("};");
    out
}

/// Replaces the span from `target.declaration` through the first following
/// line that starts with `target.terminator`. `origin` only labels errors.
pub fn splice_region(
    source: &str,
    target: &PatchTarget,
    replacement: &str,
    origin: &str,
) -> Result<String, PatchError> {
    let start = source
        .find(&target.declaration)
        .ok_or_else(|| PatchError::DeclarationNotFound {
            marker: target.declaration.clone(),
            path: origin.to_string(),
        })?;

    let mut offset = start;
    let mut end = None;
    for (i, line) in source[start..].split_inclusive('\n').enumerate() {
        let trimmed = line.trim_end();
        if i == 0 {
            // `= [];` closes the region on the declaration line itself.
            if trimmed.ends_with(&target.terminator) {
                end = Some(offset + trimmed.len());
                break;
            }
        } else if trimmed.trim_start().starts_with(&target.terminator) {
            let indent = line.len() - line.trim_start().len();
            end = Some(offset + indent + target.terminator.len());
            break;
        }
        offset += line.len();
    }

    let end = end.ok_or_else(|| PatchError::UnterminatedRegion {
        marker: target.declaration.clone(),
        terminator: target.terminator.clone(),
        path: origin.to_string(),
    })?;

    let mut patched = String::with_capacity(source.len() + replacement.len());
    patched.push_str(&source[..start]);
    patched.push_str(replacement);
    patched.push_str(&source[end..]);
    Ok(patched)
}

/// Reads `path`, splices `replacement` in, and writes it back if anything
/// changed.
pub fn patch_file(
    path: &Path,
    target: &PatchTarget,
    replacement: &str,
) -> Result<PatchOutcome, PatchError> {
    let source = std::fs::read_to_string(path).map_err(|source| PatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let patched = splice_region(&source, target, replacement, &path.display().to_string())?;
    if patched == source {
        info!("{} already up to date", path.display());
        return Ok(PatchOutcome::Unchanged);
    }
    write_atomically(path, patched.as_bytes()).map_err(|source| PatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Patched '{}' in {}", target.declaration, path.display());
    Ok(PatchOutcome::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    use regex::Regex;

    use crate::resume::builder::build_experiences;
    use crate::resume::ParserProfile;

    static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s+(\w+): ((?:'(?:[^'\\]|\\.)*')|.+?),$").unwrap()
    });
    static QUOTED_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"'((?:[^'\\]|\\.)*)'").unwrap());

    fn unescape(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Reads the literal values of one generated record back out.
    fn read_record(block: &str) -> Vec<(String, String)> {
        FIELD_RE
            .captures_iter(block)
            .map(|c| {
                let raw = c[2].trim();
                let value = match raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
                    Some(inner) => unescape(inner),
                    None => raw.to_string(),
                };
                (c[1].to_string(), value)
            })
            .collect()
    }

    fn record(id: &str, position: &str, summary: &str) -> ExperienceRecord {
        ExperienceRecord {
            id: id.to_string(),
            position: position.to_string(),
            company: "O'Reilly & Sons".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 3, 1),
            end_date: EndDate::Current,
            summary: summary.to_string(),
            description: summary.to_string(),
            achievements: vec!["Wrote C:\\tools".to_string(), "**Highlights**".to_string()],
            technologies: vec!["Rust".to_string(), "AWS".to_string()],
        }
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("it's"), "it\\'s");
        assert_eq!(escape_literal("a\nb\r\nc"), "a b c");
        assert_eq!(escape_literal("C:\\x"), "C:\\\\x");
    }

    #[test]
    fn test_round_trip_literal_values() {
        let r = record("1", "Lead | Platform", "Didn't stop.\nKept going.");
        let text = experience_literal(std::slice::from_ref(&r), EXPERIENCE_DECLARATION);
        let fields = read_record(&text);
        let get = |k: &str| fields.iter().find(|(n, _)| n == k).map(|(_, v)| v.clone()).unwrap();

        assert_eq!(get("id"), "1");
        assert_eq!(get("position"), r.position);
        assert_eq!(get("company"), r.company);
        assert_eq!(get("startDate"), "new Date(2020, 2, 1)");
        assert_eq!(get("endDate"), "null");
        // Newlines collapse to spaces; everything else survives.
        assert_eq!(get("summary"), "Didn't stop. Kept going.");

        let achievements: Vec<String> = QUOTED_RE
            .captures_iter(text.split("achievements: [").nth(1).unwrap().split("],").next().unwrap())
            .map(|c| unescape(&c[1]))
            .collect();
        assert_eq!(achievements, r.achievements);

        let techs: Vec<String> = QUOTED_RE
            .captures_iter(text.split("technologies: [").nth(1).unwrap().split(']').next().unwrap())
            .map(|c| unescape(&c[1]))
            .collect();
        assert_eq!(techs, r.technologies);
    }

    #[test]
    fn test_end_date_literals_distinguish_unknown() {
        let mut r = record("1", "A", "s");
        r.end_date = EndDate::Unknown;
        r.start_date = None;
        let text = experience_literal(&[r], EXPERIENCE_DECLARATION);
        assert!(text.contains("endDate: undefined,"));
        assert!(text.contains("startDate: null,"));
    }

    #[test]
    fn test_empty_achievements() {
        let mut r = record("1", "A", "s");
        r.achievements.clear();
        r.technologies.clear();
        let text = experience_literal(&[r], EXPERIENCE_DECLARATION);
        assert!(text.contains("achievements: [],"));
        assert!(text.contains("technologies: [],"));
    }

    #[test]
    fn test_records_keep_given_order() {
        let doc = include_str!("../../fixtures/resume.md");
        let records = build_experiences(doc, &ParserProfile::default()).unwrap();
        let text = experience_literal(&records, EXPERIENCE_DECLARATION);
        let first = text.find("Northwind Automation").unwrap();
        let last = text.find("Hooli").unwrap();
        assert!(first < last);
        assert!(text.starts_with("const experiences: Experience[] = [\n"));
        assert!(text.ends_with("];"));
    }

    const COMPONENT: &str = "import React from 'react';\n\nconst experiences: Experience[] = [\n  {\n    id: 'old',\n    achievements: [\n      'x',\n    ],\n  },\n];\n\nexport default function Experience() {\n  return null;\n}\n";

    #[test]
    fn test_splice_replaces_whole_region() {
        let patched = splice_region(
            COMPONENT,
            &PatchTarget::experiences(),
            "const experiences: Experience[] = [];",
            "Experience.tsx",
        )
        .unwrap();
        assert!(!patched.contains("id: 'old'"));
        assert!(patched.starts_with("import React from 'react';\n\nconst experiences: Experience[] = [];\n\nexport default"));
    }

    #[test]
    fn test_splice_handles_single_line_region() {
        let source = "const experiences: Experience[] = [];\nrest\n";
        let patched = splice_region(source, &PatchTarget::experiences(), "NEW", "f").unwrap();
        assert_eq!(patched, "NEW\nrest\n");
    }

    #[test]
    fn test_splice_missing_declaration() {
        let err = splice_region("nothing here", &PatchTarget::experiences(), "x", "f.tsx").unwrap_err();
        assert!(matches!(err, PatchError::DeclarationNotFound { .. }));
    }

    #[test]
    fn test_splice_unterminated() {
        let err = splice_region(
            "const experiences: Experience[] = [\n  {\n",
            &PatchTarget::experiences(),
            "x",
            "f.tsx",
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::UnterminatedRegion { .. }));
    }

    #[test]
    fn test_hero_literal_and_splice() {
        let header = ResumeHeader {
            name: "Jane Doe".to_string(),
            title: Some("Architect".to_string()),
            location: None,
            email: Some("jane@example.com".to_string()),
        };
        let block = hero_literal(&header, &["One.".to_string(), "Two.".to_string()], HERO_DECLARATION);
        assert!(block.contains("  location: '',\n"));
        assert!(block.contains("  summary: 'One. Two.',\n"));

        let source = "const heroContent = {\n  name: 'Old',\n};\nexport default heroContent;\n";
        let patched = splice_region(source, &PatchTarget::hero(), &block, "Hero.tsx").unwrap();
        assert!(patched.contains("name: 'Jane Doe'"));
        assert!(patched.ends_with("};\nexport default heroContent;\n"));
    }

    #[test]
    fn test_patch_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Experience.tsx");
        std::fs::write(&path, COMPONENT).unwrap();

        let doc = include_str!("../../fixtures/resume.md");
        let records = build_experiences(doc, &ParserProfile::default()).unwrap();
        let block = experience_literal(&records, EXPERIENCE_DECLARATION);

        let target = PatchTarget::experiences();
        assert_eq!(patch_file(&path, &target, &block).unwrap(), PatchOutcome::Updated);
        assert_eq!(patch_file(&path, &target, &block).unwrap(), PatchOutcome::Unchanged);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("company: 'Northwind Automation'"));
        assert!(written.ends_with("export default function Experience() {\n  return null;\n}\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_patch_file_keeps_component_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Experience.tsx");
        std::fs::write(&path, COMPONENT).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let outcome = patch_file(
            &path,
            &PatchTarget::experiences(),
            "const experiences: Experience[] = [];",
        )
        .unwrap();
        assert_eq!(outcome, PatchOutcome::Updated);

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}

// Résumé pipeline: markdown document -> typed records -> generated source / JSON.
// Flow: sections -> entries (+ dates, technologies) -> builder -> codegen | export.

pub mod builder;
pub mod codegen;
pub mod dates;
pub mod entries;
pub mod export;
pub mod handlers;
pub mod sections;
pub mod technologies;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resume::dates::DateFormats;
use crate::resume::technologies::DEFAULT_VOCABULARY;

pub use builder::{build_resume, parse_report};

pub const EXPERIENCE_SECTION: &str = "Professional Experience";
pub const SUMMARY_SECTION: &str = "Professional Summary";
pub const SKILLS_SECTION: &str = "Technical Skills";
pub const CERTIFICATIONS_SECTION: &str = "Certifications";
pub const EDUCATION_SECTION: &str = "Education";

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("required section '## {0}' not found")]
    MissingSection(String),

    #[error("document has no '# Name' title line")]
    MissingTitle,

    #[error("failed to read résumé: {0}")]
    Io(#[from] std::io::Error),
}

/// One parser for both document shapes the site has carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserProfile {
    pub date_formats: DateFormats,
    /// Company used when a heading has a single segment.
    pub unknown_company: String,
    pub vocabulary: Vec<String>,
}

impl Default for ParserProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl ParserProfile {
    /// Month/year dates, `"Unknown"` sentinel.
    pub fn standard() -> Self {
        Self {
            date_formats: DateFormats::MonthYear,
            unknown_company: "Unknown".to_string(),
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Adds numeric and ISO dates, `"Unknown Company"` sentinel.
    pub fn extended() -> Self {
        Self {
            date_formats: DateFormats::Extended,
            unknown_company: "Unknown Company".to_string(),
            ..Self::standard()
        }
    }
}

impl FromStr for ParserProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::standard()),
            "extended" => Ok(Self::extended()),
            other => Err(format!(
                "unknown parser profile '{other}' (expected 'standard' or 'extended')"
            )),
        }
    }
}

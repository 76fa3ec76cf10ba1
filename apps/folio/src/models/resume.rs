use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How an experience entry ends.
///
/// `Current` and `Unknown` are kept apart so "still employed" never collapses
/// into "the end token could not be read".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "date", rename_all = "snake_case")]
pub enum EndDate {
    Current,
    Ended(NaiveDate),
    Unknown,
}

impl EndDate {
    pub fn is_current(&self) -> bool {
        matches!(self, EndDate::Current)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            EndDate::Ended(d) => Some(*d),
            _ => None,
        }
    }
}

/// One job entry from the `## Professional Experience` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    /// Sequence number assigned during segmentation. Not persisted identity.
    pub id: String,
    pub position: String,
    pub company: String,
    /// Always the first of the month. `None` when the start token is unreadable.
    pub start_date: Option<NaiveDate>,
    pub end_date: EndDate,
    pub summary: String,
    /// Mirrors `summary`; the UI reads both.
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeHeader {
    pub name: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub degree: String,
    pub institution: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: EndDate,
    pub details: Vec<String>,
}

/// Everything extracted from one résumé document. Rebuilt on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub header: ResumeHeader,
    pub summary: Vec<String>,
    pub experiences: Vec<ExperienceRecord>,
    pub skills: Vec<SkillGroup>,
    pub certifications: Vec<Certification>,
    pub education: Vec<EducationRecord>,
}

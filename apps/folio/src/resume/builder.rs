//! Resume Model Builder: composes the section, entry, date and technology
//! passes into a `ResumeDocument`.

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

use crate::models::resume::{
    Certification, EducationRecord, EndDate, ExperienceRecord, ResumeDocument, ResumeHeader,
    SkillGroup,
};
use crate::resume::entries::{extract_experience, extract_fields, split_heading};
use crate::resume::sections::{find_section, split_entries};
use crate::resume::{
    ParserProfile, ResumeError, CERTIFICATIONS_SECTION, EDUCATION_SECTION, EXPERIENCE_SECTION,
    SKILLS_SECTION, SUMMARY_SECTION,
};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+")
        .expect("static regex must compile")
});

static BOLD_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("static regex must compile"));

static SKILL_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*([^*]+?):?\*\*:?\s*(.*)$").expect("static regex must compile")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("static regex must compile"));

const LOCATION_MARKER: char = '📍';

/// Parses `## Professional Experience` into records, newest first.
///
/// Ids are handed out in document order to the entries that survive
/// extraction, and the list is sorted afterwards, so an id says nothing about
/// display position. Entries with an unreadable start date sort last.
pub fn build_experiences(
    document: &str,
    profile: &ParserProfile,
) -> Result<Vec<ExperienceRecord>, ResumeError> {
    let section = find_section(document, EXPERIENCE_SECTION)
        .ok_or_else(|| ResumeError::MissingSection(EXPERIENCE_SECTION.to_string()))?;

    let mut experiences = Vec::new();
    for block in split_entries(section) {
        match extract_experience(block, experiences.len() + 1, profile) {
            Some(record) => experiences.push(record),
            None => debug!(
                "Skipping experience block without heading or date line: {:?}",
                block.lines().next().unwrap_or_default()
            ),
        }
    }

    experiences.sort_by_key(|r| std::cmp::Reverse(r.start_date.unwrap_or_default()));
    Ok(experiences)
}

/// Parses the whole document. Only the experience section is required.
pub fn build_resume(document: &str, profile: &ParserProfile) -> Result<ResumeDocument, ResumeError> {
    let experiences = build_experiences(document, profile)?;
    let header = extract_header(document).unwrap_or_else(|e| {
        warn!("Résumé header incomplete: {e}");
        ResumeHeader::default()
    });

    Ok(ResumeDocument {
        header,
        summary: extract_summary(document),
        experiences,
        skills: extract_skills(document),
        certifications: extract_certifications(document),
        education: extract_education(document, profile),
    })
}

/// Name, role, location and email from the lines above the first `## `.
pub fn extract_header(document: &str) -> Result<ResumeHeader, ResumeError> {
    let preamble: Vec<&str> = document
        .lines()
        .take_while(|l| !l.starts_with("## "))
        .collect();

    let name = preamble
        .iter()
        .find_map(|l| l.strip_prefix("# "))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ResumeError::MissingTitle)?
        .to_string();

    let title = preamble
        .iter()
        .find_map(|l| BOLD_SPAN_RE.captures(l))
        .map(|c| c[1].trim().to_string());

    let location = preamble
        .iter()
        .find_map(|l| l.split_once(LOCATION_MARKER))
        .map(|(_, rest)| {
            rest.split(['|', '·', '•', '📧'])
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .filter(|l| !l.is_empty());

    let email = preamble
        .iter()
        .find_map(|l| EMAIL_RE.find(l))
        .map(|m| m.as_str().to_string());

    Ok(ResumeHeader {
        name,
        title,
        location,
        email,
    })
}

/// `## Professional Summary`, one string per paragraph.
pub fn extract_summary(document: &str) -> Vec<String> {
    let Some(section) = find_section(document, SUMMARY_SECTION) else {
        return Vec::new();
    };
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in section.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

/// `- **Category:** a, b, c` lines from `## Technical Skills`.
pub fn extract_skills(document: &str) -> Vec<SkillGroup> {
    let Some(section) = find_section(document, SKILLS_SECTION) else {
        return Vec::new();
    };
    section
        .lines()
        .map(|l| l.trim())
        .map(|l| l.strip_prefix("- ").unwrap_or(l))
        .filter_map(|line| {
            let (category, items) = match SKILL_LINE_RE.captures(line) {
                Some(c) => (c[1].to_string(), c[2].to_string()),
                None => {
                    let (category, items) = line.split_once(':')?;
                    (category.to_string(), items.to_string())
                }
            };
            let category = category.trim().trim_end_matches(':').trim().to_string();
            let items: Vec<String> = items
                .split(',')
                .map(|i| i.trim().trim_end_matches('.').to_string())
                .filter(|i| !i.is_empty())
                .collect();
            if category.is_empty() || items.is_empty() {
                return None;
            }
            Some(SkillGroup { category, items })
        })
        .collect()
}

/// Bullet lines from `## Certifications`: `Name | Issuer | Year`.
pub fn extract_certifications(document: &str) -> Vec<Certification> {
    let Some(section) = find_section(document, CERTIFICATIONS_SECTION) else {
        return Vec::new();
    };
    section
        .lines()
        .map(str::trim)
        .filter_map(|l| l.strip_prefix("- ").or_else(|| l.strip_prefix("* ")))
        .filter_map(|line| {
            let line = line.replace("**", "");
            let year = YEAR_RE.find(&line).and_then(|m| m.as_str().parse().ok());
            let mut parts = line.split(" | ").map(str::trim);
            let name = parts.next().filter(|n| !n.is_empty())?.to_string();
            let issuer = parts
                .next()
                .filter(|i| !i.is_empty() && !is_year(i))
                .map(|i| i.to_string());
            Some(Certification { name, issuer, year })
        })
        .collect()
}

/// `### Degree | Institution` entries from `## Education`.
pub fn extract_education(document: &str, profile: &ParserProfile) -> Vec<EducationRecord> {
    let Some(section) = find_section(document, EDUCATION_SECTION) else {
        return Vec::new();
    };
    split_entries(section)
        .into_iter()
        .filter_map(|block| extract_fields(block, profile))
        .map(|fields| {
            let (degree, institution) = split_heading(&fields.heading, &profile.unknown_company);
            EducationRecord {
                degree,
                institution,
                start_date: fields.start_date,
                end_date: fields.end_date,
                details: fields.bullets,
            }
        })
        .collect()
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

fn format_month(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn format_end(end: &EndDate) -> String {
    if end.is_current() {
        return "Present".to_string();
    }
    format_month(end.date())
}

/// Human-readable summary printed after a parse or sync.
pub fn parse_report(resume: &ResumeDocument) -> String {
    let mut out = String::new();
    let name = if resume.header.name.is_empty() {
        "(unnamed)"
    } else {
        resume.header.name.as_str()
    };
    let _ = writeln!(out, "Résumé: {name}");
    if let Some(title) = &resume.header.title {
        let _ = writeln!(out, "  Title: {title}");
    }
    let _ = writeln!(out, "  Experience entries: {}", resume.experiences.len());
    for e in &resume.experiences {
        let _ = write!(
            out,
            "    [{}] {} @ {} ({} – {})",
            e.id,
            e.position,
            e.company,
            format_month(e.start_date),
            format_end(&e.end_date)
        );
        if !e.technologies.is_empty() {
            let _ = write!(out, " [{}]", e.technologies.join(", "));
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "  Skill groups: {}, certifications: {}, education: {}",
        resume.skills.len(),
        resume.certifications.len(),
        resume.education.len()
    );
    out
}

//! Entry Field Extractor: one `### ` block into one experience record.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::{EndDate, ExperienceRecord};
use crate::resume::dates::parse_date_range;
use crate::resume::sections::entry_heading;
use crate::resume::technologies::extract_technologies;
use crate::resume::ParserProfile;

// An `_..._` or `*...*` span anywhere on the line. The span may not touch
// another `*`, `_` or word character, so `**bold**` and `snake_case` never
// match.
static DATE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^*\w])(?:_([^_]+)_|\*([^*\s][^*]*)\*)(?:[^*\w]|$)")
        .expect("static regex must compile")
});

static BOLD_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*.+\*\*:?$").expect("static regex must compile"));

/// Splits a heading on `" | "` into `(position, company)`.
///
/// With three or more segments, a third segment without the word "Remote" is
/// taken as the company and the first two form the position
/// (`"System Architect | Automation Engineer | Acme"`). Otherwise the first
/// two segments win. A single segment gets the profile's company sentinel.
pub fn split_heading(heading: &str, unknown_company: &str) -> (String, String) {
    let parts: Vec<&str> = heading.split(" | ").map(str::trim).collect();
    match parts.as_slice() {
        [position] => (position.to_string(), unknown_company.to_string()),
        [position, company] => (position.to_string(), company.to_string()),
        [first, second, third, ..] if !third.contains("Remote") => {
            (format!("{first} | {second}"), third.to_string())
        }
        [position, company, ..] => (position.to_string(), company.to_string()),
        [] => (String::new(), unknown_company.to_string()),
    }
}

/// Captured text of the first emphasis span (`_..._` or `*...*`) in the
/// first line that has one. Text around the span is ignored. Bold
/// (`**...**`) never matches.
pub fn find_date_line(lines: &[&str]) -> Option<(usize, String)> {
    lines.iter().enumerate().find_map(|(i, line)| {
        let caps = DATE_LINE_RE.captures(line)?;
        let text = caps.get(1).or_else(|| caps.get(2))?;
        Some((i, text.as_str().trim().to_string()))
    })
}

/// Standalone bold line such as `**Key Projects:**`.
pub fn is_bold_line(line: &str) -> bool {
    BOLD_LINE_RE.is_match(line.trim())
}

/// Fields common to experience and education entries.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub heading: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: EndDate,
    pub has_date_line: bool,
    pub summary: String,
    pub bullets: Vec<String>,
}

/// Pulls the heading, date line, summary paragraph and bullet list out of a
/// block. `None` when the block has no `### ` heading.
pub fn extract_fields(block: &str, profile: &ParserProfile) -> Option<EntryFields> {
    let heading = entry_heading(block)?.to_string();

    let lines: Vec<&str> = block
        .lines()
        .skip_while(|l| !l.starts_with("### "))
        .skip(1)
        .collect();

    let date_line = find_date_line(&lines);
    let (start_date, end_date, body_from) = match &date_line {
        Some((i, text)) => {
            let (start, end) = parse_date_range(text, profile.date_formats);
            (start, end, i + 1)
        }
        None => (None, EndDate::Unknown, 0),
    };
    let body = &lines[body_from..];

    let summary = body
        .iter()
        .map(|l| l.trim())
        .take_while(|l| !l.starts_with("**") && !l.starts_with("- "))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let bullets = body
        .iter()
        .map(|l| l.trim())
        .filter_map(|l| {
            if let Some(item) = l.strip_prefix("- ") {
                Some(item.trim().to_string())
            } else if is_bold_line(l) {
                Some(l.to_string())
            } else {
                None
            }
        })
        .filter(|item| !item.is_empty())
        .collect();

    Some(EntryFields {
        heading,
        start_date,
        end_date,
        has_date_line: date_line.is_some(),
        summary,
        bullets,
    })
}

/// Builds an experience record from a block. Blocks without a heading or
/// without a date line are skipped.
pub fn extract_experience(
    block: &str,
    id: usize,
    profile: &ParserProfile,
) -> Option<ExperienceRecord> {
    let fields = extract_fields(block, profile)?;
    if !fields.has_date_line {
        return None;
    }
    let (position, company) = split_heading(&fields.heading, &profile.unknown_company);
    let technologies = extract_technologies(block, &profile.vocabulary);

    Some(ExperienceRecord {
        id: id.to_string(),
        position,
        company,
        start_date: fields.start_date,
        end_date: fields.end_date,
        description: fields.summary.clone(),
        summary: fields.summary,
        achievements: fields.bullets,
        technologies,
    })
}

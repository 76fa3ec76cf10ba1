use crate::content::ContentError;
use crate::models::content::Frontmatter;

const DELIMITER: &str = "---";

/// Splits `---`-fenced YAML from the body and deserializes it.
pub fn parse(raw: &str) -> Result<(Frontmatter, &str), ContentError> {
    let (yaml, body) = split(raw)?;
    let meta: Frontmatter = serde_yaml::from_str(yaml)?;
    Ok((meta, body))
}

/// Returns `(yaml, body)`. The opening fence must be the first line.
pub fn split(raw: &str) -> Result<(&str, &str), ContentError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Err(ContentError::MissingFrontmatter),
    }

    let yaml_start = raw.find('\n').map(|i| i + 1).unwrap_or(raw.len());
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Ok((&raw[yaml_start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(ContentError::UnclosedFrontmatter)
}

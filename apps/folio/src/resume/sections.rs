//! Section Splitter and Entry Segmenter.

/// Returns the text between `## {label}` and the next `## ` heading (or the
/// end of the document). `None` when the heading is absent.
pub fn find_section<'a>(document: &'a str, label: &str) -> Option<&'a str> {
    let heading = format!("## {label}");
    let mut offset = 0;
    let mut start = None;

    for line in document.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let trimmed = line.trim_end();
        match start {
            None if trimmed == heading => start = Some(offset),
            Some(s) if trimmed.starts_with("## ") => return Some(&document[s..line_start]),
            _ => {}
        }
    }
    start.map(|s| &document[s..])
}

/// Splits section text into blocks, each starting at a line beginning with
/// `### `. Whitespace-only blocks are dropped. Text before the first
/// sub-heading stays as its own block; a section with no sub-headings is a
/// single block.
pub fn split_entries(section: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut block_start = 0;
    let mut offset = 0;

    for line in section.split_inclusive('\n') {
        if line.starts_with("### ") && offset > block_start {
            blocks.push(&section[block_start..offset]);
            block_start = offset;
        }
        offset += line.len();
    }
    blocks.push(&section[block_start..]);

    blocks.retain(|b| !b.trim().is_empty());
    blocks
}

/// Heading text of a block: the remainder of its first `### ` line.
pub fn entry_heading(block: &str) -> Option<&str> {
    block
        .lines()
        .find_map(|l| l.strip_prefix("### "))
        .map(str::trim)
        .filter(|h| !h.is_empty())
}

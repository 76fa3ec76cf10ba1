/// Average adult reading speed used for estimates.
pub const WORDS_PER_MINUTE: usize = 200;
pub const EXCERPT_CHARS: usize = 160;

pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}

/// Whole minutes, rounded up, never less than one.
pub fn reading_time_minutes(words: usize) -> u32 {
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// First prose paragraph, cut on a word boundary to at most `max_chars`.
/// Headings, images and fenced code are skipped.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let mut in_code = false;
    for paragraph in body.split("\n\n").map(str::trim) {
        let fences = paragraph.matches("```").count();
        if in_code {
            in_code = fences % 2 == 0;
            continue;
        }
        if paragraph.starts_with("```") {
            in_code = fences % 2 == 1;
            continue;
        }
        if paragraph.is_empty() || paragraph.starts_with('#') || paragraph.starts_with("![") {
            continue;
        }
        let flat = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
        return truncate_words(&flat, max_chars);
    }
    String::new()
}

fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out = String::new();
    for word in text.split(' ') {
        let next_len = out.chars().count() + word.chars().count() + usize::from(!out.is_empty());
        if next_len > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.push('…');
    out
}

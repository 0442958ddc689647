use std::sync::LazyLock;

use regex::Regex;

/// Date anchor: weekday abbreviation, optional comma, month word, day, comma, year.
/// No word boundary here; the validator re-checks the title with one.
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:mon|tue|wed|thu|fri|sat|sun),?\s+\w+\s+\d+,\s+\d{4}").unwrap()
});

/// Split page text into candidate spans. Each span starts at a date anchor and
/// runs up to the next anchor or the end of the text.
///
/// Archive pages list posts newest first, so the result is reverse-chronological.
pub fn split_candidates(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = ANCHOR_RE.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

// ── Tests ──

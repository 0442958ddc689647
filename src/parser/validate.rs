use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::Workout;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:mon|tue|wed|thu|fri|sat|sun),?\s+\w+\s+\d+,\s+\d{4}\b").unwrap()
});

const PLACEHOLDER_TITLES: &[&str] = &["No title", "Warm-up"];

/// Why a candidate was not accepted as a workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyTitle,
    Placeholder(String),
    NotDateShaped(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyTitle => write!(f, "empty title"),
            Rejection::Placeholder(t) => write!(f, "placeholder title {:?}", t),
            Rejection::NotDateShaped(t) => write!(f, "{:?} is not a valid workout title", t),
        }
    }
}

/// Heading of a candidate: text before the first " - " if there is one,
/// otherwise the first line.
pub fn extract_title(candidate: &str) -> &str {
    let head = match candidate.split_once(" - ") {
        Some((head, _)) => head,
        None => candidate.split('\n').next().unwrap_or(candidate),
    };
    head.trim()
}

/// Accept a candidate as a workout if its title is date-shaped.
pub fn validate(candidate: &str, source_page: i64) -> Result<Workout, Rejection> {
    let title = extract_title(candidate);

    if title.is_empty() {
        return Err(Rejection::EmptyTitle);
    }
    if PLACEHOLDER_TITLES.contains(&title) {
        return Err(Rejection::Placeholder(title.to_string()));
    }
    if !TITLE_RE.is_match(&title.to_lowercase()) {
        return Err(Rejection::NotDateShaped(title.to_string()));
    }

    Ok(Workout::new(title, candidate.trim(), source_page))
}

// ── Tests ──

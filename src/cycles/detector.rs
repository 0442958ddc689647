use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Cycle, Day, TrainingLog, Workout};

static WEEK_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"week\s+(\d+)\s+of\s+(\d+)").unwrap());
static WEEK_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"week\s+(\d+)/(\d+)").unwrap());
// "(W.D)" program numbering, D = 1 on Mondays
static PROGRAM_DAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\.1\)").unwrap());
static WEEK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"week\s+(\d+)").unwrap());
static WEEK_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+(?:of|/)").unwrap());

/// Week marker found in a Monday post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekMarker {
    Found { week: u32, total_weeks: Option<u32> },
    Missing,
}

/// Effect of a Monday marker on the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StartCycle { week: u32, total_weeks: Option<u32> },
    SetWeek(u32),
}

/// Scan content for a week marker. Patterns are tried in fixed priority order
/// and the first one that matches anywhere wins:
///
/// 1. `week N of M`
/// 2. `week N/M`
/// 3. `N.1)`
/// 4. `week N` not followed by `of` or `/`
///
/// Numbers too large for `u32` saturate rather than dropping the match.
pub fn scan_week_marker(content: &str) -> WeekMarker {
    let lower = content.to_lowercase();

    for re in [&*WEEK_OF_RE, &*WEEK_SLASH_RE] {
        if let Some(caps) = re.captures(&lower) {
            return match (parse_number(&caps[1]), parse_number(&caps[2])) {
                (Some(week), Some(total)) => WeekMarker::Found {
                    week,
                    total_weeks: Some(total),
                },
                _ => WeekMarker::Missing,
            };
        }
    }

    let week = match PROGRAM_DAY_RE.captures(&lower) {
        Some(caps) => parse_number(&caps[1]),
        None => bare_week_number(&lower).and_then(parse_number),
    };
    match week {
        Some(week) => WeekMarker::Found {
            week,
            total_weeks: None,
        },
        None => WeekMarker::Missing,
    }
}

/// First `week N` whose digits are not followed by `of` or `/`. When the full
/// number is, every shorter prefix of it still qualifies (the next character
/// is a digit), so `week 12 of` reads as week 1. A single digit has no
/// shorter prefix and the scan moves to the next occurrence.
fn bare_week_number(lower: &str) -> Option<&str> {
    WEEK_RE.captures_iter(lower).find_map(|caps| {
        let digits = caps.get(1)?;
        if !WEEK_TAIL_RE.is_match(&lower[digits.end()..]) {
            return Some(digits.as_str());
        }
        let (last, _) = digits.as_str().char_indices().last()?;
        (last > 0).then(|| &digits.as_str()[..last])
    })
}

/// Decimal digits to `u32`, saturating at `u32::MAX`. `None` for digits
/// outside ASCII.
fn parse_number(digits: &str) -> Option<u32> {
    digits.chars().try_fold(0u32, |acc, c| {
        c.to_digit(10)
            .map(|d| acc.saturating_mul(10).saturating_add(d))
    })
}

/// Week 1 or a missing marker opens a new cycle; any other week only moves
/// the week counter. A miss opens a cycle even when one is already open.
pub fn next_step(marker: WeekMarker) -> Step {
    match marker {
        WeekMarker::Found {
            week: 1,
            total_weeks,
        } => Step::StartCycle {
            week: 1,
            total_weeks,
        },
        WeekMarker::Found { week, .. } => Step::SetWeek(week),
        WeekMarker::Missing => Step::StartCycle {
            week: 1,
            total_weeks: None,
        },
    }
}

/// Forward-only cycle/week state, advanced one workout at a time in
/// chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleDetector {
    /// Position of the open cycle in `TrainingLog::cycles`.
    current_cycle: Option<usize>,
    current_week: Option<u32>,
}

impl CycleDetector {
    pub fn current_week(&self) -> Option<u32> {
        self.current_week
    }

    pub fn current_cycle<'a>(&self, log: &'a TrainingLog) -> Option<&'a Cycle> {
        self.current_cycle.and_then(|i| log.cycles.get(i))
    }

    /// Append a workout to the arena, assigning it to the open cycle. Monday
    /// posts are scanned first and may open a cycle or move the week.
    /// Returns the workout's arena index.
    pub fn observe(&mut self, log: &mut TrainingLog, mut workout: Workout) -> usize {
        let index = log.workouts.len();

        if workout.day == Some(Day::Mon) {
            let step = next_step(scan_week_marker(&workout.content));
            self.apply(log, step, &workout.title);
        }

        if let Some(cycle) = self.current_cycle.and_then(|i| log.cycles.get_mut(i)) {
            cycle.workouts.push(index);
            workout.cycle_id = Some(cycle.cycle_id);
            workout.week_number = self.current_week;
        }

        log.workouts.push(workout);
        index
    }

    fn apply(&mut self, log: &mut TrainingLog, step: Step, title: &str) {
        match step {
            Step::StartCycle { week, total_weeks } => {
                let cycle = Cycle::new(log.next_cycle_id(), total_weeks, title);
                log.cycles.push(cycle);
                self.current_cycle = Some(log.cycles.len() - 1);
                self.current_week = Some(week);
            }
            Step::SetWeek(week) => self.current_week = Some(week),
        }
    }
}

// ── Tests ──

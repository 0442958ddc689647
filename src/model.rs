use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Day of week, serialized as the lowercase three-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }

    /// 0 = Monday .. 6 = Sunday.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day whose code the lowercased title starts with. Only the prefix counts,
    /// so a weekday mentioned later in the title is ignored.
    pub fn from_title(title: &str) -> Option<Day> {
        let lower = title.to_lowercase();
        Day::ALL.into_iter().find(|d| lower.starts_with(d.code()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub title: String,
    pub content: String,
    pub day: Option<Day>,
    pub source_page: i64,
    pub cycle_id: Option<u32>,
    pub week_number: Option<u32>,
}

impl Workout {
    pub fn new(title: &str, content: &str, source_page: i64) -> Self {
        Workout {
            title: title.to_string(),
            content: content.to_string(),
            day: Day::from_title(title),
            source_page,
            cycle_id: None,
            week_number: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub week_number: u32,
    pub workouts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub cycle_id: u32,
    pub total_weeks: Option<u32>,
    pub start_date: String,
    pub name: String,
    /// Indices into the workout arena, ascending.
    pub workouts: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<Vec<Week>>,
}

impl Cycle {
    pub fn new(cycle_id: u32, total_weeks: Option<u32>, start_date: &str) -> Self {
        Cycle {
            cycle_id,
            total_weeks,
            start_date: start_date.to_string(),
            name: default_cycle_name(cycle_id),
            workouts: Vec::new(),
            weeks: None,
        }
    }

    pub fn week_count(&self) -> usize {
        self.weeks.as_ref().map_or(0, Vec::len)
    }
}

pub fn default_cycle_name(cycle_id: u32) -> String {
    format!("Cycle {}", cycle_id)
}

/// Workout arena plus the cycles referencing it by index. Owned by a single
/// reprocessing run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingLog {
    pub workouts: Vec<Workout>,
    pub cycles: Vec<Cycle>,
}

impl TrainingLog {
    pub fn next_cycle_id(&self) -> u32 {
        self.cycles.len() as u32 + 1
    }

    /// Replace default cycle names with stored custom names, matched by id.
    pub fn apply_names(&mut self, names: &HashMap<u32, String>) -> usize {
        let mut applied = 0;
        for cycle in &mut self.cycles {
            match names.get(&cycle.cycle_id) {
                Some(name) => {
                    cycle.name = name.clone();
                    applied += 1;
                }
                None => debug!("Cycle {} has no stored name", cycle.cycle_id),
            }
        }
        applied
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_from_title_prefix_only() {
        assert_eq!(Day::from_title("Mon, Feb 24, 2025"), Some(Day::Mon));
        assert_eq!(Day::from_title("SUNDAY, Mar 2, 2025"), Some(Day::Sun));
        assert_eq!(Day::from_title("Rest day, see Mon, Feb 24, 2025"), None);
    }

    #[test]
    fn day_index_order() {
        let indices: Vec<usize> = Day::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn day_serializes_as_code() {
        let json = serde_json::to_string(&Day::Thu).unwrap();
        assert_eq!(json, "\"thu\"");
    }

    #[test]
    fn new_cycle_gets_default_name() {
        let c = Cycle::new(3, Some(6), "Mon, Feb 24, 2025");
        assert_eq!(c.name, "Cycle 3");
        assert_eq!(c.week_count(), 0);
        assert!(c.workouts.is_empty());
    }

    #[test]
    fn weeks_absent_until_organized() {
        let c = Cycle::new(1, None, "Mon, Feb 24, 2025");
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("weeks").is_none());
    }

    #[test]
    fn apply_names_keeps_ids() {
        let mut log = TrainingLog::default();
        log.cycles.push(Cycle::new(1, None, "a"));
        log.cycles.push(Cycle::new(2, None, "b"));
        let names = HashMap::from([(2, "Strength block".to_string())]);

        assert_eq!(log.apply_names(&names), 1);
        assert_eq!(log.cycles[0].name, "Cycle 1");
        assert_eq!(log.cycles[1].name, "Strength block");
        assert_eq!(log.cycles[1].cycle_id, 2);
    }
}

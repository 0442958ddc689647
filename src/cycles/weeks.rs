use std::collections::HashSet;

use tracing::{debug, warn};

use crate::model::{Cycle, TrainingLog, Week, Workout};

/// Partition a cycle's workout indices into weeks by day-of-week order.
///
/// A new week starts whenever a day does not come after the previous one
/// (so gaps are tolerated). Workouts without a day are skipped, and a title
/// already seen anywhere in the cycle is dropped before any boundary check.
/// Week numbers are positional. Same input, same partition.
pub fn organize_weeks(workouts: &[Workout], cycle_workouts: &[usize]) -> Vec<Week> {
    let mut weeks: Vec<Week> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut last_day: Option<usize> = None;
    let mut seen_titles: HashSet<&str> = HashSet::new();

    for &index in cycle_workouts {
        let Some(workout) = workouts.get(index) else {
            warn!("Workout index {} out of range ({} workouts)", index, workouts.len());
            continue;
        };
        let Some(day) = workout.day else {
            continue;
        };
        if !seen_titles.insert(workout.title.as_str()) {
            debug!("Skipping duplicate date: {}", workout.title);
            continue;
        }

        let day_index = day.index();
        if !current.is_empty() && last_day.is_some_and(|last| day_index <= last) {
            close_week(&mut weeks, &mut current);
        }

        current.push(index);
        last_day = Some(day_index);
    }

    if !current.is_empty() {
        close_week(&mut weeks, &mut current);
    }

    weeks
}

fn close_week(weeks: &mut Vec<Week>, current: &mut Vec<usize>) {
    weeks.push(Week {
        week_number: weeks.len() as u32 + 1,
        workouts: std::mem::take(current),
    });
}

/// Overwrite `cycle.weeks` from its workout list.
pub fn organize_cycle(cycle: &mut Cycle, workouts: &[Workout]) {
    cycle.weeks = Some(organize_weeks(workouts, &cycle.workouts));
}

pub fn organize_all(log: &mut TrainingLog) {
    let TrainingLog { workouts, cycles } = log;
    for cycle in cycles.iter_mut() {
        organize_cycle(cycle, &workouts[..]);
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    /// Workouts with the given title prefixes; day comes from the prefix.
    fn arena(titles: &[&str]) -> Vec<Workout> {
        titles
            .iter()
            .map(|t| Workout::new(t, "", 1))
            .collect()
    }

    fn week_lists(weeks: &[Week]) -> Vec<Vec<usize>> {
        weeks.iter().map(|w| w.workouts.clone()).collect()
    }

    #[test]
    fn drop_in_day_order_splits() {
        let ws = arena(&[
            "Mon, Feb 24, 2025",
            "Wed, Feb 26, 2025",
            "Fri, Feb 28, 2025",
            "Mon, Mar 3, 2025",
            "Tue, Mar 4, 2025",
        ]);
        let weeks = organize_weeks(&ws, &[0, 1, 2, 3, 4]);
        assert_eq!(week_lists(&weeks), vec![vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(weeks[0].week_number, 1);
        assert_eq!(weeks[1].week_number, 2);
    }

    #[test]
    fn same_day_twice_splits() {
        let ws = arena(&["Wed, Feb 26, 2025", "Wed, Mar 5, 2025"]);
        let weeks = organize_weeks(&ws, &[0, 1]);
        assert_eq!(week_lists(&weeks), vec![vec![0], vec![1]]);
    }

    #[test]
    fn gap_weeks_merge_when_days_ascend() {
        // Mon then Thu of the following week still reads as one week.
        let ws = arena(&["Mon, Feb 24, 2025", "Thu, Mar 6, 2025"]);
        let weeks = organize_weeks(&ws, &[0, 1]);
        assert_eq!(week_lists(&weeks), vec![vec![0, 1]]);
    }

    #[test]
    fn duplicates_never_split_or_repeat() {
        let ws = arena(&[
            "Mon, Feb 24, 2025",
            "Wed, Feb 26, 2025",
            "Mon, Feb 24, 2025",
            "Fri, Feb 28, 2025",
        ]);
        let weeks = organize_weeks(&ws, &[0, 1, 2, 3]);
        assert_eq!(week_lists(&weeks), vec![vec![0, 1, 3]]);

        let all: Vec<usize> = weeks.iter().flat_map(|w| w.workouts.clone()).collect();
        assert!(!all.contains(&2));
    }

    #[test]
    fn dayless_and_out_of_range_skipped() {
        let ws = arena(&["Mon, Feb 24, 2025", "Workout of the day", "Tue, Feb 25, 2025"]);
        let weeks = organize_weeks(&ws, &[0, 1, 2, 99]);
        assert_eq!(week_lists(&weeks), vec![vec![0, 2]]);
    }

    #[test]
    fn empty_cycle_has_no_weeks() {
        let ws = arena(&[]);
        assert!(organize_weeks(&ws, &[]).is_empty());
    }

    #[test]
    fn organize_is_idempotent() {
        let ws = arena(&[
            "Sat, Feb 22, 2025",
            "Mon, Feb 24, 2025",
            "Mon, Feb 24, 2025",
            "Sun, Mar 2, 2025",
            "Tue, Mar 4, 2025",
        ]);
        let mut cycle = Cycle::new(1, None, "Sat, Feb 22, 2025");
        cycle.workouts = vec![0, 1, 2, 3, 4];

        organize_cycle(&mut cycle, &ws);
        let first = cycle.weeks.clone();
        organize_cycle(&mut cycle, &ws);

        assert_eq!(cycle.weeks, first);
        assert_eq!(
            week_lists(cycle.weeks.as_deref().unwrap()),
            vec![vec![0], vec![1, 3], vec![4]]
        );
    }

    #[test]
    fn organize_all_fills_every_cycle() {
        let mut log = TrainingLog::default();
        log.workouts = arena(&["Mon, Feb 24, 2025", "Mon, Mar 3, 2025"]);
        let mut a = Cycle::new(1, None, "Mon, Feb 24, 2025");
        a.workouts = vec![0];
        let mut b = Cycle::new(2, None, "Mon, Mar 3, 2025");
        b.workouts = vec![1];
        log.cycles = vec![a, b];

        organize_all(&mut log);
        assert_eq!(log.cycles[0].week_count(), 1);
        assert_eq!(log.cycles[1].week_count(), 1);
    }
}

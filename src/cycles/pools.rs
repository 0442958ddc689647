use serde::{Deserialize, Serialize};

use crate::model::{Cycle, Week};

/// Cycles need strictly more weeks than this to stay in the browsing view.
pub const MIN_RETAINED_WEEKS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSample {
    pub cycle_name: String,
    pub week_number: u32,
    pub workouts: Vec<usize>,
    pub total_weeks_in_cycle: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoWeekSample {
    pub cycle_name: String,
    pub week_numbers: [u32; 2],
    pub weeks: [Week; 2],
    pub total_weeks_in_cycle: usize,
}

/// Finite pools an external sampler draws from uniformly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingPools {
    pub weeks: Vec<WeekSample>,
    pub two_weeks: Vec<TwoWeekSample>,
}

/// Cycles long enough for browsing.
pub fn retain_long_cycles(cycles: &[Cycle]) -> Vec<&Cycle> {
    cycles
        .iter()
        .filter(|c| c.week_count() > MIN_RETAINED_WEEKS)
        .collect()
}

/// Flatten every week, and every adjacent pair of weeks, of every cycle.
/// Short cycles are included.
pub fn build_pools(cycles: &[Cycle]) -> SamplingPools {
    let mut pools = SamplingPools::default();

    for cycle in cycles {
        let weeks = cycle.weeks.as_deref().unwrap_or_default();
        let total = weeks.len();

        pools.weeks.extend(weeks.iter().map(|week| WeekSample {
            cycle_name: cycle.name.clone(),
            week_number: week.week_number,
            workouts: week.workouts.clone(),
            total_weeks_in_cycle: total,
        }));

        pools.two_weeks.extend(weeks.windows(2).map(|pair| TwoWeekSample {
            cycle_name: cycle.name.clone(),
            week_numbers: [pair[0].week_number, pair[1].week_number],
            weeks: [pair[0].clone(), pair[1].clone()],
            total_weeks_in_cycle: total,
        }));
    }

    pools
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    /// Cycle `id` with `n` single-workout weeks.
    fn cycle_with_weeks(id: u32, n: usize) -> Cycle {
        let mut c = Cycle::new(id, None, "Mon, Feb 24, 2025");
        let weeks = (0..n)
            .map(|i| Week {
                week_number: i as u32 + 1,
                workouts: vec![id as usize * 100 + i],
            })
            .collect();
        c.weeks = Some(weeks);
        c
    }

    fn sample_cycles() -> Vec<Cycle> {
        vec![
            cycle_with_weeks(1, 1),
            cycle_with_weeks(2, 2),
            cycle_with_weeks(3, 3),
            cycle_with_weeks(4, 4),
        ]
    }

    #[test]
    fn retains_more_than_two_weeks() {
        let cycles = sample_cycles();
        let ids: Vec<u32> = retain_long_cycles(&cycles).iter().map(|c| c.cycle_id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn pools_include_short_cycles() {
        let pools = build_pools(&sample_cycles());
        assert_eq!(pools.weeks.len(), 1 + 2 + 3 + 4);
        assert_eq!(pools.two_weeks.len(), 1 + 2 + 3);

        let names: Vec<&str> = pools.weeks.iter().map(|w| w.cycle_name.as_str()).collect();
        assert!(names.contains(&"Cycle 1"));
        assert!(names.contains(&"Cycle 2"));
    }

    #[test]
    fn week_sample_fields() {
        let pools = build_pools(&[cycle_with_weeks(3, 3)]);
        let second = &pools.weeks[1];
        assert_eq!(second.cycle_name, "Cycle 3");
        assert_eq!(second.week_number, 2);
        assert_eq!(second.workouts, vec![301]);
        assert_eq!(second.total_weeks_in_cycle, 3);
    }

    #[test]
    fn two_week_pairs_are_adjacent() {
        let pools = build_pools(&[cycle_with_weeks(4, 4)]);
        let numbers: Vec<[u32; 2]> = pools.two_weeks.iter().map(|p| p.week_numbers).collect();
        assert_eq!(numbers, vec![[1, 2], [2, 3], [3, 4]]);
        assert_eq!(pools.two_weeks[2].weeks[1].workouts, vec![403]);
    }

    #[test]
    fn unorganized_cycle_contributes_nothing() {
        let c = Cycle::new(1, None, "Mon, Feb 24, 2025");
        let pools = build_pools(&[c.clone()]);
        assert!(pools.weeks.is_empty());
        assert!(retain_long_cycles(&[c]).is_empty());
    }

    #[test]
    fn pools_use_custom_names() {
        let mut c = cycle_with_weeks(2, 2);
        c.name = "Hypertrophy".to_string();
        let pools = build_pools(&[c]);
        assert!(pools.two_weeks.iter().all(|p| p.cycle_name == "Hypertrophy"));
    }
}

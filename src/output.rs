use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cycles::retain_long_cycles;
use crate::model::Cycle;
use crate::pipeline::Reprocessed;

pub const DEFAULT_OUT_DIR: &str = "data";

const WORKOUTS_FILE: &str = "workouts.json";
const CYCLES_FILE: &str = "cycles.json";
const RANDOM_WEEKS_FILE: &str = "random_weeks.json";
const RANDOM_2WEEKS_FILE: &str = "random_2weeks.json";
const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub total_pages: usize,
    pub page_range: String,
    pub total_workouts: usize,
    pub rejected_candidates: usize,
    pub total_cycles: usize,
    pub retained_cycles: usize,
    pub sampled_weeks: usize,
    pub sampled_two_weeks: usize,
}

impl Summary {
    pub fn from_run(run: &Reprocessed, retained_cycles: usize) -> Self {
        Summary {
            generated_at: Utc::now(),
            total_pages: run.pages,
            page_range: match run.page_range {
                Some((lo, hi)) => format!("{}-{}", lo, hi),
                None => "None".to_string(),
            },
            total_workouts: run.log.workouts.len(),
            rejected_candidates: run.rejected,
            total_cycles: run.log.cycles.len(),
            retained_cycles,
            sampled_weeks: run.pools.weeks.len(),
            sampled_two_weeks: run.pools.two_weeks.len(),
        }
    }

    pub fn print(&self) {
        println!("Pages:      {} ({})", self.total_pages, self.page_range);
        println!("Workouts:   {} ({} candidates rejected)", self.total_workouts, self.rejected_candidates);
        println!("Cycles:     {} ({} with 3+ weeks)", self.total_cycles, self.retained_cycles);
        println!("Samples:    {} weeks, {} two-week runs", self.sampled_weeks, self.sampled_two_weeks);
    }
}

/// Write every output file of a run into `dir`.
pub fn write_all(dir: &Path, run: &Reprocessed) -> Result<Summary> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let retained = retain_long_cycles(&run.log.cycles);
    let summary = Summary::from_run(run, retained.len());

    write_json(&dir.join(WORKOUTS_FILE), &run.log.workouts)?;
    write_json(&dir.join(CYCLES_FILE), &retained)?;
    write_json(&dir.join(RANDOM_WEEKS_FILE), &run.pools.weeks)?;
    write_json(&dir.join(RANDOM_2WEEKS_FILE), &run.pools.two_weeks)?;
    write_json(&dir.join(SUMMARY_FILE), &summary)?;

    info!(
        "Saved {} workouts, {} cycles, {} weeks and {} two-week runs to {}",
        run.log.workouts.len(),
        retained.len(),
        run.pools.weeks.len(),
        run.pools.two_weeks.len(),
        dir.display()
    );
    Ok(summary)
}

/// Cycles from the last written `cycles.json`.
pub fn read_cycles(dir: &Path) -> Result<Vec<Cycle>> {
    let path = dir.join(CYCLES_FILE);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} (run 'process' first)", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

// ── Tests ──

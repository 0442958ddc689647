//! One reprocessing run: pages → workouts → cycles → weeks → pools.
//!
//! All state lives in a `Reprocessor` owned by the caller, so separate runs
//! never share anything.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::cycles::{self, CycleDetector, SamplingPools};
use crate::db::RawPage;
use crate::model::TrainingLog;
use crate::parser;

/// Finished run, handed back as an immutable snapshot.
pub struct Reprocessed {
    pub log: TrainingLog,
    pub pools: SamplingPools,
    pub pages: usize,
    pub page_range: Option<(i64, i64)>,
    pub rejected: usize,
}

#[derive(Default)]
pub struct Reprocessor {
    log: TrainingLog,
    detector: CycleDetector,
    pages: usize,
    page_range: Option<(i64, i64)>,
    rejected: usize,
}

impl Reprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next page. Pages must arrive oldest first.
    pub fn feed_page(&mut self, page: &RawPage) {
        let parsed = parser::process_page(page);

        for reason in &parsed.rejected {
            debug!("Page {}: rejected candidate: {}", page.page_number, reason);
        }
        self.rejected += parsed.rejected.len();

        for workout in parsed.workouts {
            self.detector.observe(&mut self.log, workout);
        }

        let n = page.page_number;
        self.page_range = Some(match self.page_range {
            Some((lo, hi)) => (lo.min(n), hi.max(n)),
            None => (n, n),
        });
        self.pages += 1;
    }

    /// Organize weeks, restore custom names, and build the sampling pools.
    pub fn finish(mut self, names: &HashMap<u32, String>) -> Reprocessed {
        if let Some(open) = self.detector.current_cycle(&self.log) {
            debug!(
                "Run ends inside cycle {} at week {:?}",
                open.cycle_id,
                self.detector.current_week()
            );
        }

        cycles::organize_all(&mut self.log);
        let named = self.log.apply_names(names);
        let pools = cycles::build_pools(&self.log.cycles);

        info!(
            "Reprocessed {} pages: {} workouts, {} cycles ({} named), {} rejected candidates",
            self.pages,
            self.log.workouts.len(),
            self.log.cycles.len(),
            named,
            self.rejected
        );

        Reprocessed {
            log: self.log,
            pools,
            pages: self.pages,
            page_range: self.page_range,
            rejected: self.rejected,
        }
    }
}

/// Run the whole pipeline over pages given oldest first.
pub fn reprocess<'a>(
    pages: impl IntoIterator<Item = &'a RawPage>,
    names: &HashMap<u32, String>,
) -> Reprocessed {
    let mut run = Reprocessor::new();
    for page in pages {
        run.feed_page(page);
    }
    run.finish(names)
}

// ── Tests ──

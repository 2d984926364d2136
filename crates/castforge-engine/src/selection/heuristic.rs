//! Deterministic alternative cast balancing.

use std::time::Instant;

use castforge_core::{ApplicantId, Result, Show};
use tracing::info;

use super::{even_fill, SelectionEngine};
use crate::applicant_engine::ApplicantEngine;
use crate::stats::BalanceReport;

/// Splits alternating cast groups evenly over any number of alternative
/// casts, best overall ability first, without a solver.
#[derive(Debug)]
pub struct HeuristicSelectionEngine {
    applicant_engine: Box<dyn ApplicantEngine>,
}

impl HeuristicSelectionEngine {
    pub fn new(applicant_engine: Box<dyn ApplicantEngine>) -> Self {
        Self { applicant_engine }
    }
}

impl SelectionEngine for HeuristicSelectionEngine {
    fn applicant_engine(&self) -> &dyn ApplicantEngine {
        self.applicant_engine.as_ref()
    }

    fn balance_alternative_casts(
        &self,
        show: &mut Show,
        applicants: &[ApplicantId],
    ) -> Result<BalanceReport> {
        let start = Instant::now();
        info!(
            event = "selection_start",
            step = "balance_alternative_casts",
            engine = self.engine_type_name(),
            applicants = applicants.len(),
        );
        let assigned = even_fill(show, applicants, self.applicant_engine());
        info!(
            event = "selection_end",
            step = "balance_alternative_casts",
            assigned = assigned,
            duration_ms = start.elapsed().as_millis() as u64,
        );
        Ok(BalanceReport {
            assigned,
            ..BalanceReport::default()
        })
    }

    fn engine_type_name(&self) -> &'static str {
        "Heuristic"
    }
}

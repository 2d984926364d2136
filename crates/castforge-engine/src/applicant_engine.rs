//! Applicant scoring.
//!
//! The allocation and selection engines only consume scores through the
//! [`ApplicantEngine`] trait, so other scoring models can be plugged in
//! without touching them.

use std::fmt::Debug;

use castforge_config::ApplicantEngineType;
use castforge_core::{ApplicantId, RequirementId, RoleId, Show, TagId};

use crate::requirement::{mean, RequirementEvaluator};

/// Scores applicants for ranking.
pub trait ApplicantEngine: Send + Sync + Debug {
    /// Overall ability of an applicant across all criteria.
    fn overall_ability(&self, show: &Show, applicant: ApplicantId) -> f64;

    /// Highest overall ability any applicant could reach.
    fn max_overall_ability(&self, show: &Show) -> f64;

    /// Overall ability scaled to `[0, 1]`.
    fn overall_suitability(&self, show: &Show, applicant: ApplicantId) -> f64 {
        let max = self.max_overall_ability(show);
        if max <= 0.0 {
            0.0
        } else {
            (self.overall_ability(show, applicant) / max).clamp(0.0, 1.0)
        }
    }

    fn requirement_suitability(
        &self,
        show: &Show,
        applicant: ApplicantId,
        requirement: RequirementId,
    ) -> f64 {
        RequirementEvaluator::new(show).suitability(applicant, requirement)
    }

    /// Suitability for a list of requirements; overall suitability when empty.
    fn suitability_for(
        &self,
        show: &Show,
        applicant: ApplicantId,
        requirements: &[RequirementId],
    ) -> f64 {
        mean(
            requirements
                .iter()
                .map(|&r| self.requirement_suitability(show, applicant, r)),
        )
        .unwrap_or_else(|| self.overall_suitability(show, applicant))
    }

    /// How well an applicant fits a role, in `[0, 1]`.
    fn suitability_of(&self, show: &Show, applicant: ApplicantId, role: RoleId) -> f64 {
        self.suitability_for(show, applicant, &show.role(role).requirements)
    }

    /// How well an applicant fits a tag, in `[0, 1]`.
    fn tag_suitability(&self, show: &Show, applicant: ApplicantId, tag: TagId) -> f64 {
        self.suitability_for(show, applicant, &show.tag(tag).requirements)
    }

    fn engine_type_name(&self) -> &'static str;
}

/// Overall ability as the weighted sum of criteria marks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSumEngine;

impl WeightedSumEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ApplicantEngine for WeightedSumEngine {
    fn overall_ability(&self, show: &Show, applicant: ApplicantId) -> f64 {
        let applicant = show.applicant(applicant);
        show.criteria_ids()
            .map(|id| show.criteria(id).weight * applicant.mark_for(id) as f64)
            .sum()
    }

    fn max_overall_ability(&self, show: &Show) -> f64 {
        show.criterias
            .iter()
            .map(|c| c.weight.max(0.0) * c.max_mark as f64)
            .sum()
    }

    fn engine_type_name(&self) -> &'static str {
        "WeightedSum"
    }
}

/// Creates the applicant engine named by the configuration.
pub fn applicant_engine(kind: ApplicantEngineType) -> Box<dyn ApplicantEngine> {
    match kind {
        ApplicantEngineType::WeightedSum => Box::new(WeightedSumEngine::new()),
    }
}

//! Eligibility of an applicant for a role.

use castforge_core::{ApplicantId, RequirementId, RoleId, Show};

use crate::requirement::RequirementEvaluator;

/// Minimum requirements of a role the applicant does not meet.
///
/// Only the role's top-level requirements are reported; a failing
/// combinator is listed as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub requirements_not_met: Vec<RequirementId>,
}

impl Eligibility {
    /// Evaluates every top-level requirement of `role` for `applicant`.
    pub fn of(show: &Show, applicant: ApplicantId, role: RoleId) -> Self {
        let evaluator = RequirementEvaluator::new(show);
        Self {
            requirements_not_met: show
                .role(role)
                .requirements
                .iter()
                .copied()
                .filter(|&requirement| !evaluator.is_satisfied(applicant, requirement))
                .collect(),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.requirements_not_met.is_empty()
    }
}

/// Shortcut for `Eligibility::of(..).is_eligible()` that stops at the first failure.
pub fn is_eligible(show: &Show, applicant: ApplicantId, role: RoleId) -> bool {
    RequirementEvaluator::new(show).satisfies_all(applicant, &show.role(role).requirements)
}

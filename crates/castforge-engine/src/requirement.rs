//! Requirement tree evaluation.

use castforge_core::{Applicant, ApplicantId, RequirementId, RequirementKind, Show};

/// Evaluates requirement trees against applicants of one show.
///
/// Satisfaction and suitability are computed independently: a combinator
/// is satisfied when its children are under the matching boolean operator,
/// while its suitability combines the children's suitabilities.
///
/// Evaluation recurses without a depth limit. Run
/// [`Show::validate`](castforge_core::Show::validate) once before casting
/// so cyclic requirement graphs are rejected up front.
///
/// # Example
///
/// ```
/// use castforge_core::{Applicant, Criteria, Requirement, RequirementKind, Show};
/// use castforge_engine::RequirementEvaluator;
///
/// let mut show = Show::new("Revue");
/// let singing = show.add_criteria(Criteria::new("Singing", 100));
/// let strong = show.add_requirement(Requirement::new(
///     "Strong singer",
///     RequirementKind::AbilityRange {
///         criteria: singing,
///         minimum: Some(70),
///         maximum: None,
///         scale_suitability: true,
///     },
/// ));
/// let applicant = show.add_applicant(Applicant::new("Ada", "L").with_mark(singing, 80));
///
/// let evaluator = RequirementEvaluator::new(&show);
/// assert!(evaluator.is_satisfied(applicant, strong));
/// assert_eq!(evaluator.suitability(applicant, strong), 0.8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequirementEvaluator<'a> {
    show: &'a Show,
}

impl<'a> RequirementEvaluator<'a> {
    pub fn new(show: &'a Show) -> Self {
        Self { show }
    }

    /// Whether the applicant satisfies the requirement.
    pub fn is_satisfied(&self, applicant: ApplicantId, requirement: RequirementId) -> bool {
        self.satisfied_by(self.show.applicant(applicant), requirement)
    }

    /// How well the applicant fits the requirement, in `[0, 1]`.
    pub fn suitability(&self, applicant: ApplicantId, requirement: RequirementId) -> f64 {
        self.suitability_of(self.show.applicant(applicant), requirement)
    }

    /// Whether the applicant satisfies every requirement in the list.
    pub fn satisfies_all(&self, applicant: ApplicantId, requirements: &[RequirementId]) -> bool {
        let applicant = self.show.applicant(applicant);
        requirements.iter().all(|&r| self.satisfied_by(applicant, r))
    }

    fn satisfied_by(&self, applicant: &Applicant, requirement: RequirementId) -> bool {
        match &self.show.requirement(requirement).kind {
            RequirementKind::AbilityRange {
                criteria,
                minimum,
                maximum,
                ..
            } => in_range(applicant.mark_for(*criteria), *minimum, *maximum),
            RequirementKind::AbilityExact {
                criteria,
                required_value,
            } => applicant.mark_for(*criteria) == *required_value,
            RequirementKind::Age { minimum, maximum } => applicant
                .age
                .is_some_and(|age| in_range(age, *minimum, *maximum)),
            RequirementKind::Gender { required_value } => {
                applicant.gender == Some(*required_value)
            }
            RequirementKind::Tag { tag } => applicant.tags.contains(tag),
            RequirementKind::And {
                sub_requirements, ..
            } => sub_requirements
                .iter()
                .all(|&sub| self.satisfied_by(applicant, sub)),
            RequirementKind::Or {
                sub_requirements, ..
            } => sub_requirements
                .iter()
                .any(|&sub| self.satisfied_by(applicant, sub)),
            RequirementKind::Xor { sub_requirements } => {
                sub_requirements
                    .iter()
                    .filter(|&&sub| self.satisfied_by(applicant, sub))
                    .count()
                    == 1
            }
            RequirementKind::Not { sub_requirement } => {
                !self.satisfied_by(applicant, *sub_requirement)
            }
        }
    }

    fn suitability_of(&self, applicant: &Applicant, requirement: RequirementId) -> f64 {
        match &self.show.requirement(requirement).kind {
            RequirementKind::AbilityRange {
                criteria,
                scale_suitability,
                ..
            } => {
                if !self.satisfied_by(applicant, requirement) {
                    0.0
                } else if *scale_suitability {
                    let max_mark = self.show.criteria(*criteria).max_mark;
                    if max_mark == 0 {
                        1.0
                    } else {
                        (applicant.mark_for(*criteria) as f64 / max_mark as f64).min(1.0)
                    }
                } else {
                    1.0
                }
            }
            RequirementKind::AbilityExact { .. }
            | RequirementKind::Age { .. }
            | RequirementKind::Gender { .. }
            | RequirementKind::Tag { .. } => {
                if self.satisfied_by(applicant, requirement) {
                    1.0
                } else {
                    0.0
                }
            }
            RequirementKind::Not { sub_requirement } => {
                1.0 - self.suitability_of(applicant, *sub_requirement)
            }
            RequirementKind::And {
                sub_requirements,
                average_suitability,
            } => {
                let values = sub_requirements
                    .iter()
                    .map(|&sub| self.suitability_of(applicant, sub));
                if *average_suitability {
                    mean(values).unwrap_or(1.0)
                } else {
                    values.product::<f64>()
                }
            }
            RequirementKind::Or {
                sub_requirements,
                average_suitability,
            } => {
                let values = sub_requirements
                    .iter()
                    .map(|&sub| self.suitability_of(applicant, sub));
                if *average_suitability {
                    mean(values).unwrap_or(0.0)
                } else {
                    values.fold(0.0, f64::max)
                }
            }
            RequirementKind::Xor { sub_requirements } => {
                let mut satisfied = sub_requirements
                    .iter()
                    .filter(|&&sub| self.satisfied_by(applicant, sub));
                match (satisfied.next(), satisfied.next()) {
                    (Some(&only), None) => self.suitability_of(applicant, only),
                    // None or several satisfied.
                    _ => 0.0,
                }
            }
        }
    }
}

fn in_range(value: u32, minimum: Option<u32>, maximum: Option<u32>) -> bool {
    minimum.map_or(true, |min| value >= min) && maximum.map_or(true, |max| value <= max)
}

/// Arithmetic mean, `None` for an empty sequence.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
#[path = "requirement_tests.rs"]
mod tests;

//! Role allocation.
//!
//! [`AllocationEngine`] bundles the read-only casting queries with the two
//! ways of filling roles: [`pick_cast`](AllocationEngine::pick_cast) for a
//! role on its own and [`balance_cast`](AllocationEngine::balance_cast) for
//! roles competing for the same applicants.

use std::collections::VecDeque;
use std::fmt::Debug;

use castforge_config::{AllocationEngineType, CastingConfig, CastingOrderConfig};
use castforge_core::{
    AlternativeCastId, ApplicantId, CastGroupId, CriteriaId, RequirementId, RoleId, Show,
};
use tracing::{debug, trace};

use crate::applicant_engine::ApplicantEngine;
use crate::availability::{self, Availability};
use crate::casting_order::CastingOrder;
use crate::eligibility::{self, Eligibility};

/// Picks and balances cast for roles.
pub trait AllocationEngine: Send + Sync + Debug {
    fn applicant_engine(&self) -> &dyn ApplicantEngine;

    fn suitability_of(&self, show: &Show, applicant: ApplicantId, role: RoleId) -> f64 {
        self.applicant_engine().suitability_of(show, applicant, role)
    }

    fn eligibility_of(&self, show: &Show, applicant: ApplicantId, role: RoleId) -> Eligibility {
        Eligibility::of(show, applicant, role)
    }

    fn is_eligible(&self, show: &Show, applicant: ApplicantId, role: RoleId) -> bool {
        eligibility::is_eligible(show, applicant, role)
    }

    fn availability_of(&self, show: &Show, applicant: ApplicantId, role: RoleId) -> Availability {
        Availability::of(show, applicant, role)
    }

    fn is_available(&self, show: &Show, applicant: ApplicantId, role: RoleId) -> bool {
        availability::is_available(show, applicant, role)
    }

    /// Number of roles the applicant is cast in.
    ///
    /// With `criteria`, only roles with a requirement testing that criteria
    /// are counted. `excluding` leaves one role out of the count.
    fn count_roles(
        &self,
        show: &Show,
        applicant: ApplicantId,
        criteria: Option<CriteriaId>,
        excluding: Option<RoleId>,
    ) -> usize {
        show.applicant(applicant)
            .roles
            .iter()
            .filter(|&&role| Some(role) != excluding)
            .filter(|&&role| match criteria {
                None => true,
                Some(criteria) => show
                    .role(role)
                    .requirements
                    .iter()
                    .any(|&r| tests_criteria(show, r, criteria)),
            })
            .count()
    }

    /// The order in which the show's roles should be cast.
    fn ideal_casting_order(
        &self,
        show: &Show,
        applicants_in_cast: &[ApplicantId],
    ) -> CastingOrder;

    /// Chooses applicants for the remaining places of one role.
    ///
    /// Does not modify the show; the caller casts the returned applicants.
    fn pick_cast(
        &self,
        show: &Show,
        applicants: &[ApplicantId],
        role: RoleId,
    ) -> Vec<ApplicantId>;

    /// Casts a batch of roles that compete for the same applicants.
    ///
    /// Returns the `(role, applicant)` pairs cast.
    fn balance_cast(
        &self,
        show: &mut Show,
        applicants: &[ApplicantId],
        roles: &[RoleId],
    ) -> Vec<(RoleId, ApplicantId)>;

    fn engine_type_name(&self) -> &'static str;
}

/// Greedy suitability-ranked allocation.
#[derive(Debug)]
pub struct HeuristicAllocationEngine {
    applicant_engine: Box<dyn ApplicantEngine>,
    casting_order: CastingOrderConfig,
}

impl HeuristicAllocationEngine {
    pub fn new(
        applicant_engine: Box<dyn ApplicantEngine>,
        casting_order: CastingOrderConfig,
    ) -> Self {
        Self {
            applicant_engine,
            casting_order,
        }
    }

    /// Eligible, available applicants of a cast group (and alternative
    /// cast, if given) not yet in the role, best first.
    fn ranked_candidates(
        &self,
        show: &Show,
        applicants: &[ApplicantId],
        role: RoleId,
        cast_group: CastGroupId,
        alternative_cast: Option<AlternativeCastId>,
    ) -> Vec<ApplicantId> {
        let cast = &show.role(role).cast;
        let mut ranked: Vec<(ApplicantId, f64)> = applicants
            .iter()
            .copied()
            .filter(|&a| {
                let applicant = show.applicant(a);
                applicant.cast_group == Some(cast_group)
                    && alternative_cast.map_or(true, |c| applicant.alternative_cast == Some(c))
                    && !cast.contains(&a)
                    && self.is_eligible(show, a, role)
                    && self.is_available(show, a, role)
            })
            .map(|a| (a, self.suitability_of(show, a, role)))
            .collect();
        // Stable: equal suitabilities keep input order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().map(|(a, _)| a).collect()
    }
}

impl AllocationEngine for HeuristicAllocationEngine {
    fn applicant_engine(&self) -> &dyn ApplicantEngine {
        self.applicant_engine.as_ref()
    }

    fn ideal_casting_order(
        &self,
        show: &Show,
        applicants_in_cast: &[ApplicantId],
    ) -> CastingOrder {
        CastingOrder::new(show, applicants_in_cast, &self.casting_order)
    }

    fn pick_cast(&self, show: &Show, applicants: &[ApplicantId], role: RoleId) -> Vec<ApplicantId> {
        let r = show.role(role);
        let alternative_casts: Vec<AlternativeCastId> = show.alternative_cast_ids().collect();
        let mut picked = Vec::new();

        for cbg in &r.count_by_group {
            let group = cbg.cast_group;
            let already = |alternative_cast: Option<AlternativeCastId>| {
                r.cast
                    .iter()
                    .filter(|&&a| {
                        let applicant = show.applicant(a);
                        applicant.cast_group == Some(group)
                            && alternative_cast
                                .map_or(true, |c| applicant.alternative_cast == Some(c))
                    })
                    .count() as u32
            };

            if !show.cast_group(group).alternate_casts || alternative_casts.is_empty() {
                let needed = show.required_count(role, group).saturating_sub(already(None));
                picked.extend(
                    self.ranked_candidates(show, applicants, role, group, None)
                        .into_iter()
                        .take(needed as usize),
                );
                continue;
            }

            let mut needed: Vec<u32> = alternative_casts
                .iter()
                .map(|&c| cbg.count.saturating_sub(already(Some(c))))
                .collect();
            let ranked: Vec<ApplicantId> = self
                .ranked_candidates(show, applicants, role, group, None)
                .into_iter()
                .filter(|&a| show.applicant(a).alternative_cast.is_some())
                .collect();
            let slot = |a: ApplicantId| {
                show.applicant(a)
                    .alternative_cast
                    .and_then(|c| alternative_casts.iter().position(|&x| x == c))
            };

            for &candidate in &ranked {
                if needed.iter().all(|&n| n == 0) {
                    break;
                }
                let Some(index) = slot(candidate) else { continue };
                if needed[index] == 0 || picked.contains(&candidate) {
                    continue;
                }
                picked.push(candidate);
                needed[index] -= 1;

                // Roles without requirements keep cast-number buddies together.
                let Some(number) = show.applicant(candidate).cast_number else {
                    continue;
                };
                if !r.requirements.is_empty() {
                    continue;
                }
                for &buddy in &ranked {
                    let Some(buddy_index) = slot(buddy) else { continue };
                    if buddy_index != index
                        && needed[buddy_index] > 0
                        && show.applicant(buddy).cast_number == Some(number)
                        && !picked.contains(&buddy)
                    {
                        picked.push(buddy);
                        needed[buddy_index] -= 1;
                    }
                }
            }
        }

        trace!(event = "pick_cast", role = %role, picked = picked.len());
        picked
    }

    fn balance_cast(
        &self,
        show: &mut Show,
        applicants: &[ApplicantId],
        roles: &[RoleId],
    ) -> Vec<(RoleId, ApplicantId)> {
        let mut cast = Vec::new();
        let groups: Vec<CastGroupId> = show.cast_group_ids().collect();
        let alternative_casts: Vec<AlternativeCastId> = show.alternative_cast_ids().collect();

        for group in groups {
            let options: Vec<Option<AlternativeCastId>> =
                if show.cast_group(group).alternate_casts && !alternative_casts.is_empty() {
                    alternative_casts.iter().copied().map(Some).collect()
                } else {
                    vec![None]
                };
            for alternative_cast in options {
                self.balance_combination(
                    show,
                    applicants,
                    roles,
                    group,
                    alternative_cast,
                    &mut cast,
                );
            }
        }

        debug!(
            event = "balance_cast",
            roles = roles.len(),
            cast = cast.len()
        );
        cast
    }

    fn engine_type_name(&self) -> &'static str {
        "Heuristic"
    }
}

impl HeuristicAllocationEngine {
    /// Fills one (cast group, alternative cast) combination of a batch.
    fn balance_combination(
        &self,
        show: &mut Show,
        applicants: &[ApplicantId],
        roles: &[RoleId],
        group: CastGroupId,
        alternative_cast: Option<AlternativeCastId>,
        cast: &mut Vec<(RoleId, ApplicantId)>,
    ) {
        let mut remaining: Vec<u32> = roles
            .iter()
            .map(|&role| {
                let per_cast = match alternative_cast {
                    Some(_) => show.role(role).count_for(group),
                    None => show.required_count(role, group),
                };
                let already = show
                    .role(role)
                    .cast
                    .iter()
                    .filter(|&&a| {
                        let applicant = show.applicant(a);
                        applicant.cast_group == Some(group)
                            && alternative_cast
                                .map_or(true, |c| applicant.alternative_cast == Some(c))
                    })
                    .count() as u32;
                per_cast.saturating_sub(already)
            })
            .collect();
        if remaining.iter().all(|&n| n == 0) {
            return;
        }
        let mut queues: Vec<VecDeque<ApplicantId>> = roles
            .iter()
            .zip(&remaining)
            .map(|(&role, &needed)| {
                if needed == 0 {
                    VecDeque::new()
                } else {
                    self.ranked_candidates(show, applicants, role, group, alternative_cast)
                        .into()
                }
            })
            .collect();

        let needs_casting =
            |i: usize, queues: &[VecDeque<ApplicantId>], remaining: &[u32]| {
                remaining[i] > 0 && !queues[i].is_empty()
            };
        // A role whose whole queue is needed must take it before others do.
        let immediate = |queues: &[VecDeque<ApplicantId>], remaining: &[u32]| {
            (0..queues.len()).find(|&i| {
                needs_casting(i, queues, remaining) && queues[i].len() as u32 <= remaining[i]
            })
        };

        let Some(mut cursor) = immediate(&queues, &remaining)
            .or_else(|| (0..roles.len()).find(|&i| needs_casting(i, &queues, &remaining)))
        else {
            return;
        };

        loop {
            if let Some(applicant) = queues[cursor].pop_front() {
                if remaining[cursor] > 0 {
                    let role = roles[cursor];
                    show.cast(role, applicant);
                    remaining[cursor] -= 1;
                    cast.push((role, applicant));
                    trace!(event = "role_cast", role = %role, applicant = %applicant);

                    for (i, queue) in queues.iter_mut().enumerate() {
                        if i != cursor
                            && queue.contains(&applicant)
                            && !self.is_available(show, applicant, roles[i])
                        {
                            queue.retain(|&a| a != applicant);
                        }
                    }
                }
            }

            cursor = match immediate(&queues, &remaining) {
                Some(i) => i,
                None => match (1..=roles.len())
                    .map(|step| (cursor + step) % roles.len())
                    .find(|&i| needs_casting(i, &queues, &remaining))
                {
                    Some(i) => i,
                    None => break,
                },
            };
        }
    }
}

/// Whether a requirement tree tests a criteria anywhere.
fn tests_criteria(show: &Show, requirement: RequirementId, criteria: CriteriaId) -> bool {
    let r = show.requirement(requirement);
    r.criteria() == Some(criteria)
        || r
            .sub_requirements()
            .iter()
            .any(|&sub| tests_criteria(show, sub, criteria))
}

/// Creates the allocation engine named by the configuration.
pub fn allocation_engine(
    config: &CastingConfig,
    applicant_engine: Box<dyn ApplicantEngine>,
) -> Box<dyn AllocationEngine> {
    match config.allocation_engine {
        AllocationEngineType::Heuristic => Box::new(HeuristicAllocationEngine::new(
            applicant_engine,
            config.casting_order.clone(),
        )),
    }
}

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod tests;

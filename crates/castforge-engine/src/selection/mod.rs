//! Cast selection.
//!
//! A [`SelectionEngine`] turns the audition pool into a cast:
//! - `select_cast_groups`: accepts applicants into cast groups
//! - `balance_alternative_casts`: splits alternating groups across casts
//! - `allocate_cast_numbers`: numbers the accepted applicants
//! - `apply_tags`: labels applicants within each tag's limits
//!
//! Only alternative cast balancing differs between implementations.

mod chunked;
mod heuristic;

pub use chunked::ChunkedPairsSatEngine;
pub use heuristic::HeuristicSelectionEngine;

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::time::Instant;

use castforge_config::SortDirection;
use castforge_core::{AlternativeCastId, ApplicantId, CastGroupId, CriteriaId, Result, Show};
use tracing::info;

use crate::applicant_engine::ApplicantEngine;
use crate::requirement::RequirementEvaluator;
use crate::stats::BalanceReport;

/// Selects and organises the cast.
pub trait SelectionEngine: Send + Sync + Debug {
    fn applicant_engine(&self) -> &dyn ApplicantEngine;

    /// Accepts ungrouped applicants into cast groups, best overall ability
    /// first, until each group holds its required count per alternative
    /// cast. Applicants left without a group lose their cast number, tags
    /// and alternative cast.
    ///
    /// Returns the number of applicants newly accepted.
    fn select_cast_groups(&self, show: &mut Show, applicants: &[ApplicantId]) -> usize {
        let start = Instant::now();
        info!(
            event = "selection_start",
            step = "select_cast_groups",
            applicants = applicants.len(),
        );
        let engine = self.applicant_engine();
        let ranked = rank(
            applicants,
            |a| engine.overall_ability(show, a),
            SortDirection::Descending,
        );
        let mut accepted = 0;

        for group in show.cast_group_ids().collect::<Vec<_>>() {
            let limit = show
                .cast_group(group)
                .required_count
                .map(|count| count * show.casts_per_group(group));
            let mut members = applicants
                .iter()
                .filter(|&&a| show.applicant(a).cast_group == Some(group))
                .count() as u32;
            for &applicant in &ranked {
                if limit.is_some_and(|limit| members >= limit) {
                    break;
                }
                if show.applicant(applicant).cast_group.is_some() {
                    continue;
                }
                let requirements = &show.cast_group(group).requirements;
                if RequirementEvaluator::new(show).satisfies_all(applicant, requirements) {
                    show.applicant_mut(applicant).cast_group = Some(group);
                    members += 1;
                    accepted += 1;
                }
            }
        }

        let mut rejected = 0;
        for &applicant in applicants {
            let a = show.applicant_mut(applicant);
            if a.cast_group.is_none() {
                a.cast_number = None;
                a.tags.clear();
                a.alternative_cast = None;
                rejected += 1;
            }
        }

        info!(
            event = "selection_end",
            step = "select_cast_groups",
            accepted = accepted,
            rejected = rejected,
            duration_ms = start.elapsed().as_millis() as u64,
        );
        accepted
    }

    /// Assigns every accepted applicant of an alternating cast group to an
    /// alternative cast, keeping same-cast sets together.
    fn balance_alternative_casts(
        &self,
        show: &mut Show,
        applicants: &[ApplicantId],
    ) -> Result<BalanceReport>;

    /// Numbers accepted applicants without a cast number.
    ///
    /// Numbers already in use are kept. Within each cast group applicants
    /// are numbered in order of the `order_by` mark (overall ability when
    /// `None`), and in alternating groups each alternative cast is numbered
    /// separately so members with the same number across casts form
    /// buddies. Every number is the smallest one still free.
    fn allocate_cast_numbers(
        &self,
        show: &mut Show,
        applicants: &[ApplicantId],
        order_by: Option<CriteriaId>,
        direction: SortDirection,
    ) {
        let engine = self.applicant_engine();
        let key = |a: ApplicantId| match order_by {
            Some(criteria) => show.applicant(a).mark_for(criteria) as f64,
            None => engine.overall_ability(show, a),
        };
        let ranked = rank(applicants, key, direction);
        let alternative_casts: Vec<AlternativeCastId> = show.alternative_cast_ids().collect();
        let mut numbered = 0;

        for group in show.cast_group_ids().collect::<Vec<_>>() {
            let members: Vec<ApplicantId> = applicants
                .iter()
                .copied()
                .filter(|&a| show.applicant(a).cast_group == Some(group))
                .collect();
            if members.is_empty() {
                continue;
            }
            // Numbers held by anyone outside this group.
            let outside: BTreeSet<u32> = applicants
                .iter()
                .map(|&a| show.applicant(a))
                .filter(|a| a.cast_group != Some(group))
                .filter_map(|a| a.cast_number)
                .collect();

            let lanes: Vec<Option<AlternativeCastId>> =
                if show.cast_group(group).alternate_casts && !alternative_casts.is_empty() {
                    alternative_casts
                        .iter()
                        .copied()
                        .map(Some)
                        .chain(std::iter::once(None))
                        .collect()
                } else {
                    vec![None]
                };
            let alternating = lanes.len() > 1;

            for lane in lanes {
                let in_lane =
                    |a: ApplicantId| !alternating || show.applicant(a).alternative_cast == lane;
                let mut used: BTreeSet<u32> = outside.clone();
                for &member in &members {
                    // Unassigned members clash with every lane.
                    let other = show.applicant(member);
                    if in_lane(member) || lane.is_none() || other.alternative_cast.is_none() {
                        used.extend(other.cast_number);
                    }
                }
                let queue: Vec<ApplicantId> = ranked
                    .iter()
                    .copied()
                    .filter(|a| members.contains(a))
                    .filter(|&a| in_lane(a) && show.applicant(a).cast_number.is_none())
                    .collect();
                let mut next = 1;
                for applicant in queue {
                    while used.contains(&next) {
                        next += 1;
                    }
                    used.insert(next);
                    show.applicant_mut(applicant).cast_number = Some(next);
                    numbered += 1;
                }
            }
        }

        info!(
            event = "cast_numbers_allocated",
            numbered = numbered,
            order_by = ?order_by.map(|c| show.criteria(c).name.clone()),
        );
    }

    /// Applies each tag to accepted applicants meeting its requirements,
    /// most suitable first, up to the tag's per-cast limit for each group.
    ///
    /// Returns the number of tags applied.
    fn apply_tags(&self, show: &mut Show, applicants: &[ApplicantId]) -> usize {
        let engine = self.applicant_engine();
        let alternative_casts: Vec<AlternativeCastId> = show.alternative_cast_ids().collect();
        let mut applied = 0;

        for tag in show.tag_ids().collect::<Vec<_>>() {
            for group in show.cast_group_ids().collect::<Vec<_>>() {
                let lanes: Vec<Option<AlternativeCastId>> =
                    if show.cast_group(group).alternate_casts && !alternative_casts.is_empty() {
                        alternative_casts.iter().copied().map(Some).collect()
                    } else {
                        vec![None]
                    };
                for lane in lanes {
                    let members: Vec<ApplicantId> = applicants
                        .iter()
                        .copied()
                        .filter(|&a| in_group(show, a, group, lane))
                        .collect();
                    let limit = show.tag(tag).count_for(group);
                    let already = members
                        .iter()
                        .filter(|&&a| show.applicant(a).tags.contains(&tag))
                        .count() as u32;
                    let room = limit.map(|limit| limit.saturating_sub(already) as usize);
                    if room == Some(0) {
                        continue;
                    }

                    let requirements = &show.tag(tag).requirements;
                    let evaluator = RequirementEvaluator::new(show);
                    let candidates: Vec<ApplicantId> = members
                        .iter()
                        .copied()
                        .filter(|&a| !show.applicant(a).tags.contains(&tag))
                        .filter(|&a| evaluator.satisfies_all(a, requirements))
                        .collect();
                    let ranked = rank(
                        &candidates,
                        |a| engine.tag_suitability(show, a, tag),
                        SortDirection::Descending,
                    );
                    let chosen: Vec<ApplicantId> = ranked
                        .into_iter()
                        .take(room.unwrap_or(usize::MAX))
                        .collect();
                    for applicant in chosen {
                        show.applicant_mut(applicant).tags.insert(tag);
                        applied += 1;
                    }
                }
            }
        }

        info!(event = "tags_applied", applied = applied);
        applied
    }

    fn engine_type_name(&self) -> &'static str;
}

/// Sorts applicants by a score, keeping input order among equals.
pub(crate) fn rank(
    applicants: &[ApplicantId],
    score: impl Fn(ApplicantId) -> f64,
    direction: SortDirection,
) -> Vec<ApplicantId> {
    let mut scored: Vec<(ApplicantId, f64)> = applicants.iter().map(|&a| (a, score(a))).collect();
    match direction {
        SortDirection::Descending => scored.sort_by(|a, b| b.1.total_cmp(&a.1)),
        SortDirection::Ascending => scored.sort_by(|a, b| a.1.total_cmp(&b.1)),
    }
    scored.into_iter().map(|(a, _)| a).collect()
}

fn in_group(
    show: &Show,
    applicant: ApplicantId,
    group: CastGroupId,
    alternative_cast: Option<AlternativeCastId>,
) -> bool {
    let a = show.applicant(applicant);
    a.cast_group == Some(group) && alternative_cast.map_or(true, |c| a.alternative_cast == Some(c))
}

/// Places accepted members of alternating groups who have no alternative
/// cast, best overall ability first, into the cast with the fewest members
/// of their group. Same-cast sets follow the first member placed (or any
/// member already placed). Returns the number of applicants placed.
pub(crate) fn even_fill(
    show: &mut Show,
    applicants: &[ApplicantId],
    engine: &dyn ApplicantEngine,
) -> usize {
    let casts: Vec<AlternativeCastId> = show.alternative_cast_ids().collect();
    if casts.is_empty() {
        return 0;
    }
    let slot = |cast: AlternativeCastId| casts.iter().position(|&c| c == cast);
    let mut placed = 0;

    for group in show.cast_group_ids().collect::<Vec<_>>() {
        if !show.cast_group(group).alternate_casts {
            continue;
        }
        let members: Vec<ApplicantId> = applicants
            .iter()
            .copied()
            .filter(|&a| show.applicant(a).cast_group == Some(group))
            .collect();
        let mut counts = vec![0usize; casts.len()];
        for &member in &members {
            if let Some(index) = show.applicant(member).alternative_cast.and_then(slot) {
                counts[index] += 1;
            }
        }
        let open: Vec<ApplicantId> = members
            .iter()
            .copied()
            .filter(|&a| show.applicant(a).alternative_cast.is_none())
            .collect();
        let ranked = rank(&open, |a| engine.overall_ability(show, a), SortDirection::Descending);

        for applicant in ranked {
            if show.applicant(applicant).alternative_cast.is_some() {
                continue;
            }
            let together: Vec<ApplicantId> = match show.same_cast_set_of(applicant) {
                Some(set) => show
                    .same_cast_set(set)
                    .applicants
                    .iter()
                    .copied()
                    .filter(|a| applicants.contains(a))
                    .filter(|&a| {
                        show.applicant(a)
                            .cast_group
                            .is_some_and(|g| show.cast_group(g).alternate_casts)
                    })
                    .collect(),
                None => vec![applicant],
            };
            let target = together
                .iter()
                .find_map(|&a| show.applicant(a).alternative_cast.and_then(slot))
                .unwrap_or_else(|| {
                    // First cast with the fewest members.
                    let fewest = counts.iter().copied().min().unwrap_or(0);
                    counts.iter().position(|&c| c == fewest).unwrap_or(0)
                });
            for a in together {
                if show.applicant(a).alternative_cast.is_some() {
                    continue;
                }
                show.applicant_mut(a).alternative_cast = Some(casts[target]);
                placed += 1;
                if show.applicant(a).cast_group == Some(group) {
                    counts[target] += 1;
                }
            }
        }
    }
    placed
}

#[cfg(test)]
mod tests;

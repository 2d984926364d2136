//! The order in which roles should be cast.
//!
//! Casting one role can use up applicants another role needs, so roles are
//! handed out in batches: segment by segment through the show, tier by tier
//! within a segment, the most constrained small roles first and large roles
//! grouped for balanced casting.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use castforge_config::{CastingOrderConfig, PriorityPolicy};
use castforge_core::{ApplicantId, NodeId, NodeKind, RoleId, Show};
use tracing::debug;

use crate::availability::is_available;
use crate::eligibility::is_eligible;

/// One casting decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastingBatch {
    /// A role cast on its own with `pick_cast`.
    Single(RoleId),
    /// Roles sharing a section, cast together with `balance_cast`.
    Balanced(Vec<RoleId>),
}

impl CastingBatch {
    pub fn roles(&self) -> &[RoleId] {
        match self {
            CastingBatch::Single(role) => std::slice::from_ref(role),
            CastingBatch::Balanced(roles) => roles,
        }
    }
}

/// Lazily advanced casting order.
///
/// Each call to [`next_batch`](Self::next_batch) looks at the show as it
/// is now, so casting the previous batch before asking for the next one
/// keeps the "most constrained first" ranking accurate.
///
/// # Example
///
/// ```
/// use castforge_config::CastingOrderConfig;
/// use castforge_core::{CastGroup, Role, Show};
/// use castforge_engine::{CastingBatch, CastingOrder};
///
/// let mut show = Show::new("Revue");
/// let group = show.add_cast_group(CastGroup::new("Cast"));
/// let item = show.add_item(show.root(), "Opening");
/// let lead = show.add_role(&[item], Role::new("Lead").with_count(group, 1));
///
/// let mut order = CastingOrder::new(&show, &[], &CastingOrderConfig::default());
/// assert_eq!(order.next_batch(&show), Some(CastingBatch::Single(lead)));
/// assert_eq!(order.next_batch(&show), None);
/// ```
#[derive(Debug, Clone)]
pub struct CastingOrder {
    config: CastingOrderConfig,
    applicants: Vec<ApplicantId>,
    segments: VecDeque<Vec<RoleId>>,
    tiers: VecDeque<Vec<RoleId>>,
    individual: Vec<RoleId>,
    grouped: Vec<RoleId>,
}

impl CastingOrder {
    /// Plans the order for every role of the show.
    ///
    /// `applicants` is the pool counted when ranking individual roles.
    pub fn new(show: &Show, applicants: &[ApplicantId], config: &CastingOrderConfig) -> Self {
        Self {
            config: config.clone(),
            applicants: applicants.to_vec(),
            segments: segments(show, config.segment_by_sections),
            tiers: VecDeque::new(),
            individual: Vec::new(),
            grouped: Vec::new(),
        }
    }

    /// Returns the next batch, or `None` once every role has been handed out.
    pub fn next_batch(&mut self, show: &Show) -> Option<CastingBatch> {
        loop {
            if !self.individual.is_empty() {
                let role = self.most_constrained(show);
                debug!(event = "casting_batch", kind = "single", role = %role);
                return Some(CastingBatch::Single(role));
            }
            if !self.grouped.is_empty() {
                let batch = self.next_group(show);
                debug!(
                    event = "casting_batch",
                    kind = "balanced",
                    roles = batch.roles().len()
                );
                return Some(batch);
            }
            if let Some(tier) = self.tiers.pop_front() {
                let threshold = self.config.group_roles_threshold;
                let (individual, grouped): (Vec<RoleId>, Vec<RoleId>) = tier
                    .into_iter()
                    .partition(|&role| show.total_required(role) < threshold);
                self.individual = individual;
                self.grouped = grouped;
                continue;
            }
            let segment = self.segments.pop_front()?;
            self.tiers = tiers(show, segment, &self.config);
        }
    }

    /// Number of roles not yet handed out.
    pub fn remaining_roles(&self) -> usize {
        self.individual.len()
            + self.grouped.len()
            + self.tiers.iter().map(Vec::len).sum::<usize>()
            + self.segments.iter().map(Vec::len).sum::<usize>()
    }

    /// Drains the order against the show as it is now.
    pub fn into_batches(mut self, show: &Show) -> Vec<CastingBatch> {
        std::iter::from_fn(|| self.next_batch(show)).collect()
    }

    /// Removes and returns the individual role with the fewest candidates.
    fn most_constrained(&mut self, show: &Show) -> RoleId {
        let mut best = 0;
        let mut best_count = usize::MAX;
        for (index, &role) in self.individual.iter().enumerate() {
            let count = self.candidate_count(show, role);
            if count < best_count {
                best = index;
                best_count = count;
            }
        }
        self.individual.remove(best)
    }

    fn candidate_count(&self, show: &Show, role: RoleId) -> usize {
        let r = show.role(role);
        self.applicants
            .iter()
            .filter(|&&applicant| {
                show.applicant(applicant)
                    .cast_group
                    .is_some_and(|group| r.count_for(group) > 0)
                    && !r.cast.contains(&applicant)
                    && is_eligible(show, applicant, role)
                    && is_available(show, applicant, role)
            })
            .count()
    }

    /// Takes the first large role and every other large role still sharing
    /// a section with all roles taken so far.
    fn next_group(&mut self, show: &Show) -> CastingBatch {
        let first = self.grouped.remove(0);
        let mut common = role_sections(show, first);
        let mut batch = vec![first];
        if !common.is_empty() {
            self.grouped.retain(|&role| {
                let shared: BTreeSet<NodeId> = common
                    .intersection(&role_sections(show, role))
                    .copied()
                    .collect();
                if shared.is_empty() {
                    true
                } else {
                    common = shared;
                    batch.push(role);
                    false
                }
            });
        }
        if batch.len() == 1 {
            CastingBatch::Single(first)
        } else {
            CastingBatch::Balanced(batch)
        }
    }
}

/// Every batch of the casting order for the show as it is now.
pub fn ideal_casting_order(
    show: &Show,
    applicants: &[ApplicantId],
    config: &CastingOrderConfig,
) -> Vec<CastingBatch> {
    CastingOrder::new(show, applicants, config).into_batches(show)
}

/// Splits the show's roles into segments in show order.
///
/// Each role belongs to the first segment it appears in. Roles placed in no
/// item form a trailing segment.
fn segments(show: &Show, segment_by_sections: bool) -> VecDeque<Vec<RoleId>> {
    let mut raw = Vec::new();
    if segment_by_sections {
        collect_segments(show, show.root(), &mut raw);
    } else {
        raw.push(roles_of_items(show, show.root()));
    }
    raw.push(
        show.role_ids()
            .filter(|&role| show.role(role).items.is_empty())
            .collect(),
    );

    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|segment| {
            segment
                .into_iter()
                .filter(|&role| seen.insert(role))
                .collect::<Vec<_>>()
        })
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn collect_segments(show: &Show, node: NodeId, out: &mut Vec<Vec<RoleId>>) {
    let n = show.node(node);
    match n.kind {
        NodeKind::Item => out.push(n.roles.clone()),
        NodeKind::Section { .. } if !show.allows_multiple_roles(node) => {
            out.push(roles_of_items(show, node));
        }
        _ => {
            for &child in &n.children {
                collect_segments(show, child, out);
            }
        }
    }
}

fn roles_of_items(show: &Show, node: NodeId) -> Vec<RoleId> {
    show.items_under(node)
        .into_iter()
        .flat_map(|item| show.node(item).roles.iter().copied())
        .collect()
}

/// Splits a segment into priority tiers, dropping empty ones.
fn tiers(show: &Show, roles: Vec<RoleId>, config: &CastingOrderConfig) -> VecDeque<Vec<RoleId>> {
    let tiers = match config.priority {
        PriorityPolicy::SingleTier => vec![roles],
        PriorityPolicy::Requirements => {
            let mut without = Vec::new();
            let mut with = Vec::new();
            let mut primary = Vec::new();
            for role in roles {
                let requirements = &show.role(role).requirements;
                if requirements.is_empty() {
                    without.push(role);
                } else if config.primary_requirement_tier
                    && requirements.iter().any(|&r| show.requirement(r).primary)
                {
                    primary.push(role);
                } else {
                    with.push(role);
                }
            }
            vec![without, with, primary]
        }
        PriorityPolicy::RequirementOrder => {
            let mut by_order: BTreeMap<i32, Vec<RoleId>> = BTreeMap::new();
            let mut without = Vec::new();
            for role in roles {
                match show
                    .role(role)
                    .requirements
                    .iter()
                    .map(|&r| show.requirement(r).order)
                    .min()
                {
                    Some(order) => by_order.entry(order).or_default().push(role),
                    None => without.push(role),
                }
            }
            by_order.into_values().chain(std::iter::once(without)).collect()
        }
    };
    tiers.into_iter().filter(|tier| !tier.is_empty()).collect()
}

/// Sections containing any item of the role.
fn role_sections(show: &Show, role: RoleId) -> BTreeSet<NodeId> {
    show.role(role)
        .items
        .iter()
        .flat_map(|&item| show.ancestors(item))
        .filter(|&node| matches!(show.node(node).kind, NodeKind::Section { .. }))
        .collect()
}

#[cfg(test)]
#[path = "casting_order_tests.rs"]
mod tests;

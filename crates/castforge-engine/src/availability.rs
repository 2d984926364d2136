//! Scheduling conflicts between an applicant's roles.

use castforge_core::{ApplicantId, NodeId, NodeKind, RoleId, Show};
use smallvec::SmallVec;

/// The applicant already holds a role in an item of a section that allows
/// one role per applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionConflict {
    /// Item of the applicant's existing role.
    pub already_in_item: NodeId,
    /// Item of the role being considered.
    pub conflicting_item: NodeId,
    /// The section both items belong to.
    pub section: NodeId,
}

/// Which side of the considered role's item the existing item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// The applicant's existing item directly precedes the role's item.
    Previous,
    /// The applicant's existing item directly follows the role's item.
    Next,
}

/// The applicant would appear in two consecutive items of a section (or
/// show) that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacentConflict {
    pub already_in_item: NodeId,
    pub conflicting_item: NodeId,
    pub adjacency: Adjacency,
    /// Section or show root whose consecutive-items rule is broken.
    pub section: NodeId,
}

/// Every reason an applicant cannot take a role given their other roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    /// Items of the role the applicant already performs in.
    pub already_in_items: Vec<NodeId>,
    pub already_in_non_multi_sections: Vec<SectionConflict>,
    pub in_adjacent_items: Vec<AdjacentConflict>,
}

impl Availability {
    /// Checks `role` against every other role `applicant` is cast in.
    pub fn of(show: &Show, applicant: ApplicantId, role: RoleId) -> Self {
        let role_items = &show.role(role).items;
        let mut committed: SmallVec<[NodeId; 8]> = SmallVec::new();
        for &other in &show.applicant(applicant).roles {
            if other == role {
                continue;
            }
            for &item in &show.role(other).items {
                if !committed.contains(&item) {
                    committed.push(item);
                }
            }
        }
        if committed.is_empty() || role_items.is_empty() {
            return Self::default();
        }

        let already_in_items = role_items
            .iter()
            .copied()
            .filter(|item| committed.contains(item))
            .collect();

        let mut already_in_non_multi_sections = Vec::new();
        for &existing in &committed {
            let existing_sections = non_multi_sections(show, existing);
            if existing_sections.is_empty() {
                continue;
            }
            for &item in role_items {
                for section in non_multi_sections(show, item) {
                    if existing_sections.contains(&section) {
                        already_in_non_multi_sections.push(SectionConflict {
                            already_in_item: existing,
                            conflicting_item: item,
                            section,
                        });
                    }
                }
            }
        }

        let mut in_adjacent_items = Vec::new();
        for (index, node) in show.nodes.iter().enumerate() {
            let section = NodeId(index);
            if matches!(node.kind, NodeKind::Item) || show.allows_consecutive_items(section) {
                continue;
            }
            for pair in show.items_under(section).windows(2) {
                let (first, second) = (pair[0], pair[1]);
                if committed.contains(&first) && role_items.contains(&second) {
                    in_adjacent_items.push(AdjacentConflict {
                        already_in_item: first,
                        conflicting_item: second,
                        adjacency: Adjacency::Previous,
                        section,
                    });
                }
                if committed.contains(&second) && role_items.contains(&first) {
                    in_adjacent_items.push(AdjacentConflict {
                        already_in_item: second,
                        conflicting_item: first,
                        adjacency: Adjacency::Next,
                        section,
                    });
                }
            }
        }

        Self {
            already_in_items,
            already_in_non_multi_sections,
            in_adjacent_items,
        }
    }

    pub fn is_available(&self) -> bool {
        self.already_in_items.is_empty()
            && self.already_in_non_multi_sections.is_empty()
            && self.in_adjacent_items.is_empty()
    }
}

/// Shortcut for `Availability::of(..).is_available()`.
pub fn is_available(show: &Show, applicant: ApplicantId, role: RoleId) -> bool {
    Availability::of(show, applicant, role).is_available()
}

/// Ancestor sections of a node that allow one role per applicant.
fn non_multi_sections(show: &Show, node: NodeId) -> SmallVec<[NodeId; 4]> {
    show.ancestors(node)
        .into_iter()
        .filter(|&ancestor| !show.allows_multiple_roles(ancestor))
        .collect()
}

#[cfg(test)]
#[path = "availability_tests.rs"]
mod tests;

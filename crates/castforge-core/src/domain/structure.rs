//! Show structure: the node tree of sections and items, and the roles in them.

use super::ids::{ApplicantId, CastGroupId, NodeId, RequirementId, RoleId, SectionTypeId};

/// Rules shared by every section of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionType {
    pub name: String,
    /// One applicant may hold several roles across the section.
    pub allow_multiple_roles: bool,
    /// Consecutive items within the section may share cast.
    pub allow_consecutive_items: bool,
}

impl SectionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allow_multiple_roles: true,
            allow_consecutive_items: true,
        }
    }

    pub fn with_multiple_roles(mut self, allow: bool) -> Self {
        self.allow_multiple_roles = allow;
        self
    }

    pub fn with_consecutive_items(mut self, allow: bool) -> Self {
        self.allow_consecutive_items = allow;
        self
    }
}

/// What a node of the show structure represents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// The single root of the show.
    ShowRoot { allow_consecutive_items: bool },
    /// A grouping of items and nested sections.
    Section { section_type: SectionTypeId },
    /// A performed item, which contains roles.
    Item,
}

/// A node of the show structure.
///
/// Children are kept in show order. Only items carry roles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    pub roles: Vec<RoleId>,
}

impl Node {
    pub fn is_item(&self) -> bool {
        matches!(self.kind, NodeKind::Item)
    }
}

/// Headcount a role needs from one cast group.
///
/// When the group alternates casts this is the count for each alternative
/// cast, so the total is multiplied by the number of alternative casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountByGroup {
    pub cast_group: CastGroupId,
    pub count: u32,
}

/// A part to be cast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Role {
    pub name: String,
    pub requirements: Vec<RequirementId>,
    pub count_by_group: Vec<CountByGroup>,
    /// Applicants cast in this role. Maintained by [`Show::cast`](super::Show::cast).
    pub cast: Vec<ApplicantId>,
    /// Items containing this role. Maintained by [`Show::add_role`](super::Show::add_role).
    pub items: Vec<NodeId>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_requirement(mut self, requirement: RequirementId) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Sets the per-cast headcount required from a cast group.
    pub fn with_count(mut self, cast_group: CastGroupId, count: u32) -> Self {
        match self
            .count_by_group
            .iter_mut()
            .find(|cbg| cbg.cast_group == cast_group)
        {
            Some(existing) => existing.count = count,
            None => self.count_by_group.push(CountByGroup { cast_group, count }),
        }
        self
    }

    /// Per-cast headcount for a cast group, 0 if the role does not use it.
    pub fn count_for(&self, cast_group: CastGroupId) -> u32 {
        self.count_by_group
            .iter()
            .find(|cbg| cbg.cast_group == cast_group)
            .map(|cbg| cbg.count)
            .unwrap_or(0)
    }
}

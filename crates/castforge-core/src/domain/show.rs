//! The show arena.
//!
//! [`Show`] owns every entity of one casting session in flat vectors.
//! Relationships that point both ways (role cast and applicant roles, item
//! roles and role items, node parent and children) are kept in sync by the
//! mutating methods here, so callers should not edit those lists directly.

use std::collections::BTreeSet;

use super::applicant::{Applicant, Criteria};
use super::cast::{AlternativeCast, CastGroup, SameCastSet, Tag};
use super::ids::{
    AlternativeCastId, ApplicantId, CastGroupId, CriteriaId, NodeId, RequirementId, RoleId,
    SameCastSetId, SectionTypeId, TagId,
};
use super::requirement::{Requirement, RequirementKind};
use super::structure::{Node, NodeKind, Role, SectionType};
use crate::error::{CastError, Result};

macro_rules! arena_access {
    (
        $field:ident,
        $id:ty,
        $ty:ty,
        $get:ident,
        $get_mut:ident,
        $add:ident,
        $ids:ident $(,)?
    ) => {
        #[doc = concat!("Returns the entity stored under `id` in `", stringify!($field), "`.")]
        #[inline]
        pub fn $get(&self, id: $id) -> &$ty {
            &self.$field[id.0]
        }

        #[inline]
        pub fn $get_mut(&mut self, id: $id) -> &mut $ty {
            &mut self.$field[id.0]
        }

        #[doc = concat!("Adds an entity to `", stringify!($field), "` and returns its id.")]
        pub fn $add(&mut self, value: $ty) -> $id {
            self.$field.push(value);
            <$id>::from_index(self.$field.len() - 1)
        }

        pub fn $ids(&self) -> impl Iterator<Item = $id> + '_ {
            (0..self.$field.len()).map(<$id>::from_index)
        }
    };
}

macro_rules! from_index {
    ($($id:ty),*) => {
        $(impl $id {
            #[inline]
            fn from_index(index: usize) -> Self {
                Self(index)
            }
        })*
    };
}

from_index!(
    ApplicantId,
    CriteriaId,
    TagId,
    RequirementId,
    CastGroupId,
    AlternativeCastId,
    SameCastSetId,
    SectionTypeId,
    RoleId
);

/// All entities of one casting session.
///
/// # Example
///
/// ```
/// use castforge_core::{Applicant, CastGroup, Role, SectionType, Show};
///
/// let mut show = Show::new("Spring Revue");
/// let ensemble = show.add_cast_group(CastGroup::new("Ensemble"));
/// let act = show.add_section_type(SectionType::new("Act"));
/// let act_one = show.add_section(show.root(), "Act 1", act);
/// let opening = show.add_item(act_one, "Opening");
/// let chorus = show.add_role(&[opening], Role::new("Chorus").with_count(ensemble, 4));
///
/// let applicant = show.add_applicant(Applicant::new("Ada", "Lovelace"));
/// show.applicant_mut(applicant).cast_group = Some(ensemble);
/// assert!(show.cast(chorus, applicant));
/// assert_eq!(show.applicant(applicant).roles, vec![chorus]);
/// assert_eq!(show.items_in_order(), vec![opening]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Show {
    pub name: String,
    pub criterias: Vec<Criteria>,
    pub tags: Vec<Tag>,
    pub requirements: Vec<Requirement>,
    pub cast_groups: Vec<CastGroup>,
    pub alternative_casts: Vec<AlternativeCast>,
    pub same_cast_sets: Vec<SameCastSet>,
    pub section_types: Vec<SectionType>,
    pub applicants: Vec<Applicant>,
    pub nodes: Vec<Node>,
    pub roles: Vec<Role>,
}

impl Show {
    /// Creates an empty show whose root allows consecutive items.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            nodes: vec![Node {
                name: name.clone(),
                parent: None,
                children: Vec::new(),
                kind: NodeKind::ShowRoot {
                    allow_consecutive_items: true,
                },
                roles: Vec::new(),
            }],
            name,
            criterias: Vec::new(),
            tags: Vec::new(),
            requirements: Vec::new(),
            cast_groups: Vec::new(),
            alternative_casts: Vec::new(),
            same_cast_sets: Vec::new(),
            section_types: Vec::new(),
            applicants: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// Sets whether consecutive top-level items may share cast.
    pub fn with_consecutive_items(mut self, allow: bool) -> Self {
        self.nodes[0].kind = NodeKind::ShowRoot {
            allow_consecutive_items: allow,
        };
        self
    }

    /// The root of the show structure.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    arena_access!(
        applicants,
        ApplicantId,
        Applicant,
        applicant,
        applicant_mut,
        add_applicant,
        applicant_ids,
    );
    arena_access!(
        criterias,
        CriteriaId,
        Criteria,
        criteria,
        criteria_mut,
        add_criteria,
        criteria_ids,
    );
    arena_access!(tags, TagId, Tag, tag, tag_mut, add_tag, tag_ids);
    arena_access!(
        requirements,
        RequirementId,
        Requirement,
        requirement,
        requirement_mut,
        add_requirement,
        requirement_ids,
    );
    arena_access!(
        cast_groups,
        CastGroupId,
        CastGroup,
        cast_group,
        cast_group_mut,
        add_cast_group,
        cast_group_ids,
    );
    arena_access!(
        alternative_casts,
        AlternativeCastId,
        AlternativeCast,
        alternative_cast,
        alternative_cast_mut,
        add_alternative_cast,
        alternative_cast_ids,
    );
    arena_access!(
        same_cast_sets,
        SameCastSetId,
        SameCastSet,
        same_cast_set,
        same_cast_set_mut,
        add_same_cast_set,
        same_cast_set_ids,
    );
    arena_access!(
        section_types,
        SectionTypeId,
        SectionType,
        section_type,
        section_type_mut,
        add_section_type,
        section_type_ids,
    );

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn role(&self, id: RoleId) -> &Role {
        &self.roles[id.0]
    }

    #[inline]
    pub fn role_mut(&mut self, id: RoleId) -> &mut Role {
        &mut self.roles[id.0]
    }

    pub fn role_ids(&self) -> impl Iterator<Item = RoleId> + '_ {
        (0..self.roles.len()).map(RoleId)
    }

    /// Adds a section under `parent`, after its existing children.
    pub fn add_section(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        section_type: SectionTypeId,
    ) -> NodeId {
        self.add_node(parent, name.into(), NodeKind::Section { section_type })
    }

    /// Adds an item under `parent`, after its existing children.
    pub fn add_item(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        self.add_node(parent, name.into(), NodeKind::Item)
    }

    fn add_node(&mut self, parent: NodeId, name: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            parent: Some(parent),
            children: Vec::new(),
            kind,
            roles: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Adds a role and places it in each of `items`.
    pub fn add_role(&mut self, items: &[NodeId], mut role: Role) -> RoleId {
        let id = RoleId(self.roles.len());
        role.items.clear();
        role.cast.clear();
        self.roles.push(role);
        for &item in items {
            self.add_role_to_item(id, item);
        }
        id
    }

    /// Places an existing role in another item.
    pub fn add_role_to_item(&mut self, role: RoleId, item: NodeId) {
        if !self.roles[role.0].items.contains(&item) {
            self.roles[role.0].items.push(item);
        }
        if !self.nodes[item.0].roles.contains(&role) {
            self.nodes[item.0].roles.push(role);
        }
    }

    /// Casts an applicant in a role, updating both sides.
    ///
    /// Returns false if the applicant was already cast in the role.
    pub fn cast(&mut self, role: RoleId, applicant: ApplicantId) -> bool {
        if self.roles[role.0].cast.contains(&applicant) {
            return false;
        }
        self.roles[role.0].cast.push(applicant);
        self.applicants[applicant.0].roles.push(role);
        true
    }

    /// Removes an applicant from a role, updating both sides.
    pub fn uncast(&mut self, role: RoleId, applicant: ApplicantId) -> bool {
        let cast = &mut self.roles[role.0].cast;
        let Some(position) = cast.iter().position(|&a| a == applicant) else {
            return false;
        };
        cast.remove(position);
        self.applicants[applicant.0].roles.retain(|&r| r != role);
        true
    }

    /// Removes every applicant from a role.
    pub fn clear_cast(&mut self, role: RoleId) {
        for applicant in std::mem::take(&mut self.roles[role.0].cast) {
            self.applicants[applicant.0].roles.retain(|&r| r != role);
        }
    }

    /// Number of alternative casts in the show.
    pub fn alternative_cast_count(&self) -> usize {
        self.alternative_casts.len()
    }

    /// Number of parallel casts a cast group is split into.
    pub fn casts_per_group(&self, cast_group: CastGroupId) -> u32 {
        if self.cast_groups[cast_group.0].alternate_casts {
            self.alternative_casts.len().max(1) as u32
        } else {
            1
        }
    }

    /// Total headcount a role needs from a cast group, across alternative casts.
    pub fn required_count(&self, role: RoleId, cast_group: CastGroupId) -> u32 {
        self.roles[role.0].count_for(cast_group) * self.casts_per_group(cast_group)
    }

    /// Total headcount a role needs across all cast groups.
    pub fn total_required(&self, role: RoleId) -> u32 {
        self.roles[role.0]
            .count_by_group
            .iter()
            .map(|cbg| cbg.count * self.casts_per_group(cbg.cast_group))
            .sum()
    }

    /// The same-cast set containing an applicant, if any.
    pub fn same_cast_set_of(&self, applicant: ApplicantId) -> Option<SameCastSetId> {
        self.same_cast_sets
            .iter()
            .position(|set| set.contains(applicant))
            .map(SameCastSetId)
    }

    /// Items of the whole show in show order.
    pub fn items_in_order(&self) -> Vec<NodeId> {
        self.items_under(self.root())
    }

    /// Items under a node in show order, including the node if it is an item.
    pub fn items_under(&self, node: NodeId) -> Vec<NodeId> {
        let mut items = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let n = &self.nodes[current.0];
            if n.is_item() {
                items.push(current);
            }
            stack.extend(n.children.iter().rev().copied());
        }
        items
    }

    /// Ancestors of a node from its parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.nodes[node.0].parent;
        while let Some(id) = current {
            ancestors.push(id);
            current = self.nodes[id.0].parent;
        }
        ancestors
    }

    /// Whether one applicant may hold several roles under this node.
    ///
    /// Only sections can forbid it.
    pub fn allows_multiple_roles(&self, node: NodeId) -> bool {
        match self.nodes[node.0].kind {
            NodeKind::Section { section_type } => {
                self.section_types[section_type.0].allow_multiple_roles
            }
            _ => true,
        }
    }

    /// Whether consecutive items under this node may share cast.
    ///
    /// Items have no such rule and always return true.
    pub fn allows_consecutive_items(&self, node: NodeId) -> bool {
        match self.nodes[node.0].kind {
            NodeKind::ShowRoot {
                allow_consecutive_items,
            } => allow_consecutive_items,
            NodeKind::Section { section_type } => {
                self.section_types[section_type.0].allow_consecutive_items
            }
            NodeKind::Item => true,
        }
    }

    /// Checks ids, structure and requirement graph for consistency.
    ///
    /// Callers should validate a show once after loading it: the engines
    /// assume every id resolves and the requirement graph is acyclic.
    pub fn validate(&self) -> Result<()> {
        self.validate_structure()?;
        self.validate_requirements()?;
        self.validate_applicants()?;
        Ok(())
    }

    fn validate_structure(&self) -> Result<()> {
        let roots = self
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::ShowRoot { .. }))
            .count();
        if roots != 1
            || !matches!(
                self.nodes.first().map(|n| &n.kind),
                Some(NodeKind::ShowRoot { .. })
            )
        {
            return Err(CastError::DomainModel(format!(
                "show must have exactly one root at node#0, found {roots}"
            )));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId(index);
            if let NodeKind::Section { section_type } = node.kind {
                if section_type.0 >= self.section_types.len() {
                    return Err(dangling(id, section_type));
                }
            }
            for &child in &node.children {
                if child.0 >= self.nodes.len() || self.nodes[child.0].parent != Some(id) {
                    return Err(CastError::DomainModel(format!(
                        "{child} is listed under {id} but does not name it as parent"
                    )));
                }
            }

            // Ancestor chain must reach the root without revisiting a node.
            let mut steps = 0;
            let mut current = node.parent;
            let mut last = id;
            while let Some(parent) = current {
                if parent.0 >= self.nodes.len() {
                    return Err(dangling(id, parent));
                }
                steps += 1;
                if steps > self.nodes.len() {
                    return Err(CastError::DomainModel(format!(
                        "ancestor chain of {id} is cyclic"
                    )));
                }
                last = parent;
                current = self.nodes[parent.0].parent;
            }
            if last != self.root() {
                return Err(CastError::DomainModel(format!(
                    "{id} does not descend from the show root"
                )));
            }

            for &role in &node.roles {
                if role.0 >= self.roles.len() || !self.roles[role.0].items.contains(&id) {
                    return Err(CastError::DomainModel(format!(
                        "{id} lists {role} which does not list it back"
                    )));
                }
            }
        }

        for (index, role) in self.roles.iter().enumerate() {
            let id = RoleId(index);
            for &item in &role.items {
                if item.0 >= self.nodes.len() || !self.nodes[item.0].is_item() {
                    return Err(CastError::DomainModel(format!(
                        "{id} is placed in {item}, which is not an item"
                    )));
                }
            }
            for &requirement in &role.requirements {
                if requirement.0 >= self.requirements.len() {
                    return Err(dangling(id, requirement));
                }
            }
            for cbg in &role.count_by_group {
                if cbg.cast_group.0 >= self.cast_groups.len() {
                    return Err(dangling(id, cbg.cast_group));
                }
            }
            for &applicant in &role.cast {
                if applicant.0 >= self.applicants.len()
                    || !self.applicants[applicant.0].roles.contains(&id)
                {
                    return Err(CastError::DomainModel(format!(
                        "{id} casts {applicant} which does not list it back"
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_requirements(&self) -> Result<()> {
        for (index, requirement) in self.requirements.iter().enumerate() {
            let id = RequirementId(index);
            match &requirement.kind {
                RequirementKind::AbilityRange { criteria, .. }
                | RequirementKind::AbilityExact { criteria, .. } => {
                    if criteria.0 >= self.criterias.len() {
                        return Err(dangling(id, *criteria));
                    }
                }
                RequirementKind::Tag { tag } => {
                    if tag.0 >= self.tags.len() {
                        return Err(dangling(id, *tag));
                    }
                }
                _ => {}
            }
            for &sub in requirement.sub_requirements() {
                if sub.0 >= self.requirements.len() {
                    return Err(dangling(id, sub));
                }
            }
        }

        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.requirements.len()];
        for start in 0..self.requirements.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // Iterative depth-first search; (node, next child index).
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::InProgress;
            while let Some((current, next)) = stack.pop() {
                let subs = self.requirements[current].sub_requirements();
                if next < subs.len() {
                    stack.push((current, next + 1));
                    let child = subs[next].0;
                    match marks[child] {
                        Mark::InProgress => {
                            return Err(CastError::DomainModel(format!(
                                "requirement '{}' is part of a cycle",
                                self.requirements[child].name
                            )));
                        }
                        Mark::Unvisited => {
                            marks[child] = Mark::InProgress;
                            stack.push((child, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[current] = Mark::Done;
                }
            }
        }
        Ok(())
    }

    fn validate_applicants(&self) -> Result<()> {
        for (index, applicant) in self.applicants.iter().enumerate() {
            let id = ApplicantId(index);
            if let Some(group) = applicant.cast_group {
                if group.0 >= self.cast_groups.len() {
                    return Err(dangling(id, group));
                }
            }
            if let Some(alternative_cast) = applicant.alternative_cast {
                if alternative_cast.0 >= self.alternative_casts.len() {
                    return Err(dangling(id, alternative_cast));
                }
            }
            if let Some(&criteria) = applicant
                .abilities
                .keys()
                .find(|c| c.0 >= self.criterias.len())
            {
                return Err(dangling(id, criteria));
            }
            if let Some(&tag) = applicant.tags.iter().find(|t| t.0 >= self.tags.len()) {
                return Err(dangling(id, tag));
            }
        }
        let mut seen = BTreeSet::new();
        for set in &self.same_cast_sets {
            for &applicant in &set.applicants {
                if applicant.0 >= self.applicants.len() {
                    return Err(CastError::DomainModel(format!(
                        "same cast set '{}' references missing {applicant}",
                        set.name
                    )));
                }
                if !seen.insert(applicant) {
                    return Err(CastError::DomainModel(format!(
                        "{applicant} belongs to more than one same cast set"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn dangling(owner: impl std::fmt::Display, target: impl std::fmt::Display) -> CastError {
    CastError::DomainModel(format!("{owner} references missing {target}"))
}

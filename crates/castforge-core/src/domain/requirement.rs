//! Requirement trees.
//!
//! A requirement is either a leaf test against one applicant attribute or a
//! combinator over other requirements. Combinators reference their children
//! by [`RequirementId`], so one requirement can be shared by several roles.

use super::applicant::Gender;
use super::ids::{CriteriaId, RequirementId, TagId};

/// A named requirement with its tiering metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirement {
    pub name: String,
    /// Lower orders are cast earlier when tiering by requirement order.
    pub order: i32,
    /// Primary requirements form their own casting tier.
    pub primary: bool,
    pub kind: RequirementKind,
}

impl Requirement {
    pub fn new(name: impl Into<String>, kind: RequirementKind) -> Self {
        Self {
            name: name.into(),
            order: 0,
            primary: false,
            kind,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Ids of the requirements this one is composed of.
    pub fn sub_requirements(&self) -> &[RequirementId] {
        match &self.kind {
            RequirementKind::And {
                sub_requirements, ..
            }
            | RequirementKind::Or {
                sub_requirements, ..
            }
            | RequirementKind::Xor { sub_requirements } => sub_requirements,
            RequirementKind::Not { sub_requirement } => std::slice::from_ref(sub_requirement),
            _ => &[],
        }
    }

    /// Returns the criteria tested by this requirement, if it is an ability leaf.
    pub fn criteria(&self) -> Option<CriteriaId> {
        match self.kind {
            RequirementKind::AbilityRange { criteria, .. }
            | RequirementKind::AbilityExact { criteria, .. } => Some(criteria),
            _ => None,
        }
    }
}

/// The test performed by a requirement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequirementKind {
    /// Mark for a criteria lies within `[minimum, maximum]`.
    AbilityRange {
        criteria: CriteriaId,
        minimum: Option<u32>,
        maximum: Option<u32>,
        /// Scale suitability by mark rather than reporting 1.0 when satisfied.
        scale_suitability: bool,
    },
    /// Mark for a criteria equals a value exactly.
    AbilityExact {
        criteria: CriteriaId,
        required_value: u32,
    },
    /// Age lies within `[minimum, maximum]`.
    Age {
        minimum: Option<u32>,
        maximum: Option<u32>,
    },
    Gender {
        required_value: Gender,
    },
    /// Applicant carries the tag.
    Tag {
        tag: TagId,
    },
    And {
        sub_requirements: Vec<RequirementId>,
        average_suitability: bool,
    },
    Or {
        sub_requirements: Vec<RequirementId>,
        average_suitability: bool,
    },
    /// Exactly one sub-requirement is satisfied.
    Xor {
        sub_requirements: Vec<RequirementId>,
    },
    Not {
        sub_requirement: RequirementId,
    },
}

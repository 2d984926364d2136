//! Cast groups, alternative casts, same-cast sets and tags.

use std::collections::BTreeSet;

use super::ids::{ApplicantId, RequirementId};
use super::structure::CountByGroup;

/// A category of cast member, such as principals or ensemble.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastGroup {
    pub name: String,
    /// Applicants required per alternative cast; `None` means unlimited.
    pub required_count: Option<u32>,
    /// Members are split across the alternative casts.
    pub alternate_casts: bool,
    /// Minimum requirements to enter the group.
    pub requirements: Vec<RequirementId>,
}

impl CastGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_count: None,
            alternate_casts: false,
            requirements: Vec::new(),
        }
    }

    pub fn with_required_count(mut self, count: u32) -> Self {
        self.required_count = Some(count);
        self
    }

    pub fn alternating(mut self) -> Self {
        self.alternate_casts = true;
        self
    }

    pub fn with_requirement(mut self, requirement: RequirementId) -> Self {
        self.requirements.push(requirement);
        self
    }
}

/// One of the parallel casts performing on different occasions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlternativeCast {
    pub name: String,
    pub initial: char,
}

impl AlternativeCast {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let initial = name.chars().next().unwrap_or('?');
        Self { name, initial }
    }
}

/// Applicants who must always land in the same alternative cast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SameCastSet {
    pub name: String,
    pub applicants: BTreeSet<ApplicantId>,
}

impl SameCastSet {
    pub fn new(applicants: impl IntoIterator<Item = ApplicantId>) -> Self {
        Self {
            name: String::new(),
            applicants: applicants.into_iter().collect(),
        }
    }

    pub fn contains(&self, applicant: ApplicantId) -> bool {
        self.applicants.contains(&applicant)
    }
}

/// A label applied to accepted applicants, limited per cast group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub name: String,
    pub requirements: Vec<RequirementId>,
    /// Per-cast limit for each cast group; groups not listed are unlimited.
    pub count_by_group: Vec<CountByGroup>,
}

impl Tag {
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

    pub fn with_count(mut self, cast_group: super::ids::CastGroupId, count: u32) -> Self {
        self.count_by_group.push(CountByGroup { cast_group, count });
        self
    }

    /// Per-cast limit for a cast group, `None` when unlimited.
    pub fn count_for(&self, cast_group: super::ids::CastGroupId) -> Option<u32> {
        self.count_by_group
            .iter()
            .find(|cbg| cbg.cast_group == cast_group)
            .map(|cbg| cbg.count)
    }
}

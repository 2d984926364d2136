//! Applicants and the criteria they are marked against.

use std::collections::{BTreeMap, BTreeSet};

use super::ids::{AlternativeCastId, CastGroupId, CriteriaId, RoleId, TagId};

/// Gender recorded against an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    Male,
    Female,
}

/// A skill or attribute applicants are marked on during auditions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criteria {
    pub name: String,
    /// Highest mark an applicant can receive.
    pub max_mark: u32,
    /// Primary criteria are balanced between alternative casts.
    pub primary: bool,
    /// Weight of this criteria in the overall ability.
    pub weight: f64,
}

impl Criteria {
    /// Creates a criteria with unit weight.
    pub fn new(name: impl Into<String>, max_mark: u32) -> Self {
        Self {
            name: name.into(),
            max_mark,
            primary: false,
            weight: 1.0,
        }
    }

    /// Marks this criteria as primary.
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Sets the weight used for overall ability.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A person who auditioned for the show.
///
/// An applicant without a cast group is rejected: it carries no cast
/// number, no tags and no alternative cast.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    /// Age at the time of the show, if known.
    pub age: Option<u32>,
    pub abilities: BTreeMap<CriteriaId, u32>,
    pub cast_group: Option<CastGroupId>,
    pub alternative_cast: Option<AlternativeCastId>,
    pub cast_number: Option<u32>,
    pub tags: BTreeSet<TagId>,
    /// Roles this applicant is cast in. Maintained by [`Show::cast`](super::Show::cast).
    pub roles: Vec<RoleId>,
}

impl Applicant {
    /// Creates an applicant with no marks.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    /// Records a mark for a criteria.
    pub fn with_mark(mut self, criteria: CriteriaId, mark: u32) -> Self {
        self.abilities.insert(criteria, mark);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Returns the mark for a criteria, or 0 if the applicant was not marked.
    pub fn mark_for(&self, criteria: CriteriaId) -> u32 {
        self.abilities.get(&criteria).copied().unwrap_or(0)
    }

    /// Returns true if the applicant has been accepted into a cast group.
    pub fn is_accepted(&self) -> bool {
        self.cast_group.is_some()
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

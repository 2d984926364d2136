//! Arena ids for show entities.
//!
//! Every entity of a [`Show`](super::Show) lives in a flat `Vec` and is
//! referenced by a typed index. Relationships are stored as id lists, so
//! the model has no reference cycles.

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub usize);

        impl $name {
            /// Returns the arena index.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

arena_id!(
    /// Identifies an [`Applicant`](super::Applicant).
    ApplicantId,
    "applicant"
);
arena_id!(
    /// Identifies a [`Criteria`](super::Criteria).
    CriteriaId,
    "criteria"
);
arena_id!(
    /// Identifies a [`Tag`](super::Tag).
    TagId,
    "tag"
);
arena_id!(
    /// Identifies a [`Requirement`](super::Requirement).
    RequirementId,
    "requirement"
);
arena_id!(
    /// Identifies a [`CastGroup`](super::CastGroup).
    CastGroupId,
    "cast_group"
);
arena_id!(
    /// Identifies an [`AlternativeCast`](super::AlternativeCast).
    AlternativeCastId,
    "alternative_cast"
);
arena_id!(
    /// Identifies a [`SameCastSet`](super::SameCastSet).
    SameCastSetId,
    "same_cast_set"
);
arena_id!(
    /// Identifies a [`SectionType`](super::SectionType).
    SectionTypeId,
    "section_type"
);
arena_id!(
    /// Identifies a [`Node`](super::Node) of the show structure.
    NodeId,
    "node"
);
arena_id!(
    /// Identifies a [`Role`](super::Role).
    RoleId,
    "role"
);

//! Show model for casting
//!
//! Entities are stored in flat arenas inside [`Show`] and refer to each
//! other through typed ids:
//! - `Applicant`, `Criteria`, `Tag`: the people and what they are marked on
//! - `Requirement`: leaf tests and combinators forming requirement trees
//! - `Node`, `SectionType`, `Role`: the show structure and its parts
//! - `CastGroup`, `AlternativeCast`, `SameCastSet`: how the cast is organised

mod applicant;
mod cast;
mod ids;
mod requirement;
mod show;
mod structure;

pub use applicant::{Applicant, Criteria, Gender};
pub use cast::{AlternativeCast, CastGroup, SameCastSet, Tag};
pub use ids::{
    AlternativeCastId, ApplicantId, CastGroupId, CriteriaId, NodeId, RequirementId, RoleId,
    SameCastSetId, SectionTypeId, TagId,
};
pub use requirement::{Requirement, RequirementKind};
pub use show::Show;
pub use structure::{CountByGroup, Node, NodeKind, Role, SectionType};

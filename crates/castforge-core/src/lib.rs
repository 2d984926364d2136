//! CastForge Core - Show model and error types for casting
//!
//! This crate provides the fundamental data model for CastForge:
//! - Arena ids for every entity of a show
//! - Applicants, criteria and tags
//! - Requirement trees used for eligibility and suitability
//! - The show structure (root, sections, items) and its roles
//! - Cast groups, alternative casts and same-cast sets

pub mod domain;
pub mod error;

pub use domain::{
    AlternativeCast, AlternativeCastId, Applicant, ApplicantId, CastGroup, CastGroupId,
    CountByGroup, Criteria, CriteriaId, Gender, Node, NodeId, NodeKind, Requirement,
    RequirementId, RequirementKind, Role, RoleId, SameCastSet, SameCastSetId, SectionType,
    SectionTypeId, Show, Tag, TagId,
};
pub use error::{CastError, Result};

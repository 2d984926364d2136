//! CastForge - Casting allocation and alternative cast balancing in Rust
//!
//! Build a [`Show`], then let a [`Caster`] select the cast and fill every
//! role.
//!
//! # Example
//!
//! ```rust
//! use castforge::prelude::*;
//!
//! let mut show = Show::new("Spring Revue");
//! let singing = show.add_criteria(Criteria::new("Singing", 100).primary());
//! let ensemble = show.add_cast_group(CastGroup::new("Ensemble").with_required_count(2));
//! let opening = show.add_item(show.root(), "Opening");
//! let chorus = show.add_role(&[opening], Role::new("Chorus").with_count(ensemble, 2));
//! for (name, mark) in [("Ada", 90), ("Ben", 70), ("Cal", 50)] {
//!     show.add_applicant(Applicant::new(name, "").with_mark(singing, mark));
//! }
//!
//! let caster = Caster::new();
//! let selection = caster.select_cast(&mut show).unwrap();
//! assert_eq!(selection.accepted, 2);
//!
//! let casting = caster.cast_all_roles(&mut show).unwrap();
//! assert_eq!(casting.placements, 2);
//! assert_eq!(show.role(chorus).cast.len(), 2);
//! ```

pub use castforge_config::{
    AllocationEngineType, ApplicantEngineType, BalanceSolverType, BalancingConfig,
    CastNumberConfig, CastingConfig, CastingOrderConfig, ConfigError, PriorityPolicy,
    SelectionEngineType, SortDirection,
};
pub use castforge_core::{
    AlternativeCast, AlternativeCastId, Applicant, ApplicantId, CastError, CastGroup,
    CastGroupId, Criteria, CriteriaId, Gender, NodeId, Requirement, RequirementId,
    RequirementKind, Result, Role, RoleId, SameCastSet, SameCastSetId, SectionType,
    SectionTypeId, Show, Tag, TagId,
};
pub use castforge_engine::{
    AllocationEngine, ApplicantEngine, Availability, BalanceReport, CastingBatch, CastingOrder,
    ChunkAttempt, Eligibility, EngineBuilder, RequirementEvaluator, SelectionEngine,
};

/// The boolean satisfiability toolkit used for balancing.
pub use castforge_sat as sat;

mod caster;
pub use caster::{Caster, CastingSummary, SelectionSummary};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        Applicant, CastGroup, Caster, CastingConfig, Criteria, Gender, Requirement,
        RequirementKind, Role, SectionType, Show, Tag,
    };
    pub use super::{AllocationEngine, SelectionEngine};
    pub use super::{AlternativeCast, SameCastSet};
}

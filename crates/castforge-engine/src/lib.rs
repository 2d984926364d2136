//! CastForge Engine - Casting engines built on the show model
//!
//! This crate provides:
//! - `RequirementEvaluator`: satisfaction and suitability of requirement trees
//! - `Eligibility` / `Availability`: why an applicant may not take a role
//! - `ApplicantEngine`: overall ability and role suitability scoring
//! - `CastingOrder`: the batches in which roles should be cast
//! - `AllocationEngine`: greedy picking and balanced casting of roles
//! - `SelectionEngine`: cast groups, alternative casts, cast numbers and tags
//! - `EngineBuilder`: wiring from `CastingConfig` to boxed engines

pub mod allocation;
pub mod applicant_engine;
pub mod availability;
pub mod builder;
pub mod casting_order;
pub mod eligibility;
pub mod requirement;
pub mod selection;
pub mod stats;

pub use allocation::{AllocationEngine, HeuristicAllocationEngine};
pub use applicant_engine::{ApplicantEngine, WeightedSumEngine};
pub use availability::{AdjacentConflict, Adjacency, Availability, SectionConflict};
pub use builder::EngineBuilder;
pub use casting_order::{ideal_casting_order, CastingBatch, CastingOrder};
pub use eligibility::Eligibility;
pub use requirement::RequirementEvaluator;
pub use selection::{ChunkedPairsSatEngine, HeuristicSelectionEngine, SelectionEngine};
pub use stats::{BalanceReport, ChunkAttempt};

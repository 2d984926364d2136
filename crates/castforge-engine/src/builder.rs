//! Builder module for constructing engines from configuration
//!
//! This module provides the wiring between configuration types and the
//! engine implementations.

use castforge_config::{CastingConfig, SelectionEngineType};

use crate::allocation::{self, AllocationEngine};
use crate::applicant_engine::{self, ApplicantEngine};
use crate::selection::{ChunkedPairsSatEngine, HeuristicSelectionEngine, SelectionEngine};

/// Builder for constructing engines from configuration.
pub struct EngineBuilder;

impl EngineBuilder {
    /// Builds the configured applicant engine.
    pub fn applicant_engine(config: &CastingConfig) -> Box<dyn ApplicantEngine> {
        applicant_engine::applicant_engine(config.applicant_engine)
    }

    /// Builds the configured allocation engine with its own applicant engine.
    pub fn allocation_engine(config: &CastingConfig) -> Box<dyn AllocationEngine> {
        allocation::allocation_engine(config, Self::applicant_engine(config))
    }

    /// Builds the configured selection engine with its own applicant engine.
    pub fn selection_engine(config: &CastingConfig) -> Box<dyn SelectionEngine> {
        let scoring = Self::applicant_engine(config);
        match config.selection_engine {
            SelectionEngineType::Heuristic => Box::new(HeuristicSelectionEngine::new(scoring)),
            SelectionEngineType::ChunkedPairsSat => Box::new(ChunkedPairsSatEngine::new(
                scoring,
                config.balancing.clone(),
            )),
        }
    }
}

//! Configuration system for CastForge.
//!
//! Load casting configuration from TOML or YAML files to choose engines,
//! the casting order policy and the alternative cast balancer without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use castforge_config::{BalanceSolverType, CastingConfig, PriorityPolicy, SelectionEngineType};
//!
//! let config = CastingConfig::from_toml_str(r#"
//!     selection_engine = "chunked_pairs_sat"
//!
//!     [casting_order]
//!     priority = "requirements"
//!     group_roles_threshold = 6
//!
//!     [balancing]
//!     solver = "dpll_theory"
//!     max_chunk_size = 8
//! "#).unwrap();
//!
//! assert_eq!(config.selection_engine, SelectionEngineType::ChunkedPairsSat);
//! assert_eq!(config.casting_order.priority, PriorityPolicy::Requirements);
//! assert_eq!(config.casting_order.group_roles_threshold, 6);
//! assert_eq!(config.balancing.solver, BalanceSolverType::DpllTheory);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use castforge_config::CastingConfig;
//!
//! let config = CastingConfig::load("casting.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main casting configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CastingConfig {
    /// Scoring implementation for overall ability and suitability.
    #[serde(default)]
    pub applicant_engine: ApplicantEngineType,

    /// Implementation picking cast for roles.
    #[serde(default)]
    pub allocation_engine: AllocationEngineType,

    /// Implementation selecting cast groups, alternative casts, numbers and tags.
    #[serde(default)]
    pub selection_engine: SelectionEngineType,

    /// Casting order planner configuration.
    #[serde(default)]
    pub casting_order: CastingOrderConfig,

    /// Alternative cast balancing configuration.
    #[serde(default)]
    pub balancing: BalancingConfig,

    /// Cast number allocation configuration.
    #[serde(default)]
    pub cast_numbers: CastNumberConfig,
}

impl CastingConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.balancing.validate()?;
        if self.casting_order.group_roles_threshold == 0 {
            return Err(ConfigError::Invalid(
                "group_roles_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the selection engine.
    pub fn with_selection_engine(mut self, engine: SelectionEngineType) -> Self {
        self.selection_engine = engine;
        self
    }

    /// Sets the casting order priority policy.
    pub fn with_priority(mut self, priority: PriorityPolicy) -> Self {
        self.casting_order.priority = priority;
        self
    }

    /// Sets the headcount at which roles are balance-cast together.
    pub fn with_group_roles_threshold(mut self, threshold: u32) -> Self {
        self.casting_order.group_roles_threshold = threshold;
        self
    }

    /// Sets the solver used by the chunked balancer.
    pub fn with_balance_solver(mut self, solver: BalanceSolverType) -> Self {
        self.balancing.solver = solver;
        self
    }

    /// Sets the criteria cast numbers are ordered by.
    pub fn with_cast_number_order(
        mut self,
        order_by: Option<String>,
        direction: SortDirection,
    ) -> Self {
        self.cast_numbers = CastNumberConfig {
            order_by,
            direction,
        };
        self
    }
}

/// Applicant scoring implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantEngineType {
    /// Weighted sum of criteria marks.
    #[default]
    WeightedSum,
}

/// Role allocation implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationEngineType {
    /// Greedy suitability-ranked allocation.
    #[default]
    Heuristic,
}

/// Cast selection implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionEngineType {
    /// Deterministic even fill of alternative casts.
    Heuristic,

    /// SAT-based balancing of two alternative casts in growing chunks.
    #[default]
    ChunkedPairsSat,
}

/// How roles within a segment are split into priority tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityPolicy {
    /// Every role in one tier.
    SingleTier,

    /// Roles without requirements, then roles with requirements, then
    /// roles with primary requirements when enabled.
    Requirements,

    /// One tier per distinct minimum requirement order, roles without
    /// requirements last.
    #[default]
    RequirementOrder,
}

/// Casting order planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct CastingOrderConfig {
    /// Split the show at items and non-multi sections.
    pub segment_by_sections: bool,

    /// Tiering policy within a segment.
    pub priority: PriorityPolicy,

    /// Give roles with primary requirements their own tier, after the other
    /// requirement-bearing roles.
    pub primary_requirement_tier: bool,

    /// Roles needing at least this many applicants are balance-cast together.
    pub group_roles_threshold: u32,
}

impl Default for CastingOrderConfig {
    fn default() -> Self {
        Self {
            segment_by_sections: true,
            priority: PriorityPolicy::default(),
            primary_requirement_tier: true,
            group_roles_threshold: 4,
        }
    }
}

/// Solver used to balance alternative casts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSolverType {
    /// DPLL with unit propagation and pure-literal elimination.
    #[default]
    Dpll,

    /// DPLL rejecting branches that can no longer split each group evenly.
    DpllTheory,

    /// Branch and bound minimising the overall ability gap between casts.
    BranchAndBound,
}

/// Alternative cast balancing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct BalancingConfig {
    pub solver: BalanceSolverType,

    /// First chunk size tried.
    pub initial_chunk_size: usize,

    /// Growth of the chunk size after an unsolvable attempt.
    pub chunk_increment: usize,

    /// Largest chunk size tried; defaults to the largest cast group.
    pub max_chunk_size: Option<usize>,
}

impl BalancingConfig {
    /// Checks the chunk schedule: sizes must be positive and even, and
    /// the schedule must grow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_chunk_size == 0 || self.initial_chunk_size % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "initial_chunk_size must be a positive even number, got {}",
                self.initial_chunk_size
            )));
        }
        if self.chunk_increment == 0 || self.chunk_increment % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk_increment must be a positive even number, got {}",
                self.chunk_increment
            )));
        }
        if let Some(max) = self.max_chunk_size {
            if max < self.initial_chunk_size {
                return Err(ConfigError::Invalid(format!(
                    "max_chunk_size {max} is below initial_chunk_size {}",
                    self.initial_chunk_size
                )));
            }
        }
        Ok(())
    }
}

impl Default for BalancingConfig {
    fn default() -> Self {
        Self {
            solver: BalanceSolverType::default(),
            initial_chunk_size: 2,
            chunk_increment: 2,
            max_chunk_size: None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Cast number allocation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct CastNumberConfig {
    /// Criteria name to order by; overall ability when absent.
    pub order_by: Option<String>,

    pub direction: SortDirection,
}

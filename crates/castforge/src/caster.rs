//! Session driver that hides the engine wiring.

use std::time::Instant;

use castforge_config::CastingConfig;
use castforge_core::{ApplicantId, CastError, CriteriaId, Result, RoleId, Show};
use castforge_engine::{
    AllocationEngine, BalanceReport, CastingBatch, EngineBuilder, SelectionEngine,
};
use tracing::{debug, info};

/// Outcome of [`Caster::select_cast`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Applicants newly accepted into a cast group.
    pub accepted: usize,
    /// Applicants left without a cast group.
    pub rejected: usize,
    /// Alternative cast balancing, when any cast group alternates.
    pub balance: Option<BalanceReport>,
    pub tags_applied: usize,
}

/// Outcome of [`Caster::cast_all_roles`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastingSummary {
    /// Batches handed out by the casting order.
    pub batches: usize,
    /// Batches cast together with `balance_cast`.
    pub balanced_batches: usize,
    /// Applicants placed in roles by this run.
    pub placements: usize,
    /// Roles still short of their required headcount.
    pub unfilled: Vec<RoleId>,
}

/// Runs a casting session with the engines named by a [`CastingConfig`].
///
/// # Example
///
/// ```
/// use castforge::{Caster, CastingConfig, SelectionEngineType};
///
/// let config = CastingConfig::default().with_selection_engine(SelectionEngineType::Heuristic);
/// let caster = Caster::from_config(config).unwrap();
/// assert_eq!(caster.selection_engine().engine_type_name(), "Heuristic");
/// ```
#[derive(Debug)]
pub struct Caster {
    config: CastingConfig,
    allocation: Box<dyn AllocationEngine>,
    selection: Box<dyn SelectionEngine>,
}

impl Caster {
    /// Creates a caster with the default configuration.
    pub fn new() -> Self {
        Self::build(CastingConfig::default())
    }

    /// Creates a caster from a configuration, validating it first.
    pub fn from_config(config: CastingConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CastError::Config(e.to_string()))?;
        Ok(Self::build(config))
    }

    /// Loads `casting.toml`-style configuration, falling back to defaults
    /// when the file is missing.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let config =
            CastingConfig::load(path).map_err(|e| CastError::Config(e.to_string()))?;
        Ok(Self::build(config))
    }

    fn build(config: CastingConfig) -> Self {
        Self {
            allocation: EngineBuilder::allocation_engine(&config),
            selection: EngineBuilder::selection_engine(&config),
            config,
        }
    }

    pub fn config(&self) -> &CastingConfig {
        &self.config
    }

    pub fn allocation_engine(&self) -> &dyn AllocationEngine {
        self.allocation.as_ref()
    }

    pub fn selection_engine(&self) -> &dyn SelectionEngine {
        self.selection.as_ref()
    }

    /// Selects the cast from every applicant of the show: cast groups,
    /// alternative casts, cast numbers and tags, in that order.
    ///
    /// # Errors
    ///
    /// Fails if the show does not validate, if `cast_numbers.order_by`
    /// names no criteria of the show, or if the selection engine cannot
    /// balance the show's alternative casts.
    pub fn select_cast(&self, show: &mut Show) -> Result<SelectionSummary> {
        show.validate()?;
        let order_by = self.cast_number_criteria(show)?;
        let applicants: Vec<ApplicantId> = show.applicant_ids().collect();
        let engine = self.selection_engine();

        let accepted = engine.select_cast_groups(show, &applicants);
        let rejected = applicants
            .iter()
            .filter(|&&a| show.applicant(a).cast_group.is_none())
            .count();

        let alternates = show.alternative_cast_count() > 0
            && show
                .cast_group_ids()
                .any(|g| show.cast_group(g).alternate_casts);
        let balance = if alternates {
            Some(engine.balance_alternative_casts(show, &applicants)?)
        } else {
            None
        };

        engine.allocate_cast_numbers(
            show,
            &applicants,
            order_by,
            self.config.cast_numbers.direction,
        );
        let tags_applied = engine.apply_tags(show, &applicants);

        Ok(SelectionSummary {
            accepted,
            rejected,
            balance,
            tags_applied,
        })
    }

    /// Casts every role of the show from the accepted applicants, batch by
    /// batch in the ideal casting order.
    pub fn cast_all_roles(&self, show: &mut Show) -> Result<CastingSummary> {
        show.validate()?;
        let start = Instant::now();
        let applicants: Vec<ApplicantId> = show
            .applicant_ids()
            .filter(|&a| show.applicant(a).is_accepted())
            .collect();
        let engine = self.allocation_engine();
        info!(
            event = "casting_start",
            engine = engine.engine_type_name(),
            applicants = applicants.len(),
            roles = show.roles.len(),
        );

        let mut summary = CastingSummary::default();
        let mut order = engine.ideal_casting_order(show, &applicants);
        while let Some(batch) = order.next_batch(show) {
            summary.batches += 1;
            match batch {
                CastingBatch::Single(role) => {
                    for applicant in engine.pick_cast(show, &applicants, role) {
                        if show.cast(role, applicant) {
                            summary.placements += 1;
                        }
                    }
                }
                CastingBatch::Balanced(roles) => {
                    summary.balanced_batches += 1;
                    summary.placements += engine.balance_cast(show, &applicants, &roles).len();
                }
            }
        }

        summary.unfilled = show
            .role_ids()
            .filter(|&role| (show.role(role).cast.len() as u32) < show.total_required(role))
            .collect();
        for &role in &summary.unfilled {
            debug!(
                event = "role_unfilled",
                role = %show.role(role).name,
                cast = show.role(role).cast.len(),
                required = show.total_required(role),
            );
        }
        info!(
            event = "casting_end",
            batches = summary.batches,
            placements = summary.placements,
            unfilled = summary.unfilled.len(),
            duration_ms = start.elapsed().as_millis() as u64,
        );
        Ok(summary)
    }

    fn cast_number_criteria(&self, show: &Show) -> Result<Option<CriteriaId>> {
        let Some(name) = &self.config.cast_numbers.order_by else {
            return Ok(None);
        };
        show.criteria_ids()
            .find(|&c| show.criteria(c).name == *name)
            .map(Some)
            .ok_or_else(|| {
                CastError::Config(format!("cast_numbers.order_by names unknown criteria '{name}'"))
            })
    }
}

impl Default for Caster {
    fn default() -> Self {
        Self::new()
    }
}

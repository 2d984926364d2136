//! SAT-based balancing of two alternative casts.
//!
//! Each alternating cast group is ranked by every primary criteria and cut
//! into chunks; each chunk must be split exactly in half between the two
//! casts. Small chunks give the best balance but may contradict each other
//! or the same-cast sets, so the chunk size grows until the combined
//! expression solves.

use std::collections::VecDeque;
use std::time::Instant;

use castforge_config::{BalanceSolverType, BalancingConfig, SortDirection};
use castforge_core::{
    AlternativeCastId, ApplicantId, CastError, CastGroupId, CriteriaId, Result, Show,
};
use castforge_sat::builder::MAX_INPUTS;
use castforge_sat::{
    BranchAndBoundSolver, Clause, DpllSolver, DpllTheorySolver, Expression, ExpressionBuilder,
    Literal, SatError, Solution, Solver, SolverStats, Variable, VariableSet,
};
use tracing::{info, warn};

use super::{even_fill, rank, SelectionEngine};
use crate::applicant_engine::ApplicantEngine;
use crate::stats::{BalanceReport, ChunkAttempt};

/// Balances exactly two alternative casts by solving chunked
/// "keep separate" constraints, falling back to an even fill.
#[derive(Debug)]
pub struct ChunkedPairsSatEngine {
    applicant_engine: Box<dyn ApplicantEngine>,
    balancing: BalancingConfig,
}

impl ChunkedPairsSatEngine {
    pub fn new(applicant_engine: Box<dyn ApplicantEngine>, balancing: BalancingConfig) -> Self {
        Self {
            applicant_engine,
            balancing,
        }
    }

    /// Unit clauses for applicants already in a cast and keep-together
    /// clauses for every same-cast set. Variable true means the first cast.
    fn base_expression(
        &self,
        show: &Show,
        variables: &VariableSet<ApplicantId>,
        first_cast: AlternativeCastId,
    ) -> std::result::Result<Expression, SatError> {
        let mut expression = Expression::new();
        for (variable, &applicant) in variables.iter() {
            if let Some(cast) = show.applicant(applicant).alternative_cast {
                expression.insert(Clause::unit(Literal::new(variable, cast == first_cast)));
            }
        }

        let mut together = ExpressionBuilder::keep_together();
        for set in &show.same_cast_sets {
            let members: Vec<Variable> = set
                .applicants
                .iter()
                .filter_map(|a| variables.get(a))
                .collect();
            if members.len() < 2 {
                continue;
            }
            if members.len() <= MAX_INPUTS {
                expression.extend(together.build(&members)?);
            } else {
                // Equal neighbours make the whole set equal.
                for pair in members.windows(2) {
                    expression.extend(together.build(pair)?);
                }
            }
        }
        Ok(expression)
    }

    /// Adds a keep-separate constraint for every even chunk of every
    /// ranking of every group.
    fn add_chunks(
        &self,
        show: &Show,
        open: &[(CastGroupId, Vec<ApplicantId>)],
        orderings: &[Option<CriteriaId>],
        chunk_size: usize,
        variables: &VariableSet<ApplicantId>,
        separate: &mut ExpressionBuilder<fn(&[bool]) -> bool>,
        expression: &mut Expression,
    ) -> std::result::Result<(), SatError> {
        let engine = self.applicant_engine();
        for (_, members) in open {
            for &ordering in orderings {
                let ranked = rank(
                    members,
                    |a| match ordering {
                        Some(criteria) => show.applicant(a).mark_for(criteria) as f64,
                        None => engine.overall_ability(show, a),
                    },
                    SortDirection::Descending,
                );
                for chunk in split_chunks(show, ranked, chunk_size) {
                    if chunk.len() < 2 || chunk.len() % 2 != 0 {
                        continue;
                    }
                    let vars: Vec<Variable> =
                        chunk.iter().filter_map(|a| variables.get(a)).collect();
                    expression.extend(separate.build(&vars)?);
                }
            }
        }
        Ok(())
    }

    fn solve(
        &self,
        show: &Show,
        expression: &Expression,
        variables: &VariableSet<ApplicantId>,
        group_variables: &[Vec<usize>],
    ) -> std::result::Result<(Option<Solution>, SolverStats), SatError> {
        let count = variables.len();
        match self.balancing.solver {
            BalanceSolverType::Dpll => {
                let mut solver = DpllSolver::new();
                let found = solver.solve(expression, count)?;
                Ok((found, solver.stats().clone()))
            }
            BalanceSolverType::DpllTheory => {
                // Neither cast may take more than half (rounded up) of a group.
                let theory = |values: &[Option<bool>]| {
                    let mut complete = true;
                    for vars in group_variables {
                        let limit = vars.len().div_ceil(2);
                        let trues = vars.iter().filter(|&&v| values[v] == Some(true)).count();
                        let falses = vars.iter().filter(|&&v| values[v] == Some(false)).count();
                        if trues > limit || falses > limit {
                            return Some(false);
                        }
                        complete &= trues + falses == vars.len();
                    }
                    complete.then_some(true)
                };
                let mut solver = DpllTheorySolver::new(theory);
                let found = solver.solve(expression, count)?;
                Ok((found, solver.stats().clone()))
            }
            BalanceSolverType::BranchAndBound => {
                let engine = self.applicant_engine();
                let abilities: Vec<f64> = (0..count)
                    .map(|v| engine.overall_ability(show, *variables.value(Variable(v))))
                    .collect();
                // Lower bound on the ability gap between casts, summed over groups.
                let cost = |values: &[Option<bool>]| -> f64 {
                    group_variables
                        .iter()
                        .map(|vars| {
                            let (mut first, mut second, mut open) = (0.0, 0.0, 0.0);
                            for &v in vars {
                                match values[v] {
                                    Some(true) => first += abilities[v],
                                    Some(false) => second += abilities[v],
                                    None => open += abilities[v],
                                }
                            }
                            (f64::abs(first - second) - open).max(0.0)
                        })
                        .sum()
                };
                let mut solver = BranchAndBoundSolver::new(cost);
                let found = solver.solve(expression, count)?;
                Ok((found, solver.stats().clone()))
            }
        }
    }
}

impl SelectionEngine for ChunkedPairsSatEngine {
    fn applicant_engine(&self) -> &dyn ApplicantEngine {
        self.applicant_engine.as_ref()
    }

    fn balance_alternative_casts(
        &self,
        show: &mut Show,
        applicants: &[ApplicantId],
    ) -> Result<BalanceReport> {
        let casts: Vec<AlternativeCastId> = show.alternative_cast_ids().collect();
        if casts.len() != 2 {
            return Err(CastError::InvalidState(format!(
                "chunked balancing needs exactly 2 alternative casts, found {}",
                casts.len()
            )));
        }
        self.balancing
            .validate()
            .map_err(|e| CastError::Config(e.to_string()))?;
        let start = Instant::now();
        info!(
            event = "selection_start",
            step = "balance_alternative_casts",
            engine = self.engine_type_name(),
            applicants = applicants.len(),
        );

        let groups: Vec<(CastGroupId, Vec<ApplicantId>)> = show
            .cast_group_ids()
            .filter(|&g| show.cast_group(g).alternate_casts)
            .map(|g| {
                let members = applicants
                    .iter()
                    .copied()
                    .filter(|&a| show.applicant(a).cast_group == Some(g))
                    .collect();
                (g, members)
            })
            .collect();

        let mut variables = VariableSet::new();
        for (_, members) in &groups {
            for &member in members {
                variables.register(member);
            }
        }
        let mut report = BalanceReport::default();

        if !variables.is_empty() {
            let group_variables: Vec<Vec<usize>> = groups
                .iter()
                .map(|(_, members)| {
                    members
                        .iter()
                        .filter_map(|a| variables.get(a))
                        .map(Variable::index)
                        .collect()
                })
                .collect();
            let open: Vec<(CastGroupId, Vec<ApplicantId>)> = groups
                .iter()
                .map(|(g, members)| {
                    let remaining = members
                        .iter()
                        .copied()
                        .filter(|&a| show.applicant(a).alternative_cast.is_none())
                        .collect();
                    (*g, remaining)
                })
                .collect();
            let mut orderings: Vec<Option<CriteriaId>> = show
                .criteria_ids()
                .filter(|&c| show.criteria(c).primary)
                .map(Some)
                .collect();
            if orderings.is_empty() {
                orderings.push(None);
            }

            let base = self.base_expression(show, &variables, casts[0])?;
            let largest = open.iter().map(|(_, m)| m.len()).max().unwrap_or(0);
            let max_chunk = self
                .balancing
                .max_chunk_size
                .unwrap_or(largest)
                .max(self.balancing.initial_chunk_size);
            let mut separate = ExpressionBuilder::keep_separate();
            let mut chunk_size = self.balancing.initial_chunk_size;
            let mut solution = None;

            while chunk_size <= max_chunk {
                let mut expression = base.clone();
                match self.add_chunks(
                    show,
                    &open,
                    &orderings,
                    chunk_size,
                    &variables,
                    &mut separate,
                    &mut expression,
                ) {
                    Ok(()) => {}
                    Err(SatError::TooManyVariables { count, limit }) => {
                        warn!(
                            event = "chunk_limit",
                            chunk_size = chunk_size,
                            count = count,
                            limit = limit,
                        );
                        break;
                    }
                    Err(e) => return Err(e.into()),
                }

                let (found, stats) = if expression.is_empty() {
                    (
                        Some(Solution::new(vec![None; variables.len()])),
                        SolverStats::default(),
                    )
                } else {
                    self.solve(show, &expression, &variables, &group_variables)?
                };
                let attempt = ChunkAttempt {
                    chunk_size,
                    variables: variables.len(),
                    clauses: expression.len(),
                    literals: expression.literal_count(),
                    solved: found.is_some(),
                    nodes_explored: stats.nodes_explored,
                };
                info!(
                    event = "chunk_attempt",
                    chunk_size = attempt.chunk_size,
                    variables = attempt.variables,
                    clauses = attempt.clauses,
                    literals = attempt.literals,
                    solved = attempt.solved,
                    nodes = attempt.nodes_explored,
                );
                report.record_attempt(attempt);
                if found.is_some() {
                    solution = found;
                    break;
                }
                chunk_size += self.balancing.chunk_increment;
            }

            match solution {
                Some(solution) => {
                    for (variable, &applicant) in variables.iter() {
                        let value = solution.get(variable);
                        let a = show.applicant_mut(applicant);
                        if let (None, Some(first)) = (a.alternative_cast, value) {
                            a.alternative_cast = Some(if first { casts[0] } else { casts[1] });
                            report.assigned += 1;
                        }
                    }
                }
                None => {
                    report.fell_back = true;
                    warn!(
                        event = "balance_fallback",
                        attempts = report.attempts.len(),
                    );
                }
            }
            // Variables the solver left free, or everything on fallback.
            report.assigned += even_fill(show, applicants, self.applicant_engine());
        }

        info!(
            event = "selection_end",
            step = "balance_alternative_casts",
            assigned = report.assigned,
            attempts = report.attempts.len(),
            fell_back = report.fell_back,
            duration_ms = start.elapsed().as_millis() as u64,
        );
        Ok(report)
    }

    fn engine_type_name(&self) -> &'static str {
        "ChunkedPairsSat"
    }
}

/// Cuts a ranked list into consecutive chunks of `size`.
///
/// A member of a same-cast set is deferred to a later chunk when taking it
/// would put more than half of the chunk in one set.
fn split_chunks(show: &Show, ranked: Vec<ApplicantId>, size: usize) -> Vec<Vec<ApplicantId>> {
    let mut queue: VecDeque<ApplicantId> = ranked.into();
    let mut chunks = Vec::new();
    while !queue.is_empty() {
        let mut chunk: Vec<ApplicantId> = Vec::with_capacity(size);
        let mut deferred = Vec::new();
        while chunk.len() < size {
            let Some(applicant) = queue.pop_front() else {
                break;
            };
            if let Some(set) = show.same_cast_set_of(applicant) {
                let same = chunk
                    .iter()
                    .filter(|&&m| show.same_cast_set_of(m) == Some(set))
                    .count();
                if (same + 1) * 2 > size {
                    deferred.push(applicant);
                    continue;
                }
            }
            chunk.push(applicant);
        }
        for applicant in deferred.into_iter().rev() {
            queue.push_front(applicant);
        }
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use castforge_core::{Applicant, SameCastSet};

    use super::*;

    #[test]
    fn test_split_chunks_defers_same_cast_members() {
        let mut show = Show::new("Revue");
        let ids: Vec<ApplicantId> = (0..4)
            .map(|i| show.add_applicant(Applicant::new(format!("A{i}"), "")))
            .collect();
        show.add_same_cast_set(SameCastSet::new([ids[0], ids[1]]));

        let chunks = split_chunks(&show, ids.clone(), 2);
        assert_eq!(
            chunks,
            vec![vec![ids[0], ids[2]], vec![ids[1], ids[3]]]
        );
    }

    #[test]
    fn test_split_chunks_keeps_trailing_partial_chunk() {
        let mut show = Show::new("Revue");
        let ids: Vec<ApplicantId> = (0..5)
            .map(|i| show.add_applicant(Applicant::new(format!("A{i}"), "")))
            .collect();

        let chunks = split_chunks(&show, ids.clone(), 4);
        assert_eq!(chunks, vec![ids[0..4].to_vec(), vec![ids[4]]]);
    }
}

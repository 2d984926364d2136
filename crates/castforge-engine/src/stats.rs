//! Balancing statistics.
//!
//! Collected by the selection engines for diagnostics and logging, the way
//! solver phases keep counters for their progress events.

/// One solve attempt of the chunked alternative cast balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkAttempt {
    pub chunk_size: usize,
    pub variables: usize,
    pub clauses: usize,
    pub literals: usize,
    pub solved: bool,
    /// Search nodes visited by the solver.
    pub nodes_explored: u64,
}

/// Outcome of balancing alternative casts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceReport {
    /// Solve attempts in the order they were made.
    pub attempts: Vec<ChunkAttempt>,
    /// No attempt solved and every open applicant was placed by even fill.
    pub fell_back: bool,
    /// Applicants given an alternative cast by this run.
    pub assigned: usize,
}

impl BalanceReport {
    pub fn record_attempt(&mut self, attempt: ChunkAttempt) {
        self.attempts.push(attempt);
    }

    /// Chunk size of the attempt that solved, if any.
    pub fn solved_chunk_size(&self) -> Option<usize> {
        self.attempts
            .iter()
            .find(|attempt| attempt.solved)
            .map(|attempt| attempt.chunk_size)
    }
}

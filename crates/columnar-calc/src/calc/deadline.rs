//! Query deadlines polled by long running operators.
use crate::base::database::{ColumnOperationError, ColumnOperationResult};
use std::time::{Duration, Instant};

/// The query-wide deadline that long running operations poll.
///
/// A context is created once when a query starts and is passed to every
/// operation of that query.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext {
    started: Instant,
    deadline: Option<Instant>,
}

impl QueryContext {
    /// Starts a query now. Operations fail once `timeout` has passed.
    ///
    /// A timeout too large to represent is treated as no timeout.
    #[must_use]
    pub fn start(timeout: Option<Duration>) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: timeout.and_then(|timeout| started.checked_add(timeout)),
        }
    }

    /// Starts a query that never times out.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::start(None)
    }

    /// Time since the query started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns true if the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Fails once the deadline has passed.
    ///
    /// # Errors
    /// Returns [`ColumnOperationError::Timeout`] if the deadline has passed.
    pub fn check(&self) -> ColumnOperationResult<()> {
        if self.is_expired() {
            let elapsed_ms = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(elapsed_ms, "query deadline passed");
            return Err(ColumnOperationError::Timeout { elapsed_ms });
        }
        Ok(())
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::unbounded()
    }
}

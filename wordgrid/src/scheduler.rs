//! Bounded scatter/gather over blocking tasks.
//!
//! Every task is a CPU-bound closure. The scheduler hands each one to Tokio's
//! blocking pool, keeps at most `max_in_flight` of them outstanding, and waits
//! for all of them before returning their results in task order.
//!
//! # Flow
//!
//! ```text
//! tasks ──▶ launch while in_flight < limit ──▶ JoinSet
//!             ▲                                  │
//!             └──── one task settles ◀───────────┘
//! ```
//!
//! # Failures
//!
//! A task that returns an error or panics is handed to the error handler, if
//! one was supplied, together with its index; whatever the handler returns
//! stands in for that task's result. Without a handler the first failure
//! ends the whole gather. Queued tasks are cancelled when the set drops;
//! tasks already running finish on the blocking pool and their results are
//! discarded. A panic keeps the index of the task that raised it, whether or
//! not a handler is installed.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, warn};

use crate::errors::{SolverError, SolverResult};

/// Substitutes a result for a failed task, given the error and task index
pub type TaskErrorHandler<T> = Arc<dyn Fn(SolverError, usize) -> T + Send + Sync>;

/// Runs `tasks` with at most `max_in_flight` outstanding at any moment.
///
/// Results come back in the order the tasks were supplied, regardless of the
/// order in which they finished.
pub async fn scatter_gather<T, I, F>(
    tasks: I,
    max_in_flight: NonZeroUsize,
    on_error: Option<&TaskErrorHandler<T>>,
) -> SolverResult<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> SolverResult<T> + Send + 'static,
    T: Send + 'static,
{
    let limit = max_in_flight.get();
    let mut in_flight = JoinSet::new();
    let mut indices: HashMap<Id, usize> = HashMap::new();
    let mut results: Vec<Option<T>> = Vec::new();
    let mut peak = 0usize;

    for (index, task) in tasks.into_iter().enumerate() {
        if in_flight.len() >= limit {
            if let Some(joined) = in_flight.join_next_with_id().await {
                settle(joined, &mut indices, &mut results, on_error)?;
            }
        }
        results.push(None);
        let handle = in_flight.spawn_blocking(task);
        indices.insert(handle.id(), index);
        peak = peak.max(in_flight.len());
    }

    debug!(
        "Launched {} tasks (limit {}, peak in flight {})",
        results.len(),
        limit,
        peak
    );

    while let Some(joined) = in_flight.join_next_with_id().await {
        settle(joined, &mut indices, &mut results, on_error)?;
    }

    Ok(results.into_iter().flatten().collect())
}

fn settle<T>(
    joined: Result<(Id, SolverResult<T>), JoinError>,
    indices: &mut HashMap<Id, usize>,
    results: &mut [Option<T>],
    on_error: Option<&TaskErrorHandler<T>>,
) -> SolverResult<()> {
    let (id, outcome) = match joined {
        Ok((id, result)) => (id, Ok(result)),
        Err(join_error) => (join_error.id(), Err(join_error)),
    };
    let index = match indices.remove(&id) {
        Some(index) => index,
        None => {
            return Err(SolverError::task_panicked(
                usize::MAX,
                format!("settled task {} was never launched", id),
            ))
        }
    };
    let result = outcome
        .unwrap_or_else(|join_error| Err(SolverError::task_panicked(index, join_error.to_string())));

    let value = match (result, on_error) {
        (Ok(value), _) => value,
        (Err(err), Some(handler)) => {
            warn!("Task {} failed, substituting handler result: {}", index, err);
            handler(err, index)
        }
        (Err(err), None) => return Err(err),
    };
    results[index] = Some(value);
    Ok(())
}

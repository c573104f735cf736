//! Observers for packing runs.
//!
//! A monitor only ever sees shared references, so it can report progress but
//! never steer the greedy pass or the local search. Every callback has an empty
//! default body; implementors override what they care about.

use crate::packer::{LocalSearchStats, Solution};
use crate::strategy::SelectionStrategy;
use tracing::{debug, info};

/// Receives progress events from the greedy pass and the local search.
pub trait PackingMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called before the first rectangle is placed.
    fn on_greedy_start(&mut self, _strategy: SelectionStrategy, _total: usize) {}

    /// Called after each rectangle is placed.
    fn on_item_placed(&mut self, _processed: usize, _total: usize, _containers: usize) {}

    /// Called once the greedy pass has placed every rectangle.
    fn on_greedy_end(&mut self, _solution: &Solution) {}

    /// Called at the end of each local search pass.
    fn on_pass_end(&mut self, _pass: u64, _moved: bool, _containers: usize) {}

    /// Called when the local search stops.
    fn on_local_search_end(&mut self, _solution: &Solution, _stats: &LocalSearchStats) {}
}

impl std::fmt::Debug for dyn PackingMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PackingMonitor {{ name: {} }}", self.name())
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl PackingMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMonitor;

impl PackingMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_greedy_start(&mut self, strategy: SelectionStrategy, total: usize) {
        info!(%strategy, rectangles = total, "greedy pass started");
    }

    fn on_greedy_end(&mut self, solution: &Solution) {
        info!(
            containers = solution.container_count(),
            "greedy pass finished"
        );
    }

    fn on_pass_end(&mut self, pass: u64, moved: bool, containers: usize) {
        debug!(pass, moved, containers, "local search pass");
    }

    fn on_local_search_end(&mut self, _solution: &Solution, stats: &LocalSearchStats) {
        info!(
            passes = stats.passes,
            moves = stats.moves,
            before = stats.containers_before,
            after = stats.containers_after,
            outcome = ?stats.outcome,
            "local search finished"
        );
    }
}

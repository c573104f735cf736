//! Relocation search over an existing solution.
//!
//! Each pass walks the containers in order. For the current source container
//! it walks a snapshot of the members and tries to move each one into the first
//! *other* container that has room. The first successful move ends the pass;
//! a source emptied by the move is dropped from the solution. The search stops
//! once a full pass moves nothing.
//!
//! A move counts as progress simply because it happened. It does not have to
//! lower the container count, so the search can come back to an assignment it
//! has already visited (a small item bouncing between two containers is the
//! common case). The run is deterministic, so a repeated assignment means the
//! rest of the run would loop forever with a constant container count. Every
//! assignment is recorded and the run stops at the first repeat.

use super::*;
use crate::monitor::NoOpMonitor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Why a local search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchOutcome {
    /// A full pass found no feasible move
    Converged,
    /// A move recreated an assignment seen earlier in the run
    CycleDetected,
    /// The configured pass limit was reached
    PassLimit,
}

/// Counters describing one local search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSearchStats {
    pub passes: u64,
    pub moves: u64,
    pub containers_before: usize,
    pub containers_after: usize,
    pub outcome: SearchOutcome,
}

impl LocalSearchStats {
    pub fn converged(&self) -> bool {
        self.outcome == SearchOutcome::Converged
    }
}

/// Runs the relocation search until it converges or starts repeating itself.
pub fn local_search(solution: Solution) -> Result<Solution> {
    LocalSearch::new()
        .run(solution)
        .map(|(solution, _)| solution)
}

/// First-improvement relocation search.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearch {
    max_passes: Option<u64>,
}

impl LocalSearch {
    pub fn new() -> Self {
        Self { max_passes: None }
    }

    /// Stops the run after `max_passes` passes even if moves remain.
    pub fn with_max_passes(mut self, max_passes: u64) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    pub fn run(&self, solution: Solution) -> Result<(Solution, LocalSearchStats)> {
        self.run_with_monitor(solution, &mut NoOpMonitor)
    }

    pub fn run_with_monitor(
        &self,
        solution: Solution,
        monitor: &mut dyn PackingMonitor,
    ) -> Result<(Solution, LocalSearchStats)> {
        let containers_before = solution.container_count();
        let mut containers = solution.into_containers();
        let mut seen = HashSet::from([assignment(&containers)]);
        let mut passes = 0;
        let mut moves = 0;

        let outcome = loop {
            if self.max_passes.is_some_and(|limit| passes >= limit) {
                warn!(passes, containers = containers.len(), "local search stopped at pass limit");
                break SearchOutcome::PassLimit;
            }

            passes += 1;
            let moved = relocate_first(&mut containers)?;
            monitor.on_pass_end(passes, moved, containers.len());

            if !moved {
                break SearchOutcome::Converged;
            }
            moves += 1;

            if !seen.insert(assignment(&containers)) {
                debug!(passes, containers = containers.len(), "local search revisited an assignment");
                break SearchOutcome::CycleDetected;
            }
        };

        let stats = LocalSearchStats {
            passes,
            moves,
            containers_before,
            containers_after: containers.len(),
            outcome,
        };
        let solution = Solution::new(containers);
        monitor.on_local_search_end(&solution, &stats);
        Ok((solution, stats))
    }
}

/// Edge length and members of each container, in order.
type Assignment = Vec<(u32, Vec<Rectangle>)>;

/// Full copy of the assignment; remaining areas follow from it.
fn assignment(containers: &[Container]) -> Assignment {
    containers
        .iter()
        .map(|container| (container.edge_length(), container.members().to_vec()))
        .collect()
}

/// Applies the first feasible move of a pass. Returns whether one was made.
fn relocate_first(containers: &mut Vec<Container>) -> Result<bool> {
    for source in 0..containers.len() {
        // Members are moved out of `source` while it is being scanned
        let snapshot = containers[source].members().to_vec();

        for (position, rect) in snapshot.iter().enumerate() {
            let target = (0..containers.len())
                .find(|&index| index != source && containers[index].can_fit(rect));

            if let Some(target) = target {
                let moved = containers[source].remove_at(position)?;
                containers[target].add(moved)?;
                if containers[source].is_empty() {
                    containers.remove(source);
                }
                return Ok(true);
            }
        }
    }

    Ok(false)
}

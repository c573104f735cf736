use crate::container::Container;
use crate::monitor::{LogMonitor, PackingMonitor};
use crate::rectangle::{Rectangle, SizeBounds};
use crate::strategy::SelectionStrategy;
use crate::types::*;
use std::time::Instant;

mod greedy;
mod local_search;
mod summary;
#[cfg(test)]
mod tests;

pub use greedy::{greedy_pack, greedy_pack_with_monitor};
pub use local_search::{local_search, LocalSearch, LocalSearchStats, SearchOutcome};

/// The ordered list of containers that together hold every rectangle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    containers: Vec<Container>,
}

impl Solution {
    pub fn new(containers: Vec<Container>) -> Self {
        Self { containers }
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn into_containers(self) -> Vec<Container> {
        self.containers
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn rectangle_count(&self) -> usize {
        self.containers.iter().map(Container::member_count).sum()
    }

    /// All rectangles in container order, then member order.
    pub fn rectangles(&self) -> Vec<Rectangle> {
        self.containers
            .iter()
            .flat_map(|c| c.members().iter().copied())
            .collect()
    }

    /// Checks that no container holds more area than it has.
    pub fn is_feasible(&self) -> bool {
        self.containers.iter().all(|c| {
            let occupied: u64 = c.members().iter().map(Rectangle::area).sum();
            occupied <= c.capacity() && occupied == c.used_area()
        })
    }
}

impl From<Vec<Container>> for Solution {
    fn from(containers: Vec<Container>) -> Self {
        Self::new(containers)
    }
}

/// Packs rectangles into square containers: first-fit decreasing, then
/// relocation search.
pub struct Packer {
    request: PackingRequest,
    rectangles: Vec<Rectangle>,
}

impl Packer {
    /// Validates the request and expands it into rectangles.
    pub fn new(request: PackingRequest) -> Result<Self> {
        if request.edge_length == 0 {
            return Err(PackError::InvalidInput(
                "Container edge length must be positive".to_string(),
            ));
        }

        if request.rectangles.is_empty() {
            return Err(PackError::InvalidInput(
                "At least one rectangle must be provided".to_string(),
            ));
        }

        let bounds = SizeBounds::try_from(request.bounds)?;
        let rectangles = expand_rectangles(&request.rectangles, &bounds)?;

        Ok(Self {
            request,
            rectangles,
        })
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn edge_length(&self) -> u32 {
        self.request.edge_length
    }

    /// Runs the configured strategy and reports progress through `tracing`.
    pub fn pack(&self) -> Result<PackingResult> {
        self.pack_with_monitor(self.request.strategy, &mut LogMonitor)
    }

    /// Runs the full flow with an explicit strategy and observer.
    pub fn pack_with_monitor(
        &self,
        strategy: SelectionStrategy,
        monitor: &mut dyn PackingMonitor,
    ) -> Result<PackingResult> {
        let started = Instant::now();

        let greedy =
            greedy_pack_with_monitor(&self.rectangles, self.request.edge_length, strategy, monitor)?;
        let greedy_containers = greedy.container_count();

        let (solution, stats) = if self.request.local_search {
            let (solution, stats) = LocalSearch::new().run_with_monitor(greedy, monitor)?;
            (solution, Some(stats))
        } else {
            (greedy, None)
        };

        Ok(PackingResult {
            strategy,
            greedy_containers,
            local_search: stats,
            containers: solution.container_reports(),
            summary: solution.summary(),
            computation_time_ms: started.elapsed().as_millis() as u64,
        })
    }
}

/// Duplicates specs according to their requested quantity.
fn expand_rectangles(specs: &[RectangleSpec], bounds: &SizeBounds) -> Result<Vec<Rectangle>> {
    let mut expanded = Vec::new();
    for spec in specs {
        if spec.quantity == 0 {
            return Err(PackError::InvalidInput(format!(
                "Rectangle {}x{} has zero quantity",
                spec.width, spec.height
            )));
        }

        let rect = Rectangle::new(spec.width, spec.height, bounds)?;
        expanded.extend(std::iter::repeat(rect).take(spec.quantity as usize));
    }
    Ok(expanded)
}

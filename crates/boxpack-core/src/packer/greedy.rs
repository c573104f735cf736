use super::*;
use crate::monitor::NoOpMonitor;
use tracing::debug;

/// First-fit decreasing: orders `rectangles` by `strategy`, then drops each
/// one into the oldest container with enough remaining area, opening a new
/// container when none has room.
pub fn greedy_pack(
    rectangles: &[Rectangle],
    edge_length: u32,
    strategy: SelectionStrategy,
) -> Result<Solution> {
    greedy_pack_with_monitor(rectangles, edge_length, strategy, &mut NoOpMonitor)
}

/// Same as [`greedy_pack`], reporting each placement to `monitor`.
pub fn greedy_pack_with_monitor(
    rectangles: &[Rectangle],
    edge_length: u32,
    strategy: SelectionStrategy,
    monitor: &mut dyn PackingMonitor,
) -> Result<Solution> {
    let capacity = Container::new(edge_length)?.capacity();

    // An item larger than an empty container can never be placed
    if let Some(rect) = rectangles.iter().find(|r| r.area() > capacity) {
        return Err(PackError::Infeasible {
            area: rect.area(),
            capacity,
        });
    }

    let ordered = strategy.order(rectangles);
    let total = ordered.len();
    monitor.on_greedy_start(strategy, total);

    let mut boxes: Vec<Container> = Vec::new();
    for (processed, rect) in ordered.into_iter().enumerate() {
        match boxes.iter_mut().find(|b| b.can_fit(&rect)) {
            Some(target) => target.add(rect)?,
            None => {
                let mut opened = Container::new(edge_length)?;
                opened.add(rect)?;
                boxes.push(opened);
                debug!(containers = boxes.len(), %rect, "opened container");
            }
        }

        monitor.on_item_placed(processed + 1, total, boxes.len());
    }

    let solution = Solution::new(boxes);
    monitor.on_greedy_end(&solution);
    Ok(solution)
}

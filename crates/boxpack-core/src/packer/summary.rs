use super::*;

impl Solution {
    /// Lists each container with its area usage and contents.
    pub fn container_reports(&self) -> Vec<ContainerReport> {
        self.containers
            .iter()
            .enumerate()
            .map(|(index, container)| ContainerReport {
                index: index + 1,
                edge_length: container.edge_length(),
                capacity: container.capacity(),
                used_area: container.used_area(),
                remaining_area: container.remaining_area(),
                rectangles: container.members().iter().map(RectangleSpec::from).collect(),
            })
            .collect()
    }

    /// Computes utilization, waste and the area lower bound.
    pub fn summary(&self) -> Summary {
        let total_capacity: u64 = self.containers.iter().map(Container::capacity).sum();
        let used_area: u64 = self.containers.iter().map(Container::used_area).sum();
        let waste_area = total_capacity - used_area;
        let waste_percentage = if total_capacity > 0 {
            (waste_area as f64 / total_capacity as f64) * 100.0
        } else {
            0.0
        };

        let lower_bound = self
            .containers
            .first()
            .map(|c| used_area.div_ceil(c.capacity()))
            .unwrap_or(0);

        Summary {
            total_containers: self.containers.len(),
            total_rectangles: self.rectangle_count(),
            total_capacity,
            used_area,
            waste_area,
            waste_percentage,
            lower_bound,
        }
    }
}

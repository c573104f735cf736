use crate::rectangle::Rectangle;
use crate::types::*;
use std::fmt;

/// A square box that tracks its free area and the rectangles assigned to it.
///
/// Feasibility is judged by area alone: a rectangle fits whenever its area
/// does not exceed the remaining area. No coordinates are tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    edge_length: u32,
    capacity: u64,
    remaining_area: u64,
    members: Vec<Rectangle>,
}

impl Container {
    /// Creates an empty container with the given edge length.
    pub fn new(edge_length: u32) -> Result<Self> {
        if edge_length == 0 {
            return Err(PackError::InvalidInput(
                "Container edge length must be positive".to_string(),
            ));
        }

        let capacity = u64::from(edge_length) * u64::from(edge_length);
        Ok(Self {
            edge_length,
            capacity,
            remaining_area: capacity,
            members: Vec::new(),
        })
    }

    pub fn edge_length(&self) -> u32 {
        self.edge_length
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn remaining_area(&self) -> u64 {
        self.remaining_area
    }

    pub fn used_area(&self) -> u64 {
        self.capacity - self.remaining_area
    }

    pub fn members(&self) -> &[Rectangle] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn can_fit(&self, rect: &Rectangle) -> bool {
        rect.area() <= self.remaining_area
    }

    /// Appends `rect`. Callers are expected to check `can_fit` first.
    pub fn add(&mut self, rect: Rectangle) -> Result<()> {
        if !self.can_fit(&rect) {
            return Err(PackError::CapacityExceeded {
                area: rect.area(),
                remaining: self.remaining_area,
            });
        }

        self.remaining_area -= rect.area();
        self.members.push(rect);
        Ok(())
    }

    /// Removes the first member equal to `rect`.
    pub fn remove(&mut self, rect: &Rectangle) -> Result<Rectangle> {
        let index = self
            .members
            .iter()
            .position(|member| member == rect)
            .ok_or(PackError::MemberNotFound {
                width: rect.width(),
                height: rect.height(),
            })?;
        self.remove_at(index)
    }

    /// Removes the member at `index`, preserving the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> Result<Rectangle> {
        if index >= self.members.len() {
            return Err(PackError::InvalidInput(format!(
                "Invalid rectangle index: {index}"
            )));
        }

        let rect = self.members.remove(index);
        self.remaining_area += rect.area();
        Ok(rect)
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Box[L={}, Area={}, Rectangles={}, EmptyArea={}]",
            self.edge_length,
            self.capacity,
            self.members.len(),
            self.remaining_area
        )
    }
}

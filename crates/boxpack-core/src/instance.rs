//! Reproducible random test instances.
//!
//! Widths and heights are drawn uniformly from inclusive ranges with a
//! `ChaCha8Rng`. The same parameters and seed always produce the same
//! rectangles; when no seed is given one is derived from the parameters.

use crate::rectangle::{Rectangle, SizeBounds};
use crate::strategy::SelectionStrategy;
use crate::types::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters describing a generated instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceParams {
    pub instance_id: u32,
    pub box_length: u32,
    pub num_rectangles: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl InstanceParams {
    fn validate(&self) -> Result<()> {
        if self.box_length == 0 {
            return Err(PackError::InvalidInput(
                "Box length must be positive".to_string(),
            ));
        }
        if self.num_rectangles == 0 {
            return Err(PackError::InvalidInput(
                "Number of rectangles must be positive".to_string(),
            ));
        }
        if self.min_width == 0 || self.min_height == 0 {
            return Err(PackError::InvalidInput(
                "Minimum dimensions must be positive".to_string(),
            ));
        }
        if self.max_width < self.min_width {
            return Err(PackError::InvalidInput(
                "Maximum width must be >= minimum width".to_string(),
            ));
        }
        if self.max_height < self.min_height {
            return Err(PackError::InvalidInput(
                "Maximum height must be >= minimum height".to_string(),
            ));
        }
        if self.max_width > self.box_length || self.max_height > self.box_length {
            return Err(PackError::InvalidInput(format!(
                "Rectangle dimensions ({}, {}) exceed container size {}",
                self.max_width, self.max_height, self.box_length
            )));
        }
        Ok(())
    }

    /// Seed used when none is given explicitly.
    pub fn derived_seed(&self) -> u64 {
        (u64::from(self.instance_id).wrapping_mul(31))
            ^ (u64::from(self.box_length).wrapping_mul(17))
            ^ (u64::from(self.num_rectangles).wrapping_mul(23))
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| self.derived_seed())
    }
}

/// Min, max and mean of each side over an instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeStatistics {
    pub min_width: u32,
    pub max_width: u32,
    pub avg_width: f64,
    pub min_height: u32,
    pub max_height: u32,
    pub avg_height: f64,
}

impl fmt::Display for SizeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Width: {}-{} (avg {:.1}), Height: {}-{} (avg {:.1})",
            self.min_width,
            self.max_width,
            self.avg_width,
            self.min_height,
            self.max_height,
            self.avg_height
        )
    }
}

/// A container size plus a batch of random rectangles.
#[derive(Debug, Clone)]
pub struct TestInstance {
    params: InstanceParams,
    bounds: SizeBounds,
    rectangles: Vec<Rectangle>,
    rng: ChaCha8Rng,
}

impl TestInstance {
    pub fn generate(params: InstanceParams) -> Result<Self> {
        params.validate()?;
        let bounds = SizeBounds::new(
            params.min_width,
            params.max_width,
            params.min_height,
            params.max_height,
        )?;

        let mut rng = ChaCha8Rng::seed_from_u64(params.effective_seed());
        let mut rectangles = Vec::with_capacity(params.num_rectangles as usize);
        for _ in 0..params.num_rectangles {
            let width = rng.gen_range(params.min_width..=params.max_width);
            let height = rng.gen_range(params.min_height..=params.max_height);
            rectangles.push(Rectangle::new(width, height, &bounds)?);
        }

        Ok(Self {
            params,
            bounds,
            rectangles,
            rng,
        })
    }

    pub fn instance_id(&self) -> u32 {
        self.params.instance_id
    }

    pub fn params(&self) -> &InstanceParams {
        &self.params
    }

    pub fn bounds(&self) -> &SizeBounds {
        &self.bounds
    }

    pub fn box_length(&self) -> u32 {
        self.params.box_length
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn rectangle_count(&self) -> usize {
        self.rectangles.len()
    }

    pub fn total_rectangle_area(&self) -> u64 {
        self.rectangles.iter().map(Rectangle::area).sum()
    }

    /// Total rectangle area over the area of one container. Above 1.0 means
    /// more than one container is needed.
    pub fn packing_density(&self) -> f64 {
        let box_area = u64::from(self.params.box_length).pow(2);
        self.total_rectangle_area() as f64 / box_area as f64
    }

    pub fn size_statistics(&self) -> SizeStatistics {
        let count = self.rectangles.len() as f64;
        let widths = self.rectangles.iter().map(Rectangle::width);
        let heights = self.rectangles.iter().map(Rectangle::height);

        SizeStatistics {
            min_width: widths.clone().min().unwrap_or(0),
            max_width: widths.clone().max().unwrap_or(0),
            avg_width: widths.map(f64::from).sum::<f64>() / count,
            min_height: heights.clone().min().unwrap_or(0),
            max_height: heights.clone().max().unwrap_or(0),
            avg_height: heights.map(f64::from).sum::<f64>() / count,
        }
    }

    /// Generates a fresh instance with the same parameters under a new id,
    /// seeded from this instance's generator.
    pub fn copy_with_new_id(&mut self, instance_id: u32) -> Result<Self> {
        let seed = self.rng.gen::<u64>();
        Self::generate(InstanceParams {
            instance_id,
            seed: Some(seed),
            ..self.params.clone()
        })
    }

    /// Turns the instance into a request for the packer.
    pub fn to_request(&self, strategy: SelectionStrategy) -> PackingRequest {
        PackingRequest {
            edge_length: self.params.box_length,
            bounds: self.bounds.into(),
            rectangles: self.rectangles.iter().map(RectangleSpec::from).collect(),
            strategy,
            local_search: true,
        }
    }
}

impl fmt::Display for TestInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TestInstance[ID={}, Box={}x{}, Rectangles={}, Density={:.3}]",
            self.params.instance_id,
            self.params.box_length,
            self.params.box_length,
            self.rectangles.len(),
            self.packing_density()
        )
    }
}

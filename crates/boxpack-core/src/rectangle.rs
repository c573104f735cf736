use crate::types::*;
use serde::Serialize;
use std::fmt;

/// Inclusive dimension limits every `Rectangle` is validated against.
///
/// Constructed once by the caller and passed by reference wherever rectangles
/// are built. Each axis needs `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeBounds {
    min_width: u32,
    max_width: u32,
    min_height: u32,
    max_height: u32,
}

impl SizeBounds {
    pub fn new(min_width: u32, max_width: u32, min_height: u32, max_height: u32) -> Result<Self> {
        if min_width == 0 || min_height == 0 {
            return Err(PackError::InvalidBounds(
                "minimum dimensions must be positive".to_string(),
            ));
        }
        if min_width >= max_width {
            return Err(PackError::InvalidBounds(format!(
                "min width ({min_width}) must be less than max width ({max_width})"
            )));
        }
        if min_height >= max_height {
            return Err(PackError::InvalidBounds(format!(
                "min height ({min_height}) must be less than max height ({max_height})"
            )));
        }

        Ok(Self {
            min_width,
            max_width,
            min_height,
            max_height,
        })
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    fn check(axis: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
        if value < min || value > max {
            return Err(PackError::DimensionOutOfRange {
                axis,
                min,
                max,
                value,
            });
        }
        Ok(())
    }

    pub fn validate_width(&self, width: u32) -> Result<()> {
        Self::check("width", width, self.min_width, self.max_width)
    }

    pub fn validate_height(&self, height: u32) -> Result<()> {
        Self::check("height", height, self.min_height, self.max_height)
    }
}

impl TryFrom<BoundsSpec> for SizeBounds {
    type Error = PackError;

    fn try_from(spec: BoundsSpec) -> Result<Self> {
        Self::new(spec.min_width, spec.max_width, spec.min_height, spec.max_height)
    }
}

impl From<SizeBounds> for BoundsSpec {
    fn from(bounds: SizeBounds) -> Self {
        BoundsSpec {
            min_width: bounds.min_width,
            max_width: bounds.max_width,
            min_height: bounds.min_height,
            max_height: bounds.max_height,
        }
    }
}

/// An item to pack. Immutable once built; the area is derived from the sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Rectangle {
    width: u32,
    height: u32,
    area: u64,
}

impl Rectangle {
    /// Builds a rectangle, rejecting sides outside `bounds`.
    pub fn new(width: u32, height: u32, bounds: &SizeBounds) -> Result<Self> {
        bounds.validate_width(width)?;
        bounds.validate_height(height)?;

        Ok(Self {
            width,
            height,
            area: u64::from(width) * u64::from(height),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u64 {
        self.area
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} (Area: {})", self.width, self.height, self.area)
    }
}

impl From<&Rectangle> for RectangleSpec {
    fn from(rect: &Rectangle) -> Self {
        RectangleSpec {
            width: rect.width,
            height: rect.height,
            quantity: 1,
        }
    }
}

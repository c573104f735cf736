use crate::packer::LocalSearchStats;
use crate::strategy::SelectionStrategy;
use serde::{Deserialize, Serialize};

/// Rectangle entry of a request - expanded into `quantity` identical rectangles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangleSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

fn default_local_search() -> bool {
    true
}

/// Size bounds as they appear in request files. Validated into `SizeBounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsSpec {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

/// Input: What user provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingRequest {
    /// Edge length of every (square) container
    pub edge_length: u32,
    pub bounds: BoundsSpec,
    pub rectangles: Vec<RectangleSpec>,
    /// Ordering used by the greedy pass
    #[serde(default)]
    pub strategy: SelectionStrategy,
    /// Run the relocation search after the greedy pass
    #[serde(default = "default_local_search")]
    pub local_search: bool,
}

/// Contents of a single container in the final solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerReport {
    pub index: usize,
    pub edge_length: u32,
    pub capacity: u64,
    pub used_area: u64,
    pub remaining_area: u64,
    pub rectangles: Vec<RectangleSpec>,
}

/// Summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_containers: usize,
    pub total_rectangles: usize,
    pub total_capacity: u64,
    pub used_area: u64,
    pub waste_area: u64,
    pub waste_percentage: f64,
    /// Containers needed if area could be split freely: ceil(used / capacity)
    pub lower_bound: u64,
}

/// Output: What the packer returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingResult {
    pub strategy: SelectionStrategy,
    /// Container count straight after the greedy pass
    pub greedy_containers: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub local_search: Option<LocalSearchStats>,
    pub containers: Vec<ContainerReport>,
    pub summary: Summary,
    pub computation_time_ms: u64,
}

/// Broad class of a `PackError`, used by outer layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Infeasibility,
    InvariantViolation,
}

/// Error type for packing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    #[error("Invalid size bounds: {0}")]
    InvalidBounds(String),

    #[error("{axis} must be between {min} and {max}, got {value}")]
    DimensionOutOfRange {
        axis: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rectangle {width}x{height} is not a member of this container")]
    MemberNotFound { width: u32, height: u32 },

    #[error("Rectangle area {area} exceeds container capacity {capacity}")]
    Infeasible { area: u64, capacity: u64 },

    #[error("Rectangle area {area} exceeds remaining container area {remaining}")]
    CapacityExceeded { area: u64, remaining: u64 },
}

impl PackError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PackError::InvalidBounds(_) => ErrorCategory::Configuration,
            PackError::DimensionOutOfRange { .. }
            | PackError::InvalidInput(_)
            | PackError::MemberNotFound { .. } => ErrorCategory::Validation,
            PackError::Infeasible { .. } => ErrorCategory::Infeasibility,
            PackError::CapacityExceeded { .. } => ErrorCategory::InvariantViolation,
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;

//! Area-based bin packing of rectangles into square containers.
//!
//! Rectangles are ordered by a [`SelectionStrategy`], assigned first-fit by
//! [`greedy_pack`], and then consolidated by [`local_search`]. Feasibility is
//! judged on remaining area only; no geometric placement is attempted.

pub mod container;
pub mod instance;
pub mod monitor;
pub mod packer;
pub mod rectangle;
pub mod strategy;
pub mod types;

pub use container::Container;
pub use instance::{InstanceParams, SizeStatistics, TestInstance};
pub use monitor::{LogMonitor, NoOpMonitor, PackingMonitor};
pub use packer::{
    greedy_pack, greedy_pack_with_monitor, local_search, LocalSearch, LocalSearchStats, Packer,
    SearchOutcome, Solution,
};
pub use rectangle::{Rectangle, SizeBounds};
pub use strategy::SelectionStrategy;
pub use types::*;

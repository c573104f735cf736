use crate::rectangle::Rectangle;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Order in which the greedy pass visits rectangles.
///
/// Every variant sorts by a single key, largest first. The sort is stable, so
/// rectangles with equal keys keep their input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    #[default]
    #[serde(alias = "AREA_DESC")]
    AreaDesc,
    #[serde(alias = "LENGTH_DESC", alias = "WIDTH_DESC")]
    WidthDesc,
    #[serde(alias = "HEIGHT_DESC")]
    HeightDesc,
}

impl SelectionStrategy {
    pub const ALL: [SelectionStrategy; 3] = [
        SelectionStrategy::AreaDesc,
        SelectionStrategy::WidthDesc,
        SelectionStrategy::HeightDesc,
    ];

    /// Returns a sorted copy of `rectangles`; the input is left untouched.
    pub fn order(&self, rectangles: &[Rectangle]) -> Vec<Rectangle> {
        let mut ordered = rectangles.to_vec();
        match self {
            SelectionStrategy::AreaDesc => ordered.sort_by_key(|r| Reverse(r.area())),
            SelectionStrategy::WidthDesc => ordered.sort_by_key(|r| Reverse(r.width())),
            SelectionStrategy::HeightDesc => ordered.sort_by_key(|r| Reverse(r.height())),
        }
        ordered
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::AreaDesc => "area-desc",
            SelectionStrategy::WidthDesc => "width-desc",
            SelectionStrategy::HeightDesc => "height-desc",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SelectionStrategy {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "area-desc" | "area" => Ok(SelectionStrategy::AreaDesc),
            "width-desc" | "length-desc" | "width" => Ok(SelectionStrategy::WidthDesc),
            "height-desc" | "height" => Ok(SelectionStrategy::HeightDesc),
            _ => Err(PackError::InvalidInput(format!("Unknown strategy '{s}'"))),
        }
    }
}

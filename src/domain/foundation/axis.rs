//! GrowthAxis enum representing the five fixed growth dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The five growth dimensions every KPI is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthAxis {
    Market,
    Product,
    Revenue,
    Operations,
    Finance,
}

impl GrowthAxis {
    /// All axes in canonical report order.
    pub const ALL: [GrowthAxis; 5] = [
        GrowthAxis::Market,
        GrowthAxis::Product,
        GrowthAxis::Revenue,
        GrowthAxis::Operations,
        GrowthAxis::Finance,
    ];

    /// Returns the snake_case key used in datasets and configuration.
    pub fn key(&self) -> &'static str {
        match self {
            GrowthAxis::Market => "market",
            GrowthAxis::Product => "product",
            GrowthAxis::Revenue => "revenue",
            GrowthAxis::Operations => "operations",
            GrowthAxis::Finance => "finance",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            GrowthAxis::Market => "Market & Customers",
            GrowthAxis::Product => "Product",
            GrowthAxis::Revenue => "Revenue & Sales",
            GrowthAxis::Operations => "Team & Operations",
            GrowthAxis::Finance => "Finance & Capital",
        }
    }
}

impl fmt::Display for GrowthAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for GrowthAxis {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        GrowthAxis::ALL
            .iter()
            .copied()
            .find(|axis| axis.key() == normalized)
            .ok_or_else(|| ValidationError::invalid_format("axis", format!("unknown axis '{}'", s)))
    }
}

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Tunables for the placement searches and link recovery.
///
/// The ×10 sub-grid scale used by recovery candidate math and the ±5 start
/// offsets of the nesting sweep are fixed project conventions and are
/// deliberately not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Row step used by the minimize-height downward sweep.
    pub step_size: i32,
    /// Termination bound for the vertical-fit row scan. The scan cannot run
    /// out on any reachable grid, so exceeding this bound is fatal.
    pub scan_limit: u32,
    /// Optional iteration cap for the spiral walk. `None` keeps the walk
    /// unbounded; callers then guarantee a free slot is reachable.
    pub spiral_cap: Option<u64>,
    /// Routing-grid unit recovery candidates are snapped to.
    pub grid_unit: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            step_size: 1,
            scan_limit: 10_000,
            spiral_cap: None,
            grid_unit: 10,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(input: &str) -> Result<Self, LayoutError> {
        let config: LayoutConfig = serde_json::from_str(input)?;
        config.validate();
        Ok(config)
    }

    fn validate(&self) {
        assert!(self.step_size >= 1, "step_size must be at least 1");
        assert!(self.scan_limit >= 1, "scan_limit must be at least 1");
        assert!(self.grid_unit >= 1, "grid_unit must be at least 1");
    }
}

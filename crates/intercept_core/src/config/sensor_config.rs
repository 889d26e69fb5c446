//! Angular sensor geometry

use serde::{Deserialize, Serialize};

use crate::constants::sensor;

/// Field of view and cell layout of the heat sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Number of angular cells (기본: 17)
    pub cell_count: usize,
    /// Left FOV edge relative to heading, degrees (기본: -50)
    pub fov_start_deg: f64,
    /// Right FOV edge relative to heading, degrees (기본: 50)
    pub fov_stop_deg: f64,
    /// Cell triangle projection depth (기본: 700)
    pub depth: f64,
}

impl SensorConfig {
    /// Angle covered by one cell.
    ///
    /// The FOV edges are cell centres, so the span is split into `N - 1`
    /// steps. A single-cell sensor has zero width.
    pub fn cell_width_deg(&self) -> f64 {
        if self.cell_count <= 1 {
            0.0
        } else {
            (self.fov_stop_deg - self.fov_start_deg) / (self.cell_count - 1) as f64
        }
    }

    /// The "on target" cell, defined only for an odd cell count.
    pub fn center_index(&self) -> Option<usize> {
        if self.cell_count % 2 == 1 {
            Some((self.cell_count - 1) / 2)
        } else {
            None
        }
    }

    /// Bearing (relative to heading) of the centre line of cell `index`.
    pub fn cell_center_offset_deg(&self, index: usize) -> f64 {
        self.fov_start_deg + index as f64 * self.cell_width_deg()
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            cell_count: sensor::CELL_COUNT,
            fov_start_deg: sensor::FOV_START_DEG,
            fov_stop_deg: sensor::FOV_STOP_DEG,
            depth: sensor::DEPTH,
        }
    }
}

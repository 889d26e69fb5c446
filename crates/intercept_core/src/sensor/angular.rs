//! Angular heat sensor
//!
//! The field of view is split into `N` triangular cells fanning out from the
//! observer. Cell 0 is the leftmost (most counter-clockwise) slice.
//!
//! ```text
//!     -45  0  45
//!  -90 _ \ | / _ 90      bearings relative to heading
//!      0 1 2 3 4         cell indices
//! ```

use serde::{Deserialize, Serialize};

use super::SensorReading;
use crate::config::SensorConfig;
use crate::geometry::{point_in_triangle, Position};

// =============================================================================
// Polygons
// =============================================================================

/// One cell's hit-test triangle.
///
/// ```text
///  corner_min  corner_max
///      +--------+
///       \      /
///        \    /
///         \  /
///          \/
///         apex (observer)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellPolygon {
    pub index: usize,
    pub apex: Position,
    pub corner_min: Position,
    pub corner_max: Position,
}

impl CellPolygon {
    pub fn contains(&self, p: Position) -> bool {
        point_in_triangle(p, self.apex, self.corner_min, self.corner_max)
    }
}

/// Outer envelope covering every cell of the sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub left_far: Position,
    pub right_far: Position,
    pub apex: Position,
}

impl Cone {
    pub fn contains(&self, p: Position) -> bool {
        point_in_triangle(p, self.left_far, self.right_far, self.apex)
    }
}

/// Cached geometry of the most recent sweep, for renderers only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepDiagnostics {
    pub cells: Vec<CellPolygon>,
    /// Cell the target was found in, centre cell included
    pub hit_cell: Option<usize>,
}

// =============================================================================
// AngularSensor
// =============================================================================

#[derive(Debug, Clone)]
pub struct AngularSensor {
    config: SensorConfig,
}

impl AngularSensor {
    pub fn new(config: SensorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn cell_count(&self) -> usize {
        self.config.cell_count
    }

    /// Left boundary of cell 0. FOV edges are cell centres, hence the half-cell shift.
    fn start_angle_deg(&self, heading_deg: f64) -> f64 {
        heading_deg + self.config.fov_start_deg - self.config.cell_width_deg() / 2.0
    }

    /// Bearing of boundary `k` (0..=N). Each boundary is computed exactly once
    /// so neighbouring cells share bit-identical corners.
    fn boundary_bearing_deg(&self, start_deg: f64, k: usize) -> f64 {
        start_deg + k as f64 * self.config.cell_width_deg()
    }

    /// All cell triangles for an observer pose.
    pub fn sweep(&self, heading_deg: f64, observer: Position) -> Vec<CellPolygon> {
        let start = self.start_angle_deg(heading_deg);
        let corners: Vec<Position> = (0..=self.config.cell_count)
            .map(|k| observer.offset_by_bearing(self.boundary_bearing_deg(start, k), self.config.depth))
            .collect();

        corners
            .windows(2)
            .enumerate()
            .map(|(index, pair)| CellPolygon {
                index,
                apex: observer,
                corner_min: pair[0],
                corner_max: pair[1],
            })
            .collect()
    }

    /// First cell whose triangle contains the target, centre cell included.
    ///
    /// Boundary ties go to the lower index.
    pub fn locate(&self, heading_deg: f64, observer: Position, target: Position) -> Option<usize> {
        self.sweep(heading_deg, observer).iter().find(|c| c.contains(target)).map(|c| c.index)
    }

    /// Sample the sensor.
    ///
    /// The centre cell never fires, so "dead ahead" and "not visible" both
    /// read as all zeros.
    pub fn read(&self, heading_deg: f64, observer: Position, target: Position) -> SensorReading {
        let mut reading = SensorReading::zeros(self.config.cell_count);
        if let Some(index) = self.locate(heading_deg, observer, target) {
            if Some(index) != self.config.center_index() {
                reading.activate(index);
            }
        }
        reading
    }

    /// Full field-of-view triangle.
    pub fn cone_vertices(&self, heading_deg: f64, observer: Position) -> Cone {
        let start = self.start_angle_deg(heading_deg);
        let last = self.boundary_bearing_deg(start, self.config.cell_count);
        Cone {
            left_far: observer.offset_by_bearing(self.boundary_bearing_deg(start, 0), self.config.depth),
            right_far: observer.offset_by_bearing(last, self.config.depth),
            apex: observer,
        }
    }

    /// Rebuild the diagnostic sweep for a pose.
    pub fn refresh(
        &self,
        diagnostics: &mut SweepDiagnostics,
        heading_deg: f64,
        observer: Position,
        target: Position,
    ) {
        diagnostics.cells = self.sweep(heading_deg, observer);
        diagnostics.hit_cell = diagnostics.cells.iter().find(|c| c.contains(target)).map(|c| c.index);
    }
}

impl Default for AngularSensor {
    fn default() -> Self {
        Self::new(SensorConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================

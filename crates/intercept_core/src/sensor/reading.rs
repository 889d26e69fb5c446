//! Sensor Reading - fixed-width activation vector

use serde::{Deserialize, Serialize};

/// One activation per angular cell.
///
/// At most one entry is 1.0. An all-zero reading means "no correction
/// signal": the target is either dead ahead (centre cell) or not visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    cells: Vec<f64>,
}

impl SensorReading {
    /// Activation value of a cell that sees the target
    pub const ACTIVE: f64 = 1.0;

    pub fn zeros(width: usize) -> Self {
        Self { cells: vec![0.0; width] }
    }

    pub(crate) fn activate(&mut self, index: usize) {
        self.cells[index] = Self::ACTIVE;
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.cells
    }

    /// Index of the cell reporting the target, if any
    pub fn active_cell(&self) -> Option<usize> {
        self.cells.iter().position(|&v| v == Self::ACTIVE)
    }

    pub fn is_empty_signal(&self) -> bool {
        self.cells.iter().all(|&v| v == 0.0)
    }

    /// Exact bit pattern of every entry, for literal-value deduplication
    pub fn dedup_key(&self) -> Vec<u64> {
        self.cells.iter().map(|v| v.to_bits()).collect()
    }
}

impl std::fmt::Display for SensorReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

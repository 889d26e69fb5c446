//! Lookup guidance - hand-authored offset per sensor cell

use super::Guidance;
use crate::constants::CANONICAL_LOOKUP_TABLE;
use crate::error::{InterceptError, Result};
use crate::sensor::SensorReading;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupGuidance {
    table: Vec<f64>,
}

impl LookupGuidance {
    /// `table` needs one entry per sensor cell.
    pub fn new(table: Vec<f64>, cell_count: usize) -> Result<Self> {
        if table.len() != cell_count {
            return Err(InterceptError::LookupWidthMismatch { expected: cell_count, found: table.len() });
        }
        Ok(Self { table })
    }

    /// Reference table tuned for the 17-cell sensor
    pub fn canonical(cell_count: usize) -> Result<Self> {
        Self::new(CANONICAL_LOOKUP_TABLE.to_vec(), cell_count)
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }
}

impl Guidance for LookupGuidance {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn correction(&self, reading: &SensorReading) -> f64 {
        reading
            .as_slice()
            .iter()
            .zip(&self.table)
            .find(|(cell, _)| **cell == SensorReading::ACTIVE)
            .map_or(0.0, |(_, &offset)| offset)
    }
}

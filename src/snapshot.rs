//! Macroscopic fields dumped for downstream display.

use crate::{error::Result, physics::Physics};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path};

/// Density and velocity of every cell, row by row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: usize,
    pub time: f32,
    pub cols: usize,
    pub rows: usize,
    pub total_mass: f64,
    pub density: Vec<f32>,
    pub velocity: Vec<[f32; 2]>,
    pub solid: Vec<bool>,
}

impl Snapshot {
    /// Captures the fields from the last macroscopic pass of `physics`.
    pub fn capture(physics: &Physics, time: f32) -> Self {
        let dims = physics.dims();
        let field = physics.macroscopic();
        let boundary = physics.boundary();
        Self {
            tick: physics.ticks_elapsed(),
            time,
            cols: dims.cols,
            rows: dims.rows,
            total_mass: physics.total_mass(),
            density: field.density().to_vec(),
            velocity: field.velocity().iter().map(|v| [v.x, v.y]).collect(),
            solid: (0..dims.rows)
                .flat_map(|y| (0..dims.cols).map(move |x| (x, y)))
                .map(|pos| boundary.is_solid(pos))
                .collect(),
        }
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{lattice::LatticeDims, macroscopic::NoForcing, Params};

    #[test]
    fn capture_matches_the_lattice() {
        let dims = LatticeDims::new(3, 2).unwrap();
        let mut physics = Physics::new(dims, Params::new(1.0, 1.0).unwrap(), NoForcing).unwrap();
        physics.compute_macroscopic(0.0);
        let snapshot = Snapshot::capture(&physics, 0.0);
        assert_eq!(snapshot.density.len(), 6);
        assert_eq!(snapshot.velocity.len(), 6);
        assert!(snapshot.solid.iter().all(|&s| !s));
        assert!((snapshot.density[4] - 1.0).abs() < 1e-6);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(serde_json::from_str::<Snapshot>(&json).unwrap(), snapshot);
    }
}

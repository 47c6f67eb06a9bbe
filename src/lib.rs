//! A D2Q9 lattice Boltzmann solver.
//!
//! Each step reduces the nine distributions of every cell to density and
//! velocity, relaxes them toward local equilibrium (BGK collision) and
//! streams them to their neighbours, bouncing back off solid cells.
//!
//! ```no_run
//! use lbm_d2q9::{LatticeDims, OscillatingSource, Params, Physics};
//!
//! let dims = LatticeDims::new(400, 400)?;
//! let mut physics = Physics::new(dims, Params::new(1.0, 0.8)?, OscillatingSource::default())?;
//! for tick in 0..100 {
//!     physics.step(tick as f32 / 60.0);
//! }
//! println!("mass {}", physics.total_mass());
//! # Ok::<(), lbm_d2q9::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod physics;
pub mod scene;
pub mod snapshot;

pub use error::{Error, Result};
pub use physics::{
    boundary::{Boundary, BoundaryMask},
    lattice::{Lattice, LatticeDims},
    macroscopic::{Forcing, MacroscopicField, NoForcing, OscillatingSource, MAX_SPEED},
    stencil::{Direction, Q},
    Params, Physics,
};

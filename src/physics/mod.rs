pub mod boundary;
pub mod collision;
pub mod lattice;
pub mod macroscopic;
pub mod stencil;
pub mod stream;

use crate::error::{Error, Result};
use boundary::{Boundary, BoundaryMask};
use lattice::{Lattice, LatticeDims};
use macroscopic::{Forcing, MacroscopicField};
use std::mem;
use tracing::{debug, trace};

/// Constants shared by the macroscopic and collision stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    /// Lattice speed `c`, cell size over time step.
    pub lattice_speed: f32,
    /// Relaxation time `tau`.
    pub relaxation_time: f32,
}

impl Params {
    pub fn new(lattice_speed: f32, relaxation_time: f32) -> Result<Self> {
        if !lattice_speed.is_finite() || lattice_speed == 0.0 {
            return Err(Error::invalid_config(format!(
                "lattice speed must be finite and nonzero, got {}",
                lattice_speed
            )));
        }
        if !relaxation_time.is_finite() || relaxation_time <= 0.0 {
            return Err(Error::invalid_config(format!(
                "relaxation time must be positive, got {}",
                relaxation_time
            )));
        }
        Ok(Self {
            lattice_speed,
            relaxation_time,
        })
    }
}

pub struct Physics {
    params: Params,
    lattice: Lattice,
    swapped_out_lattice: Lattice,
    macroscopic: MacroscopicField,
    boundary: Boundary,
    forcing: Box<dyn Forcing>,
    ticks_elapsed: usize,
}

impl Physics {
    /// A fluid at rest with unit density everywhere, bounded only by the
    /// grid edge.
    pub fn new(dims: LatticeDims, params: Params, forcing: impl Forcing + 'static) -> Result<Self> {
        let dims = LatticeDims::new(dims.cols, dims.rows)?;
        let params = Params::new(params.lattice_speed, params.relaxation_time)?;

        let mut lattice = Lattice::zeroed(dims);
        lattice.initialize();
        debug!(
            cols = dims.cols,
            rows = dims.rows,
            lattice_speed = params.lattice_speed,
            relaxation_time = params.relaxation_time,
            "initialized lattice"
        );

        Ok(Self {
            params,
            swapped_out_lattice: lattice.clone(),
            lattice,
            macroscopic: MacroscopicField::new(dims),
            boundary: Boundary::new(dims, BoundaryMask::open(dims.cols, dims.rows)),
            forcing: Box::new(forcing),
            ticks_elapsed: 0,
        })
    }

    pub fn set_boundary(&mut self, mask: BoundaryMask) {
        self.boundary = Boundary::new(self.dims(), mask);
        debug!(
            mask = ?self.boundary.mask().dims(),
            solid_cells = self.boundary.solid_count(),
            "installed boundary mask"
        );
    }
    pub fn set_forcing(&mut self, forcing: impl Forcing + 'static) {
        self.forcing = Box::new(forcing);
    }

    pub fn dims(&self) -> LatticeDims {
        self.lattice.dims()
    }
    pub fn params(&self) -> Params {
        self.params
    }
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
    pub fn macroscopic(&self) -> &MacroscopicField {
        &self.macroscopic
    }
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }
    pub fn ticks_elapsed(&self) -> usize {
        self.ticks_elapsed
    }
    pub fn total_mass(&self) -> f64 {
        self.lattice.total_mass()
    }
    /// Largest speed seen by the most recent macroscopic pass.
    pub fn max_speed(&self) -> f32 {
        self.macroscopic.max_speed()
    }

    /// One full time step at simulation time `t`.
    pub fn step(&mut self, t: f32) {
        self.compute_macroscopic(t);
        self.collide();
        self.stream();
        self.ticks_elapsed += 1;
        trace!(tick = self.ticks_elapsed, t, "step");
    }

    pub fn compute_macroscopic(&mut self, t: f32) {
        self.macroscopic
            .compute(&self.lattice, self.params, self.forcing.as_ref(), t);
    }
    /// Uses the macroscopic fields from the last [`Self::compute_macroscopic`].
    pub fn collide(&mut self) {
        collision::collide(
            &self.lattice,
            &self.macroscopic,
            self.params,
            &mut self.swapped_out_lattice,
        );
        mem::swap(&mut self.lattice, &mut self.swapped_out_lattice);
    }
    pub fn stream(&mut self) {
        stream::stream(
            &self.lattice,
            &self.boundary,
            &mut self.swapped_out_lattice,
        );
        mem::swap(&mut self.lattice, &mut self.swapped_out_lattice);
    }
}

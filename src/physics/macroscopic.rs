use super::{
    lattice::{Lattice, LatticeDims},
    stencil::{LATTICE, Q},
    Params,
};
use cgmath::{prelude::*, Vector2};
use rayon::prelude::*;

/// Speeds above this are scaled back down to it.
pub const MAX_SPEED: f32 = 10.0;
/// Densities closer to zero than this divide as if they were 1.
const MIN_DIVISOR: f32 = 0.01;

/// External body force, evaluated per cell and step.
pub trait Forcing: Send + Sync {
    fn force(&self, pos: Vector2<f32>, t: f32) -> Vector2<f32>;
}

impl<F> Forcing for F
where
    F: Fn(Vector2<f32>, f32) -> Vector2<f32> + Send + Sync,
{
    fn force(&self, pos: Vector2<f32>, t: f32) -> Vector2<f32> {
        self(pos, t)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoForcing;

impl Forcing for NoForcing {
    fn force(&self, _: Vector2<f32>, _: f32) -> Vector2<f32> {
        Vector2::zero()
    }
}

/// A pulsing actuator at a fixed cell. Its push swings between the +x and
/// +y axes over time and falls off as `1 / (1 + distance)`.
#[derive(Clone, Copy, Debug)]
pub struct OscillatingSource {
    pub source: Vector2<f32>,
    pub strength: f32,
}

impl Default for OscillatingSource {
    fn default() -> Self {
        Self {
            source: Vector2::new(200.0, 200.0),
            strength: 1.3,
        }
    }
}

impl Forcing for OscillatingSource {
    fn force(&self, pos: Vector2<f32>, t: f32) -> Vector2<f32> {
        let (sin, cos) = t.sin_cos();
        let direction = Vector2::new((cos * cos).abs(), sin.abs());
        direction * (self.strength / (1.0 + (self.source - pos).magnitude()))
    }
}

/// Density and velocity per cell, recomputed every step.
#[derive(Clone, Debug)]
pub struct MacroscopicField {
    dims: LatticeDims,
    density: Vec<f32>,
    velocity: Vec<Vector2<f32>>,
}

impl MacroscopicField {
    pub fn new(dims: LatticeDims) -> Self {
        Self {
            dims,
            density: vec![0.0; dims.cells()],
            velocity: vec![Vector2::zero(); dims.cells()],
        }
    }
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }
    pub fn density_at(&self, pos: (usize, usize)) -> f32 {
        self.density[self.dims.index(pos)]
    }
    pub fn velocity_at(&self, pos: (usize, usize)) -> Vector2<f32> {
        self.velocity[self.dims.index(pos)]
    }
    pub fn density(&self) -> &[f32] {
        &self.density
    }
    pub fn velocity(&self) -> &[Vector2<f32>] {
        &self.velocity
    }
    pub fn max_speed(&self) -> f32 {
        self.velocity
            .par_iter()
            .map(|v| v.magnitude())
            .reduce(|| 0.0, f32::max)
    }

    /// Reduces every cell of `lattice` to density and velocity, adding
    /// `tau * forcing` and capping speed at [`MAX_SPEED`].
    pub fn compute(&mut self, lattice: &Lattice, params: Params, forcing: &dyn Forcing, t: f32) {
        assert_eq!(self.dims, lattice.dims());
        let cols = self.dims.cols;
        self.density
            .par_chunks_mut(cols)
            .zip(self.velocity.par_chunks_mut(cols))
            .enumerate()
            .for_each(|(y, (density_row, velocity_row))| {
                let cells = lattice.row(y).iter().zip(density_row).zip(velocity_row);
                for (x, ((cell, density), velocity)) in cells.enumerate() {
                    let pos = Vector2::new(x as f32, y as f32);
                    let (rho, vel) = moments(cell, params, forcing.force(pos, t));
                    *density = rho;
                    *velocity = vel;
                }
            });
    }
}

/// Density and forced, clamped velocity of a single cell.
pub fn moments(cell: &[f32; Q], params: Params, force: Vector2<f32>) -> (f32, Vector2<f32>) {
    let density: f32 = cell.iter().sum();
    let momentum: Vector2<f32> = cell
        .iter()
        .zip(LATTICE.iter())
        .map(|(&f, &dir)| dir * f)
        .sum();

    let divisor = if density <= 0.0 || density.abs() < MIN_DIVISOR {
        1.0
    } else {
        density
    };
    let mut vel = momentum * params.lattice_speed / divisor
        + force * params.relaxation_time / divisor;
    if vel.magnitude() > MAX_SPEED {
        vel = vel.normalize_to(MAX_SPEED);
    }
    (density, vel)
}

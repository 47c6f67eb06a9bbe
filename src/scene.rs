//! Obstacle layouts for the command-line driver.

use crate::{
    config::Config,
    physics::{boundary::BoundaryMask, lattice::LatticeDims},
};
use cgmath::{prelude::*, Vector2};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Marks every cell whose centre lies within `radius` of `center` as solid.
pub fn paint_circle(mask: &mut BoundaryMask, center: Vector2<f32>, radius: f32) {
    let (cols, rows) = mask.dims();
    for y in 0..rows {
        for x in 0..cols {
            if (Vector2::new(x as f32, y as f32) - center).magnitude2() <= radius * radius {
                mask.set((x, y), 1.0);
            }
        }
    }
}

/// Drops `count` circles of random size at random places.
pub fn scatter_circles(mask: &mut BoundaryMask, count: usize, rng: &mut impl Rng) {
    let (cols, rows) = mask.dims();
    let max_radius = (cols.min(rows) as f32 / 12.0).max(1.0);
    for _ in 0..count {
        let x: f32 = rng.gen_range(0.0, cols as f32);
        let y: f32 = rng.gen_range(0.0, rows as f32);
        let radius: f32 = rng.gen_range(0.5, max_radius + 0.5);
        let center = Vector2::new(x, y);
        paint_circle(mask, center, radius);
    }
}

/// The boundary mask described by `config`, at lattice resolution.
pub fn build_mask(config: &Config, dims: LatticeDims) -> BoundaryMask {
    let mut mask = BoundaryMask::open(dims.cols, dims.rows);
    if let Some(obstacle) = config.physics.obstacle {
        let center = Vector2::new(obstacle.center[0], obstacle.center[1]);
        paint_circle(&mut mask, center, obstacle.radius);
    }
    if config.run.scattered_obstacles > 0 {
        let mut rng = StdRng::seed_from_u64(config.run.seed);
        scatter_circles(&mut mask, config.run.scattered_obstacles, &mut rng);
    }
    mask
}

use super::{
    lattice::Lattice,
    macroscopic::MacroscopicField,
    stencil::{LATTICE, Q, WEIGHT},
    Params,
};
use cgmath::{prelude::*, Vector2};
use rayon::prelude::*;

/// Second-order equilibrium distribution for `density` moving at `vel`.
pub fn equilibrium(density: f32, vel: Vector2<f32>, lattice_speed: f32) -> [f32; Q] {
    let c2 = lattice_speed * lattice_speed;
    let speed2 = vel.magnitude2();
    let mut ret = [0.0; Q];
    for (i, f_eq) in ret.iter_mut().enumerate() {
        let along = LATTICE[i].dot(vel);
        let base = density * WEIGHT[i];
        *f_eq = base
            + base
                * (3.0 * along / lattice_speed + 9.0 * along * along / (2.0 * c2)
                    - 3.0 * speed2 / (2.0 * c2));
    }
    ret
}

/// BGK relaxation of one cell toward equilibrium.
pub fn collide_cell(
    old: &[f32; Q],
    density: f32,
    vel: Vector2<f32>,
    params: Params,
    new: &mut [f32; Q],
) {
    let f_eq = equilibrium(density, vel, params.lattice_speed);
    for ((new, &f), f_eq) in new.iter_mut().zip(old).zip(f_eq) {
        *new = f - (f - f_eq) / params.relaxation_time;
    }
}

/// Relaxes every cell of `old` toward the equilibrium given by `field`,
/// writing into `new`. `old` is never modified.
pub fn collide(old: &Lattice, field: &MacroscopicField, params: Params, new: &mut Lattice) {
    assert_eq!(old.dims(), new.dims());
    assert_eq!(old.dims(), field.dims());
    let cols = old.dims().cols;
    let density = field.density();
    let velocity = field.velocity();
    new.par_rows_mut().enumerate().for_each(|(y, new_row)| {
        let offset = y * cols;
        for (x, (new_cell, old_cell)) in new_row.iter_mut().zip(old.row(y)).enumerate() {
            collide_cell(
                old_cell,
                density[offset + x],
                velocity[offset + x],
                params,
                new_cell,
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equilibrium_at_rest_is_weighted_density() {
        let f_eq = equilibrium(2.0, Vector2::new(0.0, 0.0), 1.0);
        for i in 0..Q {
            assert!((f_eq[i] - 2.0 * WEIGHT[i]).abs() < 1e-7);
        }
    }

    #[test]
    fn equilibrium_preserves_density_and_momentum() {
        let vel = Vector2::new(0.08, -0.05);
        let f_eq = equilibrium(1.3, vel, 1.0);
        let density: f32 = f_eq.iter().sum();
        let momentum: Vector2<f32> = (0..Q).map(|i| LATTICE[i] * f_eq[i]).sum();
        assert!((density - 1.3).abs() < 1e-5);
        assert!((momentum - vel * 1.3).magnitude() < 1e-5);
    }

    const DENSITY: f32 = 0.5;
    const FAST: Params = Params {
        lattice_speed: 2.0,
        relaxation_time: 0.8,
    };

    #[test]
    fn equilibrium_divides_by_lattice_speed() {
        let f_eq = equilibrium(DENSITY, Vector2::new(0.3, -0.2), FAST.lattice_speed);
        let expected = [
            0.083_472_2,
            0.015_451_4,
            0.027_534_7,
            0.038_680_6,
            0.211_388_9,
            0.072_013_9,
            0.006_701_4,
            0.011_284_7,
            0.033_472_2,
        ];
        for i in 0..Q {
            assert!((f_eq[i] - expected[i]).abs() < 1e-6, "slot {}: {}", i, f_eq[i]);
        }
    }

    #[test]
    fn collide_cell_relaxes_by_tau_at_faster_lattice_speed() {
        let old = [0.06, 0.02, 0.01, 0.05, 0.2, 0.06, 0.03, 0.02, 0.05];
        let mut new = [0.0; Q];
        collide_cell(&old, DENSITY, Vector2::new(0.3, -0.2), FAST, &mut new);
        let expected = [
            0.089_340_3,
            0.014_314_2,
            0.031_918_4,
            0.035_850_7,
            0.214_236_1,
            0.075_017_4,
            0.000_876_7,
            0.009_105_9,
            0.029_340_3,
        ];
        for i in 0..Q {
            assert!((new[i] - expected[i]).abs() < 1e-6, "slot {}: {}", i, new[i]);
        }
    }

    #[test]
    fn unit_relaxation_time_jumps_to_equilibrium() {
        let params = Params {
            lattice_speed: 1.0,
            relaxation_time: 1.0,
        };
        let old = [0.3, 0.0, 0.1, 0.0, 0.2, 0.05, 0.0, 0.1, 0.0];
        let vel = Vector2::new(0.1, 0.0);
        let mut new = [0.0; Q];
        collide_cell(&old, 0.75, vel, params, &mut new);
        let f_eq = equilibrium(0.75, vel, 1.0);
        for i in 0..Q {
            assert!((new[i] - f_eq[i]).abs() < 1e-7);
        }
    }
}

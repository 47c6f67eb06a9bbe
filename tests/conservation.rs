use lbm_d2q9::{
    physics::{collision, stream},
    Boundary, BoundaryMask, Direction, Lattice, LatticeDims, MacroscopicField, NoForcing, Params,
    Q,
};
use proptest::prelude::*;

/// A random lattice and wall layout of the same random size.
fn lattice_and_walls() -> impl Strategy<Value = (Lattice, Boundary)> {
    (2usize..9, 2usize..9).prop_flat_map(|(cols, rows)| {
        let cells = cols * rows;
        (
            prop::collection::vec(prop::array::uniform9(0.0f32..1.0), cells),
            prop::collection::vec(prop::bool::weighted(0.25), cells),
        )
            .prop_map(move |(values, walls)| {
                let dims = LatticeDims::new(cols, rows).unwrap();
                let lattice = Lattice::from_cells(dims, values).unwrap();
                let texels = walls.iter().map(|&w| if w { 1.0 } else { 0.0 }).collect();
                let mask = BoundaryMask::from_texels(cols, rows, texels).unwrap();
                (lattice, Boundary::new(dims, mask))
            })
    })
}

proptest! {
    /// Streaming only moves values between slots, so total mass is unchanged
    #[test]
    fn streaming_conserves_mass((old, boundary) in lattice_and_walls()) {
        let mut new = Lattice::zeroed(old.dims());
        stream::stream(&old, &boundary, &mut new);
        let before = old.total_mass();
        let after = new.total_mass();
        prop_assert!((before - after).abs() <= 1e-9 * before.max(1.0),
            "mass {} became {}", before, after);
    }

    /// Every value reaching a fluid cell next to a wall came from the
    /// opposite slot of that same cell
    #[test]
    fn bounce_back_stays_in_the_cell((old, boundary) in lattice_and_walls()) {
        let dims = old.dims();
        let mut new = Lattice::zeroed(dims);
        stream::stream(&old, &boundary, &mut new);
        for y in 0..dims.rows {
            for x in 0..dims.cols {
                if boundary.is_solid((x, y)) {
                    prop_assert_eq!(new.cell((x, y)), old.cell((x, y)));
                    continue;
                }
                for dir in Direction::ALL {
                    if boundary.is_solid_toward((x, y), dir.offset()) {
                        prop_assert_eq!(
                            new.cell((x, y))[dir.opposite().index()],
                            old.cell((x, y))[dir.index()]
                        );
                    }
                }
            }
        }
    }

    /// BGK relaxes toward an equilibrium with the same density
    #[test]
    fn collision_conserves_cell_mass(
        (old, _) in lattice_and_walls(),
        tau in 0.55f32..2.0,
    ) {
        let dims = old.dims();
        let params = Params::new(1.0, tau).unwrap();
        let mut field = MacroscopicField::new(dims);
        field.compute(&old, params, &NoForcing, 0.0);
        let mut new = Lattice::zeroed(dims);
        collision::collide(&old, &field, params, &mut new);
        for y in 0..dims.rows {
            for x in 0..dims.cols {
                let before = old.mass_at((x, y));
                let after = new.mass_at((x, y));
                prop_assert!((before - after).abs() <= 1e-4 * before.max(1.0),
                    "cell {:?}: {} became {}", (x, y), before, after);
            }
        }
    }
}

#[test]
fn lattice_rejects_wrong_cell_count() {
    let dims = LatticeDims::new(3, 3).unwrap();
    assert!(Lattice::from_cells(dims, vec![[0.0; Q]; 8]).is_err());
}

use super::{
    boundary::Boundary,
    lattice::{Lattice, LatticeDims},
    stencil::Direction,
};
use rayon::prelude::*;

/// Moves every distribution one lattice step along its direction, writing
/// into `new`. A value whose target cell is wall is reflected back into the
/// opposite slot of the cell it came from instead.
///
/// Each destination row pulls from at most three source rows, so rows are
/// filled independently and in parallel. Solid cells do not stream and are
/// copied through unchanged.
pub fn stream(old: &Lattice, boundary: &Boundary, new: &mut Lattice) {
    assert_eq!(old.dims(), new.dims());
    let dims = old.dims();
    new.par_rows_mut().enumerate().for_each(|(y, new_row)| {
        for (x, new_cell) in new_row.iter_mut().enumerate() {
            if boundary.is_solid((x, y)) {
                *new_cell = *old.cell((x, y));
                continue;
            }
            for dir in Direction::ALL {
                let (slot, from) = source_of(dims, boundary, (x, y), dir);
                new_cell[dir.index()] = old.cell(from)[slot];
            }
        }
    });
}

/// Where the value arriving in slot `dir` of fluid cell `pos` comes from,
/// as `(slot, cell)`.
///
/// Upstream is the cell one step against `dir`. If that cell is fluid its
/// `dir` value advects in. Otherwise this cell's own `dir.opposite()`
/// value, which was heading into the wall, bounces back.
fn source_of(
    dims: LatticeDims,
    boundary: &Boundary,
    pos: (usize, usize),
    dir: Direction,
) -> (usize, (usize, usize)) {
    let back = dir.opposite().offset();
    match dims.neighbor(pos, back) {
        Some(upstream) if !boundary.is_solid(upstream) => (dir.index(), upstream),
        _ => (dir.opposite().index(), pos),
    }
}

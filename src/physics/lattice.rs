use super::stencil::{rest_distribution, Q};
use crate::error::{Error, Result};
use rayon::prelude::*;

/// Grid size in cells. Fixed for the lifetime of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeDims {
    pub cols: usize,
    pub rows: usize,
}

impl LatticeDims {
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::invalid_config(format!(
                "grid must be non-empty, got {}x{}",
                cols, rows
            )));
        }
        Ok(Self { cols, rows })
    }
    pub fn cells(self) -> usize {
        self.cols * self.rows
    }
    pub fn index(self, (x, y): (usize, usize)) -> usize {
        debug_assert!(x < self.cols && y < self.rows);
        y * self.cols + x
    }
    /// The cell one step of `(dx, dy)` away, or `None` past the grid edge.
    pub fn neighbor(self, (x, y): (usize, usize), (dx, dy): (isize, isize)) -> Option<(usize, usize)> {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx >= self.cols as isize || ny >= self.rows as isize {
            None
        } else {
            Some((nx as usize, ny as usize))
        }
    }
    pub fn as_tuple(self) -> (usize, usize) {
        (self.cols, self.rows)
    }
}

/// One generation of distribution values: nine per cell, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    dims: LatticeDims,
    cells: Vec<[f32; Q]>,
}

impl Lattice {
    /// A lattice with every slot zeroed.
    pub fn zeroed(dims: LatticeDims) -> Self {
        Self {
            dims,
            cells: vec![[0.0; Q]; dims.cells()],
        }
    }
    pub fn from_cells(dims: LatticeDims, cells: Vec<[f32; Q]>) -> Result<Self> {
        if cells.len() != dims.cells() {
            return Err(Error::DimensionMismatch {
                expected: dims.as_tuple(),
                found: (cells.len(), 1),
            });
        }
        Ok(Self { dims, cells })
    }
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }

    /// Sets every cell to the rest equilibrium `f[i] = w[i]`.
    pub fn initialize(&mut self) {
        let rest = rest_distribution();
        self.cells.par_iter_mut().for_each(|cell| *cell = rest);
    }

    pub fn cell(&self, pos: (usize, usize)) -> &[f32; Q] {
        &self.cells[self.dims.index(pos)]
    }
    pub fn cell_mut(&mut self, pos: (usize, usize)) -> &mut [f32; Q] {
        let i = self.dims.index(pos);
        &mut self.cells[i]
    }
    pub fn mass_at(&self, pos: (usize, usize)) -> f32 {
        self.cell(pos).iter().sum()
    }
    pub fn total_mass(&self) -> f64 {
        self.cells
            .par_iter()
            .map(|cell| cell.iter().map(|&f| f as f64).sum::<f64>())
            .sum()
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, [f32; Q]> {
        self.cells.chunks(self.dims.cols)
    }
    pub(crate) fn row(&self, y: usize) -> &[[f32; Q]] {
        let cols = self.dims.cols;
        &self.cells[y * cols..(y + 1) * cols]
    }
    pub(crate) fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, [f32; Q]> {
        let cols = self.dims.cols;
        self.cells.par_chunks_mut(cols)
    }

    /// Flattens into the texture layout consumed by display code: `cols`
    /// texels wide and `rows * 9` texels tall, where texel `(x, y * 9 + i)`
    /// holds direction `i` of cell `(x, y)`.
    pub fn to_texture(&self) -> Vec<f32> {
        let cols = self.dims.cols;
        let mut texels = vec![0.0; self.cells.len() * Q];
        texels
            .par_chunks_mut(cols * Q)
            .zip(self.cells.par_chunks(cols))
            .for_each(|(band, row)| {
                for (x, cell) in row.iter().enumerate() {
                    for (i, &f) in cell.iter().enumerate() {
                        band[i * cols + x] = f;
                    }
                }
            });
        texels
    }
}

use super::lattice::LatticeDims;
use crate::error::{Error, Result};

/// Value read for any sample outside the mask. Everything past the edge of
/// the texture is wall.
const BORDER: f32 = 1.0;

/// A scalar field over the unit square; nonzero marks solid, no-slip wall.
///
/// The mask has its own resolution and is read with bilinear filtering, so
/// it may be finer than the lattice it is applied to.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryMask {
    cols: usize,
    rows: usize,
    texels: Vec<f32>,
}

impl BoundaryMask {
    /// A mask without obstacles. The grid edge still reflects.
    pub fn open(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            texels: vec![0.0; cols * rows],
        }
    }
    pub fn from_texels(cols: usize, rows: usize, texels: Vec<f32>) -> Result<Self> {
        if texels.len() != cols * rows {
            return Err(Error::DimensionMismatch {
                expected: (cols, rows),
                found: (texels.len(), 1),
            });
        }
        Ok(Self { cols, rows, texels })
    }
    pub fn from_fn(cols: usize, rows: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let texels = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { cols, rows, texels }
    }
    pub fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }
    pub fn get(&self, (x, y): (usize, usize)) -> f32 {
        self.texels[y * self.cols + x]
    }
    pub fn set(&mut self, (x, y): (usize, usize), value: f32) {
        self.texels[y * self.cols + x] = value;
    }

    fn texel(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x >= self.cols as isize || y >= self.rows as isize {
            BORDER
        } else {
            self.texels[y as usize * self.cols + x as usize]
        }
    }

    /// Bilinear sample at texel-space coordinates, where texel `(i, j)` has
    /// its centre at `(i, j)`.
    fn sample_texel_space(&self, tx: f32, ty: f32) -> f32 {
        let x0 = tx.floor();
        let y0 = ty.floor();
        let fx = tx - x0;
        let fy = ty - y0;
        let (x0, y0) = (x0 as isize, y0 as isize);
        let top = self.texel(x0, y0) * (1.0 - fx) + self.texel(x0 + 1, y0) * fx;
        let bottom = self.texel(x0, y0 + 1) * (1.0 - fx) + self.texel(x0 + 1, y0 + 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Bilinear sample at normalized `[0, 1]²` coordinates.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        self.sample_texel_space(u * self.cols as f32 - 0.5, v * self.rows as f32 - 0.5)
    }

    /// Samples at the centre of lattice cell `(x, y)` of a `dims` lattice.
    ///
    /// Same point as `sample((x + 0.5) / cols, (y + 0.5) / rows)`, computed
    /// without the round trip through normalized coordinates so that a mask
    /// at lattice resolution lands exactly on texel centres.
    pub fn sample_cell(&self, dims: LatticeDims, (x, y): (isize, isize)) -> f32 {
        let sx = self.cols as f32 / dims.cols as f32;
        let sy = self.rows as f32 / dims.rows as f32;
        self.sample_texel_space(
            (x as f32 + 0.5) * sx - 0.5,
            (y as f32 + 0.5) * sy - 0.5,
        )
    }
}

/// Per-cell solid flags for one lattice, resolved from a [`BoundaryMask`].
#[derive(Clone, Debug)]
pub struct Boundary {
    dims: LatticeDims,
    mask: BoundaryMask,
    solid: Vec<bool>,
}

impl Boundary {
    pub fn new(dims: LatticeDims, mask: BoundaryMask) -> Self {
        let solid = (0..dims.rows)
            .flat_map(|y| (0..dims.cols).map(move |x| (x, y)))
            .map(|(x, y)| mask.sample_cell(dims, (x as isize, y as isize)) > 0.0)
            .collect();
        Self { dims, mask, solid }
    }
    pub fn mask(&self) -> &BoundaryMask {
        &self.mask
    }
    pub fn is_solid(&self, pos: (usize, usize)) -> bool {
        self.solid[self.dims.index(pos)]
    }
    /// Whether the cell one step of `offset` from `pos` is wall. Off-grid
    /// cells always are.
    pub fn is_solid_toward(&self, pos: (usize, usize), offset: (isize, isize)) -> bool {
        match self.dims.neighbor(pos, offset) {
            Some(n) => self.is_solid(n),
            None => true,
        }
    }
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }
}

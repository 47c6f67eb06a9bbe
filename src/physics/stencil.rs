//! The D2Q9 stencil shared by every stage.
//!
//! Directions are ordered so that `i` and `8 - i` point in opposite
//! directions, with the rest direction in the middle.

use cgmath::Vector2;

pub const Q: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East = 0,
    NorthEast = 1,
    SouthEast = 2,
    North = 3,
    Rest = 4,
    South = 5,
    NorthWest = 6,
    SouthWest = 7,
    West = 8,
}

#[rustfmt::skip]
const OFFSETS: [(isize, isize); Q] = [
    ( 1, 0), ( 1, 1), ( 1, -1),
    ( 0, 1), ( 0, 0), ( 0, -1),
    (-1, 1), (-1, -1), (-1, 0),
];

pub const LATTICE: [Vector2<f32>; Q] = {
    const fn v((dx, dy): (isize, isize)) -> Vector2<f32> {
        Vector2::new(dx as f32, dy as f32)
    }
    [
        v(OFFSETS[0]),
        v(OFFSETS[1]),
        v(OFFSETS[2]),
        v(OFFSETS[3]),
        v(OFFSETS[4]),
        v(OFFSETS[5]),
        v(OFFSETS[6]),
        v(OFFSETS[7]),
        v(OFFSETS[8]),
    ]
};

pub const WEIGHT: [f32; Q] = {
    let a = 1.0 / 9.0;
    let b = 1.0 / 36.0;
    [a, b, b, a, 4.0 / 9.0, a, b, b, a]
};

impl Direction {
    pub const ALL: [Direction; Q] = [
        Direction::East,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::North,
        Direction::Rest,
        Direction::South,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::West,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
    pub const fn from_index(i: usize) -> Direction {
        Self::ALL[i]
    }
    pub const fn opposite(self) -> Direction {
        Self::ALL[Q - 1 - self.index()]
    }
    /// One lattice step in this direction, as `(dx, dy)`.
    pub const fn offset(self) -> (isize, isize) {
        OFFSETS[self.index()]
    }
    pub const fn velocity(self) -> Vector2<f32> {
        LATTICE[self.index()]
    }
    pub const fn weight(self) -> f32 {
        WEIGHT[self.index()]
    }
}

/// The distribution of a unit-density cell at rest.
pub const fn rest_distribution() -> [f32; Q] {
    WEIGHT
}

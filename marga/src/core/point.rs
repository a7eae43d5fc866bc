//! Point and coordinate types for navigable spaces.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The 4 orthogonal neighbors, in search push order (+y, +x, -y, -x)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x - 1, self.y),
        ]
    }

    /// The 8 neighbors: orthogonal first, then diagonals.
    ///
    /// Indices `4..8` are always the diagonal moves.
    #[inline]
    pub fn neighbors_8(&self) -> [GridCoord; 8] {
        [
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x + 1, self.y + 1),
            GridCoord::new(self.x + 1, self.y - 1),
            GridCoord::new(self.x - 1, self.y - 1),
            GridCoord::new(self.x - 1, self.y + 1),
        ]
    }

    /// Direction from `self` to `other` reduced by the gcd of its components.
    ///
    /// Two steps along the same straight line yield the same reduced direction,
    /// regardless of their length.
    #[inline]
    pub fn reduced_direction(&self, other: &GridCoord) -> GridCoord {
        let d = *other - *self;
        let g = gcd(d.x.unsigned_abs(), d.y.unsigned_abs()) as i32;
        if g == 0 {
            d
        } else {
            GridCoord::new(d.x / g, d.y / g)
        }
    }

    /// Cell centre in world coordinates (one unit per cell)
    #[inline]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.x as f32, self.y as f32)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// World coordinates (f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length (magnitude) of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &WorldPoint) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product (z-component of 3D cross product)
    #[inline]
    pub fn cross(&self, other: &WorldPoint) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Both components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

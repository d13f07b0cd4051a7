use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Integer lattice point `(x, y)` with `0 <= x, y < grid_size` once wrapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Reduce both axes modulo `grid_size` into `0..grid_size`.
    ///
    /// Uses `rem_euclid`, so `-1` wraps to `grid_size - 1`.
    #[inline]
    pub fn wrap(x: i64, y: i64, grid_size: u32) -> Self {
        let g = i64::from(grid_size);
        Self {
            x: x.rem_euclid(g),
            y: y.rem_euclid(g),
        }
    }

    #[inline]
    pub fn in_bounds(&self, grid_size: u32) -> bool {
        let g = i64::from(grid_size);
        (0..g).contains(&self.x) && (0..g).contains(&self.y)
    }

    /// Edge vector `other - self`.
    #[inline]
    pub fn edge_to(&self, other: GridPoint) -> (i64, i64) {
        (other.x - self.x, other.y - self.y)
    }

    /// Drawing coordinate `origin + self * cell_size`.
    #[inline]
    pub fn to_canvas(&self, origin: Vector2<f64>, cell_size: f64) -> Vector2<f64> {
        origin + Vector2::new(self.x as f64, self.y as f64) * cell_size
    }
}

impl From<(i64, i64)> for GridPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Z-component of `(b - a) × (c - b)`.
///
/// Zero iff `a, b, c` are collinear, which includes zero-length edges.
/// Widened to `i128`: on a grid near `u32::MAX` a single product exceeds `i64`.
#[inline]
pub fn cross(a: GridPoint, b: GridPoint, c: GridPoint) -> i128 {
    let (ux, uy) = a.edge_to(b);
    let (vx, vy) = b.edge_to(c);
    i128::from(ux) * i128::from(vy) - i128::from(uy) * i128::from(vx)
}

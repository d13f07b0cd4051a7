use std::collections::HashSet;
use std::fmt;

use nalgebra::Vector2;
use serde::Serialize;

use super::types::{cross, GridPoint};

/// Why a vertex list does not form a valid closed path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathDefect {
    TooShort,
    OutOfBounds { index: usize, point: GridPoint },
    ZeroLengthEdge { index: usize },
    Collinear { index: usize },
    Repeated { index: usize, point: GridPoint },
}

impl fmt::Display for PathDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "path needs at least one vertex"),
            Self::OutOfBounds { index, point } => {
                write!(f, "vertex {index} at ({}, {}) is off the grid", point.x, point.y)
            }
            Self::ZeroLengthEdge { index } => write!(f, "edge {index} has zero length"),
            Self::Collinear { index } => write!(f, "no turn at vertex {index}"),
            Self::Repeated { index, point } => {
                write!(f, "vertex {index} repeats ({}, {})", point.x, point.y)
            }
        }
    }
}

impl std::error::Error for PathDefect {}

/// Closed lattice path: `N` distinct vertices followed by the first one again.
///
/// Invariants
/// - every point lies in `0..grid_size` on both axes;
/// - vertices are pairwise distinct;
/// - interior edges have nonzero length and every interior vertex is a real
///   turn (`cross != 0` for the triples ending at `N-1`);
/// - the two turns at the closing vertex are not checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClosedPath {
    grid_size: u32,
    points: Vec<GridPoint>,
}

impl ClosedPath {
    /// Validate `vertices` (without the closing duplicate) and close the loop.
    pub fn close(mut vertices: Vec<GridPoint>, grid_size: u32) -> Result<Self, PathDefect> {
        validate(&vertices, grid_size)?;
        let first = vertices[0];
        vertices.push(first);
        Ok(Self {
            grid_size,
            points: vertices,
        })
    }

    #[inline]
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// All `N + 1` points, first == last.
    #[inline]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// The `N` distinct vertices.
    #[inline]
    pub fn vertices(&self) -> &[GridPoint] {
        &self.points[..self.points.len() - 1]
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.points.len() - 1
    }

    /// Consecutive point pairs, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = (GridPoint, GridPoint)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// First edge, drawn alone on the empty grid as a starting hint.
    pub fn first_edge(&self) -> Option<(GridPoint, GridPoint)> {
        self.edges().next()
    }

    /// Whether the loop goes straight (or doubles back) at either end of the
    /// closing edge. Such paths are still valid.
    pub fn closing_is_collinear(&self) -> bool {
        let v = self.vertices();
        let n = v.len();
        if n < 3 {
            return true;
        }
        cross(v[n - 2], v[n - 1], v[0]) == 0 || cross(v[n - 1], v[0], v[1]) == 0
    }

    /// Points mapped to drawing coordinates, in path order.
    pub fn to_canvas(&self, origin: Vector2<f64>, cell_size: f64) -> Vec<Vector2<f64>> {
        self.points
            .iter()
            .map(|p| p.to_canvas(origin, cell_size))
            .collect()
    }
}

fn validate(vertices: &[GridPoint], grid_size: u32) -> Result<(), PathDefect> {
    if vertices.is_empty() {
        return Err(PathDefect::TooShort);
    }
    for (index, p) in vertices.iter().enumerate() {
        if !p.in_bounds(grid_size) {
            return Err(PathDefect::OutOfBounds { index, point: *p });
        }
    }
    for (index, w) in vertices.windows(2).enumerate() {
        if w[0] == w[1] {
            return Err(PathDefect::ZeroLengthEdge { index });
        }
    }
    for (index, w) in vertices.windows(3).enumerate() {
        if cross(w[0], w[1], w[2]) == 0 {
            return Err(PathDefect::Collinear { index: index + 1 });
        }
    }
    let mut seen = HashSet::with_capacity(vertices.len());
    for (index, p) in vertices.iter().enumerate() {
        if !seen.insert(*p) {
            return Err(PathDefect::Repeated { index, point: *p });
        }
    }
    Ok(())
}

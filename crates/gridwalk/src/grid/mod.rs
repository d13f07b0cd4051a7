//! Lattice points on a toroidal grid and the closed paths built from them.
//!
//! Purpose
//! - `GridPoint`: 0-indexed integer coordinate, wrapped with Euclidean
//!   remainder so a move off one edge re-enters on the opposite one.
//! - `ClosedPath`: immutable, validated vertex loop (first == last) handed to
//!   the rendering side.
//!
//! Conventions
//! - Collinearity is exact: integer cross product of consecutive edge vectors,
//!   computed on wrapped coordinates (what gets drawn), not on the torus.
//! - The closing edge is not held to the interior rules; see
//!   `ClosedPath::closing_is_collinear`.

mod path;
mod types;

pub use path::{ClosedPath, PathDefect};
pub use types::{cross, GridPoint};

#[cfg(test)]
mod tests;

//! Closed lattice paths for "trace this path, then redraw it" worksheets.
//!
//! The core is a constrained random walk on a toroidal `G×G` grid
//! (`walk`), with a convex-hull alternative (`hull`) and seeded,
//! replayable generators on top (`source`).
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Rendering is the caller's job: paths are handed out in 0-indexed grid
//!   coordinates, see `GridPoint::to_canvas`.

pub mod api;
mod cfg;
pub mod error;
pub mod grid;
pub mod hull;
pub mod source;
pub mod walk;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::PathError;
pub use grid::{ClosedPath, GridPoint};
pub use walk::{generate_path, WalkCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::PathError;
    pub use crate::grid::{cross, ClosedPath, GridPoint, PathDefect};
    pub use crate::hull::{draw_hull_path, HullCfg};
    pub use crate::source::{
        Exercise, ExerciseKind, PathGenerator, ReplayToken, VertexCount, WorksheetCfg,
        WorksheetGenerator,
    };
    pub use crate::walk::{generate_path, PathWalker, WalkCfg, WalkStats};
    pub use nalgebra::Vector2 as Vec2;
}

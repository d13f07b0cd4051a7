//! Curated internal API (UNSTABLE).
//!
//! A convenience surface for the CLI and benches. Breaking changes are
//! allowed; prefer these re-exports over deep module paths.

// Grid and paths
pub use crate::grid::{cross, ClosedPath, GridPoint, PathDefect};
// Random walk
pub use crate::walk::{
    generate_path, is_admissible, step_candidate, PathWalker, WalkCfg, WalkStats,
};
// Convex hulls
pub use crate::hull::{convex_hull, draw_hull_path, HullCfg};
// Generators
pub use crate::source::{
    Exercise, ExerciseKind, HullGenParams, HullGenerator, PathGenerator, PathSample,
    ReplayToken, VertexCount, WalkGenParams, WalkGenerator, WorksheetCfg, WorksheetGenerator,
};
pub use crate::error::PathError;

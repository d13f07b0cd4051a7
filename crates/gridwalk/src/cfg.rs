//! Default parameters (internal).
//!
//! Policy
//! - Defaults reproduce the worksheet batch the generator was tuned for:
//!   an 8×8 grid, walks of 5–7 vertices with stride 3.5 and at most a
//!   quarter turn per step, hulls over 7–15 random points.
//! - Callers override through `WalkCfg` / `HullCfg` / `WorksheetCfg`; these
//!   constants only seed the `Default` impls.

use std::f64::consts::FRAC_PI_4;

pub(crate) const GRID_SIZE: u32 = 8;
pub(crate) const WALK_POINTS: usize = 6;
pub(crate) const WALK_POINTS_MIN: usize = 5;
pub(crate) const WALK_POINTS_MAX: usize = 7;
pub(crate) const STEP_SIZE: f64 = 3.5;
pub(crate) const MAX_TURN: f64 = FRAC_PI_4;
pub(crate) const HULL_POINTS_MIN: usize = 7;
pub(crate) const HULL_POINTS_MAX: usize = 15;

/// Candidates tried for a single vertex before the walk gives up.
pub(crate) const MAX_ATTEMPTS_PER_VERTEX: usize = 1_000;
/// Candidates tried over a whole walk.
pub(crate) const MAX_TOTAL_ATTEMPTS: usize = 100_000;
/// Instances a generator may skip before surfacing the last error.
pub(crate) const MAX_INSTANCE_ATTEMPTS: u32 = 16;

pub(crate) const WALK_PROBABILITY: f64 = 0.5;
pub(crate) const PAGES: usize = 50;

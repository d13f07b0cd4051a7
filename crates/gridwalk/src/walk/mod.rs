//! Constrained random walk producing closed, non-degenerate grid polygons.
//!
//! Model
//! - Start at a uniform random cell, heading angle 0.
//! - Each attempt perturbs the heading by `U[-max_turn, max_turn]`, moves by
//!   `step_size` along it, truncates the displacement toward zero and wraps
//!   the result onto the `G×G` torus.
//! - A candidate is rejected if it stays in place, revisits a vertex, or goes
//!   straight on from the previous edge. The heading keeps its perturbation
//!   across rejections, so the next attempt starts from where the last left off.
//! - After `num_points` vertices the first one is appended to close the loop.
//!
//! Retries are bounded per vertex and per walk; running out is reported as
//! `PathError::ConstraintUnsatisfiable` rather than spinning forever.
//!
//! Randomness comes only from the `Rng` handed in, so a seeded generator
//! reproduces the same path.

use std::f64::consts::TAU;

use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cfg;
use crate::error::PathError;
use crate::grid::{cross, ClosedPath, GridPoint};

/// Random-walk parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkCfg {
    /// Distinct vertices in the loop (the path has one more point).
    pub num_points: usize,
    /// Stride of each move before truncation and wrapping.
    pub step_size: f64,
    /// Maximum heading change per attempt, radians.
    pub max_turn: f64,
    /// Torus modulus `G`.
    pub grid_size: u32,
    pub max_attempts_per_vertex: usize,
    pub max_total_attempts: usize,
}

impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            num_points: cfg::WALK_POINTS,
            step_size: cfg::STEP_SIZE,
            max_turn: cfg::MAX_TURN,
            grid_size: cfg::GRID_SIZE,
            max_attempts_per_vertex: cfg::MAX_ATTEMPTS_PER_VERTEX,
            max_total_attempts: cfg::MAX_TOTAL_ATTEMPTS,
        }
    }
}

impl WalkCfg {
    pub fn validate(&self) -> Result<(), PathError> {
        if self.num_points < 1 {
            return Err(PathError::invalid("num_points must be >= 1"));
        }
        if self.grid_size < 1 {
            return Err(PathError::invalid("grid_size must be >= 1"));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(PathError::invalid("step_size must be finite and > 0"));
        }
        if !(0.0..=TAU).contains(&self.max_turn) {
            return Err(PathError::invalid("max_turn must lie in [0, 2π]"));
        }
        if self.max_attempts_per_vertex == 0 || self.max_total_attempts == 0 {
            return Err(PathError::invalid("attempt budgets must be > 0"));
        }
        let cells = u64::from(self.grid_size) * u64::from(self.grid_size);
        if self.num_points as u64 > cells {
            return Err(PathError::unsatisfiable(format!(
                "{} distinct vertices do not fit on a {}x{} grid",
                self.num_points, self.grid_size, self.grid_size
            )));
        }
        Ok(())
    }
}

/// Attempt counters of one walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Candidates drawn.
    pub attempts: usize,
    /// Candidates thrown away.
    pub rejections: usize,
}

/// Walk state: current heading, placed vertices, counters.
#[derive(Clone, Debug)]
pub struct PathWalker {
    cfg: WalkCfg,
    angle: f64,
    points: Vec<GridPoint>,
    stats: WalkStats,
}

impl PathWalker {
    pub fn new(cfg: WalkCfg) -> Result<Self, PathError> {
        cfg.validate()?;
        let capacity = cfg.num_points;
        Ok(Self {
            cfg,
            angle: 0.0,
            points: Vec::with_capacity(capacity + 1),
            stats: WalkStats::default(),
        })
    }

    #[inline]
    pub fn cfg(&self) -> &WalkCfg {
        &self.cfg
    }

    /// Vertices placed so far.
    #[inline]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    #[inline]
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Reset the walk and place the first vertex uniformly on the grid.
    pub fn seed_start<R: Rng>(&mut self, rng: &mut R) -> GridPoint {
        let g = i64::from(self.cfg.grid_size);
        let start = GridPoint::new(rng.gen_range(0..g), rng.gen_range(0..g));
        self.angle = 0.0;
        self.points.clear();
        self.points.push(start);
        self.stats = WalkStats::default();
        start
    }

    /// Place one more vertex, or `None` once the retry ceiling is hit.
    ///
    /// Seeds the start vertex first if the walk is empty.
    pub fn try_extend<R: Rng>(&mut self, rng: &mut R) -> Option<GridPoint> {
        let last = match self.points.last() {
            Some(p) => *p,
            None => return Some(self.seed_start(rng)),
        };
        let budget = self
            .cfg
            .max_total_attempts
            .saturating_sub(self.stats.attempts)
            .min(self.cfg.max_attempts_per_vertex);
        for _ in 0..budget {
            self.stats.attempts += 1;
            if self.cfg.max_turn > 0.0 {
                self.angle += rng.gen_range(-self.cfg.max_turn..=self.cfg.max_turn);
            }
            let candidate =
                step_candidate(last, self.angle, self.cfg.step_size, self.cfg.grid_size);
            if is_admissible(&self.points, candidate) {
                self.points.push(candidate);
                return Some(candidate);
            }
            self.stats.rejections += 1;
        }
        None
    }

    /// Run a full walk from a fresh start and close it.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<ClosedPath, PathError> {
        self.seed_start(rng);
        while self.points.len() < self.cfg.num_points {
            if self.try_extend(rng).is_none() {
                debug!(
                    placed = self.points.len(),
                    wanted = self.cfg.num_points,
                    attempts = self.stats.attempts,
                    "walk exhausted retry budget"
                );
                return Err(PathError::unsatisfiable(format!(
                    "no admissible vertex {} of {} after {} attempts",
                    self.points.len() + 1,
                    self.cfg.num_points,
                    self.stats.attempts
                )));
            }
        }
        ClosedPath::close(self.points.clone(), self.cfg.grid_size)
            .map_err(|defect| PathError::degenerate(defect.to_string()))
    }
}

/// Generate one closed random-walk path.
pub fn generate_path<R: Rng>(cfg: &WalkCfg, rng: &mut R) -> Result<ClosedPath, PathError> {
    PathWalker::new(cfg.clone())?.run(rng)
}

/// Quantized move from `last` along `angle`.
///
/// The displacement is truncated toward zero (not rounded), then the target
/// is wrapped onto the grid. Each component is reduced modulo `grid_size`
/// while still a float: `%` is exact on integral `f64`, so any finite stride
/// lands where the unbounded integer sum would, without overflowing `i64`.
#[inline]
pub fn step_candidate(last: GridPoint, angle: f64, step_size: f64, grid_size: u32) -> GridPoint {
    let g = f64::from(grid_size);
    let d = (Vector2::new(angle.cos(), angle.sin()) * step_size).map(|c| c.trunc().rem_euclid(g));
    GridPoint::wrap(last.x + d.x as i64, last.y + d.y as i64, grid_size)
}

/// Whether `candidate` may follow `points`.
///
/// Rejects staying in place, revisiting any vertex, and (with two or more
/// vertices placed) continuing on the line of the last edge.
pub fn is_admissible(points: &[GridPoint], candidate: GridPoint) -> bool {
    let n = points.len();
    let Some(&last) = points.last() else {
        return true;
    };
    if candidate == last || points.contains(&candidate) {
        return false;
    }
    n < 2 || cross(points[n - 2], last, candidate) != 0
}

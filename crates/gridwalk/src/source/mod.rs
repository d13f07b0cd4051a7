//! Seeded, replayable path sources and the worksheet batch generator.
//!
//! Why this design
//! - Every sample carries the params snapshot plus a replay token
//!   `(seed, index)`; regenerating from the token yields the same path, which
//!   is what tests and re-prints rely on.
//! - `PathGenerator` exposes streaming (`generate_next`) and replay
//!   (`regenerate`) so callers can take either path without duplicating logic.
//! - A failed instance (walk out of retries, flat hull) is skipped by moving to
//!   the next token; only after `max_attempts` consecutive failures does the
//!   error reach the caller.

mod worksheet;

pub use worksheet::{Exercise, ExerciseKind, WorksheetCfg, WorksheetGenerator};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cfg;
use crate::error::PathError;
use crate::grid::ClosedPath;
use crate::hull::{draw_hull_path, HullCfg};
use crate::walk::{generate_path, WalkCfg};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexCount {
    Fixed(usize),
    /// Inclusive on both ends.
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n,
            VertexCount::Uniform { min, max } => rng.gen_range(min..=max.max(min)),
        }
    }

    pub fn min(&self) -> usize {
        match *self {
            VertexCount::Fixed(n) => n,
            VertexCount::Uniform { min, .. } => min,
        }
    }

    pub fn max(&self) -> usize {
        match *self {
            VertexCount::Fixed(n) => n,
            VertexCount::Uniform { min, max } => max.max(min),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One generated item plus replay metadata.
#[derive(Clone, Debug)]
pub struct PathSample<T, P, R> {
    pub item: T,
    pub params: P,
    pub replay: R,
}

/// Common trait for reproducible path sources.
pub trait PathGenerator {
    type Params: Clone;
    type Replay: Clone;
    type Output;

    fn params(&self) -> &Self::Params;

    fn generate_next(
        &mut self,
    ) -> Result<Option<PathSample<Self::Output, Self::Params, Self::Replay>>, PathError>;

    fn regenerate(&self, replay: &Self::Replay) -> Result<Self::Output, PathError>;
}

/// Try consecutive tokens until `sample` succeeds, skipping retryable failures.
fn next_with_retries<T>(
    seed: u64,
    next_index: &mut u64,
    max_attempts: u32,
    mut sample: impl FnMut(ReplayToken) -> Result<T, PathError>,
) -> Result<(T, ReplayToken), PathError> {
    let mut last_err = PathError::unsatisfiable("no attempts made");
    for _ in 0..max_attempts.max(1) {
        let token = ReplayToken {
            seed,
            index: *next_index,
        };
        *next_index = next_index.wrapping_add(1);
        match sample(token) {
            Ok(item) => return Ok((item, token)),
            Err(err) if err.is_retryable() => {
                debug!(seed, index = token.index, error = %err, "skipping instance");
                last_err = err;
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_err)
}

/// Parameters for the random-walk source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkGenParams {
    pub walk: WalkCfg,
    pub max_attempts: u32,
}

impl Default for WalkGenParams {
    fn default() -> Self {
        Self {
            walk: WalkCfg::default(),
            max_attempts: cfg::MAX_INSTANCE_ATTEMPTS,
        }
    }
}

/// Streams random-walk paths.
pub struct WalkGenerator {
    params: WalkGenParams,
    seed: u64,
    next_index: u64,
}

impl WalkGenerator {
    pub fn new(params: WalkGenParams, seed: u64) -> Result<Self, PathError> {
        params.walk.validate()?;
        if params.max_attempts == 0 {
            return Err(PathError::invalid("max_attempts must be > 0"));
        }
        Ok(Self {
            params,
            seed,
            next_index: 0,
        })
    }
}

impl PathGenerator for WalkGenerator {
    type Params = WalkGenParams;
    type Replay = ReplayToken;
    type Output = ClosedPath;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(
        &mut self,
    ) -> Result<Option<PathSample<ClosedPath, WalkGenParams, ReplayToken>>, PathError> {
        let walk = &self.params.walk;
        let (path, replay) =
            next_with_retries(self.seed, &mut self.next_index, self.params.max_attempts, |tok| {
                generate_path(walk, &mut tok.to_std_rng())
            })?;
        Ok(Some(PathSample {
            item: path,
            params: self.params.clone(),
            replay,
        }))
    }

    fn regenerate(&self, replay: &ReplayToken) -> Result<ClosedPath, PathError> {
        generate_path(&self.params.walk, &mut replay.to_std_rng())
    }
}

/// Parameters for the convex-hull source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HullGenParams {
    pub hull: HullCfg,
    pub max_attempts: u32,
}

impl Default for HullGenParams {
    fn default() -> Self {
        Self {
            hull: HullCfg::default(),
            max_attempts: cfg::MAX_INSTANCE_ATTEMPTS,
        }
    }
}

/// Streams convex-hull paths.
pub struct HullGenerator {
    params: HullGenParams,
    seed: u64,
    next_index: u64,
}

impl HullGenerator {
    pub fn new(params: HullGenParams, seed: u64) -> Result<Self, PathError> {
        params.hull.validate()?;
        if params.max_attempts == 0 {
            return Err(PathError::invalid("max_attempts must be > 0"));
        }
        Ok(Self {
            params,
            seed,
            next_index: 0,
        })
    }
}

impl PathGenerator for HullGenerator {
    type Params = HullGenParams;
    type Replay = ReplayToken;
    type Output = ClosedPath;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(
        &mut self,
    ) -> Result<Option<PathSample<ClosedPath, HullGenParams, ReplayToken>>, PathError> {
        let hull = self.params.hull;
        let (path, replay) =
            next_with_retries(self.seed, &mut self.next_index, self.params.max_attempts, |tok| {
                draw_hull_path(&hull, &mut tok.to_std_rng())
            })?;
        Ok(Some(PathSample {
            item: path,
            params: self.params,
            replay,
        }))
    }

    fn regenerate(&self, replay: &ReplayToken) -> Result<ClosedPath, PathError> {
        draw_hull_path(&self.params.hull, &mut replay.to_std_rng())
    }
}

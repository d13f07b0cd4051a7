//! Worksheet batches: one exercise per page, each either a random walk or a
//! convex hull, drawn on the same grid.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{next_with_retries, PathGenerator, PathSample, ReplayToken, VertexCount};
use crate::cfg;
use crate::error::PathError;
use crate::grid::{ClosedPath, GridPoint};
use crate::hull::{draw_hull_path, HullCfg};
use crate::walk::{generate_path, WalkCfg};

/// Batch configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorksheetCfg {
    pub grid_size: u32,
    /// Exercises in the batch.
    pub pages: usize,
    /// Chance that a page uses a random walk instead of a hull.
    pub walk_probability: f64,
    pub walk_points: VertexCount,
    pub step_size: f64,
    pub max_turn: f64,
    pub hull_points: VertexCount,
    /// Instances skipped per page before giving up.
    pub max_attempts: u32,
}

impl Default for WorksheetCfg {
    fn default() -> Self {
        Self {
            grid_size: cfg::GRID_SIZE,
            pages: cfg::PAGES,
            walk_probability: cfg::WALK_PROBABILITY,
            walk_points: VertexCount::Uniform {
                min: cfg::WALK_POINTS_MIN,
                max: cfg::WALK_POINTS_MAX,
            },
            step_size: cfg::STEP_SIZE,
            max_turn: cfg::MAX_TURN,
            hull_points: VertexCount::Uniform {
                min: cfg::HULL_POINTS_MIN,
                max: cfg::HULL_POINTS_MAX,
            },
            max_attempts: cfg::MAX_INSTANCE_ATTEMPTS,
        }
    }
}

impl WorksheetCfg {
    pub fn validate(&self) -> Result<(), PathError> {
        if !(0.0..=1.0).contains(&self.walk_probability) {
            return Err(PathError::invalid("walk_probability must lie in [0, 1]"));
        }
        if self.max_attempts == 0 {
            return Err(PathError::invalid("max_attempts must be > 0"));
        }
        if self.walk_probability > 0.0 {
            self.walk_cfg(self.walk_points.min()).validate()?;
            self.walk_cfg(self.walk_points.max()).validate()?;
        }
        if self.walk_probability < 1.0 {
            self.hull_cfg().validate()?;
        }
        Ok(())
    }

    fn walk_cfg(&self, num_points: usize) -> WalkCfg {
        WalkCfg {
            num_points,
            step_size: self.step_size,
            max_turn: self.max_turn,
            grid_size: self.grid_size,
            ..WalkCfg::default()
        }
    }

    fn hull_cfg(&self) -> HullCfg {
        HullCfg {
            vertex_count: self.hull_points,
            grid_size: self.grid_size,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Walk,
    Hull,
}

/// One page: the answer-key path and the hint shown on the empty grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub kind: ExerciseKind,
    pub path: ClosedPath,
}

impl Exercise {
    /// First edge of the path, drawn alone as a starting point.
    pub fn hint(&self) -> Option<(GridPoint, GridPoint)> {
        self.path.first_edge()
    }

    /// Every edge of the path, closing edge included.
    pub fn answer(&self) -> Vec<(GridPoint, GridPoint)> {
        self.path.edges().collect()
    }
}

/// Generator for a batch of `pages` exercises.
pub struct WorksheetGenerator {
    params: WorksheetCfg,
    seed: u64,
    next_index: u64,
    yielded: usize,
}

impl WorksheetGenerator {
    pub fn new(params: WorksheetCfg, seed: u64) -> Result<Self, PathError> {
        params.validate()?;
        Ok(Self {
            params,
            seed,
            next_index: 0,
            yielded: 0,
        })
    }

    fn exercise_with_token(cfg: &WorksheetCfg, token: ReplayToken) -> Result<Exercise, PathError> {
        let mut rng = token.to_std_rng();
        if rng.gen_bool(cfg.walk_probability) {
            let walk = cfg.walk_cfg(cfg.walk_points.sample(&mut rng));
            Ok(Exercise {
                kind: ExerciseKind::Walk,
                path: generate_path(&walk, &mut rng)?,
            })
        } else {
            Ok(Exercise {
                kind: ExerciseKind::Hull,
                path: draw_hull_path(&cfg.hull_cfg(), &mut rng)?,
            })
        }
    }
}

impl PathGenerator for WorksheetGenerator {
    type Params = WorksheetCfg;
    type Replay = ReplayToken;
    type Output = Exercise;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(
        &mut self,
    ) -> Result<Option<PathSample<Exercise, WorksheetCfg, ReplayToken>>, PathError> {
        if self.yielded >= self.params.pages {
            return Ok(None);
        }
        let cfg = &self.params;
        let (exercise, replay) =
            next_with_retries(self.seed, &mut self.next_index, cfg.max_attempts, |tok| {
                Self::exercise_with_token(cfg, tok)
            })?;
        self.yielded += 1;
        Ok(Some(PathSample {
            item: exercise,
            params: self.params.clone(),
            replay,
        }))
    }

    fn regenerate(&self, replay: &ReplayToken) -> Result<Exercise, PathError> {
        Self::exercise_with_token(&self.params, *replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(gen: &mut WorksheetGenerator) -> Vec<PathSample<Exercise, WorksheetCfg, ReplayToken>> {
        let mut out = Vec::new();
        while let Some(s) = gen.generate_next().unwrap() {
            out.push(s);
        }
        out
    }

    #[test]
    fn batch_stops_after_pages() {
        let cfg = WorksheetCfg {
            pages: 10,
            ..WorksheetCfg::default()
        };
        let mut gen = WorksheetGenerator::new(cfg, 2025).unwrap();
        let batch = drain(&mut gen);
        assert_eq!(batch.len(), 10);
        assert!(gen.generate_next().unwrap().is_none());
        for s in &batch {
            assert_eq!(s.item.path.grid_size(), 8);
            assert_eq!(gen.regenerate(&s.replay).unwrap(), s.item);
            assert_eq!(s.item.hint(), s.item.answer().first().copied());
            assert_eq!(s.item.answer().len(), s.item.path.num_vertices());
        }
    }

    #[test]
    fn walk_pages_use_five_to_seven_vertices() {
        let cfg = WorksheetCfg {
            pages: 30,
            walk_probability: 1.0,
            ..WorksheetCfg::default()
        };
        let mut gen = WorksheetGenerator::new(cfg, 1).unwrap();
        for s in drain(&mut gen) {
            assert_eq!(s.item.kind, ExerciseKind::Walk);
            assert!((5..=7).contains(&s.item.path.num_vertices()));
        }
    }

    #[test]
    fn hull_only_batches() {
        let cfg = WorksheetCfg {
            pages: 20,
            walk_probability: 0.0,
            ..WorksheetCfg::default()
        };
        let mut gen = WorksheetGenerator::new(cfg, 3).unwrap();
        let batch = drain(&mut gen);
        assert_eq!(batch.len(), 20);
        assert!(batch.iter().all(|s| s.item.kind == ExerciseKind::Hull));
    }

    #[test]
    fn same_seed_same_batch() {
        let cfg = WorksheetCfg {
            pages: 8,
            ..WorksheetCfg::default()
        };
        let a: Vec<_> = drain(&mut WorksheetGenerator::new(cfg.clone(), 99).unwrap())
            .into_iter()
            .map(|s| s.item)
            .collect();
        let b: Vec<_> = drain(&mut WorksheetGenerator::new(cfg, 99).unwrap())
            .into_iter()
            .map(|s| s.item)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_batches_are_rejected() {
        let bad_prob = WorksheetCfg {
            walk_probability: 1.5,
            ..WorksheetCfg::default()
        };
        assert!(WorksheetGenerator::new(bad_prob, 0).is_err());
        let crowded = WorksheetCfg {
            grid_size: 2,
            walk_probability: 1.0,
            walk_points: VertexCount::Fixed(5),
            ..WorksheetCfg::default()
        };
        assert!(matches!(
            WorksheetGenerator::new(crowded, 0),
            Err(PathError::ConstraintUnsatisfiable { .. })
        ));
    }

    #[test]
    fn config_loads_from_partial_json() {
        let cfg: WorksheetCfg =
            serde_json::from_str(r#"{"pages": 3, "walk_points": {"fixed": 6}}"#).unwrap();
        assert_eq!(cfg.pages, 3);
        assert_eq!(cfg.walk_points, VertexCount::Fixed(6));
        assert_eq!(cfg.grid_size, 8);
        assert!(cfg.validate().is_ok());
    }
}

//! Convex-hull paths: the alternative path source.
//!
//! Sample `n` lattice points uniformly on the grid, keep their convex hull
//! (counter-clockwise, boundary points on a hull edge dropped) and close it.
//! Hulls are strictly convex, so every turn is real and no rejection loop is
//! needed; only an all-collinear sample is refused.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cfg;
use crate::error::PathError;
use crate::grid::{cross, ClosedPath, GridPoint};
use crate::source::VertexCount;

/// Hull sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullCfg {
    /// Number of random points fed to the hull (not the hull size).
    pub vertex_count: VertexCount,
    pub grid_size: u32,
}

impl Default for HullCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform {
                min: cfg::HULL_POINTS_MIN,
                max: cfg::HULL_POINTS_MAX,
            },
            grid_size: cfg::GRID_SIZE,
        }
    }
}

impl HullCfg {
    pub fn validate(&self) -> Result<(), PathError> {
        if self.grid_size < 2 {
            return Err(PathError::invalid("hull paths need grid_size >= 2"));
        }
        if self.vertex_count.min() < 3 {
            return Err(PathError::invalid("hull paths need at least 3 sample points"));
        }
        Ok(())
    }
}

/// Draw a closed convex path.
pub fn draw_hull_path<R: Rng>(cfg: &HullCfg, rng: &mut R) -> Result<ClosedPath, PathError> {
    cfg.validate()?;
    let n = cfg.vertex_count.sample(rng);
    let g = i64::from(cfg.grid_size);
    let points: Vec<GridPoint> = (0..n)
        .map(|_| GridPoint::new(rng.gen_range(0..g), rng.gen_range(0..g)))
        .collect();
    let hull = convex_hull(&points);
    if hull.len() < 3 {
        return Err(PathError::degenerate(format!(
            "hull of {n} points has {} vertices",
            hull.len()
        )));
    }
    ClosedPath::close(hull, cfg.grid_size).map_err(|defect| PathError::degenerate(defect.to_string()))
}

/// Andrew's monotone chain in exact integer arithmetic (CCW, no collinear
/// boundary points, no duplicate).
pub fn convex_hull(points: &[GridPoint]) -> Vec<GridPoint> {
    let mut pts = points.to_vec();
    pts.sort();
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<GridPoint> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<GridPoint> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

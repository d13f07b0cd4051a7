//! Sidecar describing how a worksheet batch was produced.
//!
//! A batch is fully determined by `(gridwalk version, params, seed)`; the
//! sidecar records those next to the page counts so a sheet can be re-printed
//! or audited without opening the batch file.

use anyhow::{Context, Result};
use gridwalk::api::{Exercise, ExerciseKind};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Per-kind page counts of a generated batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub pages: usize,
    pub walks: usize,
    pub hulls: usize,
    /// Walk pages whose closing turn is straight or doubles back.
    pub straight_closings: usize,
}

impl BatchSummary {
    pub fn of<'a>(exercises: impl IntoIterator<Item = &'a Exercise>) -> Self {
        let mut summary = Self::default();
        for ex in exercises {
            summary.pages += 1;
            match ex.kind {
                ExerciseKind::Walk => {
                    summary.walks += 1;
                    if ex.path.closing_is_collinear() {
                        summary.straight_closings += 1;
                    }
                }
                ExerciseKind::Hull => summary.hulls += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub gridwalk_version: &'static str,
    pub seed: u64,
    pub summary: BatchSummary,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn for_batch(out: &Path, seed: u64, summary: BatchSummary, params: Value) -> Self {
        Self {
            code_rev: code_rev(),
            gridwalk_version: gridwalk::VERSION,
            seed,
            summary,
            params,
            outputs: vec![out.display().to_string()],
        }
    }

    /// Write `<stem>.provenance.json` beside `artifact`.
    pub fn write_beside(&self, artifact: &Path) -> Result<PathBuf> {
        let path = sidecar_path(artifact);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Commit the binary was built from: `GIT_COMMIT` at runtime or build time,
/// else `git rev-parse HEAD`, else `"unknown"`.
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_owned))
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        })
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_beside_batch() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/grilles.json")),
            Path::new("/tmp/out/grilles.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("sheets/week3")),
            Path::new("sheets/week3.provenance.json")
        );
    }

    #[test]
    fn summary_counts_kinds_and_straight_closings() {
        use gridwalk::api::{ClosedPath, GridPoint};
        let pts = |raw: &[(i64, i64)]| -> Vec<GridPoint> {
            raw.iter().copied().map(GridPoint::from).collect()
        };
        let bent = ClosedPath::close(pts(&[(0, 0), (3, 1), (1, 4)]), 8).unwrap();
        let straight = ClosedPath::close(pts(&[(0, 0), (1, 0), (2, 2), (3, 0)]), 8).unwrap();
        let pages = [
            Exercise { kind: ExerciseKind::Walk, path: bent.clone() },
            Exercise { kind: ExerciseKind::Walk, path: straight },
            Exercise { kind: ExerciseKind::Hull, path: bent },
        ];
        assert_eq!(
            BatchSummary::of(&pages),
            BatchSummary {
                pages: 3,
                walks: 2,
                hulls: 1,
                straight_closings: 1
            }
        );
    }

    #[test]
    fn sidecar_records_seed_and_page_split() {
        let dir = tempdir().unwrap();
        let batch = dir.path().join("batch.json");
        fs::write(&batch, "{}").unwrap();
        let summary = BatchSummary {
            pages: 3,
            walks: 2,
            hulls: 1,
            straight_closings: 0,
        };
        let prov = Provenance::for_batch(&batch, 42, summary, json!({"grid_size": 8}));
        let written = prov.write_beside(&batch).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(written).unwrap()).unwrap();
        assert_eq!(parsed["seed"], 42);
        assert_eq!(parsed["summary"]["walks"], 2);
        assert_eq!(parsed["summary"]["hulls"], 1);
        assert_eq!(parsed["params"]["grid_size"], 8);
        assert_eq!(parsed["outputs"][0], batch.display().to_string().as_str());
        assert_eq!(parsed["gridwalk_version"], gridwalk::VERSION);
    }
}

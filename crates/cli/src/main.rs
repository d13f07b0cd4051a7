use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridwalk::api::{
    ExerciseKind, GridPoint, PathGenerator, PathWalker, ReplayToken, WalkCfg, WorksheetCfg,
    WorksheetGenerator,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod provenance;

use provenance::{BatchSummary, Provenance};

#[derive(Parser)]
#[command(name = "gridwalk")]
#[command(about = "Generate closed grid paths for trace-and-redraw worksheets")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate one random-walk path and print it as JSON
    Walk {
        /// JSON file with `WalkCfg` fields; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        points: Option<usize>,
        #[arg(long)]
        step: Option<f64>,
        /// Maximum heading change per step, radians
        #[arg(long)]
        max_turn: Option<f64>,
        #[arg(long)]
        grid: Option<u32>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Generate a worksheet batch (walks and hulls) into a JSON file
    Batch {
        #[arg(long)]
        out: PathBuf,
        /// JSON file with `WorksheetCfg` fields; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        pages: Option<usize>,
        #[arg(long)]
        grid: Option<u32>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print build info and the default walk and worksheet parameters
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Walk {
            config,
            points,
            step,
            max_turn,
            grid,
            seed,
        } => {
            let mut cfg: WalkCfg = config::load_or_default(config.as_deref())?;
            config::apply(&mut cfg.num_points, points);
            config::apply(&mut cfg.step_size, step);
            config::apply(&mut cfg.max_turn, max_turn);
            config::apply(&mut cfg.grid_size, grid);
            walk(cfg, seed)
        }
        Action::Batch {
            out,
            config,
            pages,
            grid,
            seed,
        } => {
            let mut cfg: WorksheetCfg = config::load_or_default(config.as_deref())?;
            config::apply(&mut cfg.pages, pages);
            config::apply(&mut cfg.grid_size, grid);
            batch(cfg, seed, &out)
        }
        Action::Report => report(),
    }
}

fn walk(cfg: WalkCfg, seed: u64) -> Result<()> {
    tracing::info!(
        num_points = cfg.num_points,
        step_size = cfg.step_size,
        max_turn = cfg.max_turn,
        grid_size = cfg.grid_size,
        seed,
        "walk"
    );
    let replay = ReplayToken { seed, index: 0 };
    let mut walker = PathWalker::new(cfg.clone())?;
    let path = walker.run(&mut replay.to_std_rng())?;
    let stats = walker.stats();
    tracing::info!(
        attempts = stats.attempts,
        rejections = stats.rejections,
        "walk_done"
    );
    let doc = serde_json::json!({
        "params": cfg,
        "replay": replay,
        "stats": {
            "attempts": stats.attempts,
            "rejections": stats.rejections
        },
        "closing_is_collinear": path.closing_is_collinear(),
        "path": path
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// One page of the batch file.
#[derive(Serialize)]
struct PageRecord<'a> {
    page: usize,
    kind: ExerciseKind,
    replay: ReplayToken,
    points: &'a [GridPoint],
    hint: Option<(GridPoint, GridPoint)>,
}

fn batch(cfg: WorksheetCfg, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(pages = cfg.pages, grid_size = cfg.grid_size, seed, out = %out.display(), "batch");
    let mut gen = WorksheetGenerator::new(cfg.clone(), seed)?;
    let mut samples = Vec::with_capacity(cfg.pages);
    while let Some(sample) = gen.generate_next()? {
        samples.push(sample);
    }
    let pages: Vec<PageRecord<'_>> = samples
        .iter()
        .enumerate()
        .map(|(page, s)| PageRecord {
            page,
            kind: s.item.kind,
            replay: s.replay,
            points: s.item.path.points(),
            hint: s.item.hint(),
        })
        .collect();
    let summary = BatchSummary::of(samples.iter().map(|s| &s.item));
    tracing::info!(
        pages = summary.pages,
        walks = summary.walks,
        hulls = summary.hulls,
        straight_closings = summary.straight_closings,
        "batch_done"
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let doc = serde_json::json!({ "params": cfg, "pages": pages });
    fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let prov = Provenance::for_batch(out, seed, summary, serde_json::to_value(&cfg)?)
        .write_beside(out)?;
    tracing::info!(provenance = %prov.display(), "provenance_written");
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "gridwalk_version": gridwalk::VERSION,
        "defaults": {
            "walk": WalkCfg::default(),
            "worksheet": WorksheetCfg::default()
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

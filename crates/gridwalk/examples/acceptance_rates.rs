//! Print how often the walk rejects candidates, per grid size.
//!
//! Usage:
//!   cargo run -p gridwalk --example acceptance_rates -- 6
//!
//! The argument is the vertex count (default 6). For each grid size the
//! example runs 500 seeded walks with the default stride and turn limit and
//! prints mean/max attempts and the number of walks that ran out of budget.

use gridwalk::api::{PathWalker, ReplayToken, WalkCfg};

fn main() {
    let num_points = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(6);
    for grid_size in [4u32, 6, 8, 12, 20] {
        let cfg = WalkCfg {
            num_points,
            grid_size,
            ..WalkCfg::default()
        };
        let mut walker = match PathWalker::new(cfg) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("grid {grid_size}: {e}");
                continue;
            }
        };
        let (mut total, mut worst, mut failed) = (0usize, 0usize, 0usize);
        let runs = 500u64;
        for index in 0..runs {
            let mut rng = ReplayToken { seed: 2025, index }.to_std_rng();
            if walker.run(&mut rng).is_err() {
                failed += 1;
            }
            let attempts = walker.stats().attempts;
            total += attempts;
            worst = worst.max(attempts);
        }
        println!(
            "grid {grid_size:>2}: mean attempts {:.1}, max {worst}, failed {failed}/{runs}",
            total as f64 / runs as f64
        );
    }
}

/// Bench command: measures exact solver latency on random tournaments.
///
/// Useful for picking `max_vertices`: search time roughly doubles with every
/// extra system, so the limit should sit where latency is still acceptable.
use mfasrank_core::{solve, PairCounts, SystemId, Tournament};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use crate::bail;

/// Result of solving one random tournament.
struct SingleResult {
    latency_secs: f64,
    expanded: usize,
    cost: u64,
}

/// Random tournament over `n` systems: each ordered pair gets 0..=max_weight wins.
fn random_tournament(rng: &mut impl Rng, n: usize, max_weight: u32) -> (Vec<SystemId>, Tournament) {
    let vertices: Vec<SystemId> = (0..n).map(|i| format!("sys{i:02}")).collect();
    let mut wins = PairCounts::new();
    for a in 0..n {
        for b in 0..n {
            let w = rng.random_range(0..=max_weight);
            if a != b && w > 0 {
                wins.insert((vertices[a].clone(), vertices[b].clone()), w);
            }
        }
    }
    (vertices, Tournament::reduce(&wins))
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx]
}

/// Run the benchmark for every size in `min_systems..=max_systems`.
pub fn run_bench(min_systems: usize, max_systems: usize, trials: usize, max_weight: u32, seed: Option<u64>) {
    if min_systems == 0 || min_systems > max_systems {
        bail(format!("Invalid system range {min_systems}..={max_systems}"));
    }
    if trials == 0 {
        bail("--trials must be at least 1");
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    eprintln!(
        "Running bench: {}..={} systems x {} trials (max pair weight {})",
        min_systems, max_systems, trials, max_weight
    );
    println!(" Systems | Mean ms |  p95 ms | Mean states | Mean cost");
    println!("---------|---------|---------|-------------|----------");

    for n in min_systems..=max_systems {
        let mut results = Vec::with_capacity(trials);
        for _ in 0..trials {
            let (vertices, tournament) = random_tournament(&mut rng, n, max_weight);
            let start = Instant::now();
            let solution = solve(&tournament, &vertices)
                .unwrap_or_else(|e| bail(format!("Solver failed on {n} systems: {e}")));
            results.push(SingleResult {
                latency_secs: start.elapsed().as_secs_f64(),
                expanded: solution.expanded,
                cost: solution.cost,
            });
        }

        let mut latencies: Vec<f64> = results.iter().map(|r| r.latency_secs * 1000.0).collect();
        latencies.sort_by(|a, b| a.total_cmp(b));
        let mean_ms = latencies.iter().sum::<f64>() / trials as f64;
        let mean_states = results.iter().map(|r| r.expanded).sum::<usize>() as f64 / trials as f64;
        let mean_cost = results.iter().map(|r| r.cost).sum::<u64>() as f64 / trials as f64;

        println!(
            "{:>8} | {:>7.2} | {:>7.2} | {:>11.0} | {:>9.2}",
            n,
            mean_ms,
            percentile(&latencies, 0.95),
            mean_states,
            mean_cost,
        );
    }
}

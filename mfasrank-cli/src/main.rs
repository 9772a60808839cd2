mod bench;
mod config;
mod output;
mod parse;

use clap::Parser;
use mfasrank_core::{rank_item, ItemRanking, RankOptions, DEFAULT_MAX_VERTICES};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::parse::Segments;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(
    name = "mfasrank",
    version,
    about = "Rank systems per segment from pairwise judgments (minimum feedback arc set)"
)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Convert an answer CSV into a per-segment ranking CSV
    Rank(RankArgs),
    /// Time the exact solver on random tournaments
    Bench(BenchArgs),
    /// Create a default config file at ~/.config/mfasrank/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// Answer CSV with segmentId, system1, system2 and cmp columns
    answer_csv: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output JSON instead of CSV
    #[arg(long, conflicts_with = "table")]
    json: bool,

    /// Output a human readable table instead of CSV
    #[arg(long)]
    table: bool,

    /// Refuse segments comparing more systems than this
    #[arg(long)]
    max_vertices: Option<usize>,

    /// Number of segments ranked in parallel
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Path to config file (default: ~/.config/mfasrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct BenchArgs {
    /// Smallest number of systems per tournament
    #[arg(long, default_value_t = 4)]
    min_systems: usize,

    /// Largest number of systems per tournament
    #[arg(long, default_value_t = 14)]
    max_systems: usize,

    /// Random tournaments per size
    #[arg(long, default_value_t = 5)]
    trials: usize,

    /// Maximum wins per ordered pair
    #[arg(long, default_value_t = 5)]
    max_weight: u32,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Bench(args) => bench::run_bench(
            args.min_systems,
            args.max_systems,
            args.trials,
            args.max_weight,
            args.seed,
        ),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set the vertex limit, parallelism, or column names.");
        }
    }
}

/// Rank every segment, in ascending segment order. Any failure aborts the run.
fn rank_segments(segments: &Segments, options: &RankOptions, jobs: usize) -> Vec<ItemRanking> {
    let rank_one = |(&src_id, judgments): (&i64, &Vec<_>)| {
        rank_item(src_id, judgments, options)
            .unwrap_or_else(|e| bail(format!("Segment {src_id}: {e}")))
    };

    if jobs <= 1 {
        return segments.iter().map(rank_one).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .unwrap_or_else(|e| bail(format!("Failed to start {jobs} worker threads: {e}")));
    // collect() on an indexed parallel iterator keeps segment order
    pool.install(|| {
        segments
            .iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(rank_one)
            .collect()
    })
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let max_vertices = args.max_vertices.or(cfg.max_vertices).unwrap_or(DEFAULT_MAX_VERTICES);
    if max_vertices == 0 {
        bail("--max-vertices must be at least 1");
    }
    let jobs = args.jobs.or(cfg.jobs).unwrap_or(1);

    let segments = parse::read_answer_file(&args.answer_csv, &cfg.columns)
        .unwrap_or_else(|e| bail(format!("{}: {e}", args.answer_csv.display())));

    debug!(max_vertices, jobs, "ranking segments");
    let rankings = rank_segments(&segments, &RankOptions { max_vertices }, jobs);

    let total_cost: u64 = rankings.iter().map(|r| r.cost).sum();
    let tied_pairs: usize = rankings.iter().map(|r| r.resolved_ties).sum();
    info!(segments = rankings.len(), total_cost, tied_pairs, "ranked all segments");

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(io::BufWriter::new(
            std::fs::File::create(path)
                .unwrap_or_else(|e| bail(format!("Failed to create {}: {e}", path.display()))),
        )),
        None => Box::new(io::stdout().lock()),
    };

    if args.json {
        output::write_json(&rankings, writer)
            .unwrap_or_else(|e| bail(format!("Failed to write JSON: {e}")));
    } else if args.table {
        output::write_table(&rankings, writer)
            .unwrap_or_else(|e| bail(format!("Failed to write table: {e}")));
    } else {
        let rows = output::write_csv(&rankings, writer)
            .unwrap_or_else(|e| bail(format!("Failed to write CSV: {e}")));
        info!(rows, "wrote ranking rows");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnConfig;

    const ANSWERS: &str = "segmentId,system1,system2,cmp\n\
                           2,A,B,<\n2,A,B,<\n2,A,B,<\n\
                           2,B,C,<\n2,B,C,<\n2,B,C,<\n\
                           2,C,A,<\n\
                           1,X,Y,=\n1,X,Y,=\n1,X,Y,=\n1,X,Y,=\n1,X,Y,>\n";

    fn ranked_csv(jobs: usize) -> String {
        let segments = parse::read_answers(ANSWERS.as_bytes(), &ColumnConfig::default()).unwrap();
        let rankings = rank_segments(&segments, &RankOptions::default(), jobs);
        let mut buf = Vec::new();
        output::write_csv(&rankings, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_end_to_end_csv() {
        let csv = ranked_csv(1);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "src_id,sys_id,rank");
        // Segment 1 first: X and Y tied by majority equality
        assert!(lines[1].starts_with("1,") && lines[1].ends_with(",1"));
        assert!(lines[2].starts_with("1,") && lines[2].ends_with(",1"));
        assert_eq!(&lines[3..], ["2,A,1", "2,B,2", "2,C,3"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        assert_eq!(ranked_csv(4), ranked_csv(1));
    }

    #[test]
    fn test_cli_parses_rank_flags() {
        let cli = Cli::try_parse_from(["mfasrank", "-v", "rank", "answers.csv", "--json", "--jobs", "3"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Rank(args) => {
                assert_eq!(args.answer_csv, PathBuf::from("answers.csv"));
                assert!(args.json);
                assert_eq!(args.jobs, Some(3));
            }
            _ => panic!("expected rank subcommand"),
        }
    }

    #[test]
    fn test_cli_rejects_json_with_table() {
        assert!(Cli::try_parse_from(["mfasrank", "rank", "a.csv", "--json", "--table"]).is_err());
    }
}

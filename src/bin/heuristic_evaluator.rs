use astar_pathfinding::grid::{Connectivity, Grid, GridPathfinder, Point};
use astar_pathfinding::heuristics::Heuristic;
use clap::Parser;
use std::collections::HashMap;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares grid heuristics on random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Side length of each square board
    #[clap(long, default_value_t = 40)]
    size: usize,

    /// Probability that a cell is blocked
    #[clap(short, long, default_value_t = 0.25)]
    density: f64,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Neighborhood: four or eight
    #[clap(short, long, default_value = "eight")]
    connectivity: Connectivity,
}

#[derive(Default)]
struct Tally {
    expanded: Vec<usize>,
    /// Boards where the path cost exceeded the uniform-cost baseline.
    suboptimal: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.size == 0 {
        eprintln!("Error: --size must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&args.density) {
        eprintln!("Error: --density must be between 0 and 1, got {}", args.density);
        std::process::exit(1);
    }

    let mut tallies: HashMap<Heuristic, Tally> = HashMap::new();
    let start = Point::new(0, 0);
    let goal = Point::new(args.size as i64 - 1, args.size as i64 - 1);

    println!(
        "Starting heuristic evaluation for {} boards of {}x{} ({:?}-connected)...",
        args.boards, args.size, args.size, args.connectivity
    );

    let mut solvable = 0;
    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let mut grid = Grid::random(args.size, args.size, args.density, current_seed);
        grid.unblock(start);
        grid.unblock(goal);

        let baseline = match GridPathfinder::new(&grid, args.connectivity, Heuristic::Zero).find(start, goal) {
            Ok(Some(path)) => path.cost(),
            Ok(None) => {
                println!("\nBoard {} (Seed: {}): no path, skipped", board_idx, current_seed);
                continue;
            }
            Err(e) => {
                warn!(board_idx, current_seed, error = %e, "endpoint rejected");
                continue;
            }
        };
        solvable += 1;

        println!("\nEvaluating Board {} (Seed: {}), optimal cost {:.3}", board_idx, current_seed, baseline);

        for heuristic in Heuristic::ALL {
            let finder = GridPathfinder::new(&grid, args.connectivity, heuristic);
            let Ok(Some(path)) = finder.find(start, goal) else {
                warn!(%heuristic, board_idx, "search lost a path the baseline found");
                continue;
            };
            let tally = tallies.entry(heuristic).or_default();
            tally.expanded.push(path.expanded());
            if path.cost() > baseline + 1e-9 {
                tally.suboptimal += 1;
            }
            println!(
                "  Heuristic: {:<10}, Cost: {:<8.3}, Expanded: {}",
                heuristic,
                path.cost(),
                path.expanded()
            );
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Boards evaluated: {} ({} solvable)", args.boards, solvable);
    println!("\n--- Average Expanded Nodes ---");

    let mut averages: Vec<(Heuristic, f64, usize)> = tallies
        .iter()
        .filter(|(_, t)| !t.expanded.is_empty())
        .map(|(h, t)| {
            let total: usize = t.expanded.iter().sum();
            (*h, total as f64 / t.expanded.len() as f64, t.suboptimal)
        })
        .collect();

    // Fewest expansions first
    averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (heuristic, avg, suboptimal) in averages {
        println!(
            "Heuristic {:<10}: Average Expanded = {:.2}, Suboptimal Paths = {}",
            heuristic, avg, suboptimal
        );
    }
}

use astar_pathfinding::grid::{Connectivity, Grid, GridPathfinder, Point};
use astar_pathfinding::heuristics::Heuristic;
use astar_pathfinding::utils::{draw_path, grid_from_str};
use astar_pathfinding::{AStar, PathOrder};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Finds the cheapest route across a grid file", long_about = None)]
struct Args {
    /// Start cell as x,y
    #[clap(short, long)]
    start: Point,

    /// Goal cell as x,y
    #[clap(short, long)]
    goal: Point,

    /// Neighborhood: four or eight
    #[clap(short, long, default_value = "eight")]
    connectivity: Connectivity,

    /// Distance estimate: zero, manhattan, euclidean, octile or chebyshev
    #[clap(long, default_value = "euclidean")]
    heuristic: Heuristic,

    /// Print the path from goal to start
    #[clap(long)]
    reversed: bool,

    /// Path to the grid file ('#' blocked, '.' or ' ' free)
    grid_file: PathBuf,
}

fn read_grid_file(path: &PathBuf) -> Result<Grid, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    grid_from_str(&content).map_err(|e| format!("Invalid grid format: {}", e))
}

fn run(args: &Args) -> Result<(), String> {
    let grid = read_grid_file(&args.grid_file)?;
    println!(
        "Loaded {}x{} grid from {}\n",
        grid.width(),
        grid.height(),
        args.grid_file.display()
    );

    grid.check_free(args.start).map_err(|e| format!("Invalid start: {}", e))?;
    grid.check_free(args.goal).map_err(|e| format!("Invalid goal: {}", e))?;

    let finder = GridPathfinder::new(&grid, args.connectivity, args.heuristic);
    let order = if args.reversed {
        PathOrder::Reversed
    } else {
        PathOrder::Forward
    };
    let Some(path) = finder.astar_with_order(args.start, args.goal, order) else {
        println!("No path from {} to {}.", args.start, args.goal);
        return Ok(());
    };

    let lines = grid.to_lines();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    print!(
        "{}",
        draw_path(&lines, &[args.start, args.goal], path.nodes(), '@', '*')
    );
    println!();
    println!("Steps ({}):", path.len().saturating_sub(1));
    for (i, p) in path.iter().enumerate() {
        println!("  {}: {}", i, p);
    }
    println!("Cost: {:.3}", path.cost());
    println!("Expanded nodes: {}", path.expanded());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

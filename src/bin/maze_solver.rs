use astar_pathfinding::maze::{Maze, MazeSolver};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Generates a maze and draws its solution", long_about = None)]
struct Args {
    /// Maze width in cells
    #[clap(long, default_value_t = 30)]
    width: usize,

    /// Maze height in cells
    #[clap(long, default_value_t = 30)]
    height: usize,

    /// Seed for maze generation
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

fn run(args: &Args) -> Result<(), String> {
    let maze = Maze::with_seed(args.width, args.height, args.seed).map_err(|e| e.to_string())?;
    println!(
        "Maze {}x{} (seed {}):\n{}",
        args.width, args.height, args.seed, maze
    );

    match MazeSolver::new(&maze).solve().map_err(|e| e.to_string())? {
        Some(path) => {
            println!("Solution:\n{}", maze.render(path.nodes()));
            println!("Length: {}", path.len());
            println!("Expanded nodes: {}", path.expanded());
        }
        None => println!("No solution found."),
    }
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

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sbls::{
    error::Result,
    model::{solve, Method, Outcome, SolveOptions},
    solver::{search::SearchBudget, stats::render_stats_table},
};

/// Searches for a spatially balanced Latin square of a given order.
#[derive(Parser, Debug)]
#[command(name = "sbls", version, about)]
struct Cli {
    /// Size of the square (0 builds the degenerate empty instance).
    #[arg(short = 'n', default_value_t = 0)]
    n: i64,

    /// Resolution method: "simple" or "advanced".
    #[arg(short = 'm', long, default_value = "simple")]
    method: String,

    /// Print the solved square.
    #[arg(short = 'p', long)]
    print_solution: bool,

    /// Give up after this many search decisions.
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Give up after this many seconds of search.
    #[arg(long)]
    max_seconds: Option<u64>,

    /// Emit the outcome and statistics as JSON instead of the report.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let method: Method = cli.method.parse()?;
    let options = SolveOptions {
        n: cli.n,
        method,
        budget: SearchBudget {
            max_nodes: cli.max_nodes,
            max_duration: cli.max_seconds.map(Duration::from_secs),
        },
    };

    if !cli.json {
        println!("Spatially Balanced Latin Square");
        println!();
        println!("Arguments:");
        println!("n = {}", cli.n);
        println!("method = {}", method);
        println!("printSolution = {}", cli.print_solution);
        println!();
        println!("{}*{} spatially balanced latin square problem instantiated.", cli.n, cli.n);
        println!();
        println!("solving problem...");
        println!();
    }

    let report = solve(&options)?;

    if cli.json {
        let payload = serde_json::json!({
            "outcome": report.outcome,
            "stats": report.stats,
        });
        println!("{payload:#}");
        return Ok(());
    }

    match &report.outcome {
        Outcome::Solved(square) => {
            println!("Solution found.");
            println!();
            if cli.print_solution {
                println!("Solution:");
                println!("{square}");
            }
        }
        Outcome::Unsatisfiable => {
            println!("No solution found");
            println!();
        }
        Outcome::TimedOut => {
            println!("Search budget exhausted before an outcome was reached");
            println!();
        }
    }

    println!("Resolution Statistics:");
    println!("nodes visited: {}", report.stats.nodes_visited);
    println!("backtracks:    {}", report.stats.backtracks);
    println!("{}", render_stats_table(&report.stats, &report.descriptors));

    Ok(())
}

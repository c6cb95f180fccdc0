use clap::{Parser, ValueEnum};
use ktopo::{Mode, SortError, edgelist, topological_sort};
use std::{path::PathBuf, process, time::Instant};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ktopo")]
#[command(about = "Topologically sorts a directed acyclic graph with Kahn's algorithm")]
#[command(version = "0.1.0")]
struct Cli {
    /// Edge-list file: node count on the first line, then `source,destination` lines
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Executor to run
    #[arg(long, value_enum, default_value = "serial")]
    mode: ModeArg,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Serial,
    Parallel,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Serial => Mode::Serial,
            ModeArg::Parallel => Mode::Parallel,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let list = match edgelist::read_edge_list(&cli.file) {
        Ok(list) => list,
        Err(err) => {
            eprintln!("{}: {err}", cli.file.display());
            process::exit(1);
        }
    };
    info!(
        "loaded {} node(s) and {} edge(s) from {}",
        list.num_nodes,
        list.edges.len(),
        cli.file.display()
    );

    let started = Instant::now();
    match topological_sort(list.num_nodes, &list.edges, cli.mode.into()) {
        Ok(order) => {
            info!("sorted {} node(s) in {:?}", order.len(), started.elapsed());
            for id in &order {
                println!("{id}");
            }
        }
        Err(SortError::CycleDetected { unprocessed }) => {
            let ids = unprocessed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            eprintln!("graph contains at least one cycle; unresolved nodes: {ids}");
            process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

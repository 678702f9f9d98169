//! Playground visualizer CLI
//!
//! Record one engine run and print its timeline as JSON lines on stdout,
//! optionally paced like the on-page animation.

use clap::{Parser, Subcommand};
use playground_async::{
    Combinator, CombinatorConfig, CombinatorRun, EventLoop, EventLoopConfig, TaskKind,
};
use playground_grid::{generate_maze, Algorithm, Grid, GridConfig, MazeConfig};
use playground_sort::{random_array, SortAlgorithm, SortConfig};
use playground_trees::{Bst, RecursionKind};
use playground_vis::{
    bst_search_timeline, event_loop_timeline, hanoi_timeline, nqueens_timeline, promise_timeline,
    recursion_timeline, search_timeline, sort_timeline, DriveOutcome, Driver, HanoiSpeed, Pace,
    Playback, RunGuard, Timeline, VisEvent,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(name = "playground-vis", about = "Record algorithm visualizations as JSON lines")]
struct Cli {
    /// Wait between events like the on-page animation instead of printing
    /// at once
    #[arg(long, global = true)]
    animate: bool,

    /// Sorting speed in ms per step, 1 to 100
    #[arg(long, global = true, default_value_t = 10)]
    sort_step_ms: u64,

    /// Hanoi speed: slow, normal or fast
    #[arg(long, global = true, default_value = "normal")]
    hanoi_speed: HanoiSpeed,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Grid pathfinding
    Search {
        /// bfs, dfs, dijkstra or astar
        #[arg(long, default_value = "astar")]
        algorithm: Algorithm,
        /// Scatter random walls over the maze layout
        #[arg(long)]
        maze: bool,
        /// Wall probability per cell when --maze is set
        #[arg(long, default_value_t = 0.3)]
        density: f64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Binary search tree lookup
    Bst {
        /// Values inserted in order
        #[arg(long, value_delimiter = ',', default_value = "50,30,70,20,40,60,80")]
        values: Vec<i64>,
        /// Value to search for
        #[arg(long, default_value_t = 60)]
        find: i64,
    },
    /// Sorting a random array
    Sort {
        /// bubble, quick, merge, insertion or selection
        #[arg(long, default_value = "bubble")]
        algorithm: SortAlgorithm,
        #[arg(long, default_value_t = 50)]
        size: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// N-Queens backtracking on boards of 1 to 8 squares a side
    Nqueens {
        #[arg(long, default_value_t = 8)]
        size: usize,
    },
    /// Tower of Hanoi
    Hanoi {
        #[arg(long, default_value_t = 3)]
        disks: u32,
    },
    /// Recursion call tree
    Recursion {
        /// fibonacci or factorial
        #[arg(long, default_value = "fibonacci")]
        kind: RecursionKind,
        #[arg(long, default_value_t = 5)]
        n: u32,
    },
    /// Event-loop phase simulation
    EventLoop {
        /// Tasks to queue, e.g. setTimeout,fetch,nextTick
        #[arg(long, value_delimiter = ',', default_value = "setTimeout,fetch,nextTick")]
        tasks: Vec<TaskKind>,
        /// Advance every task on every tick
        #[arg(long)]
        deterministic: bool,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 500)]
        max_ticks: usize,
    },
    /// Promise combinator evaluation over the default promises
    Promise {
        /// all, allSettled, race or any
        #[arg(long, default_value = "all")]
        combinator: Combinator,
    },
}

fn record(command: Command) -> playground_vis::Result<Timeline<VisEvent>> {
    let timeline = match command {
        Command::Search {
            algorithm,
            maze,
            density,
            seed,
        } => {
            let mut grid = if maze {
                generate_maze(&GridConfig::maze(), &MazeConfig { density, seed })?
            } else {
                Grid::new(&GridConfig::default())?
            };
            search_timeline(&mut grid, algorithm)
        }
        Command::Bst { values, find } => bst_search_timeline(&Bst::from_values(values), find),
        Command::Sort { algorithm, size, seed } => {
            let config = SortConfig {
                size,
                seed,
                ..SortConfig::default()
            };
            let input = random_array(&config, &mut StdRng::seed_from_u64(config.seed))?;
            sort_timeline(algorithm, input)
        }
        Command::Nqueens { size } => nqueens_timeline(size)?,
        Command::Hanoi { disks } => hanoi_timeline(disks),
        Command::Recursion { kind, n } => recursion_timeline(kind, n),
        Command::EventLoop {
            tasks,
            deterministic,
            seed,
            max_ticks,
        } => {
            let base = if deterministic {
                EventLoopConfig::deterministic()
            } else {
                EventLoopConfig::default()
            };
            let mut sim = EventLoop::new(EventLoopConfig { seed, ..base })?;
            for kind in tasks {
                sim.add_task(kind);
            }
            event_loop_timeline(&mut sim, max_ticks)
        }
        Command::Promise { combinator } => {
            let mut run = CombinatorRun::new(CombinatorConfig::default(), combinator)?;
            promise_timeline(&mut run)
        }
    };
    Ok(timeline)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    playground_logging::init();

    let cli = Cli::parse();
    let pace = Pace {
        sort_step_ms: cli.sort_step_ms,
        hanoi: cli.hanoi_speed,
        instant: !cli.animate,
    };
    let mut playback = Playback::new(record(cli.command)?);
    playback.set_pace(pace);
    tracing::info!(frames = playback.total_frames(), "timeline recorded");

    let guard = RunGuard::new();
    let interrupt = guard.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.reset();
        }
    });

    let mut failure = None;
    let driver = Driver::new(guard.clone());
    let outcome = driver
        .play(guard.start(), &mut playback, |event| match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(err) => {
                failure.get_or_insert(err);
            }
        })
        .await;

    match outcome {
        DriveOutcome::Completed { applied } => tracing::info!(applied, "timeline printed"),
        DriveOutcome::Cancelled { applied } => {
            tracing::warn!(applied, progress = playback.progress(), "playback interrupted")
        }
    }
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

mod terminal;

use std::{
    io::{self, BufRead},
    path::PathBuf,
    sync::{mpsc, Arc, Mutex},
    thread,
};

use algo_visualiser_core::{
    AlgorithmId, AlgorithmRunner, AppConfig, Catalog, Category, Command, RunStatus,
    VisualiserError,
};
use clap::{Parser, Subcommand};
use terminal::{ConsoleUi, OutputFormat, TargetSource};
use tracing_subscriber::EnvFilter;

fn main() -> algo_visualiser_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::List { category } => run_list(category.as_deref()),
        Commands::Run {
            algorithm,
            size,
            speed,
            seed,
            target,
            values,
            format,
        } => {
            let mut config = config;
            if let Some(size) = size {
                config.dataset.size = size;
            }
            if let Some(speed) = speed {
                config.playback.speed = speed;
            }
            if seed.is_some() {
                config.dataset.seed = seed;
            }
            config.validate()?;
            run_once(config, &algorithm, target, values, format)
        }
        Commands::Interactive { format } => run_interactive(config, format),
    }
}

fn run_list(category: Option<&str>) -> algo_visualiser_core::Result<()> {
    let catalog = Catalog::new();
    let categories = match category {
        Some(name) => vec![name.parse::<Category>()?],
        None => Category::ALL.to_vec(),
    };
    for category in categories {
        print_category(&catalog, category);
    }
    Ok(())
}

fn print_category(catalog: &Catalog, category: Category) {
    println!("{category}");
    for descriptor in catalog.in_category(category) {
        println!(
            "  {:<16} {:<22} time {:<18} space {}",
            descriptor.id, descriptor.name, descriptor.time, descriptor.space
        );
    }
}

fn run_once(
    config: AppConfig,
    algorithm: &str,
    target: Option<i64>,
    values: Option<Vec<u32>>,
    format: OutputFormat,
) -> algo_visualiser_core::Result<()> {
    let id: AlgorithmId = algorithm.parse()?;
    tracing::info!(algorithm = %id, size = config.dataset.size, speed = config.playback.speed, "running once");

    let targets = match target {
        Some(target) => TargetSource::Slot(Arc::new(Mutex::new(Some(target)))),
        None => TargetSource::Prompt,
    };
    let ui = ConsoleUi::new(format, targets);
    let mut runner = AlgorithmRunner::new(config, format.renderer(), ui);

    runner.select(id);
    if let Some(values) = values {
        runner.load_dataset(values)?;
    }

    match runner.start() {
        RunStatus::Completed => Ok(()),
        RunStatus::SearchTargetMissing => Err(VisualiserError::msg(
            "no search target given; pass --target or answer the prompt",
        )),
        status => {
            tracing::warn!(?status, "run did not complete");
            Ok(())
        }
    }
}

const HELP: &str = "\
commands:
  category <sorting|searching|tree|graph>   list a category
  select <algorithm>                        make an algorithm active
  target <n>                                search target for the next start
  start | stop | reset
  size <1-200> | speed <1-100> | generate
  list | help | quit";

/// Line-oriented shell. A worker thread owns the runner so `stop` and
/// `speed` take effect while a run is blocking it.
fn run_interactive(config: AppConfig, format: OutputFormat) -> algo_visualiser_core::Result<()> {
    let slot = Arc::new(Mutex::new(None));
    let ui = ConsoleUi::new(format, TargetSource::Slot(slot.clone()));
    let runner = AlgorithmRunner::new(config, format.renderer(), ui);
    let handle = runner.handle();
    let catalog = *runner.catalog();

    let (commands, inbox) = mpsc::channel::<Queued>();
    let worker = thread::Builder::new()
        .name("runner".to_string())
        .spawn(move || {
            let mut runner = runner;
            serve(&mut runner, inbox);
        })?;

    eprintln!("{HELP}");
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        let mut words = trimmed.split_whitespace();
        match words.next() {
            None => continue,
            Some("quit" | "exit") => break,
            Some("help") => {
                eprintln!("{HELP}");
                continue;
            }
            Some("list") => {
                for category in Category::ALL {
                    print_category(&catalog, category);
                }
                continue;
            }
            Some("target") => {
                match words.next().and_then(terminal::parse_target) {
                    Some(target) => {
                        if let Ok(mut slot) = slot.lock() {
                            *slot = Some(target);
                        }
                    }
                    None => eprintln!("usage: target <whole number>"),
                }
                continue;
            }
            Some(_) => {}
        }

        let command: Command = match trimmed.parse() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::SetSpeed(speed) => {
                if let Err(err) = handle.set_speed(speed) {
                    eprintln!("{err}");
                }
                continue;
            }
            Command::SelectCategory(category) => print_category(&catalog, category),
            _ => {}
        }
        if command.cancels_run() {
            handle.stop();
        }
        let queued = Queued {
            command,
            epoch: handle.stop_epoch(),
        };
        if commands.send(queued).is_err() {
            break;
        }
    }

    handle.stop();
    drop(commands);
    worker
        .join()
        .map_err(|_| VisualiserError::msg("runner thread panicked"))?;
    Ok(())
}

/// A command waiting for the worker, stamped with the stop epoch at the
/// time it was typed.
#[derive(Debug, Clone, Copy)]
struct Queued {
    command: Command,
    epoch: u64,
}

/// Worker loop. A queued `start` is dropped when a later line already
/// stopped the runner.
fn serve(runner: &mut AlgorithmRunner, inbox: mpsc::Receiver<Queued>) {
    for Queued { command, epoch } in inbox {
        let applied = match command {
            Command::Start => Ok(Some(runner.start_from(epoch))),
            other => runner.apply(other),
        };
        match applied {
            Ok(Some(RunStatus::SearchTargetMissing)) => {
                eprintln!("search aborted: set a target first with `target <n>`");
            }
            Ok(Some(status)) => tracing::debug!(?status, "run finished"),
            Ok(None) => {}
            Err(err) => eprintln!("{err}"),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Step-by-step algorithm visualiser", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the algorithm catalog.
    List {
        /// Only list one category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Run one algorithm to completion and exit.
    Run {
        /// Algorithm name, e.g. `bubble-sort` or `bfs`.
        algorithm: String,
        /// Number of values to generate.
        #[arg(long)]
        size: Option<usize>,
        /// Playback speed from 1 (slowest) to 100 (fastest).
        #[arg(long)]
        speed: Option<u32>,
        /// Seed for reproducible datasets.
        #[arg(long)]
        seed: Option<u64>,
        /// Search target; prompts on stdin when omitted.
        #[arg(long, allow_hyphen_values = true)]
        target: Option<i64>,
        /// Explicit dataset instead of a generated one.
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<u32>>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Read commands from stdin.
    Interactive {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use algo_visualiser_core::{
        RecordingRenderer, RecordingSleeper, ScriptedUi, SpeedControl, StepClock,
    };
    use clap::CommandFactory;

    use super::*;

    fn quiet_runner() -> (AlgorithmRunner, Arc<Mutex<RecordingRenderer>>, RecordingSleeper) {
        let frames = Arc::new(Mutex::new(RecordingRenderer::new()));
        let sleeper = RecordingSleeper::new();
        let clock = StepClock::new(SpeedControl::default(), sleeper.clone());
        let runner =
            AlgorithmRunner::with_clock(AppConfig::default(), clock, frames.clone(), ScriptedUi::new());
        (runner, frames, sleeper)
    }

    #[test]
    fn stop_typed_after_start_wins_in_the_queue() {
        let (mut runner, frames, sleeper) = quiet_runner();
        runner.select(AlgorithmId::Bubble);
        let handle = runner.handle();
        let drawn = frames.lock().unwrap().frames().len();

        let (commands, inbox) = mpsc::channel();
        handle.stop();
        commands
            .send(Queued {
                command: Command::Start,
                epoch: handle.stop_epoch(),
            })
            .unwrap();
        handle.stop();
        commands
            .send(Queued {
                command: Command::Stop,
                epoch: handle.stop_epoch(),
            })
            .unwrap();
        drop(commands);

        serve(&mut runner, inbox);
        assert_eq!(frames.lock().unwrap().frames().len(), drawn);
        assert!(sleeper.recorded().is_empty());
    }

    #[test]
    fn queued_start_runs_when_not_stopped() {
        let (mut runner, _frames, sleeper) = quiet_runner();
        let handle = runner.handle();
        let (commands, inbox) = mpsc::channel();
        for command in [Command::SelectAlgorithm(AlgorithmId::Bfs), Command::Start] {
            handle.stop();
            commands
                .send(Queued {
                    command,
                    epoch: handle.stop_epoch(),
                })
                .unwrap();
        }
        drop(commands);

        serve(&mut runner, inbox);
        assert_eq!(sleeper.recorded().len(), 5);
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_arguments() {
        let cli = Cli::parse_from([
            "algo-visualiser",
            "run",
            "binary-search",
            "--values",
            "3,1,2",
            "--target",
            "-4",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Run {
                algorithm,
                values,
                target,
                format,
                ..
            } => {
                assert_eq!(algorithm, "binary-search");
                assert_eq!(values, Some(vec![3, 1, 2]));
                assert_eq!(target, Some(-4));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

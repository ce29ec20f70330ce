//! Command-line host for the `hashiwoka` puzzle generator.
//!
//! Generates a puzzle for a requested number of components and prints it, and optionally its solution, to stdout
//! in the board notation. Diagnostics go to stderr through `tracing`; set `RUST_LOG` to see them.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use hashiwoka::{BoardGenerator, GenerationError, PuzzleState, DEFAULT_MAX_ORIGIN_ATTEMPTS};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Generate a Hashiwokakero puzzle")]
struct Cli {
    /// Number of components on the board, at least 2.
    #[arg(short, long, default_value_t = 10)]
    components: usize,
    /// Seed for a reproducible board; drawn at random if omitted.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Also print the solved board.
    #[arg(long)]
    solution: bool,
    /// Give up after this many failed attempts to place one component.
    #[arg(long, default_value_t = DEFAULT_MAX_ORIGIN_ATTEMPTS)]
    max_origin_attempts: usize,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to generate board: {0}")]
    Generation(#[from] GenerationError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to install tracing subscriber: {0}")]
    Logging(#[from] TryInitError),
}

fn init_logging() -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()?;
    Ok(())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let mut generator = cli
        .seed
        .map_or_else(BoardGenerator::new, BoardGenerator::with_seed)
        .with_max_origin_attempts(cli.max_origin_attempts);
    let mut state = PuzzleState::new(generator.generate(cli.components)?);
    info!(seed = generator.seed(), components = cli.components, "generated puzzle");

    writeln!(out, "seed {}, {}x{}", generator.seed(), state.height(), state.width())?;
    write!(out, "{}", state.board())?;

    if cli.solution {
        state.reveal_solution();
        if !state.verify() {
            error!("generated solution does not verify");
        }
        writeln!(out)?;
        write!(out, "{}", state.board())?;
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_logging().and_then(|()| {
        let stdout = io::stdout();
        run(&cli, &mut BufWriter::new(stdout.lock()))
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hashiwoka: {err}");
            ExitCode::FAILURE
        }
    }
}

//! `lazyrow` binary: a terminal image-gallery demo of windowed loading.

use clap::Parser;
use lazyrow::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ResolvedConfig,
};
use lazyrow::model::AppError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Scroll a virtual gallery whose tiles load lazily around the viewport.
///
/// Only the items near the viewport are resident; everything else is
/// evicted as you scroll. The left pane shows live memory bookkeeping.
#[derive(Debug, Parser)]
#[command(name = "lazyrow", version, about)]
struct Args {
    /// Path to a TOML config file (default: ~/.config/lazyrow/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of items in the gallery
    #[arg(long)]
    items: Option<usize>,

    /// Buffer rows preloaded beyond the viewport, each side
    #[arg(long, value_name = "ROWS")]
    buffer: Option<usize>,

    /// Items per row
    #[arg(long)]
    columns: Option<usize>,

    /// Seed for the simulated network
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated load failure probability in [0, 1]
    #[arg(long, value_name = "RATE")]
    fail_rate: Option<f64>,

    /// Shrink simulated load delays for quick demos
    #[arg(long)]
    fast: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            items: self.items,
            buffer_rows: self.buffer,
            columns: self.columns,
            seed: self.seed,
            fail_rate: self.fail_rate,
            fast: self.fast,
        }
    }
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let file = load_config_with_precedence(args.config.clone())?;
    let config = merge_config(file);
    let config = apply_env_overrides(config);
    Ok(apply_cli_overrides(config, args.overrides()))
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = resolve_config(args)?;
    lazyrow::logging::init(&config.log_file_path)?;
    lazyrow::view::run(&config)
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The terminal is restored by this point; stderr is visible.
            error!("fatal: {err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

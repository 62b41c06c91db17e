use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use library_lending::{EventRecorder, LibraryConfig, LibrarySystem, logging};
use tracing::info;

mod shell;

use shell::{OutputFormat, Shell};

/// Command-line arguments for the library console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with borrowing and logging settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with an empty catalog instead of the sample books and patrons
    #[arg(long)]
    no_seed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// How listings and reports are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LibraryConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => LibraryConfig::default(),
    };
    logging::init_logging(&config.log, args.verbose).context("Failed to initialize logging")?;

    let mut system = LibrarySystem::new();
    let recorder = EventRecorder::with_capacity(shell::RECENT_EVENTS);
    system.register_listener(recorder.clone());

    if config.seed_sample_data && !args.no_seed {
        shell::seed_sample_data(&mut system, config.default_borrow_limit);
        info!("Sample data initialized");
    }

    Shell::new(
        &mut system,
        &recorder,
        config.default_borrow_limit,
        args.format,
        io::stdin().lock(),
        io::stdout().lock(),
    )
    .run()
    .context("Console I/O failed")?;

    let report = system.inventory_report();
    info!(
        total = report.total,
        available = report.available,
        borrowed = report.borrowed,
        "Library closed"
    );
    Ok(())
}

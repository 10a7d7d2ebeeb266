use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use quicktask::cli::args::{Cli, Commands};
use quicktask::cli::commands;
use quicktask::config::Config;
use quicktask::error::QuicktaskError;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("QUICKTASK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), QuicktaskError> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Parse(args) => commands::parse(&args, format)?,
        Commands::Add(args) => commands::add(&args, &config.ingestion.limits(), format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
    Ok(())
}

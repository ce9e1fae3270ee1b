use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pomodo::cli::args::{Cli, Commands};
use pomodo::cli::commands;
use pomodo::config::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("failed to load config")?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Tui { mode } => {
            let store = commands::open_store(&config)?;
            pomodo::tui::run(store, mode, &config.ui)?;
            String::new()
        }
        Commands::Run { mode } => {
            let store = commands::open_store(&config)?;
            commands::run(store, mode, config.ui.bell, format)?
        }
        Commands::Task(args) => {
            let store = commands::open_store(&config)?;
            commands::task(store, args.command, format)?
        }
        Commands::Completions { shell } => commands::generate_completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

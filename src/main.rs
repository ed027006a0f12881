use anyhow::{Context, Result};
use clap::Parser;
use keycalc::config::Config;
use keycalc::Session;
use keycalc::keypad::parse_keys;
use keycalc::repl::{print_history, render, run_interactive};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keycalc")]
#[command(version, about = "Keypad calculator for the terminal")]
struct Cli {
    /// Key tokens to apply, e.g. `12+3=` or `5 neg %`. Starts an interactive
    /// session when omitted.
    keys: Vec<String>,

    /// Print the final session as JSON
    #[arg(long)]
    json: bool,

    /// Print the history after the run
    #[arg(long)]
    history: bool,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let mut session = Session::new();
    let mut out = io::stdout().lock();

    if cli.keys.is_empty() {
        run_interactive(&mut session, &config, io::stdin().lock(), &mut out)?;
        if config.show_history_on_exit && !cli.json && !cli.history {
            print_history(session.history(), &mut out)?;
        }
    } else {
        let keys = parse_keys(&cli.keys.join(" "))?;
        session.press_all(keys);
        if !cli.json {
            render(&session, &mut out)?;
        }
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&session.snapshot())
            .context("Failed to serialize session")?;
        writeln!(out, "{json}")?;
    } else if cli.history {
        print_history(session.history(), &mut out)?;
    }

    Ok(())
}

//! spellquiz main entry point
//!
//! Parses the command line, sets up logging, loads the configuration and
//! starts the speech thread, then hands control to the main menu.

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};
use spellquiz::input::StdinChannel;
use spellquiz::state::config::Config;
use spellquiz::state::{AppState, Overrides};
use spellquiz::{menu, terminal};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process;

/// A console spelling quiz that speaks each word and times your answer
#[derive(Parser, Debug)]
#[command(name = "spellquiz", version, about)]
struct Cli {
    /// Write debug logs to spellquiz.log in the current directory
    #[arg(short, long)]
    debug: bool,

    /// Start in quick mode regardless of the config file
    #[arg(long)]
    quick: bool,

    /// Directory holding <difficulty>.json or <difficulty>.txt word lists
    #[arg(long, env = "SPELLQUIZ_WORDS")]
    words: Option<PathBuf>,

    /// Config file to use instead of ~/.spellquiz.cfg
    #[arg(long, env = "SPELLQUIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Do not try any speech backend; text only
    #[arg(long)]
    silent: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("spellquiz.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open spellquiz.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "{} version {} starting (debug mode, logging to spellquiz.log)",
            spellquiz::APP_NAME,
            spellquiz::VERSION
        );
    } else {
        // Log lines would land in the middle of the quiz, so errors only
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    debug!("Initializing spellquiz with {:?}", cli);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Could not load the configuration")?;
    info!("Config loaded from {:?}", config.path());

    let speech =
        AppState::start_speech(&config, cli.silent).context("Could not start the speech thread")?;

    let overrides = Overrides {
        quick_mode: cli.quick,
        word_dir: cli.words,
    };
    let mut app = AppState::new(config, speech, overrides);

    terminal::install_interrupt_handler().context("Could not install the Ctrl+C handler")?;

    let mut input = StdinChannel::default();
    menu::run(&mut app, &mut input).context("Main menu failed")?;

    info!("spellquiz exiting");
    Ok(())
}

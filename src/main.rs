use anyhow::{Context, bail};
use clap::Parser;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use wiggly::Config;
use wiggly::terminal::{App, TerminalGuard};

/// Show a line of text whose characters wiggle along a sine wave.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The text to display.
    text: Option<String>,

    /// Start with the animation paused.
    #[clap(long)]
    paused: bool,

    /// The font height, in rows, the wave amplitude is scaled against.
    #[clap(long, value_name = "ROWS")]
    line_height: Option<i32>,

    /// The path to the configuration file.
    #[clap(short, long, env = "WIGGLY_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Exit after this many animation steps.
    #[clap(long, value_name = "N")]
    frames: Option<u64>,

    /// Write logs to this file instead of stderr.
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_filter = if log_file.is_some() { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(text) = &cli.text {
        config.text = text.clone();
    }
    if cli.paused {
        config.running = false;
    }
    if let Some(line_height) = cli.line_height {
        config.line_height = line_height;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.log_file.as_deref())?;
    let config = load_config(&cli)?;
    log::debug!("starting with {config:?}");

    let size = crossterm::terminal::size().context("querying terminal size")?;
    if size.1 < 2 {
        bail!("terminal is too small");
    }
    let _guard = TerminalGuard::enter().context("setting up terminal")?;
    let mut app = App::new(&config, size, io::stdout()).tick_limit(cli.frames);
    app.run().context("running event loop")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

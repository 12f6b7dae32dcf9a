//! Flick Sim - Galaxy AI phone shell simulator
//!
//! Type `:help` for the touch commands; any other line goes to the
//! Galaxy AI side panel.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tracing_appender::rolling;

use flick_sim::backend;
use flick_sim::config::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "flick-sim")]
#[command(about = "Terminal simulator of a Galaxy AI phone shell", long_about = None)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/flick-sim/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How long the boot splash stays up
    #[arg(long, value_name = "MS")]
    boot_delay_ms: Option<u64>,

    /// Ignore any Gemini API key and run Galaxy AI in demo mode
    #[arg(long)]
    offline: bool,

    /// Enable verbose debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Set up log directory (~/.local/state/flick-sim or /tmp/flick-sim)
    let log_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join("flick-sim");

    std::fs::create_dir_all(&log_dir).ok();

    // Log panics before crashing
    let crash_log = log_dir.join("crash.log");
    std::panic::set_hook(Box::new(move |panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Ok(mut f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&crash_log)
        {
            use std::io::Write;
            let _ = writeln!(f, "[{}] PANIC: {}", chrono::Local::now(), panic_info);
        }
    }));

    let args = Args::parse();

    // Rotates daily; stdout carries the frames so the console log goes to stderr
    let file_appender = rolling::daily(&log_dir, "flick-sim.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if args.debug {
        "debug,flick_sim=debug"
    } else {
        "warn,flick_sim=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!(log_path = %log_dir.display(), "Flick Sim starting");

    let mut config = SimConfig::load(args.config.as_deref());
    config.apply_cli(args.boot_delay_ms, args.offline);

    backend::terminal::run(config)
}

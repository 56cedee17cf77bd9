mod capture;
mod replay;
mod summary;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{Config, LogLevel, load_config};
use events::JsonEncoder;
use host::{HostContext, PageId, TracingHost};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Chartfeed tooling.
fn main() -> Result<()> {
    // Load environment overrides from a .env file, if one exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let level = cli.log_level.unwrap_or(config.logging.level);
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Encode(args) => handle_encode(args, &config),
        Commands::Summary(args) => handle_summary(args),
        Commands::Replay(args) => handle_replay(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Tools for captured market-data feeds: big-integer-safe encoding, capture
/// summaries and replay through a logging charting host.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file. Missing files are ignored.
    #[arg(long, global = true, default_value = "chartfeed.toml")]
    config: PathBuf,

    /// Overrides `logging.level` when `RUST_LOG` is not set.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-encode a capture so every integer is exact and unquoted.
    Encode(EncodeArgs),
    /// Count the events of a capture per variant.
    Summary(SummaryArgs),
    /// Replay a capture through a charting script on a logging host.
    Replay(ReplayArgs),
}

#[derive(Parser)]
struct EncodeArgs {
    /// Capture file, one host-shaped JSON event per line.
    #[arg(long, short)]
    input: PathBuf,

    /// Output file; standard output when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Drop events that collide with the encoder marker instead of aborting.
    #[arg(long)]
    skip_conflicts: bool,
}

#[derive(Parser)]
struct SummaryArgs {
    #[arg(long, short)]
    input: PathBuf,
}

#[derive(Parser)]
struct ReplayArgs {
    #[arg(long, short)]
    input: PathBuf,

    /// The symbol the replayed page subscribes to (e.g., "ESZ6").
    #[arg(long, short)]
    symbol: String,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_encode(args: EncodeArgs, config: &Config) -> Result<()> {
    let encoder = JsonEncoder::new(config.encoder.marker.as_str())?;
    let events = capture::read_capture(&args.input)?;
    let mut out = open_output(args.output.as_deref())?;

    let mut written = 0usize;
    let mut skipped = 0usize;
    for captured in &events {
        match encoder.event_to_json(&captured.event) {
            Ok(json) => {
                writeln!(out, "{json}")?;
                written += 1;
            }
            Err(e) if args.skip_conflicts => {
                tracing::warn!(line = captured.line, error = %e, "Skipping event.");
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to encode line {}", captured.line));
            }
        }
    }
    out.flush()?;

    tracing::info!(written, skipped, marker = encoder.marker(), "Capture encoded.");
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<()> {
    let events = capture::read_capture(&args.input)?;
    let summaries = summary::summarize(&events);
    println!("{}", summary::render(&summaries));
    println!("{} events in {}", events.len(), args.input.display());
    Ok(())
}

fn handle_replay(args: ReplayArgs, config: &Config) -> Result<()> {
    let encoder = JsonEncoder::new(config.encoder.marker.as_str())?;
    let events = capture::read_capture(&args.input)?;

    let ctx = HostContext::new(Arc::new(TracingHost::new()), PageId(config.replay.page));
    let stats = replay::run_replay(
        &ctx,
        encoder,
        &args.symbol,
        events,
        config.replay.real_time,
        config.replay.render_every,
    )
    .with_context(|| format!("Replay of {} failed", args.symbol))?;

    println!("--- Replay of {} ---", args.symbol);
    println!("Events:          {}", stats.events);
    println!("Trades plotted:  {}", stats.trades_plotted);
    println!("Encoded bytes:   {}", stats.encoded_bytes);
    println!("Conflicts:       {}", stats.conflicts);
    println!("Host failures:   {}", stats.host_failures);
    println!("Renders:         {}", stats.renders);
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dashboard::Dashboard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Checks and replays world-map dashboard assets")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load content and geography and print a summary
    Validate {
        /// Asset directory (content.json + world.geojson, or a manifest)
        dir: PathBuf,
    },
    /// Replay navigation events and print one render frame per line
    Replay {
        dir: PathBuf,

        /// JSON lines of navigation events
        #[arg(long)]
        events: PathBuf,

        #[arg(long, default_value_t = 800.0)]
        width: f64,

        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// Print the transition trace to stderr after replaying
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), String> {
    match args.command {
        Command::Validate { dir } => {
            let report = tools::validate_dir(&dir)?;
            let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
            println!("{payload}");
            Ok(())
        }
        Command::Replay {
            dir,
            events,
            width,
            height,
            trace,
        } => {
            let input = fs::read_to_string(&events).map_err(|e| format!("read {events:?}: {e}"))?;
            let events = tools::parse_events(&input)?;
            let assets = tools::load_dir(&dir)?;
            let mut dash = Dashboard::new(assets, width, height).map_err(|e| e.to_string())?;

            let frames = tools::replay(&mut dash, &events);
            let mut out = std::io::stdout().lock();
            for frame in &frames {
                let line = serde_json::to_string(frame).map_err(|e| format!("json: {e}"))?;
                writeln!(out, "{line}").map_err(|e| format!("write: {e}"))?;
            }
            if trace {
                for event in dash.drain_trace() {
                    eprintln!("#{} {} {}", event.seq, event.kind, event.message);
                }
            }
            Ok(())
        }
    }
}

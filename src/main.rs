use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tripview::app::{RenderOutcome, Renderer};
use tripview::loader::DataSource;
use tripview::{TripViewConfig, TripViewError, logging, web};

/// Render a travel itinerary as a day-grouped timeline with an interactive map
#[derive(Parser, Debug)]
#[command(name = "tripview", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the itinerary page to a file
    Render {
        /// Trip document path or http(s) URL (defaults to the configured source)
        #[arg(short, long)]
        data: Option<String>,

        /// Output HTML file (defaults to the configured output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the itinerary page over HTTP, rendering on every request
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match TripViewConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", describe(&e));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging, cli.verbose) {
        eprintln!("{e}");
    }

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("{}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: TripViewConfig) -> anyhow::Result<()> {
    match command {
        Command::Render { data, output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.data.output));
            let renderer = Renderer::new(config)?;
            let source = data
                .as_deref()
                .map(DataSource::parse)
                .unwrap_or_else(|| renderer.source());

            let outcome = renderer.render_from(&source).await;
            tokio::fs::write(&output, outcome.html())
                .await
                .map_err(|e| TripViewError::output(&output, e))?;

            match outcome {
                RenderOutcome::Rendered { summary, .. } => println!(
                    "Wrote {} ({} day(s), {} activities, {} map markers)",
                    output.display(),
                    summary.days,
                    summary.activities,
                    summary.markers
                ),
                RenderOutcome::LoadFailed { .. } => println!(
                    "Wrote error page to {}: trip data from {} could not be loaded",
                    output.display(),
                    source
                ),
            }
            Ok(())
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let renderer = Renderer::new(config)?;
            web::run(renderer, port).await
        }
    }
}

/// User-facing message, preferring the typed error when there is one
fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<TripViewError>() {
        Some(e) => e.user_message(),
        None => format!("Error: {error:#}"),
    }
}

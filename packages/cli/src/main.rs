#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line front end for the city safety check.
//!
//! Plays the part of the mobile screen: `check` is the tap on the safety
//! row, navigation renders the results pager to stdout, and alerts go to
//! stderr. Without a subcommand the user picks a tool interactively.

mod view;

use std::path::PathBuf;

use city_safety_client::{DispatchOutcome, SafetyCheckDispatcher};
use city_safety_config::Settings;
use city_safety_neighbourhood::{DataSource, hoodmaps};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};

use crate::view::TerminalView;

#[derive(Parser)]
#[command(name = "city_safety", about = "City safety check toolchain")]
struct Cli {
    /// Path to a TOML settings file (overrides `CITY_SAFETY_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the safety check for this machine's city and show the results
    Check {
        /// Render the backend payload instead of the sample data
        #[arg(long)]
        payload: bool,
    },
    /// Render the results screen from a navigation payload
    Render {
        /// String-encoded JSON navigation parameter
        #[arg(long)]
        data: Option<String>,
        /// Render the payload instead of the sample data
        #[arg(long)]
        payload: bool,
    },
    /// Look up the crowd-sourced neighbourhood map for a city
    Neighbourhoods {
        /// City name, e.g. `Amsterdam`
        city: String,
    },
    /// Start the safety check server
    Serve,
    /// Print the effective settings as TOML
    Config,
}

/// Top-level tool selection for interactive mode.
enum Tool {
    Check,
    Neighbourhoods,
    Server,
    Config,
}

impl Tool {
    const ALL: &[Self] = &[Self::Check, Self::Neighbourhoods, Self::Server, Self::Config];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Check => "Run a safety check",
            Self::Neighbourhoods => "Look up neighbourhoods",
            Self::Server => "Start server",
            Self::Config => "Show settings",
        }
    }
}

fn data_source(settings: &Settings, payload: bool) -> DataSource {
    if payload {
        DataSource::Payload
    } else {
        settings.data_source()
    }
}

async fn run_check(settings: &Settings, payload: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = SafetyCheckDispatcher::new(settings)?;
    let view = TerminalView::new(data_source(settings, payload));

    match dispatcher.run_safety_check(&view).await {
        DispatchOutcome::Navigated(route) => {
            log::info!("Safety check complete ({} bytes)", route.data().map_or(0, str::len));
            Ok(())
        }
        DispatchOutcome::Failed => Err("safety check failed".into()),
        DispatchOutcome::AlreadyInFlight => Ok(()),
    }
}

async fn run_neighbourhoods(
    settings: &Settings,
    city: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = hoodmaps::build_client(settings.request_timeout())?;
    let neighbourhoods =
        hoodmaps::fetch_neighbourhoods(&client, &settings.hoodmaps.base_url, city).await?;

    if neighbourhoods.is_empty() {
        println!("No neighbourhoods found for {city}.");
        return Ok(());
    }

    println!("{:<32} DESCRIPTION", "NEIGHBOURHOOD");
    println!("{}", "-".repeat(60));
    for n in &neighbourhoods {
        println!("{:<32} {}", n.neighbourhood, n.description);
    }

    Ok(())
}

async fn run_server(settings: Settings, interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so we need to run it
    // in a blocking task to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(async move {
            if interactive {
                city_safety_server::interactive::run(&settings).await
            } else {
                city_safety_server::run_server(&settings).await
            }
        })
    })
    .await??;

    Ok(())
}

async fn run_interactive(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    println!("City Safety Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Check => run_check(&settings, false).await?,
        Tool::Neighbourhoods => {
            let city: String = Input::new().with_prompt("City").interact_text()?;
            run_neighbourhoods(&settings, &city).await?;
        }
        Tool::Server => run_server(settings, true).await?,
        Tool::Config => print!("{}", settings.to_toml()?),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(path.as_path()))?,
        None => Settings::load()?,
    };

    let Some(command) = cli.command else {
        return run_interactive(settings).await;
    };

    match command {
        Commands::Check { payload } => run_check(&settings, payload).await?,
        Commands::Render { data, payload } => {
            let view = TerminalView::new(data_source(&settings, payload));
            println!("{}", view.render_results(data.as_deref()));
        }
        Commands::Neighbourhoods { city } => run_neighbourhoods(&settings, &city).await?,
        Commands::Serve => run_server(settings, false).await?,
        Commands::Config => print!("{}", settings.to_toml()?),
    }

    Ok(())
}

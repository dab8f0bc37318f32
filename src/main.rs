use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use reach::catalog::events::{default_event_definitions, EventCatalog};
use reach::catalog::platforms::{parse_platform_list, Platform};
use reach::config::Config;
use reach::evaluation::{Evaluation, SeededPurpose};
use reach::snapshot::EventSnapshot;

/// Reach: audience eligibility for dealership ad campaigns.
///
/// Checks which campaign purposes your engagement data supports on each ad
/// platform, and seeds the events to target for a chosen purpose.
#[derive(Parser)]
#[command(name = "reach", version, about)]
struct Cli {
    /// Purpose table JSON (overrides REACH_PURPOSES_PATH)
    #[arg(long, global = true)]
    purposes: Option<PathBuf>,

    /// Event snapshot JSON (overrides REACH_EVENTS_PATH)
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List campaign purposes and their platform minimums
    Purposes,

    /// Check which purposes are usable on the selected platforms
    Validate {
        /// Comma-separated platforms (default: REACH_PLATFORMS)
        #[arg(long)]
        platforms: Option<String>,
    },

    /// Seed the event selection for a purpose
    Seed {
        /// Purpose id (e.g. prospecting)
        purpose: String,

        /// Comma-separated platforms (default: REACH_PLATFORMS)
        #[arg(long)]
        platforms: Option<String>,
    },

    /// Generate an eligibility report (terminal + markdown)
    Report {
        /// Comma-separated platforms (default: REACH_PLATFORMS)
        #[arg(long)]
        platforms: Option<String>,

        /// Where to write the markdown file (default: REACH_REPORT_PATH)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show configuration and snapshot status
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reach=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(path) = cli.purposes {
        config.purposes_path = Some(path);
    }
    if let Some(path) = cli.events {
        config.events_path = path;
    }

    match cli.command {
        Commands::Purposes => {
            let purposes = config.purpose_catalog()?;
            reach::output::terminal::display_purpose_catalog(&purposes);
        }

        Commands::Validate { platforms } => {
            let purposes = config.purpose_catalog()?;
            let platforms = resolve_platforms(&config, platforms.as_deref())?;
            let (_, catalog) = load_catalog(&config)?;

            let evaluation = Evaluation::run(&purposes, &platforms, &catalog);
            reach::output::terminal::display_evaluation(&purposes, &evaluation);

            let valid: Vec<&str> = evaluation.valid_purpose_ids().collect();
            if !valid.is_empty() {
                println!("{} {}", "Available purposes:".bold(), valid.join(", "));
            }
        }

        Commands::Seed { purpose, platforms } => {
            let purposes = config.purpose_catalog()?;
            let platforms = resolve_platforms(&config, platforms.as_deref())?;
            let (_, catalog) = load_catalog(&config)?;

            let Some(chosen) = purposes.get(&purpose) else {
                let ids: Vec<&str> = purposes.iter().map(|p| p.id.as_str()).collect();
                anyhow::bail!(
                    "Unknown purpose '{}'. Available: {}",
                    purpose,
                    ids.join(", ")
                );
            };

            let result = reach::engine::validate_purpose(chosen, &platforms, &catalog);
            if !result.is_valid {
                println!(
                    "{} {} is not usable on the selected platforms yet.",
                    "Warning:".yellow(),
                    chosen.label
                );
            }

            info!(purpose = chosen.id.as_str(), "Seeding events");
            let seeded = SeededPurpose::compute(chosen, &platforms, &catalog);
            reach::output::terminal::display_seed(chosen, &seeded, &catalog);
        }

        Commands::Report { platforms, output } => {
            let purposes = config.purpose_catalog()?;
            let platforms = resolve_platforms(&config, platforms.as_deref())?;
            let (snapshot, catalog) = load_catalog(&config)?;

            let evaluation = Evaluation::run(&purposes, &platforms, &catalog);
            reach::output::terminal::display_evaluation(&purposes, &evaluation);
            for (id, seeded) in &evaluation.seeds {
                if let Some(purpose) = purposes.get(id) {
                    reach::output::terminal::display_seed(purpose, seeded, &catalog);
                }
            }

            let path = output.unwrap_or_else(|| config.report_path.clone());
            let report_path = reach::output::markdown::generate_report(
                &purposes,
                &evaluation,
                &catalog,
                snapshot.fetched_at,
                &path,
            )?;

            println!(
                "\n{}",
                format!("Markdown report saved to: {report_path}").bold()
            );
        }

        Commands::Status => {
            let purposes = config.purpose_catalog()?;
            reach::status::show(&config, &purposes)?;
        }
    }

    Ok(())
}

/// Platforms from the flag if given, otherwise from config. An empty
/// selection is allowed; every purpose just reports invalid.
fn resolve_platforms(config: &Config, flag: Option<&str>) -> Result<Vec<Platform>> {
    let platforms = match flag {
        Some(raw) => parse_platform_list(raw)?,
        None => config.selected_platforms()?,
    };
    if platforms.is_empty() {
        println!(
            "{}",
            "No platforms selected. Pass --platforms or set REACH_PLATFORMS.".dimmed()
        );
    }
    Ok(platforms)
}

fn load_catalog(config: &Config) -> Result<(EventSnapshot, EventCatalog)> {
    config.require_events()?;
    let snapshot = EventSnapshot::load(&config.events_path)?;
    let catalog = snapshot.to_catalog(&default_event_definitions());
    Ok((snapshot, catalog))
}

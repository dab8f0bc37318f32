// System status display: shows config, purpose table, and snapshot state.

use anyhow::Result;

use crate::catalog::events::{default_event_definitions, EventCategory};
use crate::catalog::purposes::PurposeCatalog;
use crate::config::Config;
use crate::output::format_count;
use crate::snapshot::EventSnapshot;

/// Display system status to the terminal.
pub fn show(config: &Config, purposes: &PurposeCatalog) -> Result<()> {
    match &config.purposes_path {
        Some(path) => println!(
            "Purpose table: {} ({} purposes)",
            path.display(),
            purposes.len()
        ),
        None => println!("Purpose table: built-in ({} purposes)", purposes.len()),
    }

    let platforms = config.selected_platforms()?;
    if platforms.is_empty() {
        println!("Default platforms: none (set REACH_PLATFORMS or pass --platforms)");
    } else {
        let names: Vec<&str> = platforms.iter().map(|p| p.as_str()).collect();
        println!("Default platforms: {}", names.join(", "));
    }

    if !config.events_path.exists() {
        println!("Event snapshot: not found at {}", config.events_path.display());
        println!("  Export your analytics counters there, or set REACH_EVENTS_PATH");
        return Ok(());
    }

    let snapshot = EventSnapshot::load(&config.events_path)?;
    let catalog = snapshot.to_catalog(&default_event_definitions());
    println!(
        "Event snapshot: {} ({} counters)",
        config.events_path.display(),
        snapshot.counts.len()
    );
    match snapshot.fetched_at {
        Some(ts) => println!("  Fetched: {}", ts.format("%Y-%m-%d %H:%M UTC")),
        None => println!("  Fetched: unknown"),
    }

    for (category, events) in catalog.by_category() {
        let total = events
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.count));
        let suffix = if category == EventCategory::Exclude {
            " (never counted)"
        } else {
            ""
        };
        println!(
            "  {:<11} {:>10} across {} events{}",
            category.as_str(),
            format_count(total),
            events.len(),
            suffix
        );
    }

    Ok(())
}

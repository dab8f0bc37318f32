// Colored terminal output for purposes, validation results, and seeds.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::catalog::events::{EventCatalog, EventCategory};
use crate::catalog::platforms::Platform;
use crate::catalog::purposes::{CampaignPurpose, PurposeCatalog};
use crate::engine::{selected_events_count, DataShortfall, EventSelection, ProblematicPlatform};
use crate::evaluation::{Evaluation, SeededPurpose};

use super::{format_count, truncate_chars};

/// List every purpose with its per-platform minimums.
pub fn display_purpose_catalog(purposes: &PurposeCatalog) {
    if purposes.is_empty() {
        println!("No purposes configured.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Campaign Purposes ({}) ===", purposes.len()).bold()
    );

    for purpose in purposes {
        println!("\n  {} ({})", purpose.label.bold(), purpose.id.dimmed());
        if !purpose.description.is_empty() {
            println!("    {}", truncate_chars(&purpose.description, 100).dimmed());
        }
        let categories: Vec<&str> = purpose
            .allowed_categories
            .iter()
            .map(|c| c.as_str())
            .collect();
        println!("    Counts: {}", categories.join(", "));
        for (platform, req) in &purpose.platforms {
            println!(
                "    {:<12} {:<16} min {:>8}",
                platform.as_str(),
                req.display_name,
                format_count(req.min_events)
            );
        }
    }
    println!();
}

/// Display the validation table for the selected platforms.
pub fn display_evaluation(purposes: &PurposeCatalog, evaluation: &Evaluation) {
    let platform_names: Vec<&str> = evaluation.platforms.iter().map(|p| p.as_str()).collect();
    println!(
        "\n{}",
        format!(
            "=== Purpose Eligibility ({}) ===",
            if platform_names.is_empty() {
                "no platforms selected".to_string()
            } else {
                platform_names.join(", ")
            }
        )
        .bold()
    );
    println!();

    println!(
        "  {:<28} {:>10} {:>10}  {}",
        "Purpose".dimmed(),
        "Matched".dimmed(),
        "Required".dimmed(),
        "Platforms".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for purpose in purposes {
        let Some(result) = evaluation.results.get(&purpose.id) else {
            continue;
        };

        let marker = if result.is_valid {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };

        let statuses: Vec<String> = evaluation
            .platforms
            .iter()
            .filter_map(|p| result.status(*p).map(|pass| colorize_status(*p, pass)))
            .collect();
        let statuses = if statuses.is_empty() {
            "n/a".dimmed().to_string()
        } else {
            statuses.join(" ")
        };

        println!(
            "  {} {:<26} {:>10} {:>10}  {}",
            marker,
            truncate_chars(&purpose.label, 26),
            format_count(result.matched_events),
            format_count(result.highest_required),
            statuses,
        );
    }
    println!();

    display_problematic(&evaluation.problematic);
    display_shortfall(&evaluation.shortfall, evaluation.all_disabled);
}

/// Remediation hints for platforms no purpose can use.
pub fn display_problematic(problematic: &[ProblematicPlatform]) {
    if problematic.is_empty() {
        return;
    }
    println!("{}", "Platforms without any usable purpose:".yellow().bold());
    for p in problematic {
        println!(
            "  {} {} needs at least {} matched events. Remove it or collect more data.",
            "!".yellow(),
            p.label.bold(),
            format_count(p.min_threshold)
        );
    }
    println!();
}

/// The account-wide advisory line.
pub fn display_shortfall(shortfall: &DataShortfall, all_disabled: bool) {
    if !all_disabled {
        return;
    }
    println!("{}", "No purpose is available for this selection.".red().bold());
    if shortfall.is_short {
        println!(
            "  The account has {} events in total; the largest purpose minimum is {} \
             ({} more needed).",
            format_count(shortfall.account_total),
            format_count(shortfall.max_required),
            format_count(shortfall.missing())
        );
    } else {
        println!("  Try a different platform selection.");
    }
    println!();
}

/// Display a seeded selection for one purpose.
pub fn display_seed(purpose: &CampaignPurpose, seeded: &SeededPurpose, catalog: &EventCatalog) {
    println!(
        "\n{}",
        format!("=== Seeded Events: {} ===", purpose.label).bold()
    );
    display_selection(&seeded.selection, catalog);

    let total = format!(
        "{} / {}",
        format_count(seeded.selected_total),
        format_count(seeded.highest_required)
    );
    let total = if seeded.is_short() {
        total.yellow()
    } else {
        total.green()
    };
    println!("\n  Selected events: {}", total);
    println!(
        "  Events chosen:   {}",
        selected_events_count(&seeded.selection)
    );
    if seeded.is_short() {
        println!(
            "  {}",
            "Not enough engagement data yet to reach the requirement.".dimmed()
        );
    }
}

/// Display the ids in a selection grouped by category.
pub fn display_selection(selection: &EventSelection, catalog: &EventCatalog) {
    for (category, ids) in selection.iter() {
        let heading = if category == EventCategory::Exclude {
            category.as_str().dimmed()
        } else {
            category.as_str().bold()
        };
        println!("\n  {}", heading);
        if ids.is_empty() {
            println!("    {}", "(none)".dimmed());
        }
        for id in ids {
            let (label, count) = catalog
                .get(id)
                .map(|e| (e.label.as_str(), e.count))
                .unwrap_or((id.as_str(), 0));
            println!("    {:<32} {:>10}", label, format_count(count));
        }
    }
}

fn colorize_status(platform: Platform, pass: bool) -> String {
    if pass {
        format!("{}✓", platform.as_str()).green().to_string()
    } else {
        format!("{}✗", platform.as_str()).red().to_string()
    }
}

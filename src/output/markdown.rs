// Markdown eligibility report.
//
// Same content as the terminal view, written to a file that can be attached
// to a campaign ticket or shared with the account team.

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::catalog::events::{EventCatalog, EventCategory};
use crate::catalog::purposes::PurposeCatalog;
use crate::engine::selected_events_count;
use crate::evaluation::Evaluation;

use super::format_count;

/// Render the report as a markdown string.
pub fn render_report(
    purposes: &PurposeCatalog,
    evaluation: &Evaluation,
    catalog: &EventCatalog,
    fetched_at: Option<DateTime<Utc>>,
) -> String {
    let mut md = String::new();
    // Writing to a String can't fail.
    let _ = write_report(&mut md, purposes, evaluation, catalog, fetched_at);
    md
}

fn write_report(
    md: &mut String,
    purposes: &PurposeCatalog,
    evaluation: &Evaluation,
    catalog: &EventCatalog,
    fetched_at: Option<DateTime<Utc>>,
) -> fmt::Result {
    writeln!(md, "# Audience Eligibility Report\n")?;
    let platforms: Vec<&str> = evaluation.platforms.iter().map(|p| p.as_str()).collect();
    writeln!(
        md,
        "**Platforms:** {}  ",
        if platforms.is_empty() {
            "none".to_string()
        } else {
            platforms.join(", ")
        }
    )?;
    if let Some(ts) = fetched_at {
        writeln!(md, "**Data as of:** {}  ", ts.format("%Y-%m-%d %H:%M UTC"))?;
    }
    writeln!(
        md,
        "**Account events:** {}\n",
        format_count(evaluation.shortfall.account_total)
    )?;

    writeln!(md, "## Purposes\n")?;
    writeln!(md, "| Purpose | Matched | Required | Passing | Failing |")?;
    writeln!(md, "|---|---:|---:|---|---|")?;
    for purpose in purposes {
        let Some(result) = evaluation.results.get(&purpose.id) else {
            continue;
        };
        let mark = if result.is_valid { "✓" } else { "✗" };
        writeln!(
            md,
            "| {} {} | {} | {} | {} | {} |",
            mark,
            purpose.label,
            format_count(result.matched_events),
            format_count(result.highest_required),
            join_platforms(&result.valid_platforms),
            join_platforms(&result.invalid_platforms),
        )?;
    }
    writeln!(md)?;

    if !evaluation.problematic.is_empty() {
        writeln!(md, "## Platforms Without a Usable Purpose\n")?;
        for p in &evaluation.problematic {
            writeln!(
                md,
                "- **{}** needs at least {} matched events",
                p.label,
                format_count(p.min_threshold)
            )?;
        }
        writeln!(md)?;
    }

    if evaluation.all_disabled && evaluation.shortfall.is_short {
        writeln!(
            md,
            "> No purpose is available. The account has {} events in total; the largest \
             minimum is {}.\n",
            format_count(evaluation.shortfall.account_total),
            format_count(evaluation.shortfall.max_required)
        )?;
    }

    if !evaluation.seeds.is_empty() {
        writeln!(md, "## Seeded Selections\n")?;
    }
    for (id, seeded) in &evaluation.seeds {
        let label = purposes
            .get(id)
            .map(|p| p.label.as_str())
            .unwrap_or(id.as_str());
        writeln!(md, "### {}\n", label)?;
        for (category, ids) in seeded.selection.iter() {
            if ids.is_empty() {
                continue;
            }
            let names: Vec<String> = ids
                .iter()
                .map(|id| {
                    let event_label = catalog
                        .get(id)
                        .map(|e| e.label.as_str())
                        .unwrap_or(id.as_str());
                    format!("{} ({})", event_label, format_count(catalog.count_of(id)))
                })
                .collect();
            let heading = if category == EventCategory::Exclude {
                "Excluded"
            } else {
                category.as_str()
            };
            writeln!(md, "- **{}:** {}", heading, names.join(", "))?;
        }
        writeln!(
            md,
            "\nSelected {} of {} required ({} events chosen)\n",
            format_count(seeded.selected_total),
            format_count(seeded.highest_required),
            selected_events_count(&seeded.selection)
        )?;
    }

    Ok(())
}

/// Write the report to `path`, creating parent directories as needed.
/// Returns the path written, for display.
pub fn generate_report(
    purposes: &PurposeCatalog,
    evaluation: &Evaluation,
    catalog: &EventCatalog,
    fetched_at: Option<DateTime<Utc>>,
    path: &Path,
) -> Result<String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let md = render_report(purposes, evaluation, catalog, fetched_at);
    std::fs::write(path, md).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path.display().to_string())
}

fn join_platforms(platforms: &[crate::catalog::platforms::Platform]) -> String {
    if platforms.is_empty() {
        return "-".to_string();
    }
    platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

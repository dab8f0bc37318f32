// Event seeding: the initial auto-selection when a purpose is chosen.
//
// Greedy, single pass: walk the purpose's allowed events in priority order
// and keep adding them until the running total reaches the largest minimum
// among the selected platforms. The event that crosses the line stays in.
// If the catalog runs out first, everything allowed is selected and the
// shortfall shows up downstream (total selected < highest required).
//
// Not minimum-cardinality: a high-priority event with a small count is taken
// before a low-priority one that would finish the job alone.

use tracing::debug;

use crate::catalog::events::{EngagementEventCount, EventCatalog, EventCategory};
use crate::catalog::platforms::Platform;
use crate::catalog::purposes::{CampaignPurpose, PurposeCatalog};

use super::selection::EventSelection;

/// Target used when none of the selected platforms apply to the purpose.
pub const DEFAULT_SEED_THRESHOLD: u64 = 100;

/// The total seeding tries to reach for this purpose and selection.
pub fn seed_threshold(purpose: &CampaignPurpose, selected_platforms: &[Platform]) -> u64 {
    purpose
        .applicable_thresholds(selected_platforms)
        .into_iter()
        .map(|(_, min)| min)
        .max()
        .unwrap_or(DEFAULT_SEED_THRESHOLD)
}

/// Build a fresh selection for `purpose`.
pub fn seed_events(
    purpose: &CampaignPurpose,
    selected_platforms: &[Platform],
    events: &EventCatalog,
) -> EventSelection {
    let max_threshold = seed_threshold(purpose, selected_platforms);
    let mut selection = EventSelection::new();

    for &category in &purpose.allowed_categories {
        selection.ensure_category(category);
    }

    // Exclusions are always fully populated.
    selection.ensure_category(EventCategory::Exclude);
    for event in events.in_category(EventCategory::Exclude) {
        selection.insert(EventCategory::Exclude, &event.id);
    }

    let mut candidates: Vec<&EngagementEventCount> = events
        .events()
        .iter()
        .filter(|e| purpose.allows(e.category))
        .collect();
    candidates.sort_by_key(|e| e.order);

    let mut running_total: u64 = 0;
    for event in candidates {
        if running_total >= max_threshold {
            break;
        }
        selection.insert(event.category, &event.id);
        running_total = running_total.saturating_add(event.count);
    }

    debug!(
        purpose = purpose.id.as_str(),
        target = max_threshold,
        seeded_total = running_total,
        "Seeded event selection"
    );

    selection
}

/// Seed by purpose id. Unknown ids yield an empty selection.
pub fn seed_for_purpose(
    purposes: &PurposeCatalog,
    purpose_id: &str,
    selected_platforms: &[Platform],
    events: &EventCatalog,
) -> EventSelection {
    match purposes.get(purpose_id) {
        Some(purpose) => seed_events(purpose, selected_platforms, events),
        None => {
            debug!(purpose = purpose_id, "Unknown purpose id, nothing to seed");
            EventSelection::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_when_nothing_applies() {
        let catalog = PurposeCatalog::builtin();
        let conversions = catalog.get("conversions").unwrap();
        assert_eq!(
            seed_threshold(conversions, &[Platform::Twitter]),
            DEFAULT_SEED_THRESHOLD
        );
        assert_eq!(seed_threshold(conversions, &[]), DEFAULT_SEED_THRESHOLD);
    }

    #[test]
    fn test_threshold_is_max_of_applicable() {
        let catalog = PurposeCatalog::builtin();
        let prospecting = catalog.get("prospecting").unwrap();
        assert_eq!(
            seed_threshold(prospecting, &[Platform::Facebook, Platform::Google]),
            1000
        );
    }
}

// Aggregate helpers for the "selected vs required" feedback line.

use std::collections::HashSet;

use crate::catalog::events::{EventCatalog, EventCategory};

use super::selection::EventSelection;

/// Sum of counts over the ids selected for targeting.
///
/// The `Exclude` list never counts. An id selected under more than one
/// category is counted once; ids the catalog doesn't know contribute 0.
pub fn total_selected_events(selection: &EventSelection, catalog: &EventCatalog) -> u64 {
    let mut seen: HashSet<&str> = HashSet::new();
    selection
        .iter()
        .filter(|(category, _)| *category != EventCategory::Exclude)
        .flat_map(|(_, ids)| ids.iter().map(String::as_str))
        .filter(|id| seen.insert(*id))
        .fold(0u64, |acc, id| acc.saturating_add(catalog.count_of(id)))
}

/// Number of ids across every category, `Exclude` included.
pub fn selected_events_count(selection: &EventSelection) -> usize {
    selection.iter().map(|(_, ids)| ids.len()).sum()
}

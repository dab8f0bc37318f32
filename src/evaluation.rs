// Evaluation: runs every engine step for one snapshot and bundles the output.
//
// Given the purpose table, the selected platforms, and the event catalog,
// this:
// 1. Validates every purpose
// 2. Finds platforms that fail every purpose covering them
// 3. Computes the account-wide shortfall advisory
// 4. Seeds an event selection for each valid purpose
//
// Display code (terminal, markdown) only ever reads an Evaluation.

use std::collections::BTreeMap;

use tracing::info;

use crate::catalog::events::EventCatalog;
use crate::catalog::platforms::Platform;
use crate::catalog::purposes::{CampaignPurpose, PurposeCatalog};
use crate::engine::{
    all_purposes_disabled, data_shortfall, find_problematic_platforms, seed_events,
    total_selected_events, validate_purposes, DataShortfall, EventSelection, ProblematicPlatform,
    ValidationResults,
};

/// A seeded selection with the totals shown next to it.
#[derive(Debug, Clone)]
pub struct SeededPurpose {
    pub selection: EventSelection,
    pub selected_total: u64,
    pub highest_required: u64,
}

impl SeededPurpose {
    pub fn compute(
        purpose: &CampaignPurpose,
        platforms: &[Platform],
        events: &EventCatalog,
    ) -> Self {
        let selection = seed_events(purpose, platforms, events);
        Self {
            selected_total: total_selected_events(&selection, events),
            highest_required: purpose
                .applicable_thresholds(platforms)
                .into_iter()
                .map(|(_, min)| min)
                .max()
                .unwrap_or(0),
            selection,
        }
    }

    /// The seed ran out of events before reaching the requirement.
    pub fn is_short(&self) -> bool {
        self.selected_total < self.highest_required
    }
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub platforms: Vec<Platform>,
    pub results: ValidationResults,
    pub problematic: Vec<ProblematicPlatform>,
    pub shortfall: DataShortfall,
    pub all_disabled: bool,
    /// Seeds for valid purposes only, keyed by purpose id.
    pub seeds: BTreeMap<String, SeededPurpose>,
}

impl Evaluation {
    pub fn run(purposes: &PurposeCatalog, platforms: &[Platform], events: &EventCatalog) -> Self {
        let results = validate_purposes(purposes, platforms, events);
        let problematic = find_problematic_platforms(platforms, &results, purposes);
        let shortfall = data_shortfall(purposes, events);
        let all_disabled = all_purposes_disabled(&results);

        let seeds = purposes
            .iter()
            .filter(|p| results.get(&p.id).is_some_and(|r| r.is_valid))
            .map(|p| (p.id.clone(), SeededPurpose::compute(p, platforms, events)))
            .collect();

        let valid_count = results.values().filter(|r| r.is_valid).count();
        info!(
            purposes = results.len(),
            valid = valid_count,
            problematic = problematic.len(),
            account_total = shortfall.account_total,
            "Evaluated purposes"
        );

        Self {
            platforms: platforms.to_vec(),
            results,
            problematic,
            shortfall,
            all_disabled,
            seeds,
        }
    }

    pub fn valid_purpose_ids(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|(_, r)| r.is_valid)
            .map(|(id, _)| id.as_str())
    }
}

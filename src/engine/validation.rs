// Purpose validation: which purposes can run on the selected platforms.
//
// For each purpose we sum the counts of events in its allowed categories
// ("matched events") and compare that against the purpose's minimum for each
// selected platform it supports. A purpose is usable as soon as ANY one of
// those platforms clears its bar; it does not need all of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::events::EventCatalog;
use crate::catalog::platforms::Platform;
use crate::catalog::purposes::{CampaignPurpose, PurposeCatalog};

/// The outcome of checking one purpose against the current selection.
///
/// The default value is the "nothing applies" result: invalid, zero
/// matched events, no platform entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformValidationResult {
    pub is_valid: bool,
    pub matched_events: u64,
    /// Pass/fail for each selected platform the purpose defines. Platforms
    /// the purpose doesn't run on are absent (not applicable).
    pub platform_status: BTreeMap<Platform, bool>,
    /// Largest minimum among the selected platforms the purpose defines.
    pub highest_required: u64,
    /// Passing platforms, in selection order.
    pub valid_platforms: Vec<Platform>,
    /// Failing platforms, in selection order.
    pub invalid_platforms: Vec<Platform>,
}

impl PlatformValidationResult {
    /// `Some(pass)` if the platform was evaluated, `None` if not applicable.
    pub fn status(&self, platform: Platform) -> Option<bool> {
        self.platform_status.get(&platform).copied()
    }
}

/// Validation results keyed by purpose id.
pub type ValidationResults = BTreeMap<String, PlatformValidationResult>;

/// Sum of counts over the events that count toward a purpose.
pub fn matched_events(purpose: &CampaignPurpose, events: &EventCatalog) -> u64 {
    events
        .events()
        .iter()
        .filter(|e| purpose.allows(e.category))
        .fold(0u64, |acc, e| acc.saturating_add(e.count))
}

/// Validate a single purpose against the selected platforms.
pub fn validate_purpose(
    purpose: &CampaignPurpose,
    selected_platforms: &[Platform],
    events: &EventCatalog,
) -> PlatformValidationResult {
    let matched = matched_events(purpose, events);

    let mut result = PlatformValidationResult {
        matched_events: matched,
        ..Default::default()
    };

    for (platform, min_events) in purpose.applicable_thresholds(selected_platforms) {
        let passes = matched >= min_events;
        result.platform_status.insert(platform, passes);
        result.highest_required = result.highest_required.max(min_events);
        if passes {
            result.valid_platforms.push(platform);
        } else {
            result.invalid_platforms.push(platform);
        }
    }

    result.is_valid = !result.valid_platforms.is_empty();

    debug!(
        purpose = purpose.id.as_str(),
        matched = matched,
        highest_required = result.highest_required,
        valid = result.is_valid,
        "Validated purpose"
    );

    result
}

/// Validate every purpose in the catalog.
///
/// If two purposes share an id, the later one wins.
pub fn validate_purposes(
    purposes: &PurposeCatalog,
    selected_platforms: &[Platform],
    events: &EventCatalog,
) -> ValidationResults {
    purposes
        .iter()
        .map(|p| (p.id.clone(), validate_purpose(p, selected_platforms, events)))
        .collect()
}

/// Validate a purpose by id. Unknown ids yield the default (invalid) result.
pub fn validate_purpose_id(
    purposes: &PurposeCatalog,
    purpose_id: &str,
    selected_platforms: &[Platform],
    events: &EventCatalog,
) -> PlatformValidationResult {
    match purposes.get(purpose_id) {
        Some(purpose) => validate_purpose(purpose, selected_platforms, events),
        None => {
            debug!(purpose = purpose_id, "Unknown purpose id, reporting invalid");
            PlatformValidationResult::default()
        }
    }
}

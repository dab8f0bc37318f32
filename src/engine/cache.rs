// Explicit memo for validation results.
//
// Validation is cheap, but a UI recomputes on every keystroke. Entries are
// keyed by the normalized platform set and are only valid for the exact
// inputs they were computed from. The cache keeps a copy of the event catalog
// and purpose table it was filled from and compares both by content on every
// lookup, so a new snapshot or table drops every entry, whether or not the
// caller bumped a version.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::events::EventCatalog;
use crate::catalog::platforms::Platform;
use crate::catalog::purposes::PurposeCatalog;

use super::validation::{validate_purposes, ValidationResults};

/// Library API for interactive callers that re-validate on every edit. The
/// CLI validates once per run and goes straight to `validate_purposes`.
///
/// Results are computed over the sorted, de-duplicated platform list, so
/// `valid_platforms` / `invalid_platforms` come back in platform order
/// rather than the caller's selection order.
#[derive(Debug, Default)]
pub struct ValidationCache {
    inputs: Option<(PurposeCatalog, EventCatalog)>,
    entries: HashMap<Vec<Platform>, ValidationResults>,
    hits: u64,
    misses: u64,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        purposes: &PurposeCatalog,
        selected_platforms: &[Platform],
        events: &EventCatalog,
    ) -> &ValidationResults {
        let same_inputs = self
            .inputs
            .as_ref()
            .is_some_and(|(p, e)| p == purposes && e == events);
        if !same_inputs {
            if !self.entries.is_empty() {
                debug!(
                    dropped = self.entries.len(),
                    event_version = events.version(),
                    purpose_version = purposes.version,
                    "Inputs changed, clearing validation cache"
                );
            }
            self.entries.clear();
            self.inputs = Some((purposes.clone(), events.clone()));
        }

        let mut platforms = selected_platforms.to_vec();
        platforms.sort();
        platforms.dedup();

        if self.entries.contains_key(&platforms) {
            self.hits += 1;
        } else {
            self.misses += 1;
            debug!(platforms = platforms.len(), "Validation cache miss");
            let results = validate_purposes(purposes, &platforms, events);
            self.entries.insert(platforms.clone(), results);
        }

        &self.entries[&platforms]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.inputs = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// Account-wide advisory signals.
//
// These sit beside purpose validation and never feed into it. The shortfall
// check is looser than per-purpose validity: it compares every counter on the
// account (all categories, no purpose filter) against the single largest
// minimum anywhere in the purpose table.

use serde::{Deserialize, Serialize};

use crate::catalog::events::EventCatalog;
use crate::catalog::purposes::PurposeCatalog;

use super::validation::ValidationResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataShortfall {
    /// Sum of every counter in the snapshot.
    pub account_total: u64,
    /// Largest minimum across all purpose/platform combinations.
    pub max_required: u64,
    pub is_short: bool,
}

impl DataShortfall {
    /// How many more events the account needs to reach `max_required`.
    pub fn missing(&self) -> u64 {
        self.max_required.saturating_sub(self.account_total)
    }
}

pub fn data_shortfall(purposes: &PurposeCatalog, events: &EventCatalog) -> DataShortfall {
    let account_total = events.account_total();
    let max_required = purposes.max_threshold();
    DataShortfall {
        account_total,
        max_required,
        is_short: account_total < max_required,
    }
}

/// True when there is at least one purpose and none of them are valid.
pub fn all_purposes_disabled(results: &ValidationResults) -> bool {
    !results.is_empty() && results.values().all(|r| !r.is_valid)
}

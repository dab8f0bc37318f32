// Engagement events: the counters that feed audience targeting.
//
// The analytics service hands us a flat record of named integer counters.
// We join that record against a table of event definitions (label, category,
// priority order) to produce an EventCatalog. Any definition whose counter is
// missing from the record gets a count of zero, so "absent" and "present
// with 0" behave identically everywhere downstream.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The fixed set of event categories.
///
/// Declaration order is also display order: conversions are trusted most,
/// then intent signals, then awareness. `Exclude` events are only ever used
/// to remove people from an audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Conversion,
    Intent,
    Awareness,
    Exclude,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Conversion,
        EventCategory::Intent,
        EventCategory::Awareness,
        EventCategory::Exclude,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Conversion => "Conversion",
            EventCategory::Intent => "Intent",
            EventCategory::Awareness => "Awareness",
            EventCategory::Exclude => "Exclude",
        }
    }

    /// Whether events of this category may count toward a purpose threshold.
    pub fn is_targetable(&self) -> bool {
        !matches!(self, EventCategory::Exclude)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A static row describing one tracked event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: String,
    pub label: String,
    pub category: EventCategory,
    /// Lower order = higher priority during seeding.
    pub order: u32,
}

impl EventDefinition {
    pub fn new(id: &str, label: &str, category: EventCategory, order: u32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            category,
            order,
        }
    }
}

/// How many times a tracked event occurred for the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementEventCount {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub count: u64,
    pub category: EventCategory,
    pub order: u32,
}

impl EngagementEventCount {
    pub fn from_definition(def: &EventDefinition, count: u64) -> Self {
        Self {
            id: def.id.clone(),
            label: def.label.clone(),
            count,
            category: def.category,
            order: def.order,
        }
    }
}

/// The event definitions tracked for dealership accounts.
pub fn default_event_definitions() -> Vec<EventDefinition> {
    use EventCategory::*;
    vec![
        EventDefinition::new("vehicle_purchase", "Vehicle Purchases", Conversion, 1),
        EventDefinition::new("credit_application", "Credit Applications", Conversion, 2),
        EventDefinition::new("service_appointment", "Service Appointments", Conversion, 3),
        EventDefinition::new("lead_form_submission", "Lead Form Submissions", Intent, 4),
        EventDefinition::new("test_drive_request", "Test Drive Requests", Intent, 5),
        EventDefinition::new("phone_call", "Phone Calls", Intent, 6),
        EventDefinition::new("chat_conversation", "Chat Conversations", Intent, 7),
        EventDefinition::new("vdp_view", "Vehicle Detail Page Views", Awareness, 8),
        EventDefinition::new("page_view", "Page Views", Awareness, 9),
        EventDefinition::new("video_view", "Video Views", Awareness, 10),
        EventDefinition::new("recent_purchaser", "Recent Purchasers", Exclude, 100),
        EventDefinition::new("active_service_customer", "Active Service Customers", Exclude, 101),
        EventDefinition::new("employee", "Employees", Exclude, 102),
    ]
}

/// An immutable snapshot of engagement counts for one evaluation.
///
/// `version` is the snapshot's fetch time when known, 0 otherwise. It is
/// informational only: equality compares every row as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalog {
    events: Vec<EngagementEventCount>,
    #[serde(default)]
    version: u64,
}

impl EventCatalog {
    pub fn new(events: Vec<EngagementEventCount>) -> Self {
        Self { events, version: 0 }
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Join raw analytics counters against event definitions.
    ///
    /// Missing counters default to 0. Counters with no definition are
    /// ignored.
    pub fn from_counts(definitions: &[EventDefinition], counts: &HashMap<String, u64>) -> Self {
        for key in counts.keys() {
            if !definitions.iter().any(|d| &d.id == key) {
                debug!(counter = key.as_str(), "Ignoring counter with no event definition");
            }
        }

        let events = definitions
            .iter()
            .map(|def| {
                let count = counts.get(&def.id).copied().unwrap_or(0);
                EngagementEventCount::from_definition(def, count)
            })
            .collect();

        Self::new(events)
    }

    pub fn events(&self) -> &[EngagementEventCount] {
        &self.events
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EngagementEventCount> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Count for an event id, 0 if the catalog doesn't know it.
    pub fn count_of(&self, id: &str) -> u64 {
        self.get(id).map(|e| e.count).unwrap_or(0)
    }

    /// Events in a single category, in catalog order.
    pub fn in_category(
        &self,
        category: EventCategory,
    ) -> impl Iterator<Item = &EngagementEventCount> {
        self.events.iter().filter(move |e| e.category == category)
    }

    /// Group events by category. Within a category, events are sorted by
    /// priority order (stable, so catalog order breaks ties).
    pub fn by_category(&self) -> BTreeMap<EventCategory, Vec<&EngagementEventCount>> {
        let mut groups: BTreeMap<EventCategory, Vec<&EngagementEventCount>> = BTreeMap::new();
        for event in &self.events {
            groups.entry(event.category).or_default().push(event);
        }
        for group in groups.values_mut() {
            group.sort_by_key(|e| e.order);
        }
        groups
    }

    /// Sum of every counter in the snapshot, regardless of category.
    pub fn account_total(&self) -> u64 {
        self.events
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_counters_default_to_zero() {
        let defs = default_event_definitions();
        let mut counts = HashMap::new();
        counts.insert("vehicle_purchase".to_string(), 12);

        let catalog = EventCatalog::from_counts(&defs, &counts);
        assert_eq!(catalog.len(), defs.len());
        assert_eq!(catalog.count_of("vehicle_purchase"), 12);
        assert_eq!(catalog.count_of("page_view"), 0);
        assert_eq!(catalog.count_of("not_a_counter"), 0);
    }

    #[test]
    fn test_by_category_sorts_by_order() {
        let catalog = EventCatalog::new(vec![
            EngagementEventCount::from_definition(
                &EventDefinition::new("b", "B", EventCategory::Intent, 5),
                1,
            ),
            EngagementEventCount::from_definition(
                &EventDefinition::new("a", "A", EventCategory::Intent, 2),
                1,
            ),
        ]);
        let groups = catalog.by_category();
        let ids: Vec<&str> = groups[&EventCategory::Intent]
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!groups.contains_key(&EventCategory::Conversion));
    }

    #[test]
    fn test_only_exclude_is_untargetable() {
        assert!(EventCategory::Conversion.is_targetable());
        assert!(EventCategory::Awareness.is_targetable());
        assert!(!EventCategory::Exclude.is_targetable());
    }
}

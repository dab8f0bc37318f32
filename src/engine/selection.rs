// Event selection: which events the user has picked, grouped by category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::events::EventCategory;

/// Category -> ordered list of selected event ids.
///
/// Seeding produces one of these; after that the user edits it one toggle at
/// a time. The `Exclude` list is owned by seeding: every exclusion event is
/// always included, so toggles on it are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSelection {
    categories: BTreeMap<EventCategory, Vec<String>>,
}

impl EventSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a (possibly empty) list exists for `category`.
    pub fn ensure_category(&mut self, category: EventCategory) {
        self.categories.entry(category).or_default();
    }

    /// Append an id to a category. Returns false if it was already there.
    pub fn insert(&mut self, category: EventCategory, id: &str) -> bool {
        let list = self.categories.entry(category).or_default();
        if list.iter().any(|existing| existing == id) {
            return false;
        }
        list.push(id.to_string());
        true
    }

    /// Add the id if absent, remove it if present.
    ///
    /// Returns whether the selection changed. Exclude toggles never change it.
    pub fn toggle(&mut self, category: EventCategory, id: &str) -> bool {
        if category == EventCategory::Exclude {
            return false;
        }
        let list = self.categories.entry(category).or_default();
        match list.iter().position(|existing| existing == id) {
            Some(idx) => {
                list.remove(idx);
            }
            None => list.push(id.to_string()),
        }
        true
    }

    /// Selected ids in a category (empty if the category has no list).
    pub fn get(&self, category: EventCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: EventCategory, id: &str) -> bool {
        self.get(category).iter().any(|existing| existing == id)
    }

    pub fn has_category(&self, category: EventCategory) -> bool {
        self.categories.contains_key(&category)
    }

    /// Categories with a list, in category order.
    pub fn iter(&self) -> impl Iterator<Item = (EventCategory, &[String])> {
        self.categories.iter().map(|(c, ids)| (*c, ids.as_slice()))
    }

    /// True when no category holds any id.
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }
}

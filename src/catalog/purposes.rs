// Campaign purposes: named targeting strategies with per-platform minimums.
//
// A purpose says "to build this audience on platform X you need at least N
// matched events, counting only these categories". The table is business
// data: the built-in one covers the standard dealership strategies, and a
// JSON file can replace it without touching the evaluator.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::events::EventCategory;
use super::platforms::Platform;

/// What a purpose requires on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRequirement {
    pub display_name: String,
    pub min_events: u64,
}

/// A targeting strategy the user can pick for a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPurpose {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub platforms: BTreeMap<Platform, PlatformRequirement>,
    #[serde(default)]
    pub allowed_categories: Vec<EventCategory>,
}

impl CampaignPurpose {
    pub fn requirement(&self, platform: Platform) -> Option<&PlatformRequirement> {
        self.platforms.get(&platform)
    }

    /// Minimum matched events for a platform, or None if this purpose
    /// doesn't run there.
    pub fn threshold(&self, platform: Platform) -> Option<u64> {
        self.requirement(platform).map(|r| r.min_events)
    }

    /// Whether events of `category` count toward this purpose.
    /// Exclude events never count, whatever the table says.
    pub fn allows(&self, category: EventCategory) -> bool {
        category.is_targetable() && self.allowed_categories.contains(&category)
    }

    /// Thresholds for the selected platforms this purpose defines, in
    /// selection order. Repeated platforms are reported once.
    pub fn applicable_thresholds(&self, selected: &[Platform]) -> Vec<(Platform, u64)> {
        let mut out: Vec<(Platform, u64)> = Vec::new();
        for &platform in selected {
            if out.iter().any(|(p, _)| *p == platform) {
                continue;
            }
            if let Some(min) = self.threshold(platform) {
                out.push((platform, min));
            }
        }
        out
    }
}

/// The full table of purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeCatalog {
    #[serde(default)]
    pub version: u64,
    pub purposes: Vec<CampaignPurpose>,
}

impl PurposeCatalog {
    pub fn new(purposes: Vec<CampaignPurpose>) -> Self {
        Self {
            version: 0,
            purposes,
        }
    }

    /// The standard dealership purposes.
    pub fn builtin() -> Self {
        use EventCategory::*;
        use Platform::*;

        Self::new(vec![
            purpose(
                "conversions",
                "Conversion Retargeting",
                "Reach people who already bought, applied for credit, or booked service.",
                &[
                    (Facebook, 50),
                    (Instagram, 50),
                    (Google, 500),
                    (Microsoft, 500),
                    (Tiktok, 100),
                ],
                &[Conversion],
            ),
            purpose(
                "prospecting",
                "Lookalike Prospecting",
                "Find new shoppers who resemble your converters and hand-raisers.",
                &[
                    (Facebook, 100),
                    (Instagram, 100),
                    (Google, 1000),
                    (Microsoft, 1000),
                    (Tiktok, 500),
                    (Twitter, 500),
                ],
                &[Conversion, Intent],
            ),
            purpose(
                "awareness",
                "Broad Site Retargeting",
                "Stay in front of everyone who browsed inventory recently.",
                &[
                    (Facebook, 300),
                    (Instagram, 300),
                    (Google, 1000),
                    (Tiktok, 1000),
                    (Twitter, 1000),
                ],
                &[Conversion, Intent, Awareness],
            ),
        ])
    }

    /// Parse a purpose table from JSON.
    ///
    /// Accepts either `{"version": n, "purposes": [...]}` or a bare array.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Purpose table is not valid JSON")?;

        let catalog = if value.is_array() {
            Self::new(serde_json::from_value(value).context("Invalid purpose list")?)
        } else {
            serde_json::from_value(value).context("Invalid purpose table")?
        };

        for p in &catalog.purposes {
            if p.allowed_categories.contains(&EventCategory::Exclude) {
                warn!(
                    purpose = p.id.as_str(),
                    "Purpose lists Exclude as an allowed category; Exclude events never count"
                );
            }
            if p.platforms.is_empty() {
                warn!(purpose = p.id.as_str(), "Purpose defines no platforms");
            }
        }

        Ok(catalog)
    }

    /// Load a purpose table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read purpose table {}", path.display()))?;
        let catalog = Self::from_json(&json)
            .with_context(|| format!("Failed to parse purpose table {}", path.display()))?;
        info!(
            path = %path.display(),
            purposes = catalog.purposes.len(),
            "Loaded purpose table"
        );
        Ok(catalog)
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn get(&self, id: &str) -> Option<&CampaignPurpose> {
        self.purposes.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CampaignPurpose> {
        self.purposes.iter()
    }

    pub fn len(&self) -> usize {
        self.purposes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purposes.is_empty()
    }

    /// Highest threshold across every purpose/platform combination.
    pub fn max_threshold(&self) -> u64 {
        self.purposes
            .iter()
            .flat_map(|p| p.platforms.values())
            .map(|r| r.min_events)
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a PurposeCatalog {
    type Item = &'a CampaignPurpose;
    type IntoIter = std::slice::Iter<'a, CampaignPurpose>;

    fn into_iter(self) -> Self::IntoIter {
        self.purposes.iter()
    }
}

fn purpose(
    id: &str,
    label: &str,
    description: &str,
    thresholds: &[(Platform, u64)],
    categories: &[EventCategory],
) -> CampaignPurpose {
    CampaignPurpose {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        platforms: thresholds
            .iter()
            .map(|&(platform, min_events)| {
                (
                    platform,
                    PlatformRequirement {
                        display_name: platform.display_name().to_string(),
                        min_events,
                    },
                )
            })
            .collect(),
        allowed_categories: categories.to_vec(),
    }
}

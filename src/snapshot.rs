// Event snapshot loading: the raw counter record from the analytics service.
//
// Two shapes are accepted:
//   { "vehicle_purchase": 12, "page_view": 4500, ... }
//   { "fetched_at": "2026-10-01T12:00:00Z", "counts": { ... } }
// Null counters are treated as absent (0). Anything else that isn't a
// non-negative integer is rejected with the offending key in the error.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::events::{EventCatalog, EventDefinition};

/// A raw counter record plus when it was pulled.
#[derive(Debug, Clone, Default)]
pub struct EventSnapshot {
    pub fetched_at: Option<DateTime<Utc>>,
    pub counts: HashMap<String, u64>,
}

impl EventSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Event snapshot is not valid JSON")?;
        let Value::Object(root) = value else {
            anyhow::bail!("Event snapshot must be a JSON object of named counters");
        };

        match root.get("counts") {
            Some(Value::Object(counts)) => {
                let fetched_at = match root.get("fetched_at") {
                    Some(Value::String(ts)) => Some(
                        DateTime::parse_from_rfc3339(ts)
                            .with_context(|| format!("Invalid fetched_at timestamp '{ts}'"))?
                            .with_timezone(&Utc),
                    ),
                    Some(Value::Null) | None => None,
                    Some(other) => anyhow::bail!("fetched_at must be a string, got {other}"),
                };
                Ok(Self {
                    fetched_at,
                    counts: parse_counts(counts)?,
                })
            }
            _ => Ok(Self {
                fetched_at: None,
                counts: parse_counts(&root)?,
            }),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event snapshot {}", path.display()))?;
        let snapshot = Self::from_json(&json)
            .with_context(|| format!("Failed to parse event snapshot {}", path.display()))?;
        info!(
            path = %path.display(),
            counters = snapshot.counts.len(),
            "Loaded event snapshot"
        );
        Ok(snapshot)
    }

    /// Version used for cache keys: the fetch time in seconds, or 0.
    pub fn version(&self) -> u64 {
        self.fetched_at
            .map(|t| t.timestamp().max(0) as u64)
            .unwrap_or(0)
    }

    pub fn to_catalog(&self, definitions: &[EventDefinition]) -> EventCatalog {
        EventCatalog::from_counts(definitions, &self.counts).with_version(self.version())
    }
}

fn parse_counts(obj: &Map<String, Value>) -> Result<HashMap<String, u64>> {
    let mut counts = HashMap::with_capacity(obj.len());
    for (key, value) in obj {
        match value {
            Value::Null => continue,
            Value::Number(n) => {
                let count = n.as_u64().with_context(|| {
                    format!("Counter '{key}' must be a non-negative integer, got {n}")
                })?;
                counts.insert(key.clone(), count);
            }
            other => anyhow::bail!("Counter '{key}' must be a number, got {other}"),
        }
    }
    Ok(counts)
}

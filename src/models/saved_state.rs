//! The checkpoint record written after every selection or stats change.
//!
//! History is never part of it. Loading is field by field: a bad field falls back
//! to its default instead of discarding the whole record, and unreadable stats
//! entries are dropped.

use super::{Operator, Problem, ReviewStats, StatsMap};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

pub fn default_operands() -> BTreeSet<i64> {
    (1..=10).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    pub selected_operands: BTreeSet<i64>,
    pub selected_operator: Operator,
    pub review_stats: StatsMap,
}

impl Default for SavedState {
    fn default() -> Self {
        Self {
            selected_operands: default_operands(),
            selected_operator: Operator::Multiply,
            review_stats: StatsMap::new(),
        }
    }
}

impl SavedState {
    /// Parses a saved record. Text that is not a JSON object means "nothing saved".
    pub fn from_json_str(json: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("Ignoring unreadable saved state: {}", e);
                None
            }
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;
        let defaults = Self::default();

        let selected_operands = record
            .get("selectedOperands")
            .or_else(|| record.get("selectedNumbers"))
            .and_then(|v| decode_field(v, "selectedOperands"))
            .unwrap_or(defaults.selected_operands);

        let selected_operator = record
            .get("selectedOperator")
            .and_then(|v| decode_field(v, "selectedOperator"))
            .unwrap_or(defaults.selected_operator);

        let review_stats = record
            .get("reviewStats")
            .or_else(|| record.get("problemStats"))
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(key, entry)| decode_stats_entry(key, entry))
                    .collect()
            })
            .unwrap_or(defaults.review_stats);

        Some(Self {
            selected_operands,
            selected_operator,
            review_stats,
        })
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn decode_field<T: for<'de> Deserialize<'de>>(value: &Value, name: &str) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!("Saved field '{}' is invalid, using default: {}", name, e);
            None
        }
    }
}

fn decode_stats_entry(key: &str, entry: &Value) -> Option<(String, ReviewStats)> {
    if Problem::from_key(key).is_none() {
        warn!("Dropping stats for unrecognised problem key '{}'", key);
        return None;
    }
    let stats = decode_field::<ReviewStats>(entry, key)?;
    match stats.clone().validated() {
        Some(stats) => Some((key.to_string(), stats)),
        None => {
            warn!("Dropping out-of-range stats for '{}': {:?}", key, stats);
            None
        }
    }
}

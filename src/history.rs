//! Per-tick history of a simulation run.
//!
//! Each record is a flat snapshot: every metabolite and signal by name, the
//! rate of every rule as `rate_<ruleName>`, and the tick's time value.
//! Readers that ask for a key the record does not hold get 0.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::MetabolicState;

/// Immutable snapshot of the state after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub time: f64,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl HistoryRecord {
    pub fn from_state(state: &MetabolicState, time: f64) -> Self {
        let mut values = BTreeMap::new();
        for (m, v) in state.metabolites() {
            values.insert(m.name().to_string(), v);
        }
        for (s, v) in state.signals() {
            values.insert(s.name().to_string(), v);
        }
        for (r, v) in state.rates() {
            values.insert(r.rate_key(), v);
        }
        Self { time, values }
    }

    /// Value under `key`; `"time"` reads the time stamp, unknown keys read 0.0
    pub fn get(&self, key: &str) -> f64 {
        if key == "time" {
            return self.time;
        }
        self.values.get(key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        key == "time" || self.values.contains_key(key)
    }

    /// Value keys in sorted order (excluding `time`)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Ordered sequence of records produced by a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(ticks: usize) -> Self {
        Self {
            records: Vec::with_capacity(ticks),
        }
    }

    /// Snapshot `state` at `time`
    pub fn record(&mut self, state: &MetabolicState, time: f64) {
        self.records.push(HistoryRecord::from_state(state, time));
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<HistoryRecord> {
        self.records
    }

    /// Time series of one key across the run
    pub fn series(&self, key: &str) -> Vec<f64> {
        self.records.iter().map(|r| r.get(key)).collect()
    }

    /// Value of `key` in the last record, 0.0 for an empty history
    pub fn final_value(&self, key: &str) -> f64 {
        self.last().map(|r| r.get(key)).unwrap_or(0.0)
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean of a key over the run
    pub fn mean(&self, key: &str) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.series(key).iter().sum::<f64>() / self.records.len() as f64
    }

    /// Peak value of a key and the index of its first occurrence
    pub fn max_of(&self, key: &str) -> Option<(usize, f64)> {
        self.records
            .iter()
            .map(|r| r.get(key))
            .enumerate()
            .fold(None, |best, (i, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Metabolite, RuleId};

    #[test]
    fn test_record_keys() {
        let mut state = MetabolicState::default();
        state.record_rate(RuleId::Ketogenesis, 0.2);
        let record = HistoryRecord::from_state(&state, 1.5);

        assert_eq!(record.values.len(), 20 + 6 + 16);
        assert_eq!(record.get("time"), 1.5);
        assert_eq!(record.get("glucose"), 100.0);
        assert_eq!(record.get("nad+"), 50.0);
        assert_eq!(record.get("sympathetic_tone"), 1.0);
        assert_eq!(record.get("rate_ketogenesis"), 0.2);
        assert_eq!(record.get("rate_ureaCycle"), 0.0);
    }

    #[test]
    fn test_missing_key_reads_zero() {
        let record = HistoryRecord::from_state(&MetabolicState::default(), 0.0);
        assert!(!record.contains("rate_photosynthesis"));
        assert_eq!(record.get("rate_photosynthesis"), 0.0);
    }

    #[test]
    fn test_series_and_final() {
        let mut history = History::new();
        let mut state = MetabolicState::default();
        for i in 0..3 {
            state.set_metabolite(Metabolite::Glucose, 90.0 + i as f64);
            history.record(&state, i as f64);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.series("glucose"), vec![90.0, 91.0, 92.0]);
        assert_eq!(history.series("time"), vec![0.0, 1.0, 2.0]);
        assert_eq!(history.final_value("glucose"), 92.0);
        assert_eq!(history.max_of("glucose"), Some((2, 92.0)));
        assert!((history.mean("glucose") - 91.0).abs() < 1e-12);
    }

    #[test]
    fn test_flattened_json() {
        let record = HistoryRecord::from_state(&MetabolicState::default(), 2.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["time"], 2.0);
        assert_eq!(json["glucose"], 100.0);
        assert_eq!(json["rate_betaOxidation"], 0.0);
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.final_value("glucose"), 0.0);
        assert_eq!(history.max_of("glucose"), None);
    }
}

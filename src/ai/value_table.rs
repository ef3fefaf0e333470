use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::StoreError;
use crate::game::Fingerprint;

/// Sparse table of learned move values, keyed by state fingerprint.
///
/// Entries appear lazily on first update and are never removed. Each state
/// maps only the columns that have actually been evaluated; there is no
/// assumption that every legal column is present.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    entries: HashMap<Fingerprint, BTreeMap<usize, f64>>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states with at least one stored value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, state: Fingerprint, column: usize) -> Option<f64> {
        self.entries.get(&state).and_then(|m| m.get(&column)).copied()
    }

    pub fn set(&mut self, state: Fingerprint, column: usize, value: f64) {
        self.entries.entry(state).or_default().insert(column, value);
    }

    /// The maximum stored value among `columns` for `state`, if any.
    pub fn best_value(&self, state: Fingerprint, columns: &[usize]) -> Option<f64> {
        let moves = self.entries.get(&state)?;
        columns
            .iter()
            .filter_map(|col| moves.get(col).copied())
            .fold(None, |best, v| match best {
                Some(b) if b >= v => Some(b),
                _ => Some(v),
            })
    }

    /// The stored column with the maximum value for `state`. Ties keep the
    /// first column in ascending order.
    pub fn best_move(&self, state: Fingerprint) -> Option<(usize, f64)> {
        let moves = self.entries.get(&state)?;
        let mut best: Option<(usize, f64)> = None;
        for (&col, &value) in moves {
            match best {
                Some((_, b)) if value <= b => {}
                _ => best = Some((col, value)),
            }
        }
        best
    }

    /// Serialize to JSON: fingerprint and column keys become strings, the
    /// same shape the original table files use.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut encoded: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (state, moves) in &self.entries {
            let inner = moves
                .iter()
                .map(|(col, value)| (col.to_string(), *value))
                .collect();
            encoded.insert(state.to_string(), inner);
        }
        let json = serde_json::to_string(&encoded)?;
        fs::write(path, json).map_err(|e| StoreError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a table saved by [`ValueTable::save`], converting the string keys
    /// back to their native types.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path).map_err(|e| StoreError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let encoded: BTreeMap<String, BTreeMap<String, f64>> = serde_json::from_str(&json)?;

        let mut table = ValueTable::new();
        for (state_key, moves) in encoded {
            let state: Fingerprint = state_key
                .parse()
                .map_err(|_| StoreError::KeyParse(state_key.clone()))?;
            for (col_key, value) in moves {
                let column: usize = col_key
                    .parse()
                    .map_err(|_| StoreError::KeyParse(col_key.clone()))?;
                table.set(state, column, value);
            }
        }
        Ok(table)
    }
}

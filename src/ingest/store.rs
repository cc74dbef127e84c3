//! In-memory record table store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayRecord;

/// The table name used when none is given.
pub const DEFAULT_TABLE: &str = "payroll";

/// A stored table's name and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// The table name.
    pub name: String,
    /// The number of raw records in the table.
    pub records: usize,
}

/// Named tables of pay records.
///
/// Each upload replaces the whole table it targets; nothing is merged across
/// uploads.
///
/// # Example
///
/// ```
/// use payroll_summary::ingest::RecordStore;
///
/// let mut store = RecordStore::new();
/// store.replace_table("payroll", vec![]);
/// assert_eq!(store.records("payroll").unwrap().len(), 0);
/// assert!(store.records("archive").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    tables: BTreeMap<String, Vec<PayRecord>>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents of `table`, returning the previous record count.
    pub fn replace_table(&mut self, table: &str, records: Vec<PayRecord>) -> Option<usize> {
        self.tables
            .insert(table.to_string(), records)
            .map(|previous| previous.len())
    }

    /// Returns the records of `table`.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` if the table was never written.
    pub fn records(&self, table: &str) -> EngineResult<&[PayRecord]> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::TableNotFound {
                table: table.to_string(),
            })
    }

    /// Lists every table with its record count, ordered by name.
    pub fn tables(&self) -> Vec<TableInfo> {
        self.tables
            .iter()
            .map(|(name, records)| TableInfo {
                name: name.clone(),
                records: records.len(),
            })
            .collect()
    }
}

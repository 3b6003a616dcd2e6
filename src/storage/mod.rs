//! Table catalog and its on-disk record image
//!
//! One `StorageEngine` owns the whole catalog: every table is held in
//! memory and mirrored by one JSON record on disk. Mutations validate
//! first, then persist synchronously before they are visible.

pub mod record;

use crate::error::{Result, StorageError};
use crate::types::{Column, Row, Table};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The table catalog, loaded fully into memory at construction.
///
/// Assumes a single logical caller; there is no locking.
pub struct StorageEngine {
    data_dir: PathBuf,
    tables: BTreeMap<String, Table>,
}

impl StorageEngine {
    /// Open the catalog at `data_dir`, creating the directory if needed
    /// and loading every persisted table record in it.
    ///
    /// A record that cannot be read back as a valid table is skipped
    /// with a warning; the rest of the catalog still loads.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(StorageError::Io)?;

        let mut tables = BTreeMap::new();
        for entry in fs::read_dir(&data_dir).map_err(StorageError::Io)? {
            let entry = entry.map_err(StorageError::Io)?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match load_record(&path) {
                Ok(table) => {
                    tables.insert(table.name.clone(), table);
                }
                Err(err) => {
                    log::warn!("Failed to load table record {}: {}", path.display(), err);
                }
            }
        }

        Ok(Self { data_dir, tables })
    }

    /// Register a new table and persist its (empty) record immediately.
    pub fn create_table(&mut self, name: String, columns: Vec<Column>) -> Result<()> {
        if self.tables.contains_key(&name) {
            return Err(StorageError::TableExists(name).into());
        }

        let table = Table::new(name.clone(), columns);
        record::write_record(&self.data_dir, &table)?;
        self.tables.insert(name, table);

        Ok(())
    }

    /// Get a read view of one table (schema + rows).
    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| StorageError::TableNotFound(name.to_string()).into())
    }

    /// Validate and append one row, then overwrite the table's record.
    ///
    /// Validation precedes persistence; if the disk write fails the
    /// in-memory append is rolled back, so a failed statement has no
    /// observable effect.
    pub fn insert_row(&mut self, table_name: &str, row: Row) -> Result<()> {
        let table = self
            .tables
            .get_mut(table_name)
            .ok_or_else(|| StorageError::TableNotFound(table_name.to_string()))?;

        table.validate_row(&row)?;

        table.rows.push(row);
        if let Err(err) = record::write_record(&self.data_dir, table) {
            table.rows.pop();
            return Err(err.into());
        }

        Ok(())
    }

    /// All table names, in name order.
    pub fn list_tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }
}

/// Read one record and check its rows against its own schema, so a
/// tampered file cannot register an invariant-breaking table.
fn load_record(path: &Path) -> Result<Table> {
    let table = record::read_record(path)?;
    for row in &table.rows {
        if table.validate_row(row).is_err() {
            return Err(StorageError::CorruptData(path.to_path_buf()).into());
        }
    }
    Ok(table)
}

/// Persisted table records - one JSON file per table
use crate::error::StorageError;
use crate::types::Table;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path of the record file backing `table_name`.
pub fn record_path(data_dir: &Path, table_name: &str) -> PathBuf {
    data_dir.join(format!("{}.json", table_name))
}

/// Overwrite the table's whole record and flush it to disk.
///
/// The write happens in place: a crash mid-write may leave this record
/// corrupt, the accepted risk of the whole-record overwrite contract.
pub fn write_record(data_dir: &Path, table: &Table) -> Result<(), StorageError> {
    let path = record_path(data_dir, &table.name);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    let mut writer = BufWriter::new(file);

    let json = serde_json::to_string_pretty(table).map_err(std::io::Error::from)?;
    writer.write_all(json.as_bytes())?;

    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(())
}

/// Read one table record; any parse failure is corruption of that file.
pub fn read_record(path: &Path) -> Result<Table, StorageError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|_| StorageError::CorruptData(path.to_path_buf()))
}

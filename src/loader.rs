//! Csv reading and writing

use crate::config::DEFAULT_DELIMITER;
use crate::error::{AtlasError, AtlasResult};
use crate::table::Table;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Read a table from csv text with a header row
pub fn read_table(reader: impl Read) -> AtlasResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DEFAULT_DELIMITER)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header = reader
        .headers()
        .map_err(|err| AtlasError::Load(err.to_string()))?
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<String>>();
    if header.is_empty() || header.iter().all(|h| h.is_empty()) {
        return Err(AtlasError::Load("No columns to parse from file".to_string()));
    }

    let mut records = vec![];
    for result in reader.records() {
        let record = result.map_err(|err| AtlasError::Load(err.to_string()))?;
        records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }
    debug!(columns = header.len(), rows = records.len(), "Parsed csv records");

    Table::from_records(&header, &records).map_err(|err| match err {
        AtlasError::Shape(reason) => AtlasError::Load(reason),
        other => other,
    })
}

/// Load a table from a csv file
pub fn load(path: &Path) -> AtlasResult<Table> {
    let file = std::fs::File::open(path)
        .map_err(|err| AtlasError::Load(format!("{} :: \"{}\"", err, path.display())))?;
    read_table(file)
}

/// Write a table as csv text
///
/// Header is always written and no row index column is added. A table without
/// columns can't be read back, so it is not written.
pub fn write_table(table: &Table, writer: impl Write) -> AtlasResult<()> {
    check_columns(table)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DEFAULT_DELIMITER)
        .from_writer(writer);

    writer
        .write_record(table.columns().iter().map(|c| c.name()))
        .map_err(|err| AtlasError::Export(err.to_string()))?;
    for row_index in 0..table.get_row_count() {
        writer
            .write_record(
                table
                    .columns()
                    .iter()
                    .map(|c| c.values()[row_index].to_field()),
            )
            .map_err(|err| AtlasError::Export(err.to_string()))?;
    }
    writer
        .flush()
        .map_err(|err| AtlasError::Export(err.to_string()))?;
    Ok(())
}

/// Export a table to a csv file
pub fn export(table: &Table, path: &Path) -> AtlasResult<()> {
    if path.as_os_str().is_empty() {
        return Err(AtlasError::Export("Export requires file path".to_string()));
    }
    check_columns(table)?;
    let file = std::fs::File::create(path)
        .map_err(|err| AtlasError::Export(format!("{} :: \"{}\"", err, path.display())))?;
    write_table(table, file)
}

fn check_columns(table: &Table) -> AtlasResult<()> {
    if table.get_column_count() == 0 {
        return Err(AtlasError::Export("Table has no columns".to_string()));
    }
    Ok(())
}

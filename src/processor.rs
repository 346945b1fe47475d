use crate::config::DEFAULT_PREVIEW_ROWS;
use crate::error::{AtlasError, AtlasResult};
use crate::loader;
use crate::preview::Preview;
use crate::table::Table;
use crate::value::{Value, ValueType};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Owner of the loaded table
///
/// Every read and mutation of the table goes through a processor method.
#[derive(Default)]
pub struct Processor {
    pub(crate) file: Option<PathBuf>,
    pub(crate) data: Option<Table>,
}

/// Shape and type summary of the loaded table
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo {
    pub source_file: Option<PathBuf>,
    pub rows: usize,
    pub columns: Vec<String>,
    pub data_types: Vec<(String, ValueType)>,
    pub missing_values: Vec<(String, usize)>,
}

impl std::fmt::Display for BasicInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = self.source_file.as_ref() {
            writeln!(f, "file: {}", file.display())?;
        }
        writeln!(f, "rows: {}", self.rows)?;
        writeln!(f, "columns: [{}]", self.columns.join(", "))?;
        writeln!(f, "data_types:")?;
        for (name, value_type) in &self.data_types {
            writeln!(f, "  {}: {}", name, value_type)?;
        }
        writeln!(f, "missing_values:")?;
        for (name, count) in &self.missing_values {
            writeln!(f, "  {}: {}", name, count)?;
        }
        Ok(())
    }
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a csv file, replacing the current table
    ///
    /// Current table is kept when loading fails.
    pub fn read_from_file(&mut self, path: &Path) -> AtlasResult<()> {
        let table = loader::load(path)?;
        info!(
            file = %path.display(),
            rows = table.get_row_count(),
            columns = table.get_column_count(),
            "Loaded csv file"
        );
        let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.file.replace(resolved);
        self.data.replace(table);
        Ok(())
    }

    /// Load csv text, replacing the current table
    pub fn import_from_string(&mut self, src: &str) -> AtlasResult<()> {
        let table = loader::read_table(src.as_bytes())?;
        self.file = None;
        self.data.replace(table);
        Ok(())
    }

    pub fn export(&self, path: &Path) -> AtlasResult<()> {
        let table = self.data.as_ref().ok_or_else(AtlasError::export_no_data)?;
        loader::export(table, path)?;
        info!(file = %path.display(), rows = table.get_row_count(), "Exported data");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn get_table(&self) -> AtlasResult<&Table> {
        self.data.as_ref().ok_or(AtlasError::NoData)
    }

    fn get_table_mut(&mut self) -> AtlasResult<&mut Table> {
        self.data.as_mut().ok_or(AtlasError::NoData)
    }

    fn get_column_index(&self, column: &str) -> AtlasResult<usize> {
        self.get_table()?
            .try_get_column_index(column)
            .ok_or_else(|| AtlasError::ColumnNotFound(column.to_string()))
    }

    // <EXT>
    pub fn get_column_names(&self) -> AtlasResult<Vec<String>> {
        Ok(self.get_table()?.column_names())
    }

    pub fn get_row_count(&self) -> AtlasResult<usize> {
        Ok(self.get_table()?.get_row_count())
    }

    pub fn get_column_count(&self) -> AtlasResult<usize> {
        Ok(self.get_table()?.get_column_count())
    }

    pub fn head(&self, count: usize) -> AtlasResult<Preview> {
        Ok(self.get_table()?.head(count))
    }

    pub fn tail(&self, count: usize) -> AtlasResult<Preview> {
        Ok(self.get_table()?.tail(count))
    }

    pub fn row(&self, row_index: usize) -> AtlasResult<Preview> {
        let table = self.get_table()?;
        if row_index >= table.get_row_count() {
            return Err(AtlasError::IndexOutOfRange {
                index: row_index,
                row_count: table.get_row_count(),
            });
        }
        Ok(table.preview(std::iter::once(row_index)))
    }

    /// First values of a single column
    pub fn column_preview(&self, column: &str, count: usize) -> AtlasResult<Preview> {
        let table = self.get_table()?;
        let index = self.get_column_index(column)?;
        let values = table.columns()[index].values();
        let rows = values
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, v)| (i, vec![v.clone()]))
            .collect();
        Ok(Preview::new(vec![column.to_string()], rows))
    }
    // </EXT>

    pub fn basic_info(&self) -> AtlasResult<BasicInfo> {
        let table = self.get_table()?;
        Ok(BasicInfo {
            source_file: self.file.clone(),
            rows: table.get_row_count(),
            columns: table.column_names(),
            data_types: table
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.column_type()))
                .collect(),
            missing_values: table
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.missing_count()))
                .collect(),
        })
    }

    /// Sort whole table in place and return its first `limit` rows
    ///
    /// Zero limit falls back to the default preview length.
    pub fn sort_by_column(
        &mut self,
        column: &str,
        ascending: bool,
        limit: usize,
    ) -> AtlasResult<Preview> {
        let index = self.get_column_index(column)?;
        let limit = if limit == 0 { DEFAULT_PREVIEW_ROWS } else { limit };
        let table = self.get_table_mut()?;
        table.sort_by_column(index, ascending)?;
        info!(column, ascending, "Sorted table");
        Ok(table.head(limit))
    }

    /// Rows where column equals given value, without mutating the table
    ///
    /// Value is coerced to the column type first. A value that can't be coerced
    /// matches no row.
    pub fn filter_by_value(&self, column: &str, value: &str) -> AtlasResult<Preview> {
        let table = self.get_table()?;
        let index = self.get_column_index(column)?;
        let column_type = table.columns()[index].column_type();
        let positions = match Value::coerce(value, column_type) {
            Some(target) => table.positions_where(index, &target),
            None => vec![],
        };
        debug!(column, value, matches = positions.len(), "Filtered table");
        Ok(table.preview(positions))
    }

    pub fn list_categories(&self, column: &str) -> AtlasResult<Vec<Value>> {
        let index = self.get_column_index(column)?;
        Ok(self.get_table()?.distinct_values(index))
    }

    /// Append a column filled with `default_value`, or missing values if None
    pub fn add_column(&mut self, name: &str, default_value: Option<&str>) -> AtlasResult<()> {
        let placeholder = default_value.map(Value::infer).unwrap_or(Value::Null);
        self.get_table_mut()?.insert_column(name, placeholder)?;
        info!(column = name, "Added column");
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> AtlasResult<()> {
        self.get_table_mut()?.delete_column(name)?;
        info!(column = name, "Removed column");
        Ok(())
    }

    /// Append a row from raw fields keyed by column name
    ///
    /// Returns the position of the new row.
    pub fn add_row(&mut self, row_values: &HashMap<String, String>) -> AtlasResult<usize> {
        let index = self.get_table_mut()?.insert_row(row_values)?;
        info!(row = index, "Added row");
        Ok(index)
    }

    /// Remove a row, shifting later rows down by one
    pub fn remove_row(&mut self, row_index: usize) -> AtlasResult<()> {
        self.get_table_mut()?.delete_row(row_index)?;
        info!(row = row_index, "Removed row");
        Ok(())
    }
}

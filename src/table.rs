use crate::error::{AtlasError, AtlasResult};
use crate::preview::Preview;
use crate::value::{Value, ValueType};
use std::cmp::Ordering;
use std::collections::HashMap;

/// In-memory csv data
///
/// Data is stored by column. Every column holds exactly `row_count` values and
/// column names are unique.
#[derive(Clone, Debug, Default)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
    pub(crate) row_count: usize,
}

#[derive(Clone, Debug)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) column_type: ValueType,
    pub(crate) values: Vec<Value>,
}

impl Column {
    pub fn new(name: &str, column_type: ValueType, values: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ValueType {
        self.column_type
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    fn widen(&mut self, column_type: ValueType) {
        if self.column_type == column_type {
            return;
        }
        self.column_type = column_type;
        let values = std::mem::take(&mut self.values);
        self.values = values.into_iter().map(|v| v.widen(column_type)).collect();
    }
}

impl Table {
    /// Build a table from a header and raw records
    ///
    /// Types are inferred per column. Every record should have the header's length.
    pub fn from_records(header: &[String], records: &[Vec<String>]) -> AtlasResult<Self> {
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, record)| record.len() != header.len())
        {
            return Err(AtlasError::Shape(format!(
                r#"Record {} has "{}" fields while header has "{}""#,
                index + 1,
                record.len(),
                header.len()
            )));
        }

        let names = unique_names(header);
        let columns = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let column_type =
                    ValueType::infer_column(records.iter().map(|record| record[index].as_str()));
                let values = records
                    .iter()
                    .map(|record| {
                        let field = record[index].as_str();
                        Value::from_str(field, column_type)
                            .unwrap_or_else(|| Value::Text(field.to_string()))
                    })
                    .collect();
                Column::new(name, column_type, values)
            })
            .collect();

        Ok(Self {
            columns,
            row_count: records.len(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get_row_count(&self) -> usize {
        self.row_count
    }

    pub fn get_column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn try_get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn get_column(&self, name: &str) -> AtlasResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AtlasError::ColumnNotFound(name.to_string()))
    }

    /// Values of a row in column order
    pub fn get_row(&self, row_index: usize) -> Option<Vec<Value>> {
        if row_index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values[row_index].clone())
                .collect(),
        )
    }

    /// Preview of rows at given positions
    pub fn preview(&self, positions: impl IntoIterator<Item = usize>) -> Preview {
        let rows = positions
            .into_iter()
            .filter_map(|index| self.get_row(index).map(|row| (index, row)))
            .collect();
        Preview::new(self.column_names(), rows)
    }

    pub fn head(&self, count: usize) -> Preview {
        self.preview(0..count.min(self.row_count))
    }

    pub fn tail(&self, count: usize) -> Preview {
        self.preview(self.row_count.saturating_sub(count)..self.row_count)
    }

    /// Reorder every column by the natural ordering of given column
    ///
    /// Sorting is stable and missing values stay last in both directions.
    pub fn sort_by_column(&mut self, column_index: usize, ascending: bool) -> AtlasResult<()> {
        let key = &self
            .columns
            .get(column_index)
            .ok_or_else(|| AtlasError::ColumnNotFound(column_index.to_string()))?
            .values;
        let mut order: Vec<usize> = (0..self.row_count).collect();
        order.sort_by(|&a, &b| {
            let (lhs, rhs) = (&key[a], &key[b]);
            match (lhs.is_null(), rhs.is_null()) {
                (false, false) if !ascending => rhs.natural_cmp(lhs),
                _ => lhs.natural_cmp(rhs),
            }
        });

        for column in &mut self.columns {
            let mut values = std::mem::take(&mut column.values);
            let mut sorted = Vec::with_capacity(values.len());
            for &index in &order {
                sorted.push(std::mem::replace(&mut values[index], Value::Null));
            }
            column.values = sorted;
        }
        Ok(())
    }

    /// Positions of rows where given column equals the value
    pub fn positions_where(&self, column_index: usize, target: &Value) -> Vec<usize> {
        match self.columns.get(column_index) {
            Some(column) => column
                .values
                .iter()
                .enumerate()
                .filter(|(_, value)| !value.is_null() && *value == target)
                .map(|(index, _)| index)
                .collect(),
            None => vec![],
        }
    }

    /// Distinct values of a column in first observed order
    pub fn distinct_values(&self, column_index: usize) -> Vec<Value> {
        let mut distinct: Vec<Value> = vec![];
        if let Some(column) = self.columns.get(column_index) {
            for value in &column.values {
                if !distinct.contains(value) {
                    distinct.push(value.clone());
                }
            }
        }
        distinct
    }

    pub fn insert_column(&mut self, column_name: &str, placeholder: Value) -> AtlasResult<()> {
        if column_name.trim().is_empty() {
            return Err(AtlasError::InvalidColumnName(column_name.to_string()));
        }
        if self.try_get_column_index(column_name).is_some() {
            return Err(AtlasError::ColumnExists(column_name.to_string()));
        }
        let column_type = placeholder.value_type().unwrap_or_default();
        let values = vec![placeholder; self.row_count];
        self.columns
            .push(Column::new(column_name, column_type, values));
        Ok(())
    }

    pub fn delete_column(&mut self, column_name: &str) -> AtlasResult<Column> {
        let index = self
            .try_get_column_index(column_name)
            .ok_or_else(|| AtlasError::ColumnNotFound(column_name.to_string()))?;
        let removed = self.columns.remove(index);

        // Rows can't exist without any column
        if self.columns.is_empty() {
            self.row_count = 0;
        }
        Ok(removed)
    }

    /// Append a row from raw fields keyed by column name
    ///
    /// Key set should equal the column set, which can't be empty. A field that
    /// doesn't fit its column widens the column type. Returns the position of
    /// the new row.
    pub fn insert_row(&mut self, source: &HashMap<String, String>) -> AtlasResult<usize> {
        if self.columns.is_empty() {
            return Err(AtlasError::Shape(
                "Table has no columns to hold a row".to_string(),
            ));
        }
        self.check_row_keys(source)?;

        for column in &mut self.columns {
            let field = source[&column.name].as_str();
            let value = match Value::from_str(field, column.column_type) {
                Some(value) => value,
                None => {
                    let value = Value::infer(field);
                    let widened = value
                        .value_type()
                        .map(|t| column.column_type.unify(t))
                        .unwrap_or(column.column_type);
                    column.widen(widened);
                    value.widen(widened)
                }
            };
            column.values.push(value);
        }
        self.row_count += 1;
        Ok(self.row_count - 1)
    }

    pub fn delete_row(&mut self, row_index: usize) -> AtlasResult<Vec<Value>> {
        if row_index >= self.row_count {
            return Err(AtlasError::IndexOutOfRange {
                index: row_index,
                row_count: self.row_count,
            });
        }
        let removed = self
            .columns
            .iter_mut()
            .map(|c| c.values.remove(row_index))
            .collect();
        self.row_count -= 1;
        Ok(removed)
    }

    fn check_row_keys(&self, source: &HashMap<String, String>) -> AtlasResult<()> {
        let missing = self
            .columns
            .iter()
            .filter(|c| !source.contains_key(&c.name))
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>();
        let mut extra = source
            .keys()
            .filter(|key| self.try_get_column_index(key).is_none())
            .map(|key| key.as_str())
            .collect::<Vec<_>>();
        extra.sort_unstable();

        match (missing.is_empty(), extra.is_empty()) {
            (true, true) => Ok(()),
            _ => Err(AtlasError::Shape(format!(
                "Missing columns [{}], unknown columns [{}]",
                missing.join(", "),
                extra.join(", ")
            ))),
        }
    }
}

// Later duplicates get ".1", ".2" ... appended
fn unique_names(header: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for name in header {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while names.contains(&candidate) || header_clash(header, name, &candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

fn header_clash(header: &[String], original: &str, candidate: &str) -> bool {
    candidate != original && header.iter().any(|h| h == candidate)
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.row_count == other.row_count
            && self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|(a, b)| {
                    a.name == b.name
                        && a.column_type == b.column_type
                        && a.values.len() == b.values.len()
                        && a.values
                            .iter()
                            .zip(b.values.iter())
                            .all(|(x, y)| x.natural_cmp(y) == Ordering::Equal)
                })
    }
}

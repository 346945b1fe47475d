use crate::value::Value;

/// Bounded set of rows returned to the user
///
/// Each row carries its position in the table at the time it was taken.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    columns: Vec<String>,
    rows: Vec<(usize, Vec<Value>)>,
}

impl Preview {
    pub fn new(columns: Vec<String>, rows: Vec<(usize, Vec<Value>)>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[(usize, Vec<Value>)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn positions(&self) -> Vec<usize> {
        self.rows.iter().map(|(index, _)| *index).collect()
    }

    /// Values of a column across previewed rows
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|(_, row)| &row[index]).collect())
    }

    pub fn head(&self, count: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(count).cloned().collect(),
        }
    }
}

// Right aligned grid with row positions as the first column
impl std::fmt::Display for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "Empty table ({} rows)", self.rows.len());
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|(_, row)| row.iter().map(|v| v.to_string()).collect())
            .collect();
        let index_width = self
            .rows
            .iter()
            .map(|(index, _)| index.to_string().len())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for ((index, _), row) in self.rows.iter().zip(&cells) {
            write!(f, "{:<index_width$}", index)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell, width = width)?;
            }
            writeln!(f)?;
        }

        if self.rows.is_empty() {
            writeln!(f, "(no rows)")?;
        }
        Ok(())
    }
}

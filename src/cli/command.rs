use super::command_loop::Session;
use super::utils::{is_back, Terminal};
use crate::error::AtlasResult;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuAction {
    Info,
    Sort,
    Filter,
    Categories,
    Export,
    AddColumn,
    RemoveColumn,
    AddRow,
    RemoveRow,
    Exit,
    None,
}

impl MenuAction {
    pub const ALL: [Self; 10] = [
        Self::Info,
        Self::Sort,
        Self::Filter,
        Self::Categories,
        Self::Export,
        Self::AddColumn,
        Self::RemoveColumn,
        Self::AddRow,
        Self::RemoveRow,
        Self::Exit,
    ];

    pub fn from_str(src: &str) -> Self {
        match src.to_lowercase().trim() {
            "1" | "info" => Self::Info,
            "2" | "sort" => Self::Sort,
            "3" | "filter" => Self::Filter,
            "4" | "categories" => Self::Categories,
            "5" | "export" => Self::Export,
            "6" | "add-column" => Self::AddColumn,
            "7" | "remove-column" => Self::RemoveColumn,
            "8" | "add-row" => Self::AddRow,
            "9" | "remove-row" => Self::RemoveRow,
            "10" | "exit" | "quit" => Self::Exit,
            _ => Self::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Show basic information",
            Self::Sort => "Sort by column",
            Self::Filter => "Filter by value",
            Self::Categories => "Show column categories",
            Self::Export => "Export processed data",
            Self::AddColumn => "Add column",
            Self::RemoveColumn => "Remove column",
            Self::AddRow => "Add row",
            Self::RemoveRow => "Remove row",
            Self::Exit => "Exit",
            Self::None => "",
        }
    }
}

/// Run a single menu action
///
/// Errors from the table are printed and re-prompted inside each action. Only
/// console errors are returned.
pub(crate) fn dispatch<R: BufRead, W: Write>(
    action: MenuAction,
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    debug!(?action, "Dispatching menu action");
    match action {
        MenuAction::Info => show_info(term, session),
        MenuAction::Sort => sort(term, session),
        MenuAction::Filter => filter(term, session),
        MenuAction::Categories => categories(term, session),
        MenuAction::Export => export(term, session),
        MenuAction::AddColumn => add_column(term, session),
        MenuAction::RemoveColumn => remove_column(term, session),
        MenuAction::AddRow => add_row(term, session),
        MenuAction::RemoveRow => remove_row(term, session),
        // Exit is handled by the loop itself
        MenuAction::Exit => Ok(()),
        MenuAction::None => term.writeln("Invalid choice. Please enter a number from 1 to 10."),
    }
}

/// Resolve a column from its exact name or 1-based position
///
/// All-digit input in range is a position, otherwise it is tried as a name.
/// Blank input never selects a column, even one with an empty name.
pub(crate) fn resolve_column(names: &[String], input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Error: Please enter a column name or number".to_string());
    }
    if trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        if let Ok(position) = trimmed.parse::<usize>() {
            if position >= 1 && position <= names.len() {
                return Ok(names[position - 1].clone());
            }
        }
        if names.iter().any(|name| name == input) {
            return Ok(input.to_string());
        }
        return Err("Invalid column number. Please try again.".to_string());
    }

    if names.iter().any(|name| name == input) {
        Ok(input.to_string())
    } else {
        Err(format!("Error: Column '{}' not found. Please try again.", input))
    }
}

/// Prompt until a valid column is given
///
/// None means the user went back or input ended.
fn select_column<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &Session,
    purpose: &str,
) -> AtlasResult<Option<String>> {
    loop {
        let names = session.processor.get_column_names()?;
        term.writeln("\nAvailable columns:")?;
        for (index, name) in names.iter().enumerate() {
            term.writeln(&format!("{}. {}", index + 1, name))?;
        }

        let input = match term.prompt(&format!(
            "\nEnter column name or number{} (or 'back' to return to menu): ",
            purpose
        ))? {
            Some(input) => input,
            None => return Ok(None),
        };
        if is_back(&input) {
            return Ok(None);
        }

        match resolve_column(&names, &input) {
            Ok(column) => return Ok(Some(column)),
            Err(message) => term.writeln(&message)?,
        }
    }
}

fn show_info<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    match session.processor.basic_info() {
        Ok(info) => {
            term.writeln("\nDataset Information:")?;
            term.write(&info.to_string())?;
        }
        Err(err) => term.writeln(&err.to_string())?,
    }
    Ok(())
}

fn sort<R: BufRead, W: Write>(term: &mut Terminal<R, W>, session: &mut Session) -> AtlasResult<()> {
    let default_rows = session.config.preview_rows;
    loop {
        let column = match select_column(term, session, " to sort by")? {
            Some(column) => column,
            None => return Ok(()),
        };
        let ascending = term.confirm("Sort ascending?")?;

        let rows = match term.prompt("How many rows to display? ")? {
            Some(input) => match input.trim().parse::<i64>() {
                Ok(rows) if rows > 0 => rows as usize,
                Ok(_) => {
                    term.writeln(&format!(
                        "Number of rows must be positive. Using default ({} rows)",
                        default_rows
                    ))?;
                    default_rows
                }
                Err(_) => {
                    term.writeln(&format!(
                        "Invalid number of rows. Using default ({} rows)",
                        default_rows
                    ))?;
                    default_rows
                }
            },
            None => default_rows,
        };

        match session.processor.sort_by_column(&column, ascending, rows) {
            Ok(preview) => {
                term.writeln(&format!("\nSorted data (first {} rows):", rows))?;
                term.write(&preview.to_string())?;
                return Ok(());
            }
            Err(err) => term.writeln(&err.to_string())?,
        }
    }
}

fn filter<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    let preview_rows = session.config.preview_rows;
    loop {
        let column = match select_column(term, session, " to filter by")? {
            Some(column) => column,
            None => return Ok(()),
        };

        let categories = match session.processor.list_categories(&column) {
            Ok(categories) => categories,
            Err(err) => {
                term.writeln(&err.to_string())?;
                continue;
            }
        };
        term.writeln(&format!("\nUnique values in '{}':", column))?;
        for (index, value) in categories.iter().enumerate() {
            term.writeln(&format!("{}. {}", index + 1, value))?;
        }

        let value = match term.prompt("\nEnter value to filter for: ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match session.processor.filter_by_value(&column, &value) {
            Ok(preview) if preview.is_empty() => {
                term.writeln(&format!(
                    "No rows found matching '{}' in column '{}'",
                    value, column
                ))?;
            }
            Ok(preview) => {
                term.writeln(&format!(
                    "\nFiltered data ({} rows, first {} shown):",
                    preview.len(),
                    preview.len().min(preview_rows)
                ))?;
                term.write(&preview.head(preview_rows).to_string())?;
                return Ok(());
            }
            Err(err) => term.writeln(&err.to_string())?,
        }
    }
}

fn categories<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    loop {
        let column = match select_column(term, session, "")? {
            Some(column) => column,
            None => return Ok(()),
        };
        match session.processor.list_categories(&column) {
            Ok(categories) => {
                term.writeln(&format!("\nCategories in {}:", column))?;
                for (index, value) in categories.iter().enumerate() {
                    term.writeln(&format!("{}. {}", index + 1, value))?;
                }
                return Ok(());
            }
            Err(err) => term.writeln(&err.to_string())?,
        }
    }
}

fn export<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    loop {
        let output = match term
            .prompt("Enter name of new CSV file (include .csv, or 'back' to return to menu): ")?
        {
            Some(output) => output,
            None => return Ok(()),
        };
        if is_back(&output) {
            return Ok(());
        }

        let output = output.trim();
        match session.processor.export(Path::new(output)) {
            Ok(()) => {
                term.writeln(&format!("Data exported to {}", output))?;
                return Ok(());
            }
            Err(err) => term.writeln(&err.to_string())?,
        }
    }
}

fn add_column<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    loop {
        let name = match term.prompt("Enter new column name (or 'back' to return to menu): ")? {
            Some(name) => name,
            None => return Ok(()),
        };
        if is_back(&name) {
            return Ok(());
        }
        let default_value = match term.prompt("Enter default value (press Enter for None): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let default_value = if default_value.is_empty() {
            None
        } else {
            Some(default_value.as_str())
        };

        match session.processor.add_column(&name, default_value) {
            Ok(()) => {
                term.writeln(&format!("Column '{}' added successfully", name))?;
                term.writeln("\nCurrent columns:")?;
                for column in session.processor.get_column_names()? {
                    term.writeln(&column)?;
                }
                return Ok(());
            }
            Err(err) => term.writeln(&err.to_string())?,
        }
    }
}

fn remove_column<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    let preview_rows = session.config.preview_rows;
    loop {
        let column = match select_column(term, session, " to remove")? {
            Some(column) => column,
            None => return Ok(()),
        };

        let preview = match session.processor.column_preview(&column, preview_rows) {
            Ok(preview) => preview,
            Err(err) => {
                term.writeln(&err.to_string())?;
                continue;
            }
        };
        term.writeln(&format!(
            "\nColumn to be removed (first {} values):",
            preview.len()
        ))?;
        term.write(&preview.to_string())?;
        if !term.confirm(&format!(
            "Are you sure you want to remove column '{}'?",
            column
        ))? {
            term.writeln("Column removal cancelled.")?;
            return Ok(());
        }

        match session.processor.remove_column(&column) {
            Ok(()) => {
                term.writeln(&format!("Column '{}' removed successfully", column))?;
                return Ok(());
            }
            Err(err) => term.writeln(&err.to_string())?,
        }
    }
}

/// Literal text of a row field
///
/// "back" cancels the entry, so a literal "back" is typed with a leading backslash.
fn unescape_field(input: &str) -> &str {
    match input.strip_prefix('\\') {
        Some(rest) if is_back(rest) => rest,
        _ => input,
    }
}

fn add_row<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    let names = session.processor.get_column_names()?;
    term.writeln("\nEnter values for each column (or 'back' to return to menu):")?;
    term.writeln("Press Enter for a missing value, type \\back for the literal text \"back\".")?;

    let mut row_values = HashMap::new();
    for name in &names {
        let input = match term.prompt(&format!("{}: ", name))? {
            Some(input) => input,
            None => return Ok(()),
        };
        if is_back(&input) {
            term.writeln("Row entry cancelled.")?;
            return Ok(());
        }
        row_values.insert(name.clone(), unescape_field(&input).to_string());
    }

    match session.processor.add_row(&row_values) {
        Ok(index) => {
            term.writeln("Row added successfully")?;
            term.writeln("\nPreview of added row:")?;
            term.write(&session.processor.row(index)?.to_string())?;
        }
        Err(err) => term.writeln(&err.to_string())?,
    }
    Ok(())
}

fn remove_row<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut Session,
) -> AtlasResult<()> {
    let preview_rows = session.config.preview_rows;
    loop {
        let row_count = session.processor.get_row_count()?;
        if row_count == 0 {
            term.writeln("Table has no rows to remove.")?;
            return Ok(());
        }

        term.writeln(&format!("\nValid row indices: 0 to {}", row_count - 1))?;
        term.writeln(&format!(
            "\nPreview of first and last {} rows:",
            preview_rows
        ))?;
        term.writeln(&format!("\nFirst {} rows:", preview_rows))?;
        term.write(&session.processor.head(preview_rows)?.to_string())?;
        term.writeln(&format!("\nLast {} rows:", preview_rows))?;
        term.write(&session.processor.tail(preview_rows)?.to_string())?;

        let input = match term
            .prompt("\nEnter row index to remove (or 'back' to return to menu): ")?
        {
            Some(input) => input,
            None => return Ok(()),
        };
        if is_back(&input) {
            return Ok(());
        }
        let index = match input.trim().parse::<usize>() {
            Ok(index) => index,
            Err(_) => {
                term.writeln("Error: Please enter a valid number")?;
                continue;
            }
        };

        let row = match session.processor.row(index) {
            Ok(row) => row,
            Err(err) => {
                term.writeln(&err.to_string())?;
                continue;
            }
        };
        term.writeln("\nRow to be deleted:")?;
        term.write(&row.to_string())?;
        if !term.confirm("\nAre you sure you want to delete this row?")? {
            term.writeln("Row deletion cancelled.")?;
            return Ok(());
        }

        match session.processor.remove_row(index) {
            Ok(()) => {
                term.writeln(&format!("Row at index {} removed successfully", index))?;
                return Ok(());
            }
            Err(err) => term.writeln(&err.to_string())?,
        }
    }
}

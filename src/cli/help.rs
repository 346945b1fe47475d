use super::command::MenuAction;
use super::utils::Terminal;
use crate::error::AtlasResult;
use std::io::{BufRead, Write};

const BANNER: &str = "Atlas File Analyzer\n================\n";
const FAREWELL: &str = "================\nThank you for using Atlas File Analyzer!\n";

pub fn print_banner<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> AtlasResult<()> {
    term.write(BANNER)
}

pub fn print_farewell<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> AtlasResult<()> {
    term.write(FAREWELL)
}

pub fn print_menu<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> AtlasResult<()> {
    term.writeln("\nOptions:")?;
    for (index, action) in MenuAction::ALL.iter().enumerate() {
        term.writeln(&format!("{}. {}", index + 1, action.label()))?;
    }
    Ok(())
}

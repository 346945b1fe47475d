use super::command::{self, MenuAction};
use super::help;
use super::utils::{is_quit, Terminal};
use crate::config::Config;
use crate::error::AtlasResult;
use crate::locator::list_candidates;
use crate::Processor;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How the loop ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// Exit chosen from the main menu
    Exited,
    /// Quit before any file was loaded
    Quit,
    /// Input ended before any file was loaded
    Aborted,
}

impl LoopExit {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Exited | Self::Quit => 0,
            Self::Aborted => 1,
        }
    }
}

enum FileSelection {
    Loaded,
    Quit,
    Aborted,
}

/// State shared by menu handlers
pub struct Session {
    pub(crate) processor: Processor,
    pub(crate) config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            processor: Processor::new(),
            config,
        }
    }
}

pub fn start_main_loop(config: Config) -> AtlasResult<LoopExit> {
    let stdin = std::io::stdin();
    let mut command_loop = CommandLoop::new(Terminal::new(stdin.lock(), std::io::stdout()), config);
    command_loop.start_loop()
}

pub struct CommandLoop<R, W> {
    terminal: Terminal<R, W>,
    session: Session,
}

impl<R: BufRead, W: Write> CommandLoop<R, W> {
    pub fn new(terminal: Terminal<R, W>, config: Config) -> Self {
        Self {
            terminal,
            session: Session::new(config),
        }
    }

    #[cfg(test)]
    pub fn processor(&self) -> &Processor {
        &self.session.processor
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.terminal.into_output()
    }

    /// Start a loop until exit
    pub fn start_loop(&mut self) -> AtlasResult<LoopExit> {
        help::print_banner(&mut self.terminal)?;
        match self.select_file()? {
            FileSelection::Loaded => self.menu_loop(),
            FileSelection::Quit => Ok(LoopExit::Quit),
            FileSelection::Aborted => Ok(LoopExit::Aborted),
        }
    }

    /// Prompt until a file is loaded or the user quits
    fn select_file(&mut self) -> AtlasResult<FileSelection> {
        let root_dir = self.session.config.root_dir.clone();
        let candidates = list_candidates(&root_dir, &self.session.config.extension);

        loop {
            let input = if !candidates.is_empty() {
                self.terminal.writeln("\nAvailable CSV files:")?;
                for (index, file) in candidates.iter().enumerate() {
                    self.terminal
                        .writeln(&format!("{}. {}", index + 1, file.display()))?;
                }
                self.terminal
                    .writeln("\nEnter file number or full path to another CSV file")?;
                self.terminal.prompt("(or 'quit' to exit): ")?
            } else {
                self.terminal
                    .writeln("\nNo CSV files found in the current directory.")?;
                self.terminal
                    .prompt("Enter the path to your CSV file (or 'quit' to exit): ")?
            };

            let input = match input {
                Some(input) => input,
                None => return Ok(FileSelection::Aborted),
            };
            if is_quit(&input) {
                help::print_farewell(&mut self.terminal)?;
                return Ok(FileSelection::Quit);
            }

            let path = resolve_candidate(&root_dir, &candidates, input.trim());
            match self.session.processor.read_from_file(&path) {
                Ok(()) => {
                    self.terminal
                        .writeln(&format!("Loaded {}", path.display()))?;
                    return Ok(FileSelection::Loaded);
                }
                Err(err) => {
                    self.terminal.writeln(&err.to_string())?;
                    self.terminal
                        .writeln("Please try again with a valid CSV file.")?;
                }
            }
        }
    }

    fn menu_loop(&mut self) -> AtlasResult<LoopExit> {
        loop {
            help::print_menu(&mut self.terminal)?;
            let action = match self.terminal.prompt("\nEnter your choice (1-10): ")? {
                Some(choice) => MenuAction::from_str(&choice),
                None => MenuAction::Exit,
            };

            debug!(?action, "Menu input");
            if action == MenuAction::Exit {
                info!("Exiting");
                help::print_farewell(&mut self.terminal)?;
                return Ok(LoopExit::Exited);
            }
            command::dispatch(action, &mut self.terminal, &mut self.session)?;
        }
    }
}

/// Candidate number resolves to the listed file, anything else is a path
fn resolve_candidate(root_dir: &Path, candidates: &[PathBuf], input: &str) -> PathBuf {
    match input.parse::<usize>() {
        Ok(number) if number >= 1 && number <= candidates.len() => {
            root_dir.join(&candidates[number - 1])
        }
        _ => PathBuf::from(input),
    }
}

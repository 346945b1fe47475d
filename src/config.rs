use crate::error::{AtlasError, AtlasResult};
use std::path::PathBuf;

pub(crate) const DEFAULT_DELIMITER: u8 = b',';
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_EXTENSION: &str = "csv";

/// Session settings
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory scanned for candidate files
    pub root_dir: PathBuf,
    /// Extension of candidate files, without the dot
    pub extension: String,
    /// Rows shown when a preview length isn't given
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Config {
    /// Default config rooted at the current working directory
    pub fn from_current_dir() -> AtlasResult<Self> {
        let root_dir = std::env::current_dir()
            .map_err(|err| AtlasError::io_error(err, "Failed to get current directory"))?;
        Ok(Self {
            root_dir,
            ..Self::default()
        })
    }

    pub fn with_root(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }
}

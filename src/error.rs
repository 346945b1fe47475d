use thiserror::Error;

pub type AtlasResult<T> = Result<T, AtlasError>;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("ERR : IO Error =\n{0}")]
    IoError(IoErrorWithMeta),
    #[error("ERR : No data loaded")]
    NoData,
    #[error("ERR : Failed to load file =\n{0}")]
    Load(String),
    #[error("ERR : Failed to export data =\n{0}")]
    Export(String),
    #[error("ERR : Column '{0}' not found")]
    ColumnNotFound(String),
    #[error("ERR : Column '{0}' already exists")]
    ColumnExists(String),
    #[error("ERR : Invalid column name \"{0}\"")]
    InvalidColumnName(String),
    #[error("ERR : Invalid row data =\n{0}")]
    Shape(String),
    #[error("ERR : Index {index} out of range, valid range is {}", valid_range(.row_count))]
    IndexOutOfRange { index: usize, row_count: usize },
}

impl AtlasError {
    pub fn io_error(err: std::io::Error, meta: &str) -> Self {
        Self::IoError(IoErrorWithMeta::new(err, meta))
    }

    pub fn export_no_data() -> Self {
        Self::Export("No data to export".to_string())
    }
}

fn valid_range(row_count: &usize) -> String {
    if *row_count == 0 {
        "empty (table has no rows)".to_string()
    } else {
        format!("0 to {}", row_count - 1)
    }
}

pub struct IoErrorWithMeta {
    error: std::io::Error,
    meta: String,
}

impl IoErrorWithMeta {
    pub fn new(error: std::io::Error, meta: &str) -> Self {
        Self {
            error,
            meta: meta.to_owned(),
        }
    }
}

impl std::fmt::Debug for IoErrorWithMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {}", self.error, self.meta)
    }
}

impl std::fmt::Display for IoErrorWithMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {}", self.error, self.meta)
    }
}

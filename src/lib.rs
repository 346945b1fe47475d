//! Atlas, an interactive csv explorer
//!
//! ### Install
//!
//! ```bash
//! cargo install atlas --locked
//! ```
//!
//! ### Binary usage
//!
//! ```bash
//! # Start atlas in a directory with csv files
//! # Every csv file under the current directory is listed as a candidate
//! atlas
//!
//! # Show table mutations on stderr
//! RUST_LOG=atlas=info atlas
//! ```
//!
//! **Atlas menu**
//!
//! ```text
//! Options:
//! 1. Show basic information
//! 2. Sort by column
//! 3. Filter by value
//! 4. Show column categories
//! 5. Export processed data
//! 6. Add column
//! 7. Remove column
//! 8. Add row
//! 9. Remove row
//! 10. Exit
//! ```
//!
//! Columns are chosen by exact name or by 1-based number. Type `back` at a
//! prompt to return to the menu.
//!
//! ### Library usage
//!
//! ```no_run
//! use atlas::Processor;
//! use std::path::Path;
//!
//! let mut processor = Processor::new();
//! processor.read_from_file(Path::new("people.csv"))?;
//! let preview = processor.sort_by_column("age", true, 2)?;
//! println!("{}", preview);
//! processor.export(Path::new("sorted.csv"))?;
//! # Ok::<(), atlas::AtlasError>(())
//! ```


#[cfg(feature = "cli")]
pub(crate) mod cli;

pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod loader;
pub(crate) mod locator;
pub(crate) mod preview;
pub(crate) mod processor;
pub(crate) mod table;
pub(crate) mod value;

// ----------
// RE-EXPORTS

#[cfg(feature = "cli")]
pub use cli::command_loop::{start_main_loop, LoopExit};
#[cfg(feature = "cli")]
pub use cli::logger::init as init_logging;
pub use config::{Config, DEFAULT_EXTENSION, DEFAULT_PREVIEW_ROWS};
pub use error::{AtlasError, AtlasResult};
pub use loader::{export, load, read_table, write_table};
pub use locator::list_candidates;
pub use preview::Preview;
pub use processor::{BasicInfo, Processor};
pub use table::{Column, Table};
pub use value::{Value, ValueType};

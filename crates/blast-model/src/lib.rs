//! Data model shared by the blast preparation crates.
//!
//! - **table**: string tables and row views
//! - **sheet**: worksheet specifications and column formats
//! - **report**: filter, join and statistics counts returned to callers
//! - **error**: the error taxonomy for ingest, transform and export

pub mod error;
pub mod report;
pub mod sheet;
pub mod source;
pub mod table;

pub use error::{BlastError, Result};
pub use report::{
    ColumnSummary, FilterKind, FilterOutcome, JoinStats, MessageLevel, ReportMessage,
    SheetSummary, TransformReport, ValueCount,
};
pub use sheet::{ColumnFormat, SHEET_NAME_LIMIT, SheetSpec, truncate_sheet_name};
pub use source::{SourceFormat, TableRole};
pub use table::{Record, Table};

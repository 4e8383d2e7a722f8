use thiserror::Error;

use crate::report::TransformReport;
use crate::source::{SourceFormat, TableRole};

#[derive(Debug, Error)]
pub enum BlastError {
    /// Input bytes could not be decoded in the declared format.
    #[error("could not read {format} input: {message}")]
    Format {
        format: SourceFormat,
        message: String,
    },

    /// Required columns are absent.
    #[error("the following required columns are missing in the {role}: {}", .columns.join(", "))]
    MissingColumns { role: TableRole, columns: Vec<String> },

    /// The upload decoded to a header without data rows.
    #[error("the uploaded file has no data rows")]
    EmptyTable,

    /// Every row was removed by filtering or derivation.
    #[error("no rows remain after filtering")]
    EmptyResult { report: Box<TransformReport> },

    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    /// A recipe carries an invalid pattern (regex or date format).
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlastError {
    /// Empty inputs and empty results are reported as guidance, not failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::EmptyTable | Self::EmptyResult { .. })
    }

    /// The partial report attached to an empty result, if any.
    pub fn report(&self) -> Option<&TransformReport> {
        match self {
            Self::EmptyResult { report } => Some(report.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_exact_names() {
        let error = BlastError::MissingColumns {
            role: TableRole::Lookup,
            columns: vec!["Account No.".to_string(), "Collector".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "the following required columns are missing in the lookup file: Account No., Collector"
        );
        assert!(!error.is_informational());
    }

    #[test]
    fn empty_states_are_informational() {
        assert!(BlastError::EmptyTable.is_informational());
        let error = BlastError::EmptyResult {
            report: Box::new(TransformReport::new("viber-blast", 3)),
        };
        assert!(error.is_informational());
        assert_eq!(error.report().map(|report| report.input_rows), Some(3));
    }
}

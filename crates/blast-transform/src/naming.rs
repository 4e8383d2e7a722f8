//! Deterministic artifact names.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};

use blast_model::{BlastError, Result};

/// Token replaced by the detected campaign label.
pub const CAMPAIGN_TOKEN: &str = "{campaign}";

/// Label used for `{campaign}` when no campaign was detected.
pub const DEFAULT_CAMPAIGN: &str = "GENERIC";

/// A file-name pattern: `strftime` specifiers plus an optional `{campaign}` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNamePattern {
    pub pattern: &'static str,
    pub uppercase: bool,
}

impl FileNamePattern {
    pub fn new(pattern: &'static str) -> Self {
        Self {
            pattern,
            uppercase: false,
        }
    }

    #[must_use]
    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// Renders the name for `now`, including the `.xlsx` extension.
    ///
    /// Path separators in the result are replaced with `_`.
    pub fn render(&self, campaign: Option<&str>, now: DateTime<FixedOffset>) -> Result<String> {
        let mut stem = String::new();
        write!(stem, "{}", now.format(self.pattern)).map_err(|_| BlastError::InvalidPattern {
            pattern: self.pattern.to_string(),
            message: "unsupported date format specifier".to_string(),
        })?;
        let stem = stem.replace(CAMPAIGN_TOKEN, campaign.unwrap_or(DEFAULT_CAMPAIGN));
        let stem = if self.uppercase {
            stem.to_uppercase()
        } else {
            stem
        };
        let stem: String = stem
            .chars()
            .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
            .collect();
        Ok(format!("{stem}.xlsx"))
    }
}

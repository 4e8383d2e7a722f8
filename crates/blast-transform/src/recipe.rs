//! Declarative recipe definitions.
//!
//! A [`Recipe`] is tagged configuration: which columns an upload must carry,
//! which filters run and in what order, how output columns are derived, and
//! how the result is split into sheets and named. The engine in
//! [`crate::engine`] is written once and parameterized by these values.

use blast_model::{ColumnFormat, SourceFormat};

use crate::filters::RowFilter;
use crate::join::JoinSpec;
use crate::naming::FileNamePattern;

/// Where a derivation reads its value from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A column of the (filtered) upload.
    Input(&'static str),
    /// A column written by the lookup join. Resolves to nothing when no join ran.
    Joined(&'static str),
    /// An output column declared earlier in the same recipe.
    Output(&'static str),
}

/// One piece of a message template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(&'static str),
    /// The run timestamp, `YYYY-MM-DD HH:MM:SS`.
    Timestamp,
    Field(Source),
}

/// How one output column is computed from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Derivation {
    /// Copy a value verbatim.
    Copy(Source),
    /// Use the first source when it resolves, the second otherwise.
    Prefer(Source, Source),
    /// The same literal in every row.
    Constant(&'static str),
    /// Reformat with thousands separators, optionally scaled by a factor.
    Amount {
        source: Source,
        factor: Option<f64>,
    },
    /// Interpolate literals, the run timestamp and row values.
    Template(Vec<TemplatePart>),
    /// Replace exact matches from a fixed table; other values pass through.
    Substitute {
        source: Source,
        pairs: Vec<(&'static str, &'static str)>,
    },
    /// Map a value to a code: table hit, `default` for other non-empty
    /// values, `blank` for empty ones.
    Code {
        source: Source,
        table: Vec<(&'static str, &'static str)>,
        default: &'static str,
        blank: &'static str,
    },
    /// Convert a cleaned `09…` mobile number to the `639…` international form.
    MobileNumber(Source),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    pub name: &'static str,
    pub derivation: Derivation,
    pub format: ColumnFormat,
}

impl OutputColumn {
    pub fn new(name: &'static str, derivation: Derivation) -> Self {
        Self {
            name,
            derivation,
            format: ColumnFormat::Text,
        }
    }

    /// Shorthand for an output copied from the input column of the same name.
    pub fn passthrough(name: &'static str) -> Self {
        Self::new(name, Derivation::Copy(Source::Input(name)))
    }

    #[must_use]
    pub fn numeric(mut self) -> Self {
        self.format = ColumnFormat::NumericWithCommas;
        self
    }
}

/// How the campaign label of an export is found.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CampaignRule {
    #[default]
    None,
    /// The first of `known` that appears verbatim in the output column.
    Detect {
        column: &'static str,
        known: Vec<&'static str>,
        fallback: &'static str,
    },
    /// The first non-blank value of the output column, trimmed.
    FirstValue {
        column: &'static str,
        fallback: &'static str,
        uppercase: bool,
    },
}

impl CampaignRule {
    /// The label used when no rows are available to inspect.
    pub fn fallback(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Detect { fallback, .. } | Self::FirstValue { fallback, .. } => Some(*fallback),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleCell {
    Text(&'static str),
    /// The run date, `YYYY-MM-DD`.
    Today,
}

/// Placeholder rows appended to an export, one value per output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    /// Campaign this set belongs to; `None` is the default set.
    pub campaign: Option<&'static str>,
    pub rows: Vec<Vec<SampleCell>>,
}

/// Output columns summarized in the report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSpec {
    pub unique: Vec<&'static str>,
    pub distribution: Vec<&'static str>,
    pub range: Vec<&'static str>,
}

/// A fixed set of group values that share one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSheet {
    pub name: &'static str,
    pub members: Vec<&'static str>,
    /// Column values forced on every row of the combined sheet.
    pub overrides: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    /// Output column whose distinct values name the sheets.
    pub column: &'static str,
    /// A leading sheet holding every row.
    pub reference_sheet: Option<&'static str>,
    pub combined: Option<CombinedSheet>,
    /// Sheet name used for the empty group value.
    pub blank_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetPlan {
    Single(&'static str),
    Grouped(GroupPlan),
}

/// A named, immutable transformation recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub accepts: Vec<SourceFormat>,
    pub required: Vec<&'static str>,
    /// Columns added as blank when the upload lacks them.
    pub optional: Vec<&'static str>,
    /// `(from, to)` renames applied before validation.
    pub aliases: Vec<(&'static str, &'static str)>,
    pub filters: Vec<RowFilter>,
    pub join: Option<JoinSpec>,
    pub outputs: Vec<OutputColumn>,
    pub must_have: Vec<&'static str>,
    pub campaign: CampaignRule,
    pub samples: Vec<SampleSet>,
    pub stats: StatsSpec,
    pub sheets: SheetPlan,
    pub file_name: FileNamePattern,
}

impl Recipe {
    pub fn new(
        id: &'static str,
        title: &'static str,
        sheets: SheetPlan,
        file_name: FileNamePattern,
    ) -> Self {
        Self {
            id,
            title,
            description: "",
            accepts: vec![SourceFormat::Csv, SourceFormat::Xlsx],
            required: Vec::new(),
            optional: Vec::new(),
            aliases: Vec::new(),
            filters: Vec::new(),
            join: None,
            outputs: Vec::new(),
            must_have: Vec::new(),
            campaign: CampaignRule::None,
            samples: Vec::new(),
            stats: StatsSpec::default(),
            sheets,
            file_name,
        }
    }

    #[must_use]
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn accepts(mut self, formats: &[SourceFormat]) -> Self {
        self.accepts = formats.to_vec();
        self
    }

    #[must_use]
    pub fn require(mut self, columns: &[&'static str]) -> Self {
        self.required.extend_from_slice(columns);
        self
    }

    #[must_use]
    pub fn optional(mut self, columns: &[&'static str]) -> Self {
        self.optional.extend_from_slice(columns);
        self
    }

    #[must_use]
    pub fn alias(mut self, from: &'static str, to: &'static str) -> Self {
        self.aliases.push((from, to));
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: RowFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn join(mut self, join: JoinSpec) -> Self {
        self.join = Some(join);
        self
    }

    #[must_use]
    pub fn output(mut self, column: OutputColumn) -> Self {
        self.outputs.push(column);
        self
    }

    #[must_use]
    pub fn must_have(mut self, columns: &[&'static str]) -> Self {
        self.must_have.extend_from_slice(columns);
        self
    }

    #[must_use]
    pub fn campaign(mut self, rule: CampaignRule) -> Self {
        self.campaign = rule;
        self
    }

    #[must_use]
    pub fn samples(mut self, set: SampleSet) -> Self {
        self.samples.push(set);
        self
    }

    #[must_use]
    pub fn stats(mut self, stats: StatsSpec) -> Self {
        self.stats = stats;
        self
    }

    /// Output column names in declared order.
    pub fn output_names(&self) -> Vec<String> {
        self.outputs
            .iter()
            .map(|column| column.name.to_string())
            .collect()
    }

    pub fn output_formats(&self) -> Vec<ColumnFormat> {
        self.outputs.iter().map(|column| column.format).collect()
    }

    pub fn accepts_format(&self, format: SourceFormat) -> bool {
        self.accepts.contains(&format)
    }

    /// The sample set for a campaign, falling back to the default set.
    pub fn sample_set(&self, campaign: Option<&str>) -> Option<&SampleSet> {
        campaign
            .and_then(|campaign| {
                self.samples
                    .iter()
                    .find(|set| set.campaign == Some(campaign))
            })
            .or_else(|| self.samples.iter().find(|set| set.campaign.is_none()))
    }
}

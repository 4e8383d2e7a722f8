//! Recipe-driven transformation of uploaded tables into blast exports.
//!
//! - **filters**: column presence, regex cleanup, shape checks, exclusion, dedup
//! - **join**: left outer join against a lookup upload
//! - **derive**: output column derivations
//! - **numeric**: amount formatting with thousands separators
//! - **grouping**: splitting outputs into worksheets
//! - **stats**: report statistics
//! - **naming**: artifact file names
//! - **engine**: runs a [`Recipe`] end to end

pub mod context;
pub mod derive;
pub mod engine;
pub mod filters;
pub mod grouping;
pub mod join;
pub mod naming;
pub mod numeric;
pub mod recipe;
pub mod stats;

pub use context::{RunContext, philippine_time};
pub use derive::mobile_number;
pub use engine::{Export, RunInput, run, sample};
pub use filters::{RowFilter, Shape, clean_phone, require_columns};
pub use join::{JoinField, JoinSpec, join};
pub use naming::FileNamePattern;
pub use numeric::format_amount;
pub use recipe::{
    CampaignRule, CombinedSheet, Derivation, GroupPlan, OutputColumn, Recipe, SampleCell,
    SampleSet, SheetPlan, Source, StatsSpec, TemplatePart,
};

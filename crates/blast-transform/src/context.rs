//! Runtime context for a recipe run.
//!
//! Recipes are pure functions of their inputs and this context; the wall
//! clock enters only through [`RunContext::now`].

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};

/// Seconds east of UTC for Philippine Standard Time.
const PHILIPPINE_OFFSET_SECONDS: i32 = 8 * 3600;

/// The fixed zone every generated timestamp and file name is rendered in.
pub fn philippine_time() -> FixedOffset {
    FixedOffset::east_opt(PHILIPPINE_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    now: DateTime<FixedOffset>,
}

impl RunContext {
    /// Pins the run to an instant, converted to Philippine Standard Time.
    pub fn new<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        Self {
            now: now.with_timezone(&philippine_time()),
        }
    }

    /// A context for the current wall-clock instant.
    pub fn current() -> Self {
        Self::new(Utc::now())
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// `YYYY-MM-DD HH:MM:SS`, as written into remark columns.
    pub fn timestamp(&self) -> String {
        self.now.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// `YYYY-MM-DD`, as written into sample date columns.
    pub fn today(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

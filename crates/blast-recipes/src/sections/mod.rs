//! One module per blast section.

pub mod autostats;
pub mod email;
pub mod ptp;
pub mod sms;
pub mod viber;

/// Wrapper that spreadsheet exports put around numeric-looking text: `="…"`.
pub(crate) const FORMULA_WRAPPER: &str = r#"^="|"$"#;

/// Collector code that is reported under the desk code `PJHA`.
pub(crate) const AGENT_REMAP: (&str, &str) = ("SPMADRID", "PJHA");

//! Library side of the `blast-prep` command: logging setup and run stages.

pub mod logging;
pub mod pipeline;

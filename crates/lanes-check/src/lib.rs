#![forbid(unsafe_code)]

//! Equality checks for kernel output and the reporter that carries their
//! failures to stderr.

pub mod equal;
pub mod log;
pub mod report;

pub use equal::{Checker, Mismatches, Site, Slop, SlopError, float_equal, int_equal};
pub use log::{CHECK_LOG_PATH_ENV, CheckLogEntry, check_log_path, set_check_log_path};
pub use report::{FailurePolicy, FailureReporter, FatalAction};

//! Health checks run at startup
//!
//! Each check exercises one subsystem in isolation and reports pass, warn or
//! fail. The binary runs them before opening a window; CI runs them through
//! `tests/health_check.rs`.
//!
//! # Example
//!
//! ```no_run
//! use voxel_client::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(BindingsCheck::new())
//!     .add_check(RouterCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("Input stack operational");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, log_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BindingsCheck::new())
        .add_check(checks::RouterCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .run()
}

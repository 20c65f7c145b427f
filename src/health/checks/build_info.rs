//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Reports build metadata; warns when built from a dirty tree
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Reports build metadata (git, rustc, target)")
    }

    fn check(&self) -> CheckResult {
        let details = build_info::detailed_info()
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>();

        let message = format!("Version {}", build_info::version_string());
        if build_info::is_git_dirty() {
            CheckResult::warn(format!("{message} (uncommitted changes)")).with_detail_lines(&details)
        } else {
            CheckResult::pass(message).with_detail_lines(&details)
        }
    }
}

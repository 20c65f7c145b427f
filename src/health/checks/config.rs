//! Configuration health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that every profile loads and its input section is valid
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates profile loading and input configuration")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = false;

        for profile in &self.profiles {
            let config = match AppConfig::load(profile) {
                Ok(config) => config,
                Err(e) => {
                    details.push(format!("  ✗ Profile '{profile}': failed to load - {e}"));
                    failed = true;
                    continue;
                }
            };

            match config.input.build() {
                Ok((_, hotkeys)) => details.push(format!(
                    "  ✓ Profile '{profile}': fov {}, view distance {}, {} hotkeys",
                    config.game.field_of_view,
                    config.game.view_distance,
                    hotkeys.len()
                )),
                Err(e) => {
                    details.push(format!("  ✗ Profile '{profile}': invalid input - {e}"));
                    failed = true;
                }
            }
        }

        if failed {
            CheckResult::fail("One or more profiles are invalid").with_detail_lines(&details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_detail_lines(&details)
        }
    }
}

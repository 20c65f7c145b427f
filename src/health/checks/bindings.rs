//! Key binding health check

use crate::app::input::KeyBindingTable;
use crate::health::check::{CheckResult, SystemCheck};

/// Reports logical actions that share a physical key
///
/// Sharing is allowed, so collisions only warn: the router checks actions in
/// a fixed order and the later ones on a shared key never fire from it.
pub struct BindingsCheck {
    table: KeyBindingTable,
}

impl BindingsCheck {
    /// Checks the default bindings
    pub fn new() -> Self {
        Self::for_table(KeyBindingTable::new())
    }

    pub fn for_table(table: KeyBindingTable) -> Self {
        Self { table }
    }
}

impl Default for BindingsCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BindingsCheck {
    fn name(&self) -> &'static str {
        "Key Bindings"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Looks for logical actions bound to the same key")
    }

    fn check(&self) -> CheckResult {
        let collisions = self.table.collisions();
        if collisions.is_empty() {
            return CheckResult::pass("Every action has its own key");
        }

        let details = collisions
            .iter()
            .map(|(key, actions)| format!("  ⚠ {key}: {actions:?}"))
            .collect::<Vec<_>>();
        CheckResult::warn(format!("{} keys shared by several actions", collisions.len()))
            .with_detail_lines(&details)
    }
}

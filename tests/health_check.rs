//! Integration tests for the health check system

use voxel_client::app::input::{KeyBindingTable, KeyCode, LogicalAction};
use voxel_client::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    // Print report for debugging if tests fail
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 4);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_config_check_missing_profile_uses_defaults() {
    let result = ConfigCheck::with_profiles(vec!["no-such-profile"]).check();
    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
}

#[test]
fn test_router_check() {
    let result = RouterCheck::new().check();

    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Router check failed: {}\n{}",
        result.message,
        result.details.unwrap_or_default()
    );
}

#[test]
fn test_default_bindings_share_keys() {
    // Enter is both SetSpawn and SendChat out of the box
    let result = BindingsCheck::new().check();
    assert_eq!(result.status, CheckStatus::Warn);
    assert!(result.details.unwrap_or_default().contains("Enter"));
}

#[test]
fn test_unique_bindings_pass() {
    let mut table = KeyBindingTable::new();
    table.set(LogicalAction::SendChat, KeyCode::Num0);
    table.set(LogicalAction::HalfSpeed, KeyCode::Num9);
    table.set(LogicalAction::HotbarSwitching, KeyCode::Num8);
    let result = BindingsCheck::for_table(table).check();
    assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.details);
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(RouterCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
}

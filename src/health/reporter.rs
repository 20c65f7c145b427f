//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};
use tracing::{error, info, warn};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Formats a health check report as a table
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();

    // Header, then one row per check in run order
    builder.push_record(["Check", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        let duration_str = format!("{:.2?}", result.duration);
        builder.push_record([
            name.as_str(),
            &result.status.as_colored_str(),
            &duration_str,
            &result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{table}\n{}", format_summary(report))
}

/// Totals and overall verdict
fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = String::new();

    summary.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed));

    if report.warned > 0 {
        summary.push_str(&format!("  {} Warned: {}\n", "⚠".yellow(), report.warned));
    }

    if report.failed > 0 {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed));
    }

    // Overall verdict
    summary.push('\n');
    if report.is_healthy() {
        if report.has_warnings() {
            summary.push_str(&format!(
                "  {}\n",
                "Overall: HEALTHY (with warnings)".yellow().bold()
            ));
        } else {
            summary.push_str(&format!("  {}\n", "Overall: HEALTHY".green().bold()));
        }
    } else {
        summary.push_str(&format!("  {}\n", "Overall: UNHEALTHY".red().bold()));
    }

    summary
}

/// Prints the table and every check's details to stdout
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        // Details only for checks that produced any
        if let Some(details) = &result.details {
            println!("\n{} Details:", name.bold());
            println!("{}", details);
        }
    }
}

/// Emits one log event per check, at a level matching its status
pub fn log_report(report: &HealthCheckReport) {
    for (name, result) in &report.results {
        let details = result.details.as_deref().unwrap_or_default();
        match result.status {
            CheckStatus::Pass => info!(check = %name, message = %result.message, "Health check passed"),
            CheckStatus::Warn => {
                warn!(check = %name, message = %result.message, %details, "Health check warning")
            }
            CheckStatus::Fail => {
                error!(check = %name, message = %result.message, %details, "Health check failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::check::{CheckResult, SystemCheck};
    use crate::health::runner::HealthCheckRunner;

    struct Warns;

    impl SystemCheck for Warns {
        fn name(&self) -> &'static str {
            "Bindings"
        }

        fn check(&self) -> CheckResult {
            CheckResult::warn("2 shared keys")
        }
    }

    #[test]
    fn test_report_lists_checks_and_summary() {
        colored::control::set_override(false);
        let report = HealthCheckRunner::new().add_check(Warns).run();
        let text = format_report(&report);
        assert!(text.contains("Bindings"));
        assert!(text.contains("WARN"));
        assert!(text.contains("2 shared keys"));
        assert!(text.contains("HEALTHY (with warnings)"));
    }
}

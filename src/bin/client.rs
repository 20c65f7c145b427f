use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use voxel_client::app::App;
use voxel_client::{build_info, health};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = %build_info::version_string(), "Voxel client");

    let report = health::run_all_checks();
    if report.is_healthy() {
        info!(
            passed = report.passed,
            warned = report.warned,
            "Startup checks complete"
        );
    } else {
        warn!(failed = report.failed, "Startup checks failed");
        health::print_report(&report);
    }
    health::log_report(&report);

    let mut app = App::from_env().context("invalid input configuration")?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with an error")?;

    Ok(())
}

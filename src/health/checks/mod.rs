//! Built-in health checks

pub mod bindings;
pub mod build_info;
pub mod config;
pub mod router;

pub use bindings::BindingsCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use router::RouterCheck;

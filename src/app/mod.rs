//! Client application module
//!
//! Handles windowing, configuration, screens and user input.

pub mod client;
pub mod config;
pub mod gui;
pub mod input;
mod runner;
mod window;

pub use client::{Client, PlayerClick};
pub use config::{AppConfig, InputConfig, WindowConfig};
pub use gui::{GuiStack, ModalKind};
pub use runner::App;
pub use window::window_attributes_from_config;

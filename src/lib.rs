//! Voxel Client
//!
//! Input routing and notification plumbing for a block-world game client,
//! built on winit.

/// Client application - windowing, screens, configuration and input routing
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Notification bus shared by client subsystems
pub mod events;

/// Client game state - settings, camera, hotbar
pub mod game;

/// Startup health checks
pub mod health;

//! Main application handler for the client

use std::rc::Rc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowId};

use super::client::Client;
use super::config::AppConfig;
use super::input::{BindingError, ClientHost, InputCollector, InputRouter};
use super::window::window_attributes_from_config;
use crate::events::NotificationBus;
use crate::game::WindowMode;

/// Main client application
pub struct App {
    config: AppConfig,
    window: Option<Window>,
    client: Client,
    router: InputRouter,
    collector: InputCollector,
    /// Window mode last applied to the real window
    applied_mode: WindowMode,
    last_update: Option<Instant>,
}

impl App {
    /// Creates a client application with the provided configuration
    pub fn new(config: AppConfig) -> Result<Self, BindingError> {
        info!(profile = %config.profile, "Starting client");
        info!(?config.window, "Window configuration");

        let (bindings, hotkeys) = config.input.build()?;
        info!(hotkeys = hotkeys.len(), "Input configuration loaded");

        let bus = NotificationBus::shared();
        let client = Client::new(&config, Rc::clone(&bus));
        let router = InputRouter::new(bindings, hotkeys, bus);
        let applied_mode = if config.window.fullscreen {
            WindowMode::Fullscreen
        } else {
            WindowMode::Normal
        };

        Ok(Self {
            config,
            window: None,
            client,
            router,
            collector: InputCollector::new(),
            applied_mode,
            last_update: None,
        })
    }

    /// Creates a client application with configuration loaded from environment
    pub fn from_env() -> Result<Self, BindingError> {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::fallback("release")
        });
        Self::new(config)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    /// Routes input carried by a window event; true if the client should exit
    pub fn route_window_event(&mut self, event: &WindowEvent) -> bool {
        self.collector.handle_window_event(event);
        for device_event in self.collector.drain() {
            self.router.dispatch(device_event, &mut self.client);
        }
        self.client.flush_chat_input();
        self.router.take_exit_request()
    }

    /// Per-frame input work and window sync
    fn update_frame(&mut self) {
        self.router.update_frame(&mut self.client);

        if self.router.take_screenshot_request() {
            // Frames are presented by the renderer; only the request is logged
            info!("Screenshot requested");
        }

        let mode = self.client.window_mode();
        if mode != self.applied_mode {
            if let Some(window) = &self.window {
                let fullscreen = (mode == WindowMode::Fullscreen).then_some(Fullscreen::Borderless(None));
                window.set_fullscreen(fullscreen);
            }
            info!(from = ?self.applied_mode, to = ?mode, "Window mode changed");
            self.applied_mode = mode;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = window_attributes_from_config(&self.config.window);

            match event_loop.create_window(window_attributes) {
                Ok(window) => {
                    let size = window.inner_size();
                    info!(
                        window.width = size.width,
                        window.height = size.height,
                        "Window created successfully"
                    );
                    self.client.lens().set_viewport(size.width, size.height);
                    self.window = Some(window);
                    self.last_update = Some(Instant::now());
                }
                Err(e) => {
                    error!(error = %e, "Failed to create window");
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.last_update.is_some() {
            self.last_update = Some(Instant::now());
            self.update_frame();

            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.client.lens().set_viewport(new_size.width, new_size.height);
            }
            WindowEvent::Occluded(occluded) => {
                let mode = if occluded {
                    WindowMode::Minimized
                } else if self.applied_mode == WindowMode::Fullscreen {
                    WindowMode::Fullscreen
                } else {
                    WindowMode::Normal
                };
                self.client.set_window_mode(mode);
                self.applied_mode = mode;
            }
            event => {
                if self.route_window_event(&event) {
                    info!("Exit requested from keyboard, exiting");
                    event_loop.exit();
                }
            }
        }
    }
}

//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::input::{
    BindingError, Hotkey, HotkeyModifiers, HotkeyTable, KeyBindingTable, KeyCode, LogicalAction,
};
use crate::game::{ClientSettings, HackPermissions};

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should start fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Voxel Client".to_string(),
            width: 854.0,
            height: 480.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// What the connected server supports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server wants button clicks addressed at entities and blocks
    pub player_click: bool,
}

/// One key binding override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub action: LogicalAction,
    pub key: KeyCode,
}

/// One hotkey definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    pub key: KeyCode,
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub text: String,
    #[serde(default)]
    pub more_input: bool,
}

/// Key binding overrides and hotkeys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub bindings: Vec<BindingConfig>,
    pub hotkeys: Vec<HotkeyConfig>,
}

impl InputConfig {
    /// Validates the configured input and builds the router's tables
    pub fn build(&self) -> Result<(KeyBindingTable, HotkeyTable), BindingError> {
        if let Some(binding) = self.bindings.iter().find(|b| b.key == KeyCode::Unknown) {
            return Err(BindingError::UnknownKey {
                action: binding.action,
            });
        }
        let bindings =
            KeyBindingTable::with_overrides(self.bindings.iter().map(|b| (b.action, b.key)));

        let hotkeys = self
            .hotkeys
            .iter()
            .map(|hotkey| {
                let modifiers = HotkeyModifiers::from_names(&hotkey.modifiers)?;
                Ok(Hotkey::new(
                    hotkey.key,
                    modifiers,
                    hotkey.text.clone(),
                    hotkey.more_input,
                ))
            })
            .collect::<Result<Vec<_>, BindingError>>()?;
        let hotkeys = HotkeyTable::from_hotkeys(hotkeys)?;

        Ok((bindings, hotkeys))
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub game: ClientSettings,
    #[serde(default)]
    pub hacks: HackPermissions,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_GAME__FIELD_OF_VIEW=90)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));
        Self::load_from_dir(&config_dir, profile)
    }

    /// Loads `{dir}/{profile}.toml` plus environment overrides
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile_path = dir.join(profile);

        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        // Try to find config dir relative to executable
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        // Fall back to current directory
        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in settings used when no profile can be loaded
    pub fn fallback(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            game: ClientSettings::default(),
            hacks: HackPermissions::default(),
            server: ServerConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load release profile, using built-in defaults");
            Self::fallback("release")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_build_applies_overrides() {
        let input = InputConfig {
            bindings: vec![BindingConfig {
                action: LogicalAction::Fullscreen,
                key: KeyCode::F2,
            }],
            hotkeys: vec![HotkeyConfig {
                key: KeyCode::H,
                modifiers: vec!["ctrl".to_string()],
                text: "/help".to_string(),
                more_input: false,
            }],
        };
        let (bindings, hotkeys) = input.build().unwrap();
        assert_eq!(bindings.get(LogicalAction::Fullscreen), KeyCode::F2);
        assert_eq!(bindings.get(LogicalAction::Screenshot), KeyCode::F12);
        assert!(hotkeys.lookup(KeyCode::H, HotkeyModifiers::CTRL).is_some());
    }

    #[test]
    fn test_input_build_rejects_unknown_key() {
        let input = InputConfig {
            bindings: vec![BindingConfig {
                action: LogicalAction::Jump,
                key: KeyCode::Unknown,
            }],
            hotkeys: Vec::new(),
        };
        assert_eq!(
            input.build().unwrap_err(),
            BindingError::UnknownKey {
                action: LogicalAction::Jump
            }
        );
    }

    #[test]
    fn test_input_build_rejects_bad_modifier() {
        let input = InputConfig {
            bindings: Vec::new(),
            hotkeys: vec![HotkeyConfig {
                key: KeyCode::H,
                modifiers: vec!["meta".to_string()],
                text: "/help".to_string(),
                more_input: false,
            }],
        };
        assert!(matches!(
            input.build(),
            Err(BindingError::UnknownModifier { .. })
        ));
    }

    #[test]
    fn test_fallback_uses_defaults() {
        let config = AppConfig::fallback("debug");
        assert_eq!(config.profile, "debug");
        assert_eq!(config.game.field_of_view, 70);
        assert!(config.hacks.allows_camera_hacks());
        assert!(config.input.bindings.is_empty());
    }
}

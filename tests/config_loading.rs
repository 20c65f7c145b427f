//! Profile loading from isolated config directories

use std::fs;

use tempfile::TempDir;
use voxel_client::app::AppConfig;
use voxel_client::app::input::{BindingError, HotkeyModifiers, KeyCode, LogicalAction};

fn write_profile(dir: &TempDir, profile: &str, contents: &str) {
    fs::write(dir.path().join(format!("{profile}.toml")), contents).unwrap();
}

#[test]
fn test_load_full_profile() {
    let dir = TempDir::new().unwrap();
    write_profile(
        &dir,
        "custom",
        r#"
[window]
title = "Test"
width = 640.0
height = 480.0

[game]
classic_mode = true
field_of_view = 90
view_distance = 32

[hacks]
can_use_third_person = false

[[input.bindings]]
action = "Fullscreen"
key = "F2"

[[input.hotkeys]]
key = "H"
modifiers = ["ctrl", "alt"]
text = "/help"
more_input = true
"#,
    );

    let config = AppConfig::load_from_dir(dir.path(), "custom").unwrap();
    assert_eq!(config.profile, "custom");
    assert_eq!(config.window.title, "Test");
    // Unset fields keep their defaults
    assert!(config.window.resizable);
    assert!(config.game.classic_mode);
    assert_eq!(config.game.field_of_view, 90);
    assert_eq!(config.game.view_distance, 32);
    assert!(!config.hacks.allows_camera_hacks());
    assert!(config.hacks.can_any_hacks);

    let (bindings, hotkeys) = config.input.build().unwrap();
    assert_eq!(bindings.get(LogicalAction::Fullscreen), KeyCode::F2);
    let hotkey = hotkeys
        .lookup(KeyCode::H, HotkeyModifiers::CTRL | HotkeyModifiers::ALT)
        .unwrap();
    assert_eq!(hotkey.text, "/help");
    assert!(hotkey.more_input);
}

#[test]
fn test_missing_profile_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::load_from_dir(dir.path(), "absent").unwrap();
    assert_eq!(config.profile, "absent");
    assert_eq!(config.game.field_of_view, 70);
    assert!(config.input.bindings.is_empty());
}

#[test]
fn test_unknown_key_name_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    write_profile(
        &dir,
        "bad",
        r#"
[[input.bindings]]
action = "Jump"
key = "Hyperspace"
"#,
    );
    assert!(AppConfig::load_from_dir(dir.path(), "bad").is_err());
}

#[test]
fn test_duplicate_hotkeys_rejected_at_build() {
    let dir = TempDir::new().unwrap();
    write_profile(
        &dir,
        "dupes",
        r#"
[[input.hotkeys]]
key = "M"
text = "/one"

[[input.hotkeys]]
key = "M"
text = "/two"
"#,
    );
    let config = AppConfig::load_from_dir(dir.path(), "dupes").unwrap();
    assert_eq!(
        config.input.build().unwrap_err(),
        BindingError::DuplicateHotkey {
            key: KeyCode::M,
            modifiers: HotkeyModifiers::empty(),
        }
    );
}

#[test]
fn test_shipped_profiles_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
    for profile in ["debug", "release"] {
        let config = AppConfig::load_from_dir(&dir, profile).unwrap();
        assert!(config.input.build().is_ok(), "profile {profile}");
    }
}

use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tunedeck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", "/tmp/tunedeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tunedeck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tunedeck")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tunedeck")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_state_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/tunedeck/tunedeck.log")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_repeat_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = true
repeat_mode = "repeat-one"

[audio]
initial_volume = 70
tick_ms = 100
fetch_timeout_secs = 5

[controls]
seek_step_percent = 10
volume_step = 5

[ui]
header_text = "hello"
show_help = false

[library]
catalog_path = "/tmp/catalog.toml"
local_dir = "/tmp/music"
extensions = ["mp3"]
recursive = false
include_hidden = true
follow_links = false
max_depth = 3

[logging]
level = "debug"
file = "/tmp/tunedeck.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TUNEDECK__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert!(s.playback.shuffle);
    assert!(matches!(s.playback.repeat_mode, RepeatModeSetting::One));
    assert_eq!(s.audio.initial_volume, 70);
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.audio.fetch_timeout_secs, 5);
    assert_eq!(s.controls.seek_step_percent, 10);
    assert_eq!(s.controls.volume_step, 5);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_help);
    assert_eq!(
        s.library.catalog_path.as_deref(),
        Some(std::path::Path::new("/tmp/catalog.toml"))
    );
    assert_eq!(
        s.library.local_dir.as_deref(),
        Some(std::path::Path::new("/tmp/music"))
    );
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 70
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TUNEDECK__AUDIO__INITIAL_VOLUME", "20");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 20);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("absent.toml");
    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", cfg_path.to_str().unwrap());

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 50);
    assert!(matches!(s.playback.repeat_mode, RepeatModeSetting::Off));
    assert!(!s.playback.shuffle);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.initial_volume = 150;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.seek_step_percent = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 101;
    assert!(s.validate().is_err());
}

//! Server configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::wheel::SpinSettings;

pub const DEFAULT_DATA_PATH: &str = "data/wheel.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct WheelConfig {
    /// JSON document path (None = keep everything in memory)
    pub data_path: Option<PathBuf>,
    pub bind_addr: SocketAddr,
    /// Front-end assets served for any non-API route
    pub static_dir: PathBuf,
    pub spin: SpinSettings,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            data_path: Some(PathBuf::from(DEFAULT_DATA_PATH)),
            bind_addr: default_bind_addr(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            spin: SpinSettings::default(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

/// Parse an env var, warning and returning None if it is set but invalid
fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid value");
            None
        }
    }
}

impl WheelConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // Set-but-empty means "don't persist"
        let data_path = match std::env::var("WHEEL_DATA_PATH") {
            Ok(v) if v.trim().is_empty() => None,
            Ok(v) => Some(PathBuf::from(v.trim())),
            Err(_) => defaults.data_path,
        };

        let bind_addr = parse_env("WHEEL_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let static_dir = std::env::var("WHEEL_STATIC_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let duration_ms =
            parse_env("WHEEL_SPIN_DURATION_MS").unwrap_or(defaults.spin.duration_ms);

        let mut min_turns: u32 = parse_env("WHEEL_MIN_TURNS").unwrap_or(defaults.spin.min_turns);
        let mut max_turns: u32 = parse_env("WHEEL_MAX_TURNS").unwrap_or(defaults.spin.max_turns);
        if min_turns > max_turns {
            tracing::warn!(min_turns, max_turns, "WHEEL_MIN_TURNS > WHEEL_MAX_TURNS, swapping");
            std::mem::swap(&mut min_turns, &mut max_turns);
        }
        // At least one whole turn keeps every spin moving forward
        let min_turns = min_turns.max(1);
        let max_turns = max_turns.max(min_turns);

        let config = Self {
            data_path,
            bind_addr,
            static_dir,
            spin: SpinSettings {
                min_turns,
                max_turns,
                duration_ms,
            },
        };

        tracing::info!(
            data_path = ?config.data_path,
            bind_addr = %config.bind_addr,
            static_dir = %config.static_dir.display(),
            duration_ms,
            min_turns,
            max_turns,
            "Wheel config loaded"
        );

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "WHEEL_DATA_PATH",
        "WHEEL_BIND_ADDR",
        "WHEEL_STATIC_DIR",
        "WHEEL_SPIN_DURATION_MS",
        "WHEEL_MIN_TURNS",
        "WHEEL_MAX_TURNS",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = WheelConfig::from_env();
        assert_eq!(config.data_path, Some(PathBuf::from(DEFAULT_DATA_PATH)));
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.spin, SpinSettings::default());
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("WHEEL_DATA_PATH", "/tmp/lunch.json");
        std::env::set_var("WHEEL_BIND_ADDR", "127.0.0.1:8080");
        std::env::set_var("WHEEL_SPIN_DURATION_MS", "1200");
        std::env::set_var("WHEEL_MIN_TURNS", "5");
        std::env::set_var("WHEEL_MAX_TURNS", "8");

        let config = WheelConfig::from_env();
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/lunch.json")));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.spin.duration_ms, 1200);
        assert_eq!(config.spin.min_turns, 5);
        assert_eq!(config.spin.max_turns, 8);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_data_path_disables_persistence() {
        clear_env();
        std::env::set_var("WHEEL_DATA_PATH", "  ");
        assert_eq!(WheelConfig::from_env().data_path, None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        std::env::set_var("WHEEL_BIND_ADDR", "not an address");
        std::env::set_var("WHEEL_SPIN_DURATION_MS", "soon");
        std::env::set_var("WHEEL_MIN_TURNS", "0");
        std::env::set_var("WHEEL_MAX_TURNS", "0");

        let config = WheelConfig::from_env();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.spin.duration_ms, 5000);
        assert_eq!(config.spin.min_turns, 1);
        assert_eq!(config.spin.max_turns, 1);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_turn_range_is_swapped_when_inverted() {
        clear_env();
        std::env::set_var("WHEEL_MIN_TURNS", "70");
        std::env::set_var("WHEEL_MAX_TURNS", "50");

        let config = WheelConfig::from_env();
        assert_eq!(config.spin.min_turns, 50);
        assert_eq!(config.spin.max_turns, 70);
        clear_env();
    }
}

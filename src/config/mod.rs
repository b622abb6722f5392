use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use toml::map::Entry;
use tracing::warn;

/// Crate-wide configuration.
///
/// Loaded once, lazily, from layered TOML files: the user config (XDG path),
/// then a local `cascade_kit.toml` in the working directory as a dev
/// override. Missing files and unknown keys fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,
}

/// Menu metrics, in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub item_height: f32,
    pub min_item_width: f32,
    /// Approximate advance per label character, used to size items.
    pub char_advance: f32,
    pub item_padding: f32,
    pub item_spacing: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    pub submenu_offset_x: f32,
    pub submenu_offset_y: f32,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

impl Default for Config {
    fn default() -> Self {
        Self {
            menu: MenuConfig::default(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_height: 24.0,
            min_item_width: 48.0,
            char_advance: 8.0,
            item_padding: 10.0,
            item_spacing: 4.0,
            horizontal_padding: 5.0,
            vertical_padding: 5.0,
            submenu_offset_x: 4.0,
            submenu_offset_y: 2.0,
        }
    }
}

impl Config {
    pub fn with<R>(f: impl FnOnce(&Config) -> R) -> R {
        let config = CONFIG.get_or_init(Config::init);
        f(config)
    }

    fn init() -> Self {
        let mut merged =
            toml::Value::try_from(Self::default()).expect("default config is always valid toml");

        if let Some(user_config) = get_user_config_path() {
            if let Ok(content) = std::fs::read_to_string(&user_config) {
                match content.parse::<toml::Value>() {
                    Ok(value) => {
                        merge_value(&mut merged, value);
                        tracing::info!("Loaded user config from {}", user_config.display());
                    }
                    Err(err) => warn!("Failed to parse {}: {err}", user_config.display()),
                }
            }
        }

        if let Ok(content) = std::fs::read_to_string("cascade_kit.toml") {
            match content.parse::<toml::Value>() {
                Ok(value) => {
                    merge_value(&mut merged, value);
                    tracing::info!("Loaded local config from ./cascade_kit.toml");
                }
                Err(err) => warn!("Failed to parse cascade_kit.toml: {err}"),
            }
        }

        merged.try_into().unwrap_or_else(|err| {
            warn!("Falling back to default config due to invalid overrides: {err}");
            Self::default()
        })
    }
}

fn merge_value(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base_map), toml::Value::Table(override_map)) => {
            for (key, override_value) in override_map {
                match base_map.entry(key) {
                    Entry::Occupied(mut entry) => merge_value(entry.get_mut(), override_value),
                    Entry::Vacant(entry) => {
                        entry.insert(override_value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

fn get_user_config_path() -> Option<PathBuf> {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })?;

    let path = config_dir.join("cascade-kit").join("config.toml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

use directories::ProjectDirs;
use navring::{Dimens, DriverConfig, StateKind};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::events::AppEvent;
use crate::sys::server::SocketPath;
use async_channel::Sender;

/// `#rrggbb` colour as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn to_srgba(self) -> Srgba<f64> {
        let c: Srgb<f64> = self.0.into_format();
        Srgba::new(c.red, c.green, c.blue, 1.0)
    }
}

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

/// Colour overrides. Unset colours come from the GTK theme.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ColorConfig {
    pub car_icon_bounds: Option<HexColor>,
    pub progress_unused: Option<HexColor>,
    pub progress_used: Option<HexColor>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub initial_state: StateKind,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default)]
    pub socket: SocketPath,
    #[serde(default)]
    pub dimens: Dimens,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub driver: DriverConfig,
}

fn default_width() -> i32 {
    360
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_state: StateKind::default(),
            width: default_width(),
            socket: SocketPath::default(),
            dimens: Dimens::default(),
            colors: ColorConfig::default(),
            driver: DriverConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Config directory error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "carnavi", "carnavi").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `CARNAVI_WIDTH`, `CARNAVI_DRIVER__ENABLED`: one `_` after the prefix,
/// `__` between nested keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix("CARNAVI")
        .prefix_separator("_")
        .separator("__")
}

fn build_config(
    file: config::File<config::FileSourceFile, config::FileFormat>,
    env: config::Environment,
) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(file.required(false))
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build_config(config::File::from(config_path), environment())
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether a watcher event touched the config file itself.
fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the config directory and forwards a reload for every change to
/// the config file until the receiving side goes away.
async fn watch_config(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .to_path_buf();
    fs_err::create_dir_all(&config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", ConfigError::from(e)),
        }
    }
    Ok(())
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

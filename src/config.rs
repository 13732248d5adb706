//! Page configuration: defaults, TOML file and environment layering.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::carousel::{AUTO_ADVANCE_INTERVAL, AUTO_ADVANCE_REGION, AutoAdvance};
use crate::color::srgb_to_hex;
use crate::logging::DEFAULT_LOG_FILE;
use crate::tabs::TabId;

/// Prefix of environment overrides, e.g. `TABTINT_PALETTE__HUE_STEP=-20`.
pub const ENV_PREFIX: &str = "TABTINT_";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// Layered extraction failed
    Extract(Box<figment::Error>),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// Invalid color format
    InvalidColor(String),
    /// Auto-advance interval of zero
    ZeroInterval,
    /// Unknown log level
    InvalidLevel(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Extract(e) => write!(f, "Config error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::InvalidColor(s) => write!(f, "Invalid color: {}", s),
            Self::ZeroInterval => write!(f, "carousel.interval_ms must be at least 1"),
            Self::InvalidLevel(s) => write!(f, "Invalid log level: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub palette: PaletteConfig,
    pub tabs: TabsConfig,
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub logging: LoggingConfig,
    /// Shape of the headless page used by the simulator
    pub layout: LayoutConfig,
}

/// Accent palette settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Base colour of the first tab (any CSS color format)
    pub base: String,
    /// Hue rotation between consecutive tabs, in degrees
    pub hue_step: i32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            base: "#a4a7e0".to_string(),
            hue_step: -15,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Tab shown after load
    pub initial: TabId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Only the carousel of this region advances on its own
    pub auto_advance_region: String,
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_region: AUTO_ADVANCE_REGION.to_string(),
            interval_ms: AUTO_ADVANCE_INTERVAL.as_millis() as u64,
        }
    }
}

impl CarouselConfig {
    pub fn auto_advance(&self) -> AutoAdvance {
        AutoAdvance {
            region: self.auto_advance_region.clone(),
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Distance moved by one press of a scroll button
    pub step: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { step: 200.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive limiting output to this crate.
    pub fn directive(&self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.level.to_ascii_lowercase())
    }
}

/// Elements present on the headless page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub panels: Vec<TabId>,
    pub controls: Vec<TabId>,
    pub title: bool,
    pub arrows: bool,
    pub strip: bool,
    pub control_width: f64,
    pub client_width: f64,
    /// Regions without an indicator container
    pub no_indicators: Vec<String>,
    pub loading_screen: bool,
    /// Slide count per carousel region
    pub slides: BTreeMap<String, usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            panels: TabId::ALL.to_vec(),
            controls: TabId::ALL.to_vec(),
            title: true,
            arrows: true,
            strip: true,
            control_width: 160.0,
            client_width: 480.0,
            no_indicators: Vec::new(),
            loading_screen: true,
            slides: BTreeMap::from([(AUTO_ADVANCE_REGION.to_string(), 3)]),
        }
    }
}

impl PageConfig {
    /// Layer defaults, the optional TOML file and `TABTINT_` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(PageConfig::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validated()
    }

    /// Parse a TOML string on top of the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(PageConfig::default()))
            .merge(Toml::string(content))
            .extract()?;
        config.validated()
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Normalize the base colour to `#rrggbb` and check the remaining values.
    ///
    /// Unlike [`crate::color::hex_to_rgb`], this rejects colours it cannot
    /// parse instead of falling back to black. A zero auto-advance interval
    /// and unknown log levels are rejected too.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.palette.base = normalize_color(&self.palette.base)?;
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.logging.level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::InvalidLevel(self.logging.level.clone()));
        }
        Ok(self)
    }
}

/// Parse any CSS color string and render it as `#rrggbb`.
pub fn normalize_color(input: &str) -> Result<String, ConfigError> {
    let css: csscolorparser::Color = input
        .parse()
        .map_err(|e| ConfigError::InvalidColor(format!("'{}': {}", input, e)))?;
    let [r, g, b, _a] = css.to_rgba8();
    Ok(srgb_to_hex(palette::Srgb::new(r, g, b)))
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::preview::highlight::DEFAULT_THEME;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FmConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SettingsConfig {
    pub start_dir: Option<String>,
    pub show_hidden: Option<bool>,
    pub rounded_panes: Option<bool>,
    pub borderless: Option<bool>,
    pub syntax_theme: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ColorsConfig {
    #[serde(default)]
    pub pane: PaneColors,
    #[serde(default)]
    pub listing: ListingColors,
    #[serde(default)]
    pub status_bar: StatusBarColors,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PaneColors {
    pub active_border: Option<String>,
    pub inactive_border: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListingColors {
    pub selected: Option<String>,
    pub directory: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StatusBarColors {
    #[serde(default)]
    pub selected_file: ColorPair,
    #[serde(default)]
    pub bar: ColorPair,
    #[serde(default)]
    pub totals: ColorPair,
    #[serde(default)]
    pub logo: ColorPair,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ColorPair {
    pub fg: Option<String>,
    pub bg: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub fg: Color,
    pub bg: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub active_border: Color,
    pub inactive_border: Color,
    pub selected: Color,
    pub directory: Color,
    pub file: Color,
    pub status_selected_file: Segment,
    pub status_bar: Segment,
    pub status_totals: Segment,
    pub status_logo: Segment,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            active_border: Color::Rgb(0xF2, 0x57, 0x57),
            inactive_border: Color::White,
            selected: Color::Rgb(0xF2, 0x57, 0x57),
            directory: Color::Rgb(0x5F, 0xAF, 0xFF),
            file: Color::White,
            status_selected_file: Segment {
                fg: Color::White,
                bg: Color::Rgb(0xF2, 0x57, 0x57),
            },
            status_bar: Segment {
                fg: Color::White,
                bg: Color::Rgb(0x3C, 0x38, 0x36),
            },
            status_totals: Segment {
                fg: Color::White,
                bg: Color::Rgb(0xA5, 0x50, 0xDF),
            },
            status_logo: Segment {
                fg: Color::White,
                bg: Color::Rgb(0x6D, 0x4C, 0xB5),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_dir: PathBuf,
    pub show_hidden: bool,
    pub rounded_panes: bool,
    pub borderless: bool,
    pub syntax_theme: String,
    pub theme: Theme,
}

/// Values that only the command line can supply.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub start_dir: Option<PathBuf>,
    pub show_hidden: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.fm`, where the config and the log file live.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fm"))
}

/// Returns the path to `~/.fm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.fm/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FmConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FmConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FmConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<FmConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(FmConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FmConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r##"# fm configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [settings]
# start_dir = "~/projects"       # Or set FM_START_DIR, or pass a path on the command line
# show_hidden = false            # Or pass --all
# rounded_panes = false
# borderless = false
# syntax_theme = "base16-ocean.dark"   # Or set FM_SYNTAX_THEME

# Colours accept names ("red", "lightblue") or hex ("#F25757").
# [colors.pane]
# active_border = "#F25757"
# inactive_border = "white"

# [colors.listing]
# selected = "#F25757"
# directory = "#5FAFFF"
# file = "white"

# [colors.status_bar.selected_file]
# fg = "white"
# bg = "#F25757"
# [colors.status_bar.bar]
# fg = "white"
# bg = "#3C3836"
# [colors.status_bar.totals]
# fg = "white"
# bg = "#A550DF"
# [colors.status_bar.logo]
# fg = "white"
# bg = "#6D4CB5"
"##;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FmConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Start directory: CLI → env → config → current directory
    let start_dir = cli
        .start_dir
        .clone()
        .or_else(|| std::env::var("FM_START_DIR").ok().map(|s| expand_home(&s)))
        .or_else(|| config.settings.start_dir.as_deref().map(expand_home))
        .unwrap_or_else(|| PathBuf::from("."));

    // Syntax theme: env → config → default
    let syntax_theme = std::env::var("FM_SYNTAX_THEME")
        .ok()
        .or_else(|| config.settings.syntax_theme.clone())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    ResolvedConfig {
        start_dir,
        show_hidden: cli.show_hidden || config.settings.show_hidden.unwrap_or(false),
        rounded_panes: config.settings.rounded_panes.unwrap_or(false),
        borderless: config.settings.borderless.unwrap_or(false),
        syntax_theme,
        theme: resolve_theme(&config.colors),
    }
}

fn resolve_theme(colors: &ColorsConfig) -> Theme {
    let d = Theme::default();
    let sb = &colors.status_bar;
    Theme {
        active_border: color_or(&colors.pane.active_border, d.active_border),
        inactive_border: color_or(&colors.pane.inactive_border, d.inactive_border),
        selected: color_or(&colors.listing.selected, d.selected),
        directory: color_or(&colors.listing.directory, d.directory),
        file: color_or(&colors.listing.file, d.file),
        status_selected_file: segment_or(&sb.selected_file, d.status_selected_file),
        status_bar: segment_or(&sb.bar, d.status_bar),
        status_totals: segment_or(&sb.totals, d.status_totals),
        status_logo: segment_or(&sb.logo, d.status_logo),
    }
}

fn segment_or(pair: &ColorPair, default: Segment) -> Segment {
    Segment {
        fg: color_or(&pair.fg, default.fg),
        bg: color_or(&pair.bg, default.bg),
    }
}

fn color_or(value: &Option<String>, default: Color) -> Color {
    match value {
        Some(s) => Color::from_str(s).unwrap_or_else(|_| {
            warn!("Invalid colour '{}' in config, using default", s);
            default
        }),
        None => default,
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~')
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches('/'));
    }
    PathBuf::from(path)
}

//! Configuration file support for evacplan.
//!
//! Settings are read from `~/.config/evacplan/config.toml` and cover drawing
//! defaults, the wall tool, zoom/pan behavior and PDF export. If no config file
//! exists, defaults are used.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{DrawingConfig, ExportConfig, ViewportConfig, WallConfig};

use crate::draw::RenderOptions;
use crate::draw::color::{BLACK, GREEN_ZONE, YELLOW_ZONE};
use crate::export::ExportOptions;
use crate::input::state::{DrawingDefaults, EditorSettings, WallSettings};
use crate::input::tool::ToolPalette;
use crate::viewport::gestures::GestureSettings;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// stroke_color = "black"
/// yellow_fill = "#FFFBCC"
/// line_width = 2.0
///
/// [walls]
/// thickness = 5.0
/// snap_to_angle = true
///
/// [viewport]
/// max_scale = 3.0
///
/// [export]
/// glyph_size = 15.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Wall tool and snapping
    #[serde(default)]
    pub walls: WallConfig,

    /// Zoom, pan and touch gestures
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// PDF export
    #[serde(default)]
    pub export: ExportConfig,
}

fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(&*value) {
        log::warn!("Invalid {name} {value:.2}, clamping to {min:.1}-{max:.1} range");
        *value = if value.is_nan() { min } else { value.clamp(min, max) };
    }
}

impl Config {
    /// Validates and clamps all values to acceptable ranges, logging a
    /// warning for each correction.
    pub fn validate_and_clamp(&mut self) {
        let drawing = &mut self.drawing;
        clamp_field("line_width", &mut drawing.line_width, 0.5, 20.0);
        clamp_field("fill_opacity", &mut drawing.fill_opacity, 0.0, 1.0);
        clamp_field("font_size", &mut drawing.font_size, 6.0, 96.0);
        clamp_field(
            "polygon_close_distance",
            &mut drawing.polygon_close_distance,
            1.0,
            50.0,
        );
        if drawing.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Sans'");
            drawing.font_family = "Sans".to_string();
        }

        clamp_field("wall thickness", &mut self.walls.thickness, 1.0, 50.0);
        clamp_field("snap_distance", &mut self.walls.snap_distance, 1.0, 50.0);

        let viewport = &mut self.viewport;
        if !viewport.min_scale.is_finite() || viewport.min_scale <= 0.0 {
            log::warn!(
                "Invalid min_scale {:.2}, using {:.1}",
                viewport.min_scale,
                crate::viewport::DEFAULT_MIN_SCALE
            );
            viewport.min_scale = crate::viewport::DEFAULT_MIN_SCALE;
        }
        if !viewport.max_scale.is_finite() || viewport.max_scale <= viewport.min_scale {
            let fallback = (viewport.min_scale * 3.0).max(crate::viewport::DEFAULT_MAX_SCALE);
            log::warn!(
                "max_scale {:.2} must exceed min_scale {:.2}, using {:.1}",
                viewport.max_scale,
                viewport.min_scale,
                fallback
            );
            viewport.max_scale = fallback;
        }
        clamp_field("wheel_sensitivity", &mut viewport.wheel_sensitivity, 0.0001, 1.0);
        clamp_field("pinch_sensitivity", &mut viewport.pinch_sensitivity, 0.0001, 1.0);
        clamp_field("pinch_threshold", &mut viewport.pinch_threshold, 0.0, 100.0);

        clamp_field("glyph_size", &mut self.export.glyph_size, 4.0, 100.0);
        clamp_field(
            "container_width",
            &mut self.export.container_width,
            1.0,
            100_000.0,
        );
        clamp_field(
            "container_height",
            &mut self.export.container_height,
            1.0,
            100_000.0,
        );
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("evacplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads and validates the config file at `config_path`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML at the default path.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes a config file holding every default value.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config =
            toml::to_string_pretty(&Self::default()).context("Failed to serialize config")?;
        fs::write(&config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Tool palette derived from the `[drawing]` and `[walls]` sections.
    pub fn palette(&self) -> ToolPalette {
        ToolPalette {
            stroke: self.drawing.stroke_color.to_color_or(BLACK),
            yellow_fill: self.drawing.yellow_fill.to_color_or(YELLOW_ZONE),
            green_fill: self.drawing.green_fill.to_color_or(GREEN_ZONE),
            line_width: self.drawing.line_width,
            wall_thickness: self.walls.thickness,
        }
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            drawing: DrawingDefaults {
                palette: self.palette(),
                font_size: self.drawing.font_size,
                text: self.drawing.default_text.clone(),
            },
            walls: WallSettings {
                thickness: self.walls.thickness,
                snap_to_angle: self.walls.snap_to_angle,
                snap_to_walls: self.walls.snap_to_walls,
                snap_to_lines: self.walls.snap_to_lines,
                snap_to_extensions: self.walls.snap_to_extensions,
                snap_distance: self.walls.snap_distance,
            },
            gestures: GestureSettings {
                pinch_threshold: self.viewport.pinch_threshold,
                pinch_sensitivity: self.viewport.pinch_sensitivity,
                pan_hold_ms: self.viewport.pan_hold_ms,
            },
            render: RenderOptions {
                fill_opacity: self.drawing.fill_opacity,
                font_family: self.drawing.font_family.clone(),
                ..RenderOptions::default()
            },
            polygon_close_distance: self.drawing.polygon_close_distance,
            rectangle_mode: self.drawing.rectangle_mode,
            wheel_sensitivity: self.viewport.wheel_sensitivity,
            min_scale: self.viewport.min_scale,
            max_scale: self.viewport.max_scale,
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            glyph_size: self.export.glyph_size,
            ..ExportOptions::default()
        }
    }
}

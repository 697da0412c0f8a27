use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Default interval between behavior re-rolls, in milliseconds.
pub const DEFAULT_BEHAVIOR_INTERVAL_MS: u64 = 2000;

/// Default distance of each boundary from its viewport edge, in world pixels.
pub const DEFAULT_EDGE_MARGIN: f32 = 50.0;

/// Upper bound on `bunnies.count`.
pub const MAX_BUNNIES: usize = 64;

/// Default frame interval for sprite playback: 0.15 frames per tick at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 111;

/// Top-level schema of `meadow.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeadowConfig {
    pub title: String,
    pub viewport: ViewportSection,
    pub bunnies: BunniesSection,
    pub behavior: BehaviorSection,
    pub boundary: BoundarySection,
    pub render: RenderSection,
}

/// Logical world size; the terminal view is scaled to fit it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportSection {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BunniesSection {
    pub count: usize,
    /// Speed of a bunny at scale 1.0, in world pixels per frame.
    pub base_speed: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub frame_interval_ms: u64,
    /// Optional external sprite strip; the embedded sheet is used otherwise.
    pub sheet: Option<SheetPaths>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetPaths {
    pub png: PathBuf,
    pub json: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorSection {
    pub interval_ms: u64,
    /// Fixed seed for reproducible runs; drawn from entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundarySection {
    pub margin: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub fps: u32,
}

impl Default for MeadowConfig {
    fn default() -> Self {
        Self {
            title: "WELCOME\nBunny Meadow".to_string(),
            viewport: ViewportSection::default(),
            bunnies: BunniesSection::default(),
            behavior: BehaviorSection::default(),
            boundary: BoundarySection::default(),
            render: RenderSection::default(),
        }
    }
}

impl Default for ViewportSection {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

impl Default for BunniesSection {
    fn default() -> Self {
        Self {
            count: 3,
            base_speed: 2.0,
            min_scale: 0.8,
            max_scale: 1.4,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            sheet: None,
        }
    }
}

impl Default for BehaviorSection {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_BEHAVIOR_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Default for BoundarySection {
    fn default() -> Self {
        Self {
            margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

impl Default for RenderSection {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

impl MeadowConfig {
    /// Parse and validate TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse meadow config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Load the discovered config file, or defaults when there is none.
    ///
    /// Returns the path that was read, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        match discover_path() {
            Some(path) => Ok((Self::from_path(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        positive("bunnies.base_speed", self.bunnies.base_speed)?;
        positive("bunnies.min_scale", self.bunnies.min_scale)?;
        positive("bunnies.max_scale", self.bunnies.max_scale)?;

        if self.bunnies.count > MAX_BUNNIES {
            bail!(
                "bunnies.count must be at most {MAX_BUNNIES}, got {}",
                self.bunnies.count
            );
        }
        if self.bunnies.min_scale > self.bunnies.max_scale {
            bail!(
                "bunnies.min_scale ({}) must not exceed bunnies.max_scale ({})",
                self.bunnies.min_scale,
                self.bunnies.max_scale
            );
        }
        if self.bunnies.frame_interval_ms == 0 {
            bail!("bunnies.frame_interval_ms must be greater than zero");
        }
        if self.behavior.interval_ms == 0 {
            bail!("behavior.interval_ms must be greater than zero");
        }
        if !self.boundary.margin.is_finite() || self.boundary.margin < 0.0 {
            bail!("boundary.margin must be a finite, non-negative number");
        }
        if self.boundary.margin * 2.0 >= self.viewport.width {
            bail!(
                "boundary.margin ({}) leaves no room inside viewport.width ({})",
                self.boundary.margin,
                self.viewport.width
            );
        }
        if !(1..=240).contains(&self.render.fps) {
            bail!("render.fps must be between 1 and 240, got {}", self.render.fps);
        }
        Ok(())
    }
}

fn positive(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{field} must be a finite number greater than zero, got {value}");
    }
    Ok(())
}

/// Config file location.
///
/// `MEADOW_CONFIG` wins when set; otherwise `<config dir>/meadow/meadow.toml`
/// if that file exists.
pub fn discover_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("MEADOW_CONFIG").filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("meadow").join("meadow.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_defaults() {
        let config = MeadowConfig::from_toml_str("").unwrap();
        assert_eq!(config, MeadowConfig::default());
        assert_eq!(config.behavior.interval_ms, DEFAULT_BEHAVIOR_INTERVAL_MS);
        assert_eq!(config.boundary.margin, DEFAULT_EDGE_MARGIN);
        assert_eq!(config.bunnies.count, 3);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = MeadowConfig::from_toml_str(
            r#"
title = "Hello"

[bunnies]
count = 5

[behavior]
seed = 42
"#,
        )
        .unwrap();
        assert_eq!(config.title, "Hello");
        assert_eq!(config.bunnies.count, 5);
        assert_eq!(config.bunnies.base_speed, 2.0);
        assert_eq!(config.behavior.seed, Some(42));
        assert_eq!(config.behavior.interval_ms, DEFAULT_BEHAVIOR_INTERVAL_MS);
    }

    #[test]
    fn sheet_paths_parse() {
        let config = MeadowConfig::from_toml_str(
            r#"
[bunnies.sheet]
png = "assets/bunny.png"
json = "assets/bunny.json"
"#,
        )
        .unwrap();
        let sheet = config.bunnies.sheet.unwrap();
        assert_eq!(sheet.png, PathBuf::from("assets/bunny.png"));
        assert_eq!(sheet.json, PathBuf::from("assets/bunny.json"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = MeadowConfig::from_toml_str("[behavior]\nspeed = 3\n").unwrap_err();
        assert!(format!("{err:#}").contains("speed"), "{err:#}");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = MeadowConfig::from_toml_str("[behavior]\ninterval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("behavior.interval_ms"), "{err}");
    }

    #[test]
    fn inverted_scale_range_is_rejected() {
        let err = MeadowConfig::from_toml_str("[bunnies]\nmin_scale = 2.0\nmax_scale = 1.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("min_scale"), "{err}");
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let err = MeadowConfig::from_toml_str("[viewport]\nwidth = 80.0\n").unwrap_err();
        assert!(err.to_string().contains("boundary.margin"), "{err}");
    }

    #[test]
    fn huge_bunny_count_is_rejected() {
        let err = MeadowConfig::from_toml_str("[bunnies]\ncount = 100000000000\n").unwrap_err();
        assert!(err.to_string().contains("bunnies.count"), "{err}");

        let config = MeadowConfig::from_toml_str("[bunnies]\ncount = 64\n").unwrap();
        assert_eq!(config.bunnies.count, MAX_BUNNIES);
    }

    #[test]
    fn negative_speed_is_rejected() {
        let err = MeadowConfig::from_toml_str("[bunnies]\nbase_speed = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("bunnies.base_speed"), "{err}");
    }

    #[test]
    fn from_path_reports_file_name() {
        let dir = std::env::temp_dir().join("meadow-config-test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[render]\nfps = 0\n").unwrap();

        let err = MeadowConfig::from_path(&path).unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.contains("broken.toml"), "{rendered}");
        assert!(rendered.contains("render.fps"), "{rendered}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("meadow-config-does-not-exist.toml");
        assert!(MeadowConfig::from_path(&path).is_err());
    }
}

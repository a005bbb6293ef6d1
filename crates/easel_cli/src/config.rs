//! Easel configuration file handling
//!
//! An optional `easel.toml` supplies defaults for the command line:
//!
//! ```toml
//! [defaults]
//! view = "svg"
//! speed = 20
//! out = "animation.svg"
//!
//! [svg]
//! width = 800
//! height = 600
//! looping = true
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use easel_svg::SvgOptions;
use serde::{Deserialize, Serialize};

/// Views the CLI can produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Line-oriented textual description
    Text,
    /// SVG animation document
    Svg,
    /// Interactive playback window
    Visual,
    /// Interactive editor window
    Edit,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Text => "text",
            ViewKind::Svg => "svg",
            ViewKind::Visual => "visual",
            ViewKind::Edit => "edit",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of `easel.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EaselConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub svg: SvgConfig,
}

/// Fallbacks for flags left off the command line
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub view: Option<ViewKind>,
    /// Ticks per second
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub out: Option<String>,
}

/// SVG export settings
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SvgConfig {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub looping: bool,
}

impl EaselConfig {
    pub const FILE_NAME: &'static str = "easel.toml";

    /// Load an explicitly named configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: EaselConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load `easel.toml` from `dir`, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        tracing::debug!("Loading configuration from {}", config_path.display());
        Self::load(&config_path)
    }

    pub fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            width: self.svg.width,
            height: self.svg.height,
            looping: self.svg.looping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: EaselConfig = toml::from_str(
            r#"
            [defaults]
            view = "svg"
            speed = 20
            out = "animation.svg"

            [svg]
            width = 800
            height = 600
            looping = true
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.view, Some(ViewKind::Svg));
        assert_eq!(config.defaults.speed, Some(20));
        assert_eq!(config.defaults.out.as_deref(), Some("animation.svg"));
        assert_eq!(
            config.svg_options(),
            SvgOptions::default().with_size(800, 600).looping(true)
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: EaselConfig = toml::from_str("").unwrap();
        assert!(config.defaults.view.is_none());
        assert!(config.defaults.speed.is_none());
        assert_eq!(config.svg_options(), SvgOptions::default());
    }

    #[test]
    fn test_rejects_unknown_view() {
        let parsed: Result<EaselConfig, _> = toml::from_str("[defaults]\nview = \"gif\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_file_in_dir_is_default() {
        let dir = std::env::temp_dir().join(format!("easel-no-config-{}", std::process::id()));
        let config = EaselConfig::load_from_dir(&dir).unwrap();
        assert!(config.defaults.out.is_none());

        let err = EaselConfig::load(&dir.join(EaselConfig::FILE_NAME)).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_and_report_parse_errors() {
        let dir = std::env::temp_dir().join(format!("easel-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let path = dir.join(EaselConfig::FILE_NAME);
        fs::write(&path, "[defaults]\nspeed = 4\n").unwrap();
        assert_eq!(
            EaselConfig::load_from_dir(&dir).unwrap().defaults.speed,
            Some(4)
        );

        fs::write(&path, "[defaults\n").unwrap();
        let err = EaselConfig::load_from_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));

        fs::remove_dir_all(&dir).unwrap();
    }
}

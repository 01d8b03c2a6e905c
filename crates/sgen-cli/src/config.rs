//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::bail;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use sgen_core::SegmentationConfig;

/// Application settings. All durations are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Silence duration that marks a chapter transition. Required.
    pub transition: Option<i64>,

    /// Minimum silence around a part before a chapter may be cut there.
    pub min_silence: Option<i64>,

    /// Segment duration after which a chapter is broken up.
    pub max_segment: Option<i64>,

    /// Log every processing step.
    pub debug: bool,
}

/// Values that replace loaded settings when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_silence: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_segment: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl Settings {
    /// Loads settings, optionally from a specific file, with command-line
    /// overrides applied last.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(
        config_path: Option<&Path>,
        overrides: &SettingsOverrides,
    ) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SGEN_*)
        figment = figment.merge(Env::prefixed("SGEN_"));

        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract()
    }

    /// Validates the settings and converts them into pipeline thresholds.
    pub fn segmentation(&self) -> anyhow::Result<SegmentationConfig> {
        let Some(transition) = self.transition else {
            bail!(
                "The chapter transition wasn't given. Set it through --transition <duration> or -t <duration>."
            );
        };
        if transition <= 0 {
            bail!("The chapter transition should be greater than zero, got {transition}.");
        }
        for (name, value) in [
            ("min_silence", self.min_silence),
            ("max_segment", self.max_segment),
        ] {
            if let Some(value) = value.filter(|v| *v < 0) {
                bail!("{name} cannot be negative, got {value}.");
            }
        }

        Ok(SegmentationConfig {
            transition_ms: transition,
            min_silence_ms: self.min_silence,
            max_segment_ms: self.max_segment,
        })
    }
}

/// Returns the platform-specific config directory for sgen.
///
/// On Linux: `~/.config/sgen`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sgen"))
}

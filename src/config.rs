use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::shift::Direction;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: Logging,
    pub shift: ShiftCfg,
    pub output: OutputCfg,
}

impl Config {
    pub fn load(path_opt: Option<&Path>) -> Result<Self> {
        let default_path = Path::new("config.toml");
        let path = if let Some(p) = path_opt {
            Some(p)
        } else if default_path.exists() {
            Some(default_path)
        } else {
            None
        };

        let mut cfg = Config::default();

        if let Some(path) = path {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed reading config file: {}", path.display()))?;
            cfg = Self::from_toml(&raw)
                .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        }

        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_pretty(&self) -> Result<String> {
        let s = toml::to_string_pretty(self).context("failed serializing config as TOML")?;
        Ok(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub format: String,
    pub debug_cue_samples: usize,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            debug_cue_samples: 20,
        }
    }
}

/// Offset applied when the command line does not give one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftCfg {
    pub offset_ms: i64,
    pub direction: Direction,
}

impl Default for ShiftCfg {
    fn default() -> Self {
        Self {
            offset_ms: 500,
            direction: Direction::Backward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputCfg {
    /// Prepended to each input file name to build the output name.
    pub prefix: String,
    pub overwrite: bool,
}

impl Default for OutputCfg {
    fn default() -> Self {
        Self {
            prefix: "shifted_".to_string(),
            overwrite: false,
        }
    }
}

pub fn init_tracing(logging: &Logging, cli_override_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = cli_override_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let is_json = logging.format.to_lowercase() == "json";

    if is_json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .event_format(fmt::format().json())
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .pretty()
            .init();
    }

    tracing::info!(
        level = level,
        format = logging.format.as_str(),
        "logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = Config::from_toml("[shift]\noffset_ms = 1200\ndirection = \"forward\"\n").unwrap();
        assert_eq!(cfg.shift.offset_ms, 1200);
        assert_eq!(cfg.shift.direction, Direction::Forward);
        assert_eq!(cfg.output.prefix, "shifted_");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = Config::default().to_toml_pretty().unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.shift.offset_ms, 500);
        assert_eq!(back.shift.direction, Direction::Backward);
        assert!(!back.output.overwrite);
    }

    #[test]
    fn unknown_direction_is_rejected() {
        assert!(Config::from_toml("[shift]\ndirection = \"sideways\"\n").is_err());
    }
}

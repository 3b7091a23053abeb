//! Resample configuration layering: defaults, then an optional JSON file,
//! then environment variables and flags (merged by clap).

use std::path::Path;

use linscale_core::{ResampleConfig, TransferCurve};

use crate::cli::FilterArgs;

/// Errors in user-supplied configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] linscale_core::ResampleError),
    #[error("at least one of --width and --height must be non-zero")]
    MissingTarget,
}

impl FilterArgs {
    /// Final resample settings for this invocation.
    pub fn resolve(&self) -> Result<ResampleConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_file(path)?,
            None => ResampleConfig::default(),
        };
        if let Some(gamma) = self.gamma {
            config.transfer = TransferCurve::Power { gamma };
        }
        if self.srgb {
            config.transfer = TransferCurve::Srgb;
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(scale) = self.filter_scale {
            config.filter_scale = scale;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<ResampleConfig, ConfigError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: display, source })
}

/// Fill in a zero target dimension from the source aspect ratio.
pub fn resolve_target(
    src_width: u32,
    src_height: u32,
    width: u32,
    height: u32,
) -> Result<(u32, u32), ConfigError> {
    let scaled = |num: u32, of: u32, den: u32| -> u32 {
        let v = (num as u64 * of as u64 + den as u64 / 2) / den as u64;
        v.clamp(1, u32::MAX as u64) as u32
    };
    match (width, height) {
        (0, 0) => Err(ConfigError::MissingTarget),
        (0, h) => Ok((scaled(src_width, h, src_height), h)),
        (w, 0) => Ok((w, scaled(src_height, w, src_width))),
        (w, h) => Ok((w, h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linscale_core::FilterKind;

    #[test]
    fn test_resolve_without_overrides_is_default() {
        let config = FilterArgs::default().resolve().unwrap();
        assert_eq!(config, ResampleConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let path = std::env::temp_dir().join(format!("linscale-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "filter": "tent", "filter_scale": 2.0 }"#).unwrap();
        let args = FilterArgs {
            config: Some(path.clone()),
            gamma: Some(2.2),
            filter_scale: Some(0.5),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.filter, FilterKind::Tent);
        assert_eq!(config.filter_scale, 0.5);
        assert_eq!(config.transfer, TransferCurve::Power { gamma: 2.2 });
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let args = FilterArgs { filter_scale: Some(0.0), ..Default::default() };
        assert!(matches!(args.resolve(), Err(ConfigError::Invalid(_))));

        let args = FilterArgs {
            config: Some("/definitely/not/here.json".into()),
            ..Default::default()
        };
        assert!(matches!(args.resolve(), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_resolve_target_keeps_aspect_ratio() {
        assert_eq!(resolve_target(400, 200, 100, 0).unwrap(), (100, 50));
        assert_eq!(resolve_target(400, 200, 0, 50).unwrap(), (100, 50));
        assert_eq!(resolve_target(1000, 1, 10, 0).unwrap(), (10, 1));
        assert_eq!(resolve_target(3, 5, 7, 9).unwrap(), (7, 9));
        assert!(matches!(resolve_target(3, 5, 0, 0), Err(ConfigError::MissingTarget)));
    }
}

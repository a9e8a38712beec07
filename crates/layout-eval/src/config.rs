// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Evaluation settings.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional file (any format `config` recognises by extension), then
//! environment variables prefixed with `LAYOUT_EVAL_`, for example
//! `LAYOUT_EVAL_COVERAGE_THRESHOLD=0.98`.

use crate::{
    Error,
    raster::{PageColors, PixelMatcher, RegionFilter, Rgb},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

const ENV_PREFIX: &str = "LAYOUT_EVAL";

/// Settings for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Fraction of a matched groundtruth region's foreground pixels that a
    /// single-edge hypothesis region must cover to be a correct segmentation.
    /// `1.0` requires every pixel.
    pub coverage_threshold: f64,
    /// Page background colour.
    pub background: Rgb,
    /// Colour reserved for true negatives; never a region colour.
    pub reserved: Rgb,
    /// Region type name to the colour its pixels are painted with.
    pub palette: BTreeMap<String, Rgb>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        let colors = PageColors::default();
        Self {
            coverage_threshold: 1.0,
            background: colors.background,
            reserved: colors.reserved,
            palette: BTreeMap::from([
                ("displayed".to_string(), [255, 0, 0]),
                ("embedded".to_string(), [0, 0, 255]),
                ("label".to_string(), [0, 255, 0]),
            ]),
        }
    }
}

impl EvalConfig {
    /// Loads settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            log::debug!("Loading evaluation config from {:?}", path);
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: EvalConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.coverage_threshold) {
            return Err(Error::InvalidParameters(format!(
                "coverage_threshold must be within [0, 1], got {}",
                self.coverage_threshold
            )));
        }
        if self.background == self.reserved {
            return Err(Error::InvalidParameters(
                "background and reserved colours must differ".to_string(),
            ));
        }
        for (name, color) in &self.palette {
            if *color == self.background || *color == self.reserved {
                return Err(Error::InvalidParameters(format!(
                    "region type '{}' uses the background or reserved colour {:?}",
                    name, color
                )));
            }
        }
        Ok(())
    }

    pub fn page_colors(&self) -> PageColors {
        PageColors {
            background: self.background,
            reserved: self.reserved,
        }
    }

    /// Filter for a region type, or every foreground pixel when `None`.
    pub fn filter_for(&self, region_type: Option<&str>) -> Result<RegionFilter, Error> {
        match region_type {
            None => Ok(RegionFilter::AnyForeground),
            Some(name) => self
                .palette
                .get(name)
                .map(|color| RegionFilter::Color(*color))
                .ok_or_else(|| Error::UnknownRegionType(name.to_string())),
        }
    }

    pub fn matcher_for(&self, region_type: Option<&str>) -> Result<PixelMatcher, Error> {
        Ok(PixelMatcher::new(
            self.filter_for(region_type)?,
            self.page_colors(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EvalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.coverage_threshold, 1.0);
        assert_eq!(
            config.filter_for(Some("displayed")).unwrap(),
            RegionFilter::Color([255, 0, 0])
        );
        assert_eq!(config.filter_for(None).unwrap(), RegionFilter::AnyForeground);
    }

    #[test]
    fn test_unknown_region_type() {
        let config = EvalConfig::default();
        assert!(matches!(
            config.filter_for(Some("table")),
            Err(Error::UnknownRegionType(name)) if name == "table"
        ));
    }

    #[test]
    fn test_rejects_bad_threshold_and_palette() {
        let config = EvalConfig {
            coverage_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameters(_))));

        let mut config = EvalConfig::default();
        config.palette.insert("bogus".to_string(), [255, 165, 0]);
        assert!(matches!(config.validate(), Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{ "coverage_threshold": 0.95, "palette": {{ "table": [10, 20, 30] }} }}"#
        )
        .unwrap();

        let config = EvalConfig::load(Some(&path)).unwrap();
        assert_eq!(config.coverage_threshold, 0.95);
        assert_eq!(
            config.filter_for(Some("table")).unwrap(),
            RegionFilter::Color([10, 20, 30])
        );
        assert_eq!(config.background, [255, 255, 255]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            EvalConfig::load(Some(&path)),
            Err(Error::ConfigError(_))
        ));
    }
}

//! Reader and writer configuration

use mtxio_core::constants::{coordinate, DEFAULT_DETECT_LIMIT, DEFAULT_MAX_DIMENSION, SIGNATURE_LEN};
use mtxio_core::validation::is_type_marker;
use mtxio_core::SampleDepth;

use crate::error::{Error, Result};

/// Tunables shared by [`crate::MatrixReader`] and [`crate::MatrixWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IoConfig {
    /// Maximum bytes the detector may consume looking for a header line
    pub detect_limit: usize,
    /// Largest row or column count a header may declare
    pub max_dimension: usize,
    /// Sample depth used for bitmap output
    pub sample_depth: SampleDepth,
    /// Minimum cell width in pretty output
    pub pretty_width: usize,
    /// Type marker written into Guillaume headers
    pub guillaume_marker: String,
}

impl IoConfig {
    /// Set the detection prefix limit
    pub fn with_detect_limit(mut self, detect_limit: usize) -> Self {
        self.detect_limit = detect_limit;
        self
    }

    /// Set the largest accepted dimension
    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Set the bitmap sample depth
    pub fn with_sample_depth(mut self, sample_depth: SampleDepth) -> Self {
        self.sample_depth = sample_depth;
        self
    }

    /// Set the pretty cell width
    pub fn with_pretty_width(mut self, pretty_width: usize) -> Self {
        self.pretty_width = pretty_width;
        self
    }

    /// Set the Guillaume type marker
    pub fn with_guillaume_marker(mut self, marker: impl Into<String>) -> Self {
        self.guillaume_marker = marker.into();
        self
    }

    /// Check that the settings can actually be used
    pub fn validate(&self) -> Result<()> {
        if self.detect_limit < SIGNATURE_LEN {
            return Err(Error::Config(format!(
                "detect_limit must be at least {SIGNATURE_LEN} bytes, got {}",
                self.detect_limit
            )));
        }
        if !is_type_marker(&self.guillaume_marker) {
            return Err(Error::Config(format!(
                "guillaume_marker must be alphabetic, got {:?}",
                self.guillaume_marker
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    ///
    /// Missing keys take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            detect_limit: DEFAULT_DETECT_LIMIT,
            max_dimension: DEFAULT_MAX_DIMENSION,
            sample_depth: SampleDepth::One,
            pretty_width: 1,
            guillaume_marker: coordinate::DEFAULT_MARKER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = IoConfig::default()
            .with_max_dimension(100)
            .with_sample_depth(SampleDepth::Eight)
            .with_guillaume_marker("R");
        assert_eq!(config.max_dimension, 100);
        assert_eq!(config.sample_depth, SampleDepth::Eight);
        assert_eq!(config.detect_limit, DEFAULT_DETECT_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_marker() {
        let config = IoConfig::default().with_guillaume_marker("M1");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        let config = IoConfig::default().with_detect_limit(4);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_fills_missing_keys() {
        let config = IoConfig::from_json(r#"{ "pretty_width": 4, "sample_depth": "eight" }"#)
            .unwrap();
        assert_eq!(config.pretty_width, 4);
        assert_eq!(config.sample_depth, SampleDepth::Eight);
        assert_eq!(config.guillaume_marker, "M");

        let round = IoConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(round, config);

        assert!(matches!(
            IoConfig::from_json(r#"{ "guillaume_marker": "" }"#),
            Err(Error::Config(_))
        ));
    }
}

//! Runtime configuration for a drawing pad, read from an optional JSON string
//! handed over by the host page. Every field has a default matching the stock
//! 400x400 pad backed by the `mmah` and `orig` recognition data.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::LogicalSize;

/// One named block of recognizer reference data and where to fetch it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    pub name: String,
    pub path: String,
}

impl DataSet {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// Pen appearance on the canvas (logical units).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub line_width: f64,
    pub stroke_color: String,
    pub line_cap: String,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            stroke_color: "#374151".to_string(),
            line_cap: "round".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    pub logical_width: f64,
    pub logical_height: f64,
    #[serde(flatten)]
    pub style: StrokeStyle,
    /// Candidates requested in free recognition mode.
    pub max_results: usize,
    /// Dataset name the matcher is built on.
    pub matcher: String,
    pub datasets: Vec<DataSet>,
    /// `None` waits forever, like the bare recognizer callback would.
    pub timeout_ms: Option<u32>,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            logical_width: 400.0,
            logical_height: 400.0,
            style: StrokeStyle::default(),
            max_results: 8,
            matcher: "mmah".to_string(),
            datasets: vec![
                DataSet::new("mmah", "/mmah.json"),
                DataSet::new("orig", "/orig.json"),
            ],
            timeout_ms: Some(10_000),
        }
    }
}

impl PadConfig {
    /// Parse and validate. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: PadConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults when the host passed nothing (or only whitespace).
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, ConfigError> {
        match json.map(str::trim) {
            Some(s) if !s.is_empty() => Self::from_json(s),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.logical_width) || !positive(self.logical_height) {
            return Err(ConfigError::Invalid(format!(
                "logical size must be positive, got {}x{}",
                self.logical_width, self.logical_height
            )));
        }
        if !positive(self.style.line_width) {
            return Err(ConfigError::Invalid(format!(
                "line_width must be positive, got {}",
                self.style.line_width
            )));
        }
        if self.max_results == 0 {
            return Err(ConfigError::Invalid("max_results must be at least 1".into()));
        }
        if self.matcher.trim().is_empty() {
            return Err(ConfigError::Invalid("matcher name is empty".into()));
        }
        Ok(())
    }

    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(self.logical_width, self.logical_height)
    }
}

use crate::catalog::{AllowedWidths, CatalogError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which count the number of runs is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunBasis {
    /// Only main-width rolls count towards the order
    #[default]
    MainOnly,
    /// Main and secondary rolls both count towards the order
    MainAndSecondary,
}

/// Named built-in catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPreset {
    Standard,
    WholeMm,
}

/// Catalog as written in a config file: a preset name or an explicit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawCatalogSetting")]
pub enum CatalogSetting {
    Preset(CatalogPreset),
    Widths(AllowedWidths),
}

/// Unvalidated form, so a bad list reports the catalog error instead of an
/// untagged-enum mismatch.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCatalogSetting {
    Preset(CatalogPreset),
    Widths(Vec<f64>),
}

impl TryFrom<RawCatalogSetting> for CatalogSetting {
    type Error = CatalogError;

    fn try_from(raw: RawCatalogSetting) -> Result<Self, Self::Error> {
        match raw {
            RawCatalogSetting::Preset(preset) => Ok(CatalogSetting::Preset(preset)),
            RawCatalogSetting::Widths(widths) => {
                AllowedWidths::new(widths).map(CatalogSetting::Widths)
            }
        }
    }
}

impl Default for CatalogSetting {
    fn default() -> Self {
        CatalogSetting::Preset(CatalogPreset::Standard)
    }
}

impl CatalogSetting {
    pub fn resolve(&self) -> AllowedWidths {
        match self {
            CatalogSetting::Preset(CatalogPreset::Standard) => AllowedWidths::standard(),
            CatalogSetting::Preset(CatalogPreset::WholeMm) => AllowedWidths::whole_mm(),
            CatalogSetting::Widths(widths) => widths.clone(),
        }
    }
}

/// Planner settings - catalog and behaviour flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub catalog: CatalogSetting,
    /// Model trimmed edges; when off the usable width is the material width
    #[serde(default = "default_edge_trim")]
    pub edge_trim: bool,
    #[serde(default)]
    pub run_basis: RunBasis,
}

fn default_edge_trim() -> bool {
    true
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSetting::default(),
            edge_trim: default_edge_trim(),
            run_basis: RunBasis::default(),
        }
    }
}

/// Error type for loading planner settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerConfig {
    pub fn with_catalog(mut self, catalog: AllowedWidths) -> Self {
        self.catalog = CatalogSetting::Widths(catalog);
        self
    }

    pub fn with_edge_trim(mut self, edge_trim: bool) -> Self {
        self.edge_trim = edge_trim;
        self
    }

    pub fn with_run_basis(mut self, run_basis: RunBasis) -> Self {
        self.run_basis = run_basis;
        self
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads a config file, YAML for `.yaml`/`.yml` and JSON otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }
}

use palette_core::OversizePolicy;
use serde::Deserialize;
use std::path::Path;

/// Default report endpoint of a local sigevent service
pub const DEFAULT_SIGEVENT_URL: &str = "http://localhost:8100/sigevent/events/create";

/// Application configuration loaded from an optional YAML file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Endpoint receiving summary and anomaly reports
    #[serde(default = "default_sigevent_url")]
    pub sigevent_url: String,

    /// Upper bound on a single report call
    #[serde(default = "default_report_timeout")]
    pub report_timeout_secs: u64,

    /// Upper bound on fetching a remote styling document
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Reporting host name; the system host name when unset
    #[serde(default)]
    pub host: Option<String>,

    /// Handling of styling documents with 256 or more entries
    #[serde(default)]
    pub oversize_policy: OversizeSetting,

    /// Raster introspection tool
    #[serde(default)]
    pub introspection: IntrospectionConfig,

    /// Fixed tags attached to every report
    #[serde(default)]
    pub tags: ReportTags,
}

fn default_sigevent_url() -> String {
    DEFAULT_SIGEVENT_URL.to_string()
}

fn default_report_timeout() -> u64 {
    10
}

fn default_fetch_timeout() -> u64 {
    30
}

/// Configurable form of [`OversizePolicy`]
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OversizeSetting {
    #[default]
    Keep,
    Truncate,
    Reject,
}

impl From<OversizeSetting> for OversizePolicy {
    fn from(setting: OversizeSetting) -> Self {
        match setting {
            OversizeSetting::Keep => OversizePolicy::Keep,
            OversizeSetting::Truncate => OversizePolicy::Truncate,
            OversizeSetting::Reject => OversizePolicy::Reject,
        }
    }
}

/// Command used to dump raster metadata including its color table
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IntrospectionConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the raster path
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_introspection_timeout")]
    pub timeout_secs: u64,
}

fn default_program() -> String {
    "gdalinfo".to_string()
}

fn default_introspection_timeout() -> u64 {
    60
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            timeout_secs: default_introspection_timeout(),
        }
    }
}

/// Source, format, category and provider fields of a report
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReportTags {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_provider")]
    pub provider: String,
}

fn default_source() -> String {
    "ONEARTH".to_string()
}

fn default_format() -> String {
    "TEXT".to_string()
}

fn default_category() -> String {
    "MRFGEN".to_string()
}

fn default_provider() -> String {
    "GIBS".to_string()
}

impl Default for ReportTags {
    fn default() -> Self {
        Self {
            source: default_source(),
            format: default_format(),
            category: default_category(),
            provider: default_provider(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        sigevent_url = %config.sigevent_url,
                        program = %config.introspection.program,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sigevent_url: default_sigevent_url(),
            report_timeout_secs: default_report_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
            host: None,
            oversize_policy: OversizeSetting::default(),
            introspection: IntrospectionConfig::default(),
            tags: ReportTags::default(),
        }
    }
}

//! Per-run context threaded explicitly through the pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where the styling document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylingSource {
    /// Local file, always absolute
    Path(PathBuf),
    /// Network location fetched over HTTP
    Url(String),
}

impl StylingSource {
    /// Classify `location`, resolving relative paths against the current
    /// directory.
    pub fn parse(location: &str) -> Self {
        let base = std::env::current_dir().unwrap_or_default();
        Self::parse_with_base(location, &base)
    }

    pub fn parse_with_base(location: &str, base: &Path) -> Self {
        if location.contains("://") {
            return StylingSource::Url(location.to_string());
        }
        let path = Path::new(location);
        if path.is_absolute() {
            StylingSource::Path(path.to_path_buf())
        } else {
            StylingSource::Path(base.join(path))
        }
    }
}

impl fmt::Display for StylingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylingSource::Path(path) => write!(f, "{}", path.display()),
            StylingSource::Url(url) => f.write_str(url),
        }
    }
}

/// Identity fields carried on every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Originating host
    pub host: String,
    /// Styling document identifier, when one is known
    pub document: Option<String>,
}

impl ReportContext {
    pub fn new(host: impl Into<String>, document: Option<String>) -> Self {
        Self {
            host: host.into(),
            document,
        }
    }
}

/// Everything a single validation run needs.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub styling: StylingSource,
    pub raster: PathBuf,
    /// Log every per-color match decision
    pub verbose: bool,
    pub report: ReportContext,
}

impl ExecutionContext {
    pub fn new(styling: StylingSource, raster: PathBuf, host: impl Into<String>) -> Self {
        let document = Some(styling.to_string());
        Self {
            styling,
            raster,
            verbose: false,
            report: ReportContext::new(host, document),
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

pub mod config;
pub mod context;

pub use config::{AppConfig, IntrospectionConfig, OversizeSetting, ReportTags, DEFAULT_SIGEVENT_URL};
pub use context::{ExecutionContext, ReportContext, StylingSource};

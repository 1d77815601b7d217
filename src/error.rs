use palette_core::{PaletteError, ParseColorError};
use thiserror::Error;

/// Failures of a validation run.
///
/// `ResourceUnavailable` and `MalformedDocument` are fatal. The pipeline
/// downgrades `IntrospectionFailure` to a warning with an empty rendered
/// palette, and `ReportDeliveryFailure` is only ever logged.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("Resource unavailable: {location}: {reason}")]
    ResourceUnavailable { location: String, reason: String },

    #[error("Malformed styling document {location}: {source}")]
    MalformedDocument {
        location: String,
        #[source]
        source: StylingError,
    },

    #[error("Introspection failure: {0}")]
    IntrospectionFailure(String),

    #[error("Report delivery failure: {0}")]
    ReportDeliveryFailure(String),
}

impl ValidateError {
    pub fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        ValidateError::ResourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the run must stop without reconciling.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ValidateError::ResourceUnavailable { .. } | ValidateError::MalformedDocument { .. }
        )
    }
}

/// Reasons a styling document cannot be turned into a palette.
#[derive(Debug, Error)]
pub enum StylingError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Entry {entry}: {source}")]
    Color {
        entry: u32,
        #[source]
        source: ParseColorError,
    },

    #[error("Entry {0} has neither an rgb nor a color attribute")]
    MissingColor(u32),

    #[error("Invalid opacity value: {0:?}")]
    InvalidOpacity(String),

    #[error("No ColorMap elements found")]
    NoColorMaps,

    #[error("Document ended with {0} unclosed element(s)")]
    Truncated(usize),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),
}

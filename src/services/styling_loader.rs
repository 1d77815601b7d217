//! Styling document → reference palette.
//!
//! Streams the colormap markup and walks it in document order, carrying
//! the current group default alpha forward explicitly instead of looking
//! it up from ancestors.

use std::borrow::Cow;
use std::time::Duration;

use palette_core::{
    opacity_to_alpha, parse_hex_rgb, parse_rgb_triplet, OversizePolicy, Palette, PaletteBuilder,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{StylingError, ValidateError};
use crate::models::StylingSource;

const OPAQUE: u8 = 255;

/// Loads a reference palette from a local or remote styling document
pub struct StylingPaletteLoader {
    client: reqwest::Client,
    policy: OversizePolicy,
}

impl StylingPaletteLoader {
    pub fn new(fetch_timeout: Duration, policy: OversizePolicy) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(fetch_timeout).build()?;
        Ok(Self { client, policy })
    }

    /// Read and parse the styling document at `source`.
    pub async fn load(&self, source: &StylingSource) -> Result<Palette, ValidateError> {
        let content = self.read(source).await?;
        let palette = parse_styling_document(&content, self.policy).map_err(|e| {
            ValidateError::MalformedDocument {
                location: source.to_string(),
                source: e,
            }
        })?;
        tracing::info!(
            document = %source,
            entries = palette.len(),
            "Loaded reference palette"
        );
        Ok(palette)
    }

    async fn read(&self, source: &StylingSource) -> Result<String, ValidateError> {
        match source {
            StylingSource::Path(path) => {
                tracing::info!(path = %path.display(), "Opening file");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| ValidateError::unavailable(path.display().to_string(), e))
            }
            StylingSource::Url(url) => {
                tracing::info!(%url, "Accessing URL");
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| ValidateError::unavailable(url.as_str(), e))?;
                response
                    .text()
                    .await
                    .map_err(|e| ValidateError::unavailable(url.as_str(), e))
            }
        }
    }
}

/// Parse colormap markup into a reference palette.
///
/// Recognized elements, matched by local name so `sld:` style prefixes are
/// ignored:
///
/// - `ColorMap`: a group. Entries outside any group are ignored.
/// - `Opacity`: text is a fraction that becomes the default alpha for every
///   later group until the next `Opacity`.
/// - `ColorMapEntry`: one palette entry with `rgb` or `color`, and optionally
///   `transparent` or `opacity`.
///
/// Indices run across groups in document order. The result is padded or
/// limited per `policy`.
pub fn parse_styling_document(
    xml: &str,
    policy: OversizePolicy,
) -> Result<Palette, StylingError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut walker = DocumentWalker::new();
    // quick-xml reports mismatched end tags but not elements left open at EOF
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                depth += 1;
                walker.handle_start(e, false)?
            }
            Event::Empty(ref e) => walker.handle_start(e, true)?,
            Event::Text(ref e) => walker.handle_text(&e.unescape()?),
            Event::CData(ref e) => walker.handle_text(&String::from_utf8_lossy(e)),
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                walker.handle_end(e.local_name().as_ref())?
            }
            Event::Eof if depth > 0 => return Err(StylingError::Truncated(depth)),
            Event::Eof => break,
            _ => {}
        }
    }

    walker.finish(policy)
}

/// Document-order walk state
struct DocumentWalker {
    builder: PaletteBuilder,
    default_alpha: u8,
    groups: usize,
    open_groups: usize,
    opacity_text: Option<String>,
}

impl DocumentWalker {
    fn new() -> Self {
        Self {
            builder: Palette::builder(),
            default_alpha: OPAQUE,
            groups: 0,
            open_groups: 0,
            opacity_text: None,
        }
    }

    fn handle_start(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<(), StylingError> {
        match e.local_name().as_ref() {
            b"ColorMap" => {
                self.groups += 1;
                if !empty {
                    self.open_groups += 1;
                }
                tracing::debug!(
                    group = self.groups,
                    default_alpha = self.default_alpha,
                    first_index = self.builder.len(),
                    "ColorMap group"
                );
            }
            b"ColorMapEntry" if self.open_groups > 0 => self.push_entry(e)?,
            b"Opacity" if !empty => self.opacity_text = Some(String::new()),
            _ => {}
        }
        Ok(())
    }

    fn handle_text(&mut self, text: &str) {
        if let Some(buf) = self.opacity_text.as_mut() {
            buf.push_str(text);
        }
    }

    fn handle_end(&mut self, name: &[u8]) -> Result<(), StylingError> {
        match name {
            b"ColorMap" => self.open_groups = self.open_groups.saturating_sub(1),
            b"Opacity" => {
                if let Some(raw) = self.opacity_text.take() {
                    self.default_alpha = parse_opacity(&raw)?;
                    tracing::debug!(default_alpha = self.default_alpha, "Group opacity");
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn push_entry(&mut self, e: &BytesStart<'_>) -> Result<(), StylingError> {
        let entry = self.builder.len() as u32;
        let attrs = EntryAttributes::read(e)?;

        let (r, g, b) = attrs
            .color_channels()
            .ok_or(StylingError::MissingColor(entry))?
            .map_err(|source| StylingError::Color { entry, source })?;
        let a = attrs.alpha(self.default_alpha)?;

        self.builder.push_rgba(r, g, b, a);
        Ok(())
    }

    fn finish(self, policy: OversizePolicy) -> Result<Palette, StylingError> {
        if self.groups == 0 {
            return Err(StylingError::NoColorMaps);
        }
        let raw_entries = self.builder.len();
        let palette = self.builder.finish_reference(policy)?;
        tracing::debug!(
            groups = self.groups,
            raw_entries,
            entries = palette.len(),
            "Parsed styling document"
        );
        Ok(palette)
    }
}

/// The attributes of one `ColorMapEntry` that affect its color
#[derive(Debug, Default)]
struct EntryAttributes {
    rgb: Option<String>,
    color: Option<String>,
    transparent: Option<String>,
    opacity: Option<String>,
}

impl EntryAttributes {
    fn read(e: &BytesStart<'_>) -> Result<Self, StylingError> {
        let mut attrs = Self::default();
        for attr in e.attributes() {
            let attr = attr?;
            let slot = match attr.key.local_name().as_ref() {
                b"rgb" => &mut attrs.rgb,
                b"color" => &mut attrs.color,
                b"transparent" => &mut attrs.transparent,
                b"opacity" => &mut attrs.opacity,
                _ => continue,
            };
            let value: Cow<'_, str> = attr.unescape_value()?;
            *slot = Some(value.into_owned());
        }
        Ok(attrs)
    }

    /// `rgb` triplet first, then hex `color`; `None` if neither is present
    fn color_channels(&self) -> Option<Result<(u8, u8, u8), palette_core::ParseColorError>> {
        if let Some(rgb) = self.rgb.as_deref() {
            return Some(parse_rgb_triplet(rgb));
        }
        self.color.as_deref().map(parse_hex_rgb)
    }

    /// Transparency flag first, then entry opacity, then the group default
    fn alpha(&self, group_default: u8) -> Result<u8, StylingError> {
        if let Some(flag) = self.transparent.as_deref() {
            return Ok(if flag == "true" { 0 } else { OPAQUE });
        }
        if let Some(raw) = self.opacity.as_deref() {
            return parse_opacity(raw);
        }
        Ok(group_default)
    }
}

fn parse_opacity(raw: &str) -> Result<u8, StylingError> {
    let invalid = || StylingError::InvalidOpacity(raw.to_string());
    let fraction: f64 = raw.trim().parse().map_err(|_| invalid())?;
    opacity_to_alpha(fraction).map_err(|_| invalid())
}

//! Rendered raster → rendered palette, via an external introspection tool.

use std::path::Path;
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;

use palette_core::Palette;
use regex::Regex;
use tokio::process::Command;

use crate::error::ValidateError;
use crate::models::IntrospectionConfig;

/// Substring announcing the color-table section of the tool's output
pub const COLOR_TABLE_MARKER: &str = "Color Table";

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+):\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*(\d+)\s*)?$")
            .expect("static regex")
    })
}

/// Parse the text dump of a raster into its palette.
///
/// Returns `None` when no line contains [`COLOR_TABLE_MARKER`]. After the
/// marker, every line of the form `<index>: r,g,b[,a]` whose index is the
/// next expected one becomes an entry; alpha defaults to 255. Other lines,
/// including out-of-sequence entries, are skipped.
pub fn parse_color_table(output: &str) -> Option<Palette> {
    let mut lines = output.lines();
    lines.by_ref().find(|line| line.contains(COLOR_TABLE_MARKER))?;

    let mut builder = Palette::builder();
    for line in lines {
        let Some(caps) = entry_pattern().captures(line) else {
            continue;
        };
        let channel = |i: usize| caps.get(i).map(|m| m.as_str().parse::<u8>());
        let index = caps[1].parse::<usize>().ok();
        if index != Some(builder.len()) {
            tracing::debug!(line, expected = builder.len(), "Skipping out-of-sequence entry");
            continue;
        }
        match (channel(2), channel(3), channel(4), channel(5)) {
            (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => {
                builder.push_rgba(r, g, b, 255);
            }
            (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), Some(Ok(a))) => {
                builder.push_rgba(r, g, b, a);
            }
            _ => tracing::debug!(line, "Skipping entry with out-of-range channel"),
        }
    }
    Some(builder.finish())
}

/// Runs the introspection tool and parses its color table
pub struct RenderedPaletteReader {
    tool: IntrospectionConfig,
}

impl RenderedPaletteReader {
    pub fn new(tool: IntrospectionConfig) -> Self {
        Self { tool }
    }

    /// Read the embedded palette of `raster`.
    ///
    /// # Errors
    ///
    /// - [`ValidateError::ResourceUnavailable`] if the tool cannot be started
    ///   or reports that it cannot open the raster.
    /// - [`ValidateError::IntrospectionFailure`] if the tool times out or its
    ///   output has no color table. Callers treat this as a warning.
    pub async fn read(&self, raster: &Path) -> Result<Palette, ValidateError> {
        tracing::info!(raster = %raster.display(), "Checking for color table");
        let output = self.run_tool(raster).await?;

        parse_color_table(&output).ok_or_else(|| {
            ValidateError::IntrospectionFailure("No color table found".to_string())
        })
    }

    async fn run_tool(&self, raster: &Path) -> Result<String, ValidateError> {
        let location = raster.display().to_string();
        let mut command = Command::new(&self.tool.program);
        command
            .args(&self.tool.args)
            .arg(raster)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            program = %self.tool.program,
            args = ?self.tool.args,
            raster = %location,
            "Running introspection tool"
        );

        let timeout = Duration::from_secs(self.tool.timeout_secs);
        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ValidateError::unavailable(
                    location,
                    format!("failed to run {}: {}", self.tool.program, e),
                ))
            }
            Err(_) => {
                return Err(ValidateError::IntrospectionFailure(format!(
                    "{} timed out after {}s",
                    self.tool.program, self.tool.timeout_secs
                )))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ValidateError::unavailable(
                location,
                format!("{} exited with {}: {}", self.tool.program, output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

//! One validation run: load the reference palette, read the rendered one,
//! reconcile them and report the outcome.

use std::sync::Arc;
use std::time::Duration;

use palette_core::{reconcile, Palette, Reconciliation, Severity, Signature};

use crate::error::ValidateError;
use crate::models::{AppConfig, ExecutionContext};
use crate::services::{RenderedPaletteReader, ReportEmitter, StylingPaletteLoader};

/// Validation run that orchestrates load → read → reconcile → report
pub struct ValidationPipeline {
    loader: StylingPaletteLoader,
    reader: RenderedPaletteReader,
    emitter: Arc<dyn ReportEmitter>,
}

impl ValidationPipeline {
    pub fn new(
        loader: StylingPaletteLoader,
        reader: RenderedPaletteReader,
        emitter: Arc<dyn ReportEmitter>,
    ) -> Self {
        Self {
            loader,
            reader,
            emitter,
        }
    }

    pub fn from_config(
        config: &AppConfig,
        emitter: Arc<dyn ReportEmitter>,
    ) -> Result<Self, reqwest::Error> {
        let loader = StylingPaletteLoader::new(
            Duration::from_secs(config.fetch_timeout_secs),
            config.oversize_policy.into(),
        )?;
        let reader = RenderedPaletteReader::new(config.introspection.clone());
        Ok(Self::new(loader, reader, emitter))
    }

    /// Validate the raster in `ctx` against its styling document.
    ///
    /// A missing color table is reported as a warning and reconciled as an
    /// empty rendered palette. Unreadable or malformed inputs are reported
    /// and returned as errors before any reconciliation.
    pub async fn run(&self, ctx: &ExecutionContext) -> Result<Reconciliation, ValidateError> {
        if ctx.verbose {
            tracing::info!(colormap = %ctx.styling, input = %ctx.raster.display(), "Validating palette");
        }

        let reference = match self.loader.load(&ctx.styling).await {
            Ok(palette) => palette,
            Err(e) => return Err(self.abort(e, ctx).await),
        };

        let rendered = match self.reader.read(&ctx.raster).await {
            Ok(palette) => palette,
            Err(ValidateError::IntrospectionFailure(reason)) => {
                self.emitter.emit(Severity::Warn, &reason, &ctx.report).await;
                Palette::empty()
            }
            Err(e) => return Err(self.abort(e, ctx).await),
        };

        let result = reconcile(&reference, &rendered);
        log_details(&result, ctx.verbose);

        self.emitter
            .emit(result.severity(), &result.summary(), &ctx.report)
            .await;
        Ok(result)
    }

    async fn abort(&self, error: ValidateError, ctx: &ExecutionContext) -> ValidateError {
        let message = format!("{}  Exiting.", error);
        self.emitter.emit(Severity::Error, &message, &ctx.report).await;
        error
    }
}

fn log_details(result: &Reconciliation, verbose: bool) {
    if verbose {
        for (signature, matched) in result.outcomes() {
            if matched {
                tracing::info!("Found matching color {}", signature);
            } else {
                tracing::info!("No match for color {}", signature);
            }
        }
        tracing::info!(
            count = result.matched.len(),
            "Matched colors:\n{}",
            join(&result.matched)
        );
    }
    if !result.reference_only.is_empty() {
        tracing::info!(
            count = result.reference_only.len(),
            "Colors found only in colormap:\n{}",
            join(&result.reference_only)
        );
    }
    if !result.rendered_only.is_empty() {
        tracing::info!(
            count = result.rendered_only.len(),
            "Colors found only in image:\n{}",
            join(&result.rendered_only)
        );
    }
}

fn join(signatures: &[Signature]) -> String {
    signatures
        .iter()
        .map(Signature::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_signatures() {
        let joined = join(&[Signature::new(0, 1, 2, 3, 4), Signature::new(1, 5, 6, 7, 8)]);
        assert_eq!(joined, "0: 1,2,3,4\n1: 5,6,7,8");
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join(&[]), "");
    }
}

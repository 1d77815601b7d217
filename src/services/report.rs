//! Operator-facing reports.
//!
//! Delivery is fire-and-forget: an emitter never returns an error, and a
//! failed delivery is only logged locally so the validation result stays
//! unaffected.

use std::time::Duration;

use async_trait::async_trait;
use palette_core::Severity;
use tokio::sync::Mutex;

use crate::error::ValidateError;
use crate::models::{ReportContext, ReportTags};

/// Longest description a report may carry, ellipsis included
pub const MAX_MESSAGE_CHARS: usize = 256;

const ELLIPSIS: &str = "...";

/// Limit `message` to [`MAX_MESSAGE_CHARS`] characters, replacing the tail
/// with `...` when it is longer.
pub fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return message.to_string();
    }
    let keep = MAX_MESSAGE_CHARS - ELLIPSIS.len();
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Host name of this machine, `localhost` if it cannot be determined
pub fn system_hostname() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}

fn log_locally(severity: Severity, message: &str) {
    match severity {
        Severity::Info => tracing::info!(%severity, "{}", message),
        Severity::Warn => tracing::warn!(%severity, "{}", message),
        Severity::Error => tracing::error!(%severity, "{}", message),
    }
}

/// Sink for summary and anomaly notifications
#[async_trait]
pub trait ReportEmitter: Send + Sync {
    /// Send a report. Never fails; delivery problems are logged.
    async fn emit(&self, severity: Severity, message: &str, ctx: &ReportContext);
}

/// Emits reports to a sigevent-style HTTP endpoint as query parameters
pub struct SigeventEmitter {
    client: reqwest::Client,
    endpoint: String,
    tags: ReportTags,
}

impl SigeventEmitter {
    pub fn new(endpoint: &str, tags: ReportTags, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: normalize_endpoint(endpoint),
            tags,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn deliver(
        &self,
        severity: Severity,
        description: &str,
        ctx: &ReportContext,
    ) -> Result<(), ValidateError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("type", severity.as_str()),
            ("description", description),
            ("computer", ctx.host.as_str()),
            ("source", self.tags.source.as_str()),
            ("format", self.tags.format.as_str()),
            ("category", self.tags.category.as_str()),
            ("provider", self.tags.provider.as_str()),
        ];
        if let Some(document) = ctx.document.as_deref() {
            params.push(("data", document));
        }

        self.client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ValidateError::ReportDeliveryFailure(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ReportEmitter for SigeventEmitter {
    async fn emit(&self, severity: Severity, message: &str, ctx: &ReportContext) {
        let description = truncate_message(message);
        log_locally(severity, &description);

        if let Err(e) = self.deliver(severity, &description, ctx).await {
            tracing::warn!(%e, endpoint = %self.endpoint, "Sigevent service is unavailable");
        }
    }
}

/// Strip a trailing `/`, then `?`, then `/` again; the query string is
/// appended by the client.
fn normalize_endpoint(url: &str) -> String {
    let url = url.strip_suffix('/').unwrap_or(url);
    let url = url.strip_suffix('?').unwrap_or(url);
    let url = url.strip_suffix('/').unwrap_or(url);
    url.to_string()
}

/// Logs reports locally and sends nothing
#[derive(Debug, Default)]
pub struct NullEmitter;

#[async_trait]
impl ReportEmitter for NullEmitter {
    async fn emit(&self, severity: Severity, message: &str, _ctx: &ReportContext) {
        log_locally(severity, &truncate_message(message));
    }
}

/// A report as seen by [`MemoryEmitter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEvent {
    pub severity: Severity,
    pub message: String,
    pub context: ReportContext,
}

/// In-memory emitter that records every report
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl ReportEmitter for MemoryEmitter {
    async fn emit(&self, severity: Severity, message: &str, ctx: &ReportContext) {
        let message = truncate_message(message);
        log_locally(severity, &message);
        self.events.lock().await.push(ReportEvent {
            severity,
            message,
            context: ctx.clone(),
        });
    }
}

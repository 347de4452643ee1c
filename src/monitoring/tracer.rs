/*!
 * Structured Tracing
 * Subscriber setup and per-operation spans for store calls
 *
 * Features:
 * - JSON-formatted logs for structured parsing
 * - One span per store operation with the path it addressed
 * - Slow-operation warnings with measured duration
 */

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::core::limits::SLOW_OPERATION_THRESHOLD_MS;

/// Environment variable switching the subscriber to JSON output
pub const TRACE_JSON_ENV: &str = "MEMFS_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - MEMFS_TRACE_JSON: Enable JSON output (default: false)
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "Structured tracing initialized");
    }
    installed
}

/// Span guard covering one store operation
///
/// Records the elapsed time when dropped and flags slow calls.
pub struct OperationSpan {
    span: tracing::Span,
    start: Instant,
    operation: &'static str,
}

impl OperationSpan {
    pub fn new(operation: &'static str, path: &Path) -> Self {
        let span = span!(
            Level::DEBUG,
            "vfs_op",
            operation = operation,
            path = %path.display(),
            duration_us = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            operation,
        }
    }

    /// Record the operation result
    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration.as_millis() > SLOW_OPERATION_THRESHOLD_MS {
            self.span.record("duration_ms", duration.as_millis() as u64);
            warn!(
                operation = self.operation,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow vfs operation detected"
            );
        } else {
            self.span.record("duration_us", duration.as_micros() as u64);
            debug!(
                operation = self.operation,
                duration_us = duration.as_micros() as u64,
                "vfs operation completed"
            );
        }
    }
}

/// Helper to open a span for a path-addressed store operation
#[inline]
pub fn span_vfs(operation: &'static str, path: &Path) -> OperationSpan {
    OperationSpan::new(operation, path)
}

//! Simple metrics module for the quiz conversion service
//!
//! This module provides a straightforward API for recording metrics using
//! the standard Prometheus naming conventions. Each phase owns its recording
//! functions in a dedicated submodule.

use std::fmt;
use std::sync::Once;

use once_cell::sync::OnceCell;
use tracing::{info, warn};

/// Enum representing all metric names used in the system
/// This eliminates magic strings and provides compile-time safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Backend metrics
    BackendRequestsSuccess,
    BackendRequestsError,
    BackendRequestDuration,

    // Pipeline metrics
    PipelineLinesSkipped,
    PipelineRecordsAccepted,
    PipelineRepliesEmpty,

    // Store metrics
    StoreWritesSuccess,
    StoreWritesError,
}

impl MetricName {
    /// Get the metric name as a string (convenience method)
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::BackendRequestsSuccess => "quizsmith_backend_requests_success_total",
            MetricName::BackendRequestsError => "quizsmith_backend_requests_error_total",
            MetricName::BackendRequestDuration => "quizsmith_backend_request_duration_seconds",
            MetricName::PipelineLinesSkipped => "quizsmith_pipeline_lines_skipped_total",
            MetricName::PipelineRecordsAccepted => "quizsmith_pipeline_records_accepted_total",
            MetricName::PipelineRepliesEmpty => "quizsmith_pipeline_replies_empty_total",
            MetricName::StoreWritesSuccess => "quizsmith_store_writes_success_total",
            MetricName::StoreWritesError => "quizsmith_store_writes_error_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static INIT: Once = Once::new();
static HANDLE: OnceCell<metrics_exporter_prometheus::PrometheusHandle> = OnceCell::new();

/// Initialize the global metrics infrastructure
///
/// Idempotent. Installs a Prometheus recorder, with an HTTP exporter only
/// when QUIZSMITH_METRICS_ADDR is set.
pub fn init_metrics() {
    INIT.call_once(|| {
        let mut builder = metrics_exporter_prometheus::PrometheusBuilder::new();

        if let Ok(addr_str) = std::env::var("QUIZSMITH_METRICS_ADDR") {
            match addr_str.parse::<std::net::SocketAddr>() {
                Ok(addr) => {
                    builder = builder.with_http_listener(addr);
                    info!("Prometheus exporter listening at http://{}/metrics", addr);
                }
                Err(_) => {
                    warn!(
                        "Invalid QUIZSMITH_METRICS_ADDR '{}', exporter disabled",
                        addr_str
                    );
                }
            }
        }

        match builder.install_recorder() {
            Ok(handle) => {
                HANDLE.set(handle).ok();
            }
            Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
        }
    });
}

/// Renders the current metrics in Prometheus text format, when the recorder
/// is installed.
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Backend Metrics
// ============================================================================

pub mod backend {
    use super::MetricName;

    /// Record a successful backend call
    pub fn request_success() {
        ::metrics::counter!(MetricName::BackendRequestsSuccess.as_str()).increment(1);
    }

    /// Record a failed backend call
    pub fn request_error() {
        ::metrics::counter!(MetricName::BackendRequestsError.as_str()).increment(1);
    }

    /// Record backend request duration
    pub fn request_duration(secs: f64) {
        ::metrics::histogram!(MetricName::BackendRequestDuration.as_str()).record(secs);
    }
}

// ============================================================================
// Pipeline Metrics
// ============================================================================

pub mod pipeline {
    use super::MetricName;

    /// Record one skipped line, labeled by reject reason
    pub fn line_skipped(reason: &'static str) {
        ::metrics::counter!(MetricName::PipelineLinesSkipped.as_str(), "reason" => reason)
            .increment(1);
    }

    /// Record accepted records for one reply
    pub fn records_accepted(count: u64) {
        ::metrics::counter!(MetricName::PipelineRecordsAccepted.as_str()).increment(count);
    }

    /// Record a reply that produced no records at all
    pub fn reply_empty() {
        ::metrics::counter!(MetricName::PipelineRepliesEmpty.as_str()).increment(1);
    }
}

// ============================================================================
// Store Metrics
// ============================================================================

pub mod store {
    use super::MetricName;

    /// Record a successful quiz write
    pub fn write_success() {
        ::metrics::counter!(MetricName::StoreWritesSuccess.as_str()).increment(1);
    }

    /// Record a failed quiz write
    pub fn write_error() {
        ::metrics::counter!(MetricName::StoreWritesError.as_str()).increment(1);
    }
}

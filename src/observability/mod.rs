// Observability: metrics recording for the backend, pipeline and storage phases.

pub mod metrics;

pub use metrics::init_metrics;

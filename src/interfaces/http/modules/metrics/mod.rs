//! Prometheus endpoint and request metrics

pub mod handlers;
pub mod middleware;

pub use handlers::{describe_metrics, prometheus_metrics, MetricsState};
pub use middleware::http_metrics_middleware;

//! Prometheus scrape endpoint

use axum::{extract::State, http::header, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register descriptions for the service's metrics.
///
/// Must run after the recorder is installed; descriptions sent earlier are lost.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "toll_calculations_total",
        "Toll requests by outcome (charged, exempt, rejected, failed)"
    );
    metrics::describe_histogram!("toll_fee_amount", "Daily fee charged per successful request");
    metrics::describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        metrics::Unit::Seconds,
        "HTTP request latency by method and route"
    );
}

/// `GET /metrics`
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}

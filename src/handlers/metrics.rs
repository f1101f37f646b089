//! Prometheus metrics endpoint

use axum::extract::State;
use std::sync::Arc;

use crate::middleware::AppState;

/// Render collected metrics in the Prometheus text exposition format.
/// Request counters and latency histograms come from the tracking
/// middleware; pool and uptime gauges are refreshed on each scrape.
pub async fn metrics_export(State(state): State<Arc<AppState>>) -> String {
    crate::db::record_pool_metrics(&state.db);
    metrics::gauge!("process_uptime_seconds").set(crate::handlers::health::get_uptime() as f64);

    state.metrics_handle.render()
}

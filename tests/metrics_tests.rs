//! Metrics recorder tests

mod common;

#[tokio::test]
async fn test_recorded_metrics_render_in_prometheus_format() {
    let handle = common::metrics_handle();

    metrics::counter!("http_requests_total", "method" => "GET", "status" => "200").increment(1);
    metrics::histogram!("http_request_duration_seconds").record(0.02);

    let rendered = handle.render();
    assert!(rendered.contains("http_requests_total"));
    // Configured buckets make the duration metric a real histogram
    assert!(rendered.contains("http_request_duration_seconds_bucket"));
}

//! Request metrics exposed at `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use once_cell::sync::Lazy;

/// Middleware handle; a single instance shared by the server and tests.
pub static METRICS: Lazy<PrometheusMetrics> = Lazy::new(|| {
    PrometheusMetricsBuilder::new("gamedex")
        .endpoint("/metrics")
        .build()
        .expect("metrics builder")
});

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

pub const COLLECT_BATCHES_TOTAL: &str = "collect_batches_total";
pub const COLLECT_SOURCES_FAILED_TOTAL: &str = "collect_sources_failed_total";
pub const COLLECT_RESULTS_CREATED_TOTAL: &str = "collect_results_created_total";
pub const COLLECT_DURATION_SECONDS: &str = "collect_duration_seconds";

/// 启动 Prometheus 导出器并注册采集指标
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics listen address {}: {}", settings.listen, e);
            return;
        }
    };

    // 端口被占用时只告警，不影响主服务
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_counter!(COLLECT_BATCHES_TOTAL, "Collect batches by terminal status");
    describe_counter!(
        COLLECT_SOURCES_FAILED_TOTAL,
        "Sources that failed during collection"
    );
    describe_counter!(
        COLLECT_RESULTS_CREATED_TOTAL,
        "Collect result rows written"
    );
    describe_histogram!(
        COLLECT_DURATION_SECONDS,
        Unit::Seconds,
        "Wall time of a collect execution"
    );

    info!("Metrics exporter listening on {}", addr);
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use anyhow::Context;
use contentdesk::config::settings::Settings;
use contentdesk::domain::services::hotlist_provider::HotlistProvider;
use contentdesk::infrastructure::database::connection;
use contentdesk::infrastructure::hotlist::tophub_client::TophubClient;
use contentdesk::infrastructure::metrics;
use contentdesk::presentation::routes::{self, AppServices};
use contentdesk::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 加载配置、连接数据库并执行迁移，然后启动 HTTP 服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(settings.logging.json);
    info!("Starting contentdesk...");
    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and run migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);

    // 4. Hotlist provider
    let provider: Arc<dyn HotlistProvider> = Arc::new(TophubClient::new(&settings.hotlist)?);
    info!(base_url = %settings.hotlist.base_url, "Hotlist client initialized");

    // 5. Start HTTP server
    let app = routes::routes(AppServices::new(db, provider));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Router;
use axum_test::TestServer;
use contentdesk::config::settings::{DatabaseSettings, HotlistSettings};
use contentdesk::domain::services::hotlist_provider::HotlistProvider;
use contentdesk::infrastructure::database::connection;
use contentdesk::infrastructure::hotlist::TophubClient;
use contentdesk::presentation::routes::{self, AppServices};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HOTLIST_KEY: &str = "test-hotlist-key";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub router: Router,
    pub db: Arc<DatabaseConnection>,
    pub hotlist: MockServer,
}

/// 基于内存 SQLite 与模拟热榜服务创建完整应用
///
/// 内存数据库只存在于单个连接中，因此连接池固定为 1 个连接
pub async fn create_test_app() -> TestApp {
    let hotlist = MockServer::start().await;

    let db_settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
    };
    let db = Arc::new(
        connection::connect_and_migrate(&db_settings)
            .await
            .expect("Failed to prepare test database"),
    );

    let hotlist_settings = HotlistSettings {
        api_key: HOTLIST_KEY.to_string(),
        base_url: hotlist.uri(),
        timeout_secs: 5,
        ping_timeout_secs: 2,
    };
    let provider: Arc<dyn HotlistProvider> =
        Arc::new(TophubClient::new(&hotlist_settings).expect("Failed to build hotlist client"));

    let router = routes::routes(AppServices::new(db.clone(), provider));
    let server = TestServer::new(router.clone()).expect("Failed to start test server");

    TestApp {
        server,
        router,
        db,
        hotlist,
    }
}

/// 在随机端口上启动真实 HTTP 服务，返回接口前缀
#[allow(dead_code)]
pub async fn spawn_http(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// 为热榜节点挂载固定条目
pub async fn mount_node(hotlist: &MockServer, hashid: &str, titles: &[&str]) {
    let items: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "title": title,
                "url": format!("https://example.com/{}/{}", hashid, i),
                "extra": format!("{} 万热度", (i + 1) * 10)
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/nodes/{}", hashid)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"hashid": hashid, "name": "测试榜单", "items": items}
        })))
        .mount(hotlist)
        .await;
}

/// 创建采集源，返回其 id
pub async fn create_source(app: &TestApp, name: &str, hash_id: &str) -> String {
    let response = app
        .server
        .post("/api/collect/sources")
        .json(&json!({
            "name": name,
            "platform": "微博",
            "hashId": hash_id
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["data"]["id"].as_str().unwrap().to_string()
}

/// 执行一次全量采集，返回响应体
pub async fn execute_collect(app: &TestApp, source_ids: &[&str]) -> Value {
    let response = app
        .server
        .post("/api/collect/execute")
        .json(&json!({
            "sourceIds": source_ids,
            "collectType": "full"
        }))
        .await;
    response.assert_status_ok();
    response.json()
}

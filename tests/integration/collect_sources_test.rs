// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_source, create_test_app, execute_collect, mount_node};
use axum::http::StatusCode;
use serde_json::{json, Value};

/// 测试采集源创建与重复检测
#[tokio::test]
async fn test_create_source_rejects_duplicates() {
    let app = create_test_app().await;
    create_source(&app, "微博热搜", "KqndgxeLl9").await;

    let response = app
        .server
        .post("/api/collect/sources")
        .json(&json!({"name": "微博热搜", "platform": "微博", "hashId": "KqndgxeLl9"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "该采集源已存在，请检查名称或HashId");

    let response = app
        .server
        .post("/api/collect/sources")
        .json(&json!({"name": "知乎热榜", "platform": "知乎", "hashId": "bad"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = app.server.get("/api/collect/sources").await.json();
    let sources = body["data"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["userCreated"], true);
    assert_eq!(sources[0]["isActive"], true);
}

/// 测试通过查询参数更新采集源
#[tokio::test]
async fn test_update_source_by_query_id() {
    let app = create_test_app().await;
    let id = create_source(&app, "微博热搜", "KqndgxeLl9").await;

    let response = app
        .server
        .put("/api/collect/sources")
        .add_query_param("id", &id)
        .json(&json!({"isActive": false}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["isActive"], false);
    assert_eq!(body["message"], "采集源更新成功");

    let response = app
        .server
        .put("/api/collect/sources")
        .json(&json!({"isActive": true}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = app
        .server
        .get("/api/collect/sources")
        .add_query_param("isActive", true)
        .await
        .json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

/// 测试存在关联数据时阻止删除，并支持级联删除
#[tokio::test]
async fn test_delete_source_with_results_requires_cascade() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一"]).await;
    let id = create_source(&app, "微博热搜", "KqndgxeLl9").await;
    let other = create_source(&app, "知乎热榜", "mproPpoq6O").await;
    mount_node(&app.hotlist, "mproPpoq6O", &["热点二"]).await;
    let body = execute_collect(&app, &[&id, &other]).await;
    let batch_id = body["data"]["batchId"].as_str().unwrap().to_string();

    let response = app
        .server
        .delete("/api/collect/sources")
        .add_query_param("id", &id)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["details"]["code"], "HAS_RELATED_DATA");
    assert_eq!(body["details"]["details"]["resultsCount"], 1);
    assert_eq!(body["details"]["details"]["batchesCount"], 1);
    assert_eq!(body["details"]["details"]["hasResults"], true);

    let response = app
        .server
        .delete("/api/collect/sources")
        .add_query_param("id", &id)
        .add_query_param("cascade", true)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "采集源及相关数据删除成功");
    assert_eq!(body["data"]["resultsDeleted"], 1);

    let body: Value = app.server.get("/api/collect/results").await.json();
    let remaining = body["data"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["sourceId"], other.as_str());

    let body: Value = app.server.get("/api/collect/batches").await.json();
    let batch = &body["data"][0];
    assert_eq!(batch["id"], batch_id.as_str());
    assert_eq!(batch["sourceIds"], json!([other]));

    let body: Value = app.server.get("/api/collect/sources").await.json();
    let sources = body["data"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["id"], other.as_str());
}

/// 测试删除未被引用的采集源
#[tokio::test]
async fn test_delete_unreferenced_source() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一"]).await;
    let busy = create_source(&app, "微博热搜", "KqndgxeLl9").await;
    execute_collect(&app, &[&busy]).await;
    execute_collect(&app, &[&busy]).await;
    let id = create_source(&app, "知乎热榜", "mproPpoq6O").await;

    let response = app
        .server
        .delete("/api/collect/sources")
        .add_query_param("id", &id)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "采集源删除成功");

    let response = app
        .server
        .delete("/api/collect/sources")
        .add_query_param("id", &id)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .delete("/api/collect/sources")
        .add_query_param("id", &busy)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["details"]["details"]["batchesCount"], 2);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_source, create_test_app, execute_collect, mount_node, HOTLIST_KEY};
use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// 测试所有采集源都无效时批次为 failed
#[tokio::test]
async fn test_execute_with_only_invalid_sources_fails_batch() {
    let app = create_test_app().await;
    let missing = uuid::Uuid::new_v4().to_string();

    let body = execute_collect(&app, &[&missing]).await;
    assert_eq!(body["data"]["success"], false);
    assert_eq!(body["data"]["collected"], 0);
    assert_eq!(body["data"]["failed"], 1);
    assert_eq!(body["data"]["errors"].as_array().unwrap().len(), 1);

    let body: Value = app.server.get("/api/collect/batches").await.json();
    let batches = body["data"].as_array().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0]["status"], "failed");
    assert!(batches[0]["name"]
        .as_str()
        .unwrap()
        .starts_with("一键采集任务_"));
}

/// 测试部分采集源失败时批次仍为 completed
#[tokio::test]
async fn test_execute_partial_success_completes_batch() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一", "热点二", "热点三"]).await;
    Mock::given(method("GET"))
        .and(path("/nodes/mproPpoq6O"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.hotlist)
        .await;

    let weibo = create_source(&app, "微博热搜", "KqndgxeLl9").await;
    let zhihu = create_source(&app, "知乎热榜", "mproPpoq6O").await;

    let response = app
        .server
        .post("/api/collect/execute")
        .json(&json!({
            "sourceIds": [weibo, zhihu],
            "collectType": "full",
            "name": "早间采集",
            "limit": 2
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "采集完成！成功采集 2 篇文章");
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["collected"], 2);
    assert_eq!(body["data"]["failed"], 1);
    let batch_id = body["data"]["batchId"].as_str().unwrap().to_string();

    let body: Value = app.server.get("/api/collect/batches").await.json();
    let batch = &body["data"][0];
    assert_eq!(batch["id"], batch_id.as_str());
    assert_eq!(batch["name"], "早间采集");
    assert_eq!(batch["status"], "completed");
    assert_eq!(batch["successCount"], 2);
    assert_eq!(batch["errorCount"], 1);

    let body: Value = app
        .server
        .get("/api/collect/results")
        .add_query_param("batchId", &batch_id)
        .await
        .json();
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    let mut read_counts: Vec<i64> = results
        .iter()
        .map(|r| r["readCount"].as_i64().unwrap())
        .collect();
    read_counts.sort();
    assert_eq!(read_counts, vec![100000, 200000]);
    assert_eq!(body["pagination"]["hasMore"], false);
}

/// 测试关键词采集必须提供关键词
#[tokio::test]
async fn test_keyword_collect_requires_keyword() {
    let app = create_test_app().await;
    let id = create_source(&app, "微博热搜", "KqndgxeLl9").await;

    let response = app
        .server
        .post("/api/collect/execute")
        .json(&json!({"sourceIds": [id], "collectType": "keyword", "keyword": "  "}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "关键词采集时必须提供关键词");

    let response = app
        .server
        .post("/api/collect/execute")
        .json(&json!({"sourceIds": [], "collectType": "full"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// 测试关键词采集调用搜索接口
#[tokio::test]
async fn test_keyword_collect_uses_search() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "人工智能"))
        .and(query_param("hashid", "KqndgxeLl9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"items": [{"title": "人工智能新进展", "url": "https://example.com/ai"}]}
        })))
        .expect(1)
        .mount(&app.hotlist)
        .await;
    let id = create_source(&app, "微博热搜", "KqndgxeLl9").await;

    let response = app
        .server
        .post("/api/collect/execute")
        .json(&json!({"sourceIds": [id], "collectType": "keyword", "keyword": "人工智能"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["collected"], 1);
    assert_eq!(body["data"]["results"][0]["keyword"], "人工智能");
}

/// 测试勾选结果并加入素材库，重复加入会被跳过
#[tokio::test]
async fn test_selection_and_add_to_materials() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一", "热点二"]).await;
    let source = create_source(&app, "微博热搜", "KqndgxeLl9").await;
    let body = execute_collect(&app, &[&source]).await;
    let ids: Vec<String> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();

    let response = app
        .server
        .put("/api/collect/results")
        .json(&json!({"ids": [ids[0]], "isSelected": true}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["updatedCount"], 1);

    let body: Value = app
        .server
        .get("/api/collect/results")
        .add_query_param("onlySelected", true)
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .server
        .post("/api/collect/add-to-materials")
        .json(&json!({"resultIds": ids}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["added"], 2);
    assert_eq!(body["data"]["skipped"], 0);

    let response = app
        .server
        .post("/api/collect/add-to-materials")
        .json(&json!({"resultIds": ids}))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["added"], 0);
    assert_eq!(body["data"]["skipped"], 2);

    let body: Value = app.server.get("/api/materials").await.json();
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["data"][0]["status"], "pending");
    assert_eq!(body["data"][0]["source"], "微博热搜");

    let response = app
        .server
        .delete("/api/collect/results")
        .json(&json!({"ids": ids}))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["deletedCount"], 2);
}

/// 测试素材库已有相同标题与链接的结果不会重复加入
#[tokio::test]
async fn test_add_to_materials_skips_existing_articles() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一", "热点二"]).await;
    let source = create_source(&app, "微博热搜", "KqndgxeLl9").await;

    let result_ids = |body: &Value| -> Vec<String> {
        body["data"]["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect()
    };
    let first = result_ids(&execute_collect(&app, &[&source]).await);
    let second = result_ids(&execute_collect(&app, &[&source]).await);

    let body: Value = app
        .server
        .post("/api/collect/add-to-materials")
        .json(&json!({"resultIds": first}))
        .await
        .json();
    assert_eq!(body["data"]["added"], 2);

    let response = app
        .server
        .post("/api/collect/add-to-materials")
        .json(&json!({"resultIds": second}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["added"], 0);
    assert_eq!(body["data"]["skipped"], 2);
    assert_eq!(body["message"], "成功添加 0 条采集结果到素材库，跳过 2 条（已存在或已添加）");

    let body: Value = app.server.get("/api/materials").await.json();
    assert_eq!(body["pagination"]["total"], 2);

    let body: Value = app.server.get("/api/collect/results").await.json();
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r["addedToMaterials"] == true));
}

/// 测试页码远超数据范围时返回空页
#[tokio::test]
async fn test_far_pages_are_empty() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一"]).await;
    let source = create_source(&app, "微博热搜", "KqndgxeLl9").await;
    execute_collect(&app, &[&source]).await;

    for path in [
        "/api/collect/results",
        "/api/collect/batches",
        "/api/collect/history",
    ] {
        let response = app
            .server
            .get(path)
            .add_query_param("page", u64::MAX)
            .add_query_param("limit", 100)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        let rows = if path.ends_with("history") {
            &body["data"]["history"]
        } else {
            &body["data"]
        };
        assert!(rows.as_array().unwrap().is_empty(), "{} should be empty", path);
    }

    let body: Value = app
        .server
        .get("/api/collect/history")
        .add_query_param("page", u64::MAX)
        .add_query_param("limit", 100)
        .await
        .json();
    assert_eq!(body["data"]["pagination"]["totalRecords"], 1);
    assert_eq!(body["data"]["pagination"]["hasMore"], false);
}

/// 测试采集历史与汇总
#[tokio::test]
async fn test_history_reports_runs() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一", "热点二"]).await;
    let source = create_source(&app, "微博热搜", "KqndgxeLl9").await;
    execute_collect(&app, &[&source]).await;
    execute_collect(&app, &[&source]).await;

    let response = app
        .server
        .get("/api/collect/history")
        .add_query_param("range", "today")
        .add_query_param("limit", 1)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let data = &body["data"];
    assert_eq!(data["history"].as_array().unwrap().len(), 1);
    assert_eq!(data["history"][0]["source"]["name"], "微博热搜");
    assert_eq!(data["pagination"]["totalRecords"], 2);
    assert_eq!(data["pagination"]["hasMore"], true);
    // 汇总只统计当前页
    assert_eq!(data["summary"]["totalArticles"], 2);
    assert_eq!(data["summary"]["totalHistoryRecords"], 2);
    assert_eq!(data["summary"]["averageSuccessRate"], 100.0);
    assert_eq!(data["stats"]["totalSources"], 1);

    let body: Value = app
        .server
        .get("/api/collect/history")
        .add_query_param("platform", "知乎")
        .await
        .json();
    assert!(body["data"]["history"].as_array().unwrap().is_empty());

    let response = app
        .server
        .get("/api/collect/history")
        .add_query_param("startDate", "2024-13-01")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// 测试热榜服务连通性检查与节点列表
#[tokio::test]
async fn test_provider_status_and_nodes() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/nodes"))
        .and(header("Authorization", HOTLIST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"hashid": "KqndgxeLl9", "name": "微博"}]
        })))
        .mount(&app.hotlist)
        .await;

    let response = app.server.get("/api/collect/provider").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["connection"]["status"], "connected");
    assert_eq!(body["data"]["connection"]["message"], "今日热榜API连接正常");
    assert_eq!(body["data"]["apiInfo"]["hasAccessKey"], true);

    let body: Value = app.server.get("/api/collect/nodes").await.json();
    assert_eq!(body["data"][0]["hashid"], "KqndgxeLl9");
}

/// 测试热榜服务不可用
#[tokio::test]
async fn test_provider_unreachable() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.hotlist)
        .await;

    let response = app.server.get("/api/collect/provider").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "今日热榜API连接失败，请检查网络或API密钥配置");
}

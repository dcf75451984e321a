// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

async fn create_material(app: &super::helpers::TestApp, title: &str) -> String {
    let response = app
        .server
        .post("/api/materials")
        .json(&json!({
            "title": title,
            "content": format!("{}的正文", title),
            "source": "知乎",
            "tags": ["科技"]
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["id"].as_str().unwrap().to_string()
}

/// 测试素材的创建、读取、更新与删除
#[tokio::test]
async fn test_material_crud_roundtrip() {
    let app = create_test_app().await;
    let id = create_material(&app, "人工智能周报").await;

    let response = app.server.get(&format!("/api/materials/{}", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["tags"], json!(["科技"]));

    let response = app
        .server
        .put(&format!("/api/materials/{}", id))
        .json(&json!({"title": "人工智能周报（修订）", "status": "rewritten"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "人工智能周报（修订）");
    assert_eq!(body["data"]["status"], "rewritten");
    assert_eq!(body["data"]["content"], "人工智能周报的正文");

    let response = app.server.delete(&format!("/api/materials/{}", id)).await;
    response.assert_status_ok();

    let response = app.server.get(&format!("/api/materials/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "素材不存在");
}

/// 测试列表分页与搜索
#[tokio::test]
async fn test_material_list_pagination_and_search() {
    let app = create_test_app().await;
    for title in ["新能源汽车销量", "大模型应用", "大模型评测", "春运出行"] {
        create_material(&app, title).await;
    }

    let response = app
        .server
        .get("/api/materials")
        .add_query_param("page", 2)
        .add_query_param("limit", 3)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 4);
    assert_eq!(body["pagination"]["totalPages"], 2);

    let response = app
        .server
        .get("/api/materials")
        .add_query_param("search", "大模型")
        .await;
    let body: Value = response.json();
    assert_eq!(body["pagination"]["total"], 2);
}

/// 测试页码远超数据范围时返回空页而不是出错
#[tokio::test]
async fn test_material_far_page_is_empty() {
    let app = create_test_app().await;
    create_material(&app, "春运出行").await;

    let response = app
        .server
        .get("/api/materials")
        .add_query_param("page", u64::MAX)
        .add_query_param("limit", 100)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["page"], u64::MAX);
}

/// 测试参数校验错误
#[tokio::test]
async fn test_material_validation_errors() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/materials")
        .json(&json!({"title": "", "content": "正文", "source": "知乎"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    let response = app.server.get("/api/materials/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "无效的素材ID格式");

    let response = app
        .server
        .get("/api/materials")
        .add_query_param("limit", 101)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let id = create_material(&app, "春运出行").await;
    let response = app
        .server
        .put(&format!("/api/materials/{}", id))
        .json(&json!({"sourceUrl": "not a url"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "参数验证失败: sourceUrl: 无效的URL格式");
}

/// 测试批量修改状态时部分 id 不存在
#[tokio::test]
async fn test_batch_update_status_reports_missing() {
    let app = create_test_app().await;
    let id = create_material(&app, "春运出行").await;
    let missing = uuid::Uuid::new_v4().to_string();

    let response = app
        .server
        .post("/api/materials/batch")
        .json(&json!({
            "action": "updateStatus",
            "ids": [id, missing],
            "data": {"status": "published"}
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["results"]["total"], 2);
    assert_eq!(body["data"]["results"]["success"], 1);
    assert_eq!(body["data"]["results"]["failed"], 1);

    let body: Value = app
        .server
        .get(&format!("/api/materials/{}", id))
        .await
        .json();
    assert_eq!(body["data"]["status"], "published");
}

/// 测试跨域预检请求
#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app().await;

    let response = app
        .server
        .method(Method::OPTIONS, "/api/materials")
        .add_header("Origin", "http://localhost:5173")
        .add_header("Access-Control-Request-Method", "PUT")
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
    let methods = response.header("access-control-allow-methods");
    assert!(methods.to_str().unwrap().contains("PUT"));
}

/// 测试健康检查
#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    app.server.get("/health").await.assert_status_ok();
}

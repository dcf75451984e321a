// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_source, create_test_app, execute_collect, mount_node, spawn_http};
use contentdesk::application::dto::material_dto::{
    CreateMaterialDto, MaterialListQuery, UpdateMaterialDto,
};
use contentdesk::client::api_client::{ApiClient, DashboardApi};
use contentdesk::client::store::{AppStore, StoreError};
use contentdesk::client::workspace::Workspace;
use contentdesk::domain::models::article::ArticleStatus;
use contentdesk::domain::models::workspace::PublicationStatus;
use uuid::Uuid;

fn material(title: &str) -> CreateMaterialDto {
    CreateMaterialDto {
        title: title.to_string(),
        content: "正文内容".to_string(),
        source: "知乎".to_string(),
        ..Default::default()
    }
}

/// 测试客户端解包统一响应与分页
#[tokio::test]
async fn test_client_material_roundtrip() {
    let app = create_test_app().await;
    let client = ApiClient::new(spawn_http(app.router.clone()).await).unwrap();

    let created = client.create_material(&material("大模型应用")).await.unwrap();
    assert_eq!(created.status, ArticleStatus::Pending);

    let page = client
        .list_materials(&MaterialListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.unwrap().total, 1);

    let dto = UpdateMaterialDto {
        status: Some("rewritten".to_string()),
        ..Default::default()
    };
    let updated = client.update_material(created.id, &dto).await.unwrap();
    assert_eq!(updated.status, ArticleStatus::Rewritten);

    let err = client.get_material(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "素材不存在");
}

/// 测试客户端识别被关联数据阻止的删除
#[tokio::test]
async fn test_client_detects_related_data_conflict() {
    let app = create_test_app().await;
    mount_node(&app.hotlist, "KqndgxeLl9", &["热点一", "热点二"]).await;
    let source = create_source(&app, "微博热搜", "KqndgxeLl9").await;
    execute_collect(&app, &[&source]).await;

    let client = ApiClient::new(spawn_http(app.router.clone()).await).unwrap();
    let id = Uuid::parse_str(&source).unwrap();

    let err = client.delete_source(id, false).await.unwrap_err();
    assert_eq!(err.status, Some(409));
    assert!(err.is_related_data_conflict());
    assert_eq!(err.related_counts(), Some((2, 1)));

    let deleted = client.delete_source(id, true).await.unwrap();
    assert!(deleted.cascade);
    assert_eq!(deleted.results_deleted, 2);
}

/// 测试状态容器的发布流程
#[tokio::test]
async fn test_store_publish_flow() {
    let app = create_test_app().await;
    let client = ApiClient::new(spawn_http(app.router.clone()).await).unwrap();
    let created = client.create_material(&material("春运出行")).await.unwrap();

    let mut store = AppStore::new(client, Workspace::default());
    store
        .load_materials(MaterialListQuery::default())
        .await
        .unwrap();

    let record = store
        .publish(created.id, "acc1", vec!["https://img.example/a.png".to_string()])
        .await
        .unwrap();
    assert_eq!(record.status, PublicationStatus::Success);
    assert_eq!(
        store.material(created.id).unwrap().status,
        ArticleStatus::Published
    );

    let err = store
        .publish(Uuid::new_v4(), "acc1", vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::MaterialNotFound(_)));
    assert_eq!(store.publications().len(), 1);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::domain::models::collect_result::ResultQuery;
use crate::domain::models::collect_source::{CollectSourcePatch, SourceFilter, SourceUsage};
use crate::domain::models::hotlist::{HotlistApiInfo, HotlistNode, NodeDetail, SearchPage};
use crate::domain::repositories::collect_source_repository::CascadeReport;
use crate::domain::services::hotlist_provider::HotlistError;
use async_trait::async_trait;
use mockall::mock;
use serde_json::json;

mock! {
    pub SourceRepo {}
    #[async_trait]
    impl CollectSourceRepository for SourceRepo {
        async fn list(&self, filter: &SourceFilter) -> Result<Vec<CollectSource>, RepositoryError>;
        async fn find_by_id(&self, id: Uuid) -> Result<Option<CollectSource>, RepositoryError>;
        async fn find_by_hash_id(&self, hash_id: &str) -> Result<Option<CollectSource>, RepositoryError>;
        async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CollectSource>, RepositoryError>;
        async fn create(&self, source: &CollectSource) -> Result<CollectSource, RepositoryError>;
        async fn update(&self, id: Uuid, patch: &CollectSourcePatch) -> Result<CollectSource, RepositoryError>;
        async fn usage(&self, id: Uuid) -> Result<SourceUsage, RepositoryError>;
        async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
        async fn cascade_delete(&self, id: Uuid) -> Result<CascadeReport, RepositoryError>;
    }
}

mock! {
    pub BatchRepo {}
    #[async_trait]
    impl CollectBatchRepository for BatchRepo {
        async fn create(&self, batch: &CollectBatch) -> Result<CollectBatch, RepositoryError>;
        async fn find_by_id(&self, id: Uuid) -> Result<Option<CollectBatch>, RepositoryError>;
        async fn finish(&self, id: Uuid, outcome: &BatchOutcome) -> Result<CollectBatch, RepositoryError>;
        async fn list(&self, page: u64, limit: u64, status: Option<BatchStatus>) -> Result<(Vec<CollectBatch>, u64), RepositoryError>;
    }
}

mock! {
    pub ResultRepo {}
    #[async_trait]
    impl CollectResultRepository for ResultRepo {
        async fn record_source_run(&self, results: &[CollectResult], history: &CollectHistory) -> Result<u64, RepositoryError>;
        async fn list(&self, query: &ResultQuery) -> Result<(Vec<CollectResult>, u64), RepositoryError>;
        async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CollectResult>, RepositoryError>;
        async fn set_selected(&self, ids: &[Uuid], selected: bool) -> Result<u64, RepositoryError>;
        async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
        async fn promote_to_materials(&self, ids: &[Uuid], duplicates: &[Uuid], now: DateTime<Utc>) -> Result<u64, RepositoryError>;
    }
}

mock! {
    pub Provider {}
    #[async_trait]
    impl HotlistProvider for Provider {
        async fn list_nodes(&self) -> Result<Vec<HotlistNode>, HotlistError>;
        async fn node_detail(&self, hashid: &str) -> Result<NodeDetail, HotlistError>;
        async fn search(&self, query: &SearchQuery) -> Result<SearchPage, HotlistError>;
        async fn test_connection(&self) -> bool;
        fn api_info(&self) -> HotlistApiInfo;
    }
}

fn source(name: &str, hash_id: &str, is_active: bool) -> CollectSource {
    CollectSource {
        id: Uuid::new_v4(),
        name: name.to_string(),
        platform: "wechat".to_string(),
        api_endpoint: None,
        hash_id: hash_id.to_string(),
        category: Some("科技".to_string()),
        description: None,
        user_created: true,
        is_active,
        config: json!({}),
        created_at: Utc::now(),
    }
}

fn item(title: &str, extra: &str) -> HotlistItem {
    HotlistItem {
        title: Some(title.to_string()),
        url: Some(format!("https://example.com/{}", title)),
        extra: Some(json!(extra)),
        ..Default::default()
    }
}

fn finished(id: Uuid, outcome: &BatchOutcome) -> CollectBatch {
    CollectBatch {
        id,
        name: "batch".to_string(),
        description: None,
        collect_type: CollectType::Full,
        keyword: None,
        source_ids: Vec::new(),
        total_count: outcome.total_count,
        success_count: outcome.success_count,
        error_count: outcome.error_count,
        status: outcome.status,
        started_at: Some(Utc::now()),
        completed_at: Some(outcome.completed_at),
        created_at: Utc::now(),
    }
}

fn plan(source_ids: Vec<Uuid>, collect_type: CollectType, keyword: Option<&str>) -> CollectPlan {
    CollectPlan {
        source_ids,
        collect_type,
        keyword: keyword.map(str::to_string),
        name: "测试任务".to_string(),
        description: None,
        limit: 2,
    }
}

fn batch_repo_echoing_finish() -> MockBatchRepo {
    let mut batches = MockBatchRepo::new();
    batches
        .expect_create()
        .times(1)
        .withf(|b| b.status == BatchStatus::Running && b.started_at.is_some())
        .returning(|b| Ok(b.clone()));
    batches
        .expect_finish()
        .times(1)
        .returning(|id, outcome| Ok(finished(id, outcome)));
    batches
}

fn service(
    sources: MockSourceRepo,
    batches: MockBatchRepo,
    results: MockResultRepo,
    provider: MockProvider,
) -> CollectService {
    CollectService::new(
        Arc::new(sources),
        Arc::new(batches),
        Arc::new(results),
        Arc::new(provider),
    )
}

#[tokio::test]
async fn test_all_sources_invalid_marks_batch_failed() {
    let disabled = source("停用源", "Ab12Cd34Ef", false);
    let missing = Uuid::new_v4();
    let ids = vec![disabled.id, missing];

    let mut sources = MockSourceRepo::new();
    let found = vec![disabled.clone()];
    sources
        .expect_find_by_ids()
        .returning(move |_| Ok(found.clone()));

    let mut results = MockResultRepo::new();
    results.expect_record_source_run().never();
    let mut provider = MockProvider::new();
    provider.expect_node_detail().never();

    let report = service(sources, batch_repo_echoing_finish(), results, provider)
        .execute(&plan(ids, CollectType::Full, None))
        .await
        .unwrap();

    assert_eq!(report.batch.status, BatchStatus::Failed);
    assert_eq!(report.collected(), 0);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.errors[0], "采集源已禁用: 停用源");
    assert_eq!(report.errors[1], format!("采集源不存在: {}", missing));
}

#[tokio::test]
async fn test_partial_success_completes_batch() {
    let good = source("微信热文", "WnBe01o371", true);
    let broken = source("知乎", "mproPpoq6O", true);
    let ids = vec![good.id, broken.id];

    let mut sources = MockSourceRepo::new();
    let found = vec![good.clone(), broken.clone()];
    sources
        .expect_find_by_ids()
        .returning(move |_| Ok(found.clone()));

    let mut provider = MockProvider::new();
    provider
        .expect_node_detail()
        .withf(|hashid| hashid == "WnBe01o371")
        .returning(|_| {
            Ok(NodeDetail {
                hashid: "WnBe01o371".to_string(),
                name: "微信".to_string(),
                items: vec![item("a", "1829 万热度"), item("b", "50000"), item("c", "")],
                updated_at: None,
            })
        });
    provider
        .expect_node_detail()
        .withf(|hashid| hashid == "mproPpoq6O")
        .returning(|_| Err(HotlistError::RateLimited));

    let mut results = MockResultRepo::new();
    let good_id = good.id;
    results
        .expect_record_source_run()
        .times(1)
        .withf(move |rows, history| {
            rows.len() == 2
                && history.source_id == good_id
                && history.articles_count == 2
                && history.success_count == 2
        })
        .returning(|rows, _| Ok(rows.len() as u64));

    let report = service(sources, batch_repo_echoing_finish(), results, provider)
        .execute(&plan(ids, CollectType::Full, None))
        .await
        .unwrap();

    assert_eq!(report.batch.status, BatchStatus::Completed);
    assert_eq!(report.batch.total_count, 2);
    assert_eq!(report.batch.success_count, 2);
    assert_eq!(report.batch.error_count, 1);
    assert_eq!(report.results[0].read_count, 18_290_000);
    assert_eq!(report.results[0].category.as_deref(), Some("科技"));
    assert_eq!(report.results[0].source, "微信热文");
    assert_eq!(report.errors, vec!["知乎: 请求频率过高，请稍后重试".to_string()]);
}

#[tokio::test]
async fn test_keyword_run_searches_within_node() {
    let src = source("微博", "KqndgxeLl9", true);
    let ids = vec![src.id];

    let mut sources = MockSourceRepo::new();
    let found = vec![src.clone()];
    sources
        .expect_find_by_ids()
        .returning(move |_| Ok(found.clone()));

    let mut provider = MockProvider::new();
    provider
        .expect_search()
        .times(1)
        .withf(|query| {
            query.keyword == "人工智能"
                && query.page == 1
                && query.hashid.as_deref() == Some("KqndgxeLl9")
        })
        .returning(|_| {
            Ok(SearchPage {
                items: vec![item("ai", "12")],
                total: Some(1),
            })
        });

    let mut results = MockResultRepo::new();
    results
        .expect_record_source_run()
        .returning(|rows, _| Ok(rows.len() as u64));

    let report = service(sources, batch_repo_echoing_finish(), results, provider)
        .execute(&plan(ids, CollectType::Keyword, Some("人工智能")))
        .await
        .unwrap();

    assert_eq!(report.batch.status, BatchStatus::Completed);
    assert_eq!(report.results[0].keyword.as_deref(), Some("人工智能"));
    assert_eq!(report.results[0].read_count, 12);
}

#[tokio::test]
async fn test_finalize_failure_compensates_batch() {
    let src = source("微信热文", "WnBe01o371", true);
    let ids = vec![src.id];

    let mut sources = MockSourceRepo::new();
    let found = vec![src.clone()];
    sources
        .expect_find_by_ids()
        .returning(move |_| Ok(found.clone()));

    let mut provider = MockProvider::new();
    provider.expect_node_detail().returning(|_| {
        Ok(NodeDetail {
            items: vec![item("a", "1")],
            ..Default::default()
        })
    });

    let mut results = MockResultRepo::new();
    results
        .expect_record_source_run()
        .returning(|rows, _| Ok(rows.len() as u64));

    let mut batches = MockBatchRepo::new();
    batches.expect_create().returning(|b| Ok(b.clone()));
    batches
        .expect_finish()
        .times(1)
        .withf(|_, outcome| outcome.status == BatchStatus::Completed)
        .returning(|_, _| Err(RepositoryError::Database(sea_orm::DbErr::Custom("boom".into()))));
    batches
        .expect_finish()
        .times(1)
        .withf(|_, outcome| outcome.status == BatchStatus::Failed)
        .returning(|id, outcome| Ok(finished(id, outcome)));

    let result = service(sources, batches, results, provider)
        .execute(&plan(ids, CollectType::Full, None))
        .await;

    assert!(result.is_err());
}

#[test]
fn test_result_from_item_defaults() {
    let src = source("微信热文", "WnBe01o371", true);
    let bare = HotlistItem {
        link: Some("https://example.com/link".to_string()),
        description: Some("摘要".to_string()),
        ..Default::default()
    };

    let result = result_from_item(&bare, &src, Uuid::new_v4(), None, Utc::now());

    assert_eq!(result.title, "无标题");
    assert_eq!(result.content, "摘要");
    assert_eq!(result.source_url.as_deref(), Some("https://example.com/link"));
    assert_eq!(result.read_count, 0);
    assert_eq!(result.like_count, 0);
    assert!(result.keyword.is_none());
    assert!(!result.is_selected && !result.added_to_materials);
}

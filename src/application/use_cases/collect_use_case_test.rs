// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::domain::models::article::{Article, ArticlePatch, ArticleQuery, ArticleStatus};
use crate::domain::models::collect_batch::BatchOutcome;
use crate::domain::models::collect_history::{CollectHistory, CollectStats};
use crate::domain::models::collect_source::{
    CollectSource, CollectSourcePatch, SourceUsage,
};
use crate::domain::models::hotlist::{HotlistApiInfo, NodeDetail, SearchPage, SearchQuery};
use crate::domain::repositories::collect_source_repository::CascadeReport;
use crate::domain::repositories::RepositoryError;
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
    pub ArticleRepo {}
    #[async_trait]
    impl ArticleRepository for ArticleRepo {
        async fn list(&self, query: &ArticleQuery) -> Result<(Vec<Article>, u64), RepositoryError>;
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError>;
        async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Article>, RepositoryError>;
        async fn create(&self, article: &Article) -> Result<Article, RepositoryError>;
        async fn update(&self, id: Uuid, patch: &ArticlePatch) -> Result<Article, RepositoryError>;
        async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
        async fn batch_update_status(&self, ids: &[Uuid], status: ArticleStatus) -> Result<u64, RepositoryError>;
        async fn batch_delete(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
        async fn exists(&self, title: &str, source_url: Option<String>) -> Result<bool, RepositoryError>;
    }
}

mock! {
    pub HistoryRepo {}
    #[async_trait]
    impl CollectHistoryRepository for HistoryRepo {
        async fn create(&self, history: &CollectHistory) -> Result<CollectHistory, RepositoryError>;
        async fn list(&self, query: &HistoryQuery) -> Result<(Vec<CollectHistory>, u64), RepositoryError>;
        async fn stats(&self, now: DateTime<Utc>) -> Result<CollectStats, RepositoryError>;
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

struct Mocks {
    sources: MockSourceRepo,
    batches: MockBatchRepo,
    results: MockResultRepo,
    history: MockHistoryRepo,
    articles: MockArticleRepo,
    provider: MockProvider,
}

impl Mocks {
    fn new() -> Self {
        Self {
            sources: MockSourceRepo::new(),
            batches: MockBatchRepo::new(),
            results: MockResultRepo::new(),
            history: MockHistoryRepo::new(),
            articles: MockArticleRepo::new(),
            provider: MockProvider::new(),
        }
    }

    fn into_use_case(self) -> CollectUseCase {
        let sources: Arc<dyn CollectSourceRepository> = Arc::new(self.sources);
        let batches: Arc<dyn CollectBatchRepository> = Arc::new(self.batches);
        let results: Arc<dyn CollectResultRepository> = Arc::new(self.results);
        let provider: Arc<dyn HotlistProvider> = Arc::new(self.provider);
        let service = Arc::new(CollectService::new(
            sources.clone(),
            batches.clone(),
            results.clone(),
            provider.clone(),
        ));
        CollectUseCase::new(
            service,
            sources,
            batches,
            results,
            Arc::new(self.history),
            Arc::new(self.articles),
            provider,
        )
    }
}

fn history_row(source_id: Uuid, articles: i32, success: i32) -> CollectHistory {
    CollectHistory {
        id: Uuid::new_v4(),
        source_id,
        articles_count: articles,
        success_count: success,
        collected_at: Utc::now(),
        source: None,
    }
}

fn staged_result(title: &str, added: bool) -> CollectResult {
    let now = Utc::now();
    CollectResult {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: String::new(),
        source: "微信热文".to_string(),
        source_url: Some(format!("https://example.com/{}", title)),
        author: None,
        publish_time: None,
        collect_time: now,
        tags: Vec::new(),
        category: None,
        read_count: 0,
        like_count: 0,
        source_id: Uuid::new_v4(),
        collect_batch_id: Uuid::new_v4(),
        keyword: None,
        is_selected: false,
        added_to_materials: added,
        created_at: now,
        updated_at: now,
    }
}

fn wechat_source() -> CollectSource {
    CollectSource {
        id: Uuid::new_v4(),
        name: "微信热文".to_string(),
        platform: "wechat".to_string(),
        api_endpoint: None,
        hash_id: "Ab12Cd34Ef".to_string(),
        category: None,
        description: None,
        user_created: false,
        is_active: true,
        config: json!({}),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_keyword_collect_requires_keyword() {
    let use_case = Mocks::new().into_use_case();
    let dto = ExecuteCollectDto {
        source_ids: vec![Uuid::new_v4()],
        collect_type: "keyword".to_string(),
        keyword: Some("   ".to_string()),
        ..Default::default()
    };

    let err = use_case.execute(dto).await.unwrap_err();
    assert!(matches!(err, UseCaseError::Validation(ref m) if m == "关键词采集时必须提供关键词"));
}

#[tokio::test]
async fn test_execute_uses_default_name_and_reports_errors() {
    let mut mocks = Mocks::new();
    mocks
        .batches
        .expect_create()
        .withf(|b| b.name.starts_with("一键采集任务_"))
        .returning(|b| Ok(b.clone()));
    mocks.sources.expect_find_by_ids().returning(|_| Ok(Vec::new()));
    mocks.batches.expect_finish().returning(|id, outcome| {
        Ok(CollectBatch {
            id,
            name: "一键采集任务_1".to_string(),
            description: None,
            collect_type: CollectType::Full,
            keyword: None,
            source_ids: Vec::new(),
            total_count: outcome.total_count,
            success_count: outcome.success_count,
            error_count: outcome.error_count,
            status: outcome.status,
            started_at: None,
            completed_at: Some(outcome.completed_at),
            created_at: Utc::now(),
        })
    });
    let use_case = mocks.into_use_case();

    let missing = Uuid::new_v4();
    let dto = ExecuteCollectDto {
        source_ids: vec![missing],
        collect_type: "full".to_string(),
        ..Default::default()
    };
    let (result, message) = use_case.execute(dto).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.collected, 0);
    assert_eq!(result.failed, 1);
    assert_eq!(
        result.errors,
        Some(vec![format!("采集源不存在: {}", missing)])
    );
    assert_eq!(message, "采集完成！成功采集 0 篇文章");
}

#[test]
fn test_default_batch_name() {
    let now = DateTime::parse_from_rfc3339("2025-06-01T08:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(
        default_batch_name(CollectType::Keyword, now),
        format!("关键词采集任务_{}", now.timestamp_millis())
    );
    assert!(default_batch_name(CollectType::Full, now).starts_with("一键采集任务_"));
}

#[tokio::test]
async fn test_results_list_defaults_and_has_more() {
    let mut mocks = Mocks::new();
    mocks
        .results
        .expect_list()
        .withf(|q| q.page == 1 && q.limit == 50 && !q.only_selected)
        .returning(|_| Ok((Vec::new(), 120)));
    let use_case = mocks.into_use_case();

    let (_, pagination) = use_case
        .list_results(&ResultListQuery::default())
        .await
        .unwrap();
    assert_eq!(pagination.total, 120);
    assert_eq!(pagination.total_pages, 3);
    assert_eq!(pagination.has_more, Some(true));
}

#[tokio::test]
async fn test_add_to_materials_reports_skipped() {
    let mut mocks = Mocks::new();
    let fresh = vec![staged_result("新闻一", false), staged_result("新闻二", false)];
    let loaded = fresh.clone();
    mocks
        .results
        .expect_find_by_ids()
        .returning(move |_| Ok(loaded.clone()));
    mocks.articles.expect_exists().returning(|_, _| Ok(false));
    mocks
        .results
        .expect_promote_to_materials()
        .withf(|_, duplicates, _| duplicates.is_empty())
        .returning(|_, _, _| Ok(2));
    let use_case = mocks.into_use_case();

    let ids = vec![fresh[0].id, fresh[1].id, Uuid::new_v4()];
    let (result, message) = use_case.add_to_materials(&ids).await.unwrap();

    assert_eq!(
        result,
        AddToMaterialsResult {
            added: 2,
            skipped: 1,
            total: 3
        }
    );
    assert_eq!(
        message,
        "成功添加 2 条采集结果到素材库，跳过 1 条（已存在或已添加）"
    );
}

#[tokio::test]
async fn test_add_to_materials_skips_existing_articles() {
    let mut mocks = Mocks::new();
    let existing = staged_result("旧闻", false);
    let fresh = staged_result("新闻", false);
    let already_added = staged_result("已加入", true);
    let existing_id = existing.id;
    let ids = vec![existing.id, fresh.id, already_added.id];
    let loaded = vec![existing, fresh, already_added];
    mocks
        .results
        .expect_find_by_ids()
        .returning(move |_| Ok(loaded.clone()));
    mocks
        .articles
        .expect_exists()
        .times(2)
        .returning(|title, url| {
            assert!(url.is_some());
            Ok(title == "旧闻")
        });
    mocks
        .results
        .expect_promote_to_materials()
        .withf(move |_, duplicates, _| duplicates.len() == 1 && duplicates[0] == existing_id)
        .returning(|_, _, _| Ok(1));
    let use_case = mocks.into_use_case();

    let (result, _) = use_case.add_to_materials(&ids).await.unwrap();
    assert_eq!(result.added, 1);
    assert_eq!(result.skipped, 2);
}

#[tokio::test]
async fn test_history_resolves_platform_and_survives_stats_failure() {
    let source = wechat_source();
    let source_id = source.id;

    let mut mocks = Mocks::new();
    mocks
        .sources
        .expect_list()
        .withf(|f| f.platform.as_deref() == Some("wechat"))
        .returning(move |_| Ok(vec![source.clone()]));
    mocks
        .history
        .expect_list()
        .withf(move |q| {
            q.source_ids == Some(vec![source_id]) && q.start.is_some() && q.end.is_some()
        })
        .returning(move |_| {
            Ok((
                vec![history_row(source_id, 10, 8), history_row(source_id, 10, 7)],
                2,
            ))
        });
    mocks
        .history
        .expect_stats()
        .returning(|_| Err(RepositoryError::Database(sea_orm::DbErr::Custom("boom".to_string()))));
    let use_case = mocks.into_use_case();

    let dto = HistoryQueryDto {
        platform: Some("wechat".to_string()),
        range: Some("week".to_string()),
        ..Default::default()
    };
    let (page, message) = use_case.history(&dto).await.unwrap();

    assert_eq!(message, "获取到 2 条采集历史记录");
    assert_eq!(page.summary.total_articles, 20);
    assert_eq!(page.summary.total_success, 15);
    assert_eq!(page.summary.average_success_rate, 75.0);
    assert_eq!(page.pagination.records_on_page, 2);
    assert!(!page.pagination.has_more);
    assert!(page.filters.start_date.is_some());
    assert!(page.stats.is_none());
}

#[tokio::test]
async fn test_history_end_date_is_inclusive() {
    let mut mocks = Mocks::new();
    mocks
        .history
        .expect_list()
        .withf(|q| {
            q.end.map(|e| e.to_rfc3339()) == Some("2025-06-01T23:59:59.999999+00:00".to_string())
                && q.source_ids.is_none()
        })
        .returning(|_| Ok((Vec::new(), 0)));
    let use_case = mocks.into_use_case();

    let dto = HistoryQueryDto {
        end_date: Some("2025-06-01".to_string()),
        include_stats: Some(false),
        ..Default::default()
    };
    let (page, _) = use_case.history(&dto).await.unwrap();
    assert_eq!(page.pagination.total_pages, 0);
}

#[tokio::test]
async fn test_history_rejects_bad_dates() {
    let use_case = Mocks::new().into_use_case();
    let dto = HistoryQueryDto {
        start_date: Some("06/01/2025".to_string()),
        ..Default::default()
    };
    let err = use_case.history(&dto).await.unwrap_err();
    assert!(matches!(err, UseCaseError::Validation(_)));
}

#[tokio::test]
async fn test_provider_status_failure_is_unavailable() {
    let mut mocks = Mocks::new();
    mocks.provider.expect_test_connection().returning(|| false);
    let use_case = mocks.into_use_case();

    let err = use_case.provider_status().await.unwrap_err();
    assert_eq!(err.to_string(), PROVIDER_UNAVAILABLE);
}

#[tokio::test]
async fn test_provider_status_reports_api_info() {
    let mut mocks = Mocks::new();
    mocks.provider.expect_test_connection().returning(|| true);
    mocks.provider.expect_api_info().returning(|| HotlistApiInfo {
        base_url: "https://api.tophubdata.com".to_string(),
        has_access_key: true,
        access_key_prefix: "abcdefgh...".to_string(),
    });
    let use_case = mocks.into_use_case();

    let status = use_case.provider_status().await.unwrap();
    assert_eq!(status.connection.status, "connected");
    assert!(status.api_info.has_access_key);
}

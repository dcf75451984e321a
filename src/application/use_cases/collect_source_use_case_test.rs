// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::domain::models::collect_source::SourceUsage;
use crate::domain::repositories::collect_source_repository::CascadeReport;
use async_trait::async_trait;
use mockall::mock;

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

fn create_dto() -> CreateSourceDto {
    CreateSourceDto {
        name: "Test".to_string(),
        platform: "wechat".to_string(),
        hash_id: "Ab12Cd34Ef".to_string(),
        ..Default::default()
    }
}

fn existing() -> CollectSource {
    NewCollectSource::from(create_dto()).into_source(Utc::now())
}

#[tokio::test]
async fn test_create_marks_user_created() {
    let mut repo = MockSourceRepo::new();
    repo.expect_find_by_hash_id().returning(|_| Ok(None));
    repo.expect_create().returning(|s| Ok(s.clone()));
    let use_case = CollectSourceUseCase::new(Arc::new(repo));

    let created = use_case.create(create_dto()).await.unwrap();
    assert!(created.user_created);
    assert!(created.is_active);
    assert_eq!(created.hash_id, "Ab12Cd34Ef");
}

#[tokio::test]
async fn test_create_duplicate_hash_id_conflicts() {
    let mut repo = MockSourceRepo::new();
    repo.expect_find_by_hash_id()
        .returning(|_| Ok(Some(existing())));
    let use_case = CollectSourceUseCase::new(Arc::new(repo));

    let err = use_case.create(create_dto()).await.unwrap_err();
    assert!(matches!(err, UseCaseError::Conflict { ref message, .. } if message == DUPLICATE));
}

#[tokio::test]
async fn test_update_requires_id_and_fields() {
    let use_case = CollectSourceUseCase::new(Arc::new(MockSourceRepo::new()));

    let err = use_case
        .update(None, UpdateSourceDto::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), MISSING_ID);

    let err = use_case
        .update(Some(Uuid::new_v4()), UpdateSourceDto::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "没有提供要更新的字段");
}

#[tokio::test]
async fn test_update_missing_source_is_not_found() {
    let mut repo = MockSourceRepo::new();
    repo.expect_update()
        .returning(|_, _| Err(RepositoryError::NotFound));
    let use_case = CollectSourceUseCase::new(Arc::new(repo));

    let dto = UpdateSourceDto {
        is_active: Some(false),
        ..Default::default()
    };
    let err = use_case.update(Some(Uuid::new_v4()), dto).await.unwrap_err();
    assert!(matches!(err, UseCaseError::NotFound(ref m) if m == NOT_FOUND));
}

#[tokio::test]
async fn test_delete_referenced_source_reports_counts() {
    let mut repo = MockSourceRepo::new();
    repo.expect_find_by_id().returning(|_| Ok(Some(existing())));
    repo.expect_usage().returning(|_| {
        Ok(SourceUsage {
            results_count: 1,
            batches_count: 0,
        })
    });
    repo.expect_delete().never();
    let use_case = CollectSourceUseCase::new(Arc::new(repo));

    let err = use_case
        .delete(Some(Uuid::new_v4()), false)
        .await
        .unwrap_err();
    match err {
        UseCaseError::Conflict { details, .. } => {
            let details = details.unwrap();
            assert_eq!(details["code"], HAS_RELATED_DATA);
            assert_eq!(details["details"]["resultsCount"], 1);
            assert_eq!(details["details"]["hasBatches"], false);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_cascade_delete_skips_usage_check() {
    let mut repo = MockSourceRepo::new();
    repo.expect_find_by_id().returning(|_| Ok(Some(existing())));
    repo.expect_usage().never();
    repo.expect_cascade_delete().returning(|_| {
        Ok(CascadeReport {
            results_deleted: 3,
            batches_updated: 1,
        })
    });
    let use_case = CollectSourceUseCase::new(Arc::new(repo));

    let id = Uuid::new_v4();
    let (deleted, message) = use_case.delete(Some(id), true).await.unwrap();
    assert_eq!(deleted.results_deleted, 3);
    assert_eq!(deleted.batches_updated, 1);
    assert_eq!(message, "采集源及相关数据删除成功");
}

#[tokio::test]
async fn test_delete_missing_source_is_not_found() {
    let mut repo = MockSourceRepo::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    let use_case = CollectSourceUseCase::new(Arc::new(repo));

    let err = use_case.delete(Some(Uuid::new_v4()), false).await.unwrap_err();
    assert!(matches!(err, UseCaseError::NotFound(_)));
}

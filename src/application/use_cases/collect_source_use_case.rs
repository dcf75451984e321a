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


use crate::application::dto::collect_dto::{CreateSourceDto, SourceDeleted, UpdateSourceDto};
use crate::application::errors::UseCaseError;
use crate::domain::models::collect_source::{
    CollectSource, CollectSourcePatch, NewCollectSource, SourceFilter,
};
use crate::domain::repositories::collect_source_repository::CollectSourceRepository;
use crate::domain::repositories::RepositoryError;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const NOT_FOUND: &str = "采集源不存在";
const DUPLICATE: &str = "该采集源已存在，请检查名称或HashId";
const MISSING_ID: &str = "缺少采集源ID";

/// 被引用时拒绝删除的错误码
pub const HAS_RELATED_DATA: &str = "HAS_RELATED_DATA";

fn map_write_error(err: RepositoryError) -> UseCaseError {
    match err {
        RepositoryError::NotFound => UseCaseError::not_found(NOT_FOUND),
        RepositoryError::Conflict(detail) => {
            warn!("Duplicate collect source: {}", detail);
            UseCaseError::Conflict {
                message: DUPLICATE.to_string(),
                details: None,
            }
        }
        other => other.into(),
    }
}

/// 采集源管理用例
pub struct CollectSourceUseCase {
    repo: Arc<dyn CollectSourceRepository>,
}

impl CollectSourceUseCase {
    pub fn new(repo: Arc<dyn CollectSourceRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &SourceFilter) -> Result<Vec<CollectSource>, UseCaseError> {
        Ok(self.repo.list(filter).await?)
    }

    /// 创建用户采集源，hashId 重复时返回冲突
    pub async fn create(&self, dto: CreateSourceDto) -> Result<CollectSource, UseCaseError> {
        if self.repo.find_by_hash_id(&dto.hash_id).await?.is_some() {
            return Err(UseCaseError::Conflict {
                message: DUPLICATE.to_string(),
                details: None,
            });
        }

        let source = NewCollectSource::from(dto).into_source(Utc::now());
        let created = self.repo.create(&source).await.map_err(map_write_error)?;
        info!(id = %created.id, hash_id = %created.hash_id, "Collect source created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: Option<Uuid>,
        dto: UpdateSourceDto,
    ) -> Result<CollectSource, UseCaseError> {
        let id = id.ok_or_else(|| UseCaseError::validation(MISSING_ID))?;
        let patch = CollectSourcePatch::from(dto);
        if patch.is_empty() {
            return Err(UseCaseError::validation("没有提供要更新的字段"));
        }

        if let Some(hash_id) = &patch.hash_id {
            if let Some(existing) = self.repo.find_by_hash_id(hash_id).await? {
                if existing.id != id {
                    return Err(UseCaseError::Conflict {
                        message: DUPLICATE.to_string(),
                        details: None,
                    });
                }
            }
        }

        self.repo.update(id, &patch).await.map_err(map_write_error)
    }

    /// 删除采集源
    ///
    /// 非级联删除时，只要仍被结果或批次引用就返回 409，
    /// 并在 details 中给出引用数量
    pub async fn delete(
        &self,
        id: Option<Uuid>,
        cascade: bool,
    ) -> Result<(SourceDeleted, String), UseCaseError> {
        let id = id.ok_or_else(|| UseCaseError::validation(MISSING_ID))?;
        let source = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found(NOT_FOUND))?;

        if cascade {
            let report = self.repo.cascade_delete(id).await.map_err(map_write_error)?;
            info!(
                source = %source.name,
                results_deleted = report.results_deleted,
                batches_updated = report.batches_updated,
                "Collect source deleted with related data"
            );
            return Ok((
                SourceDeleted {
                    id,
                    cascade: true,
                    results_deleted: report.results_deleted,
                    batches_updated: report.batches_updated,
                },
                "采集源及相关数据删除成功".to_string(),
            ));
        }

        let usage = self.repo.usage(id).await?;
        if usage.is_referenced() {
            return Err(UseCaseError::Conflict {
                message: "采集源有关联数据，无法直接删除".to_string(),
                details: Some(json!({
                    "code": HAS_RELATED_DATA,
                    "details": {
                        "resultsCount": usage.results_count,
                        "batchesCount": usage.batches_count,
                        "hasResults": usage.results_count > 0,
                        "hasBatches": usage.batches_count > 0,
                    }
                })),
            });
        }

        if !self.repo.delete(id).await? {
            return Err(UseCaseError::not_found(NOT_FOUND));
        }
        info!(source = %source.name, "Collect source deleted");
        Ok((
            SourceDeleted {
                id,
                cascade: false,
                results_deleted: 0,
                batches_updated: 0,
            },
            "采集源删除成功".to_string(),
        ))
    }
}

#[cfg(test)]
#[path = "collect_source_use_case_test.rs"]
mod tests;

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


use crate::application::dto::material_dto::{
    BatchItemDetails, BatchItemFailure, BatchItemSuccess, BatchOperationDto,
    BatchOperationResult, BatchOperationSummary, CreateMaterialDto, DeletedMaterial,
    UpdateMaterialDto,
};
use crate::application::dto::response::Pagination;
use crate::application::errors::UseCaseError;
use crate::domain::models::article::{Article, ArticlePatch, ArticleQuery, ArticleStatus, NewArticle};
use crate::domain::repositories::article_repository::ArticleRepository;
use crate::domain::repositories::RepositoryError;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const NOT_FOUND: &str = "素材不存在";

fn not_found_as_use_case(err: RepositoryError) -> UseCaseError {
    match err {
        RepositoryError::NotFound => UseCaseError::not_found(NOT_FOUND),
        other => other.into(),
    }
}

/// 素材库用例
pub struct MaterialUseCase {
    repo: Arc<dyn ArticleRepository>,
}

impl MaterialUseCase {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// 分页查询素材
    pub async fn list(
        &self,
        query: &ArticleQuery,
    ) -> Result<(Vec<Article>, Pagination), UseCaseError> {
        let (articles, total) = self.repo.list(query).await?;
        Ok((articles, Pagination::new(query.page, query.limit, total)))
    }

    pub async fn get(&self, id: Uuid) -> Result<Article, UseCaseError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found(NOT_FOUND))
    }

    pub async fn create(&self, dto: CreateMaterialDto) -> Result<Article, UseCaseError> {
        let article = NewArticle::from(dto).into_article(Utc::now());
        let created = self.repo.create(&article).await?;
        info!(id = %created.id, "Material created");
        Ok(created)
    }

    /// 部分更新，空请求体视为参数错误
    pub async fn update(&self, id: Uuid, dto: UpdateMaterialDto) -> Result<Article, UseCaseError> {
        let patch = ArticlePatch::from(dto);
        if patch.is_empty() {
            return Err(UseCaseError::validation("请求体不能为空"));
        }
        self.repo
            .update(id, &patch)
            .await
            .map_err(not_found_as_use_case)
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeletedMaterial, UseCaseError> {
        if !self.repo.delete(id).await? {
            return Err(UseCaseError::not_found(NOT_FOUND));
        }
        info!(id = %id, "Material deleted");
        Ok(DeletedMaterial {
            id,
            message: "素材删除成功".to_string(),
        })
    }

    /// 批量删除或批量修改状态；不存在的 ID 记入失败列表
    pub async fn batch(&self, dto: BatchOperationDto) -> Result<BatchOperationResult, UseCaseError> {
        let status = match dto.action.as_str() {
            "delete" => None,
            "updateStatus" => {
                let status = dto
                    .data
                    .as_ref()
                    .and_then(|d| d.status.as_deref())
                    .and_then(|s| s.parse::<ArticleStatus>().ok())
                    .ok_or_else(|| UseCaseError::validation("批量状态更新需要提供status字段"))?;
                Some(status)
            }
            other => {
                return Err(UseCaseError::validation(format!(
                    "参数验证失败: action: 不支持的操作 {}",
                    other
                )))
            }
        };

        let existing = self.repo.find_by_ids(&dto.ids).await?;
        let existing_ids: Vec<Uuid> = existing.iter().map(|a| a.id).collect();
        let found: HashSet<Uuid> = existing_ids.iter().copied().collect();

        match status {
            None => {
                self.repo.batch_delete(&existing_ids).await?;
            }
            Some(status) => {
                self.repo.batch_update_status(&existing_ids, status).await?;
            }
        }

        let success: Vec<BatchItemSuccess> = existing
            .into_iter()
            .map(|article| BatchItemSuccess {
                id: article.id,
                title: article.title,
                action: if status.is_some() { "updated" } else { "deleted" }.to_string(),
                new_status: status,
            })
            .collect();
        let failed: Vec<BatchItemFailure> = dto
            .ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| BatchItemFailure {
                id: *id,
                error: NOT_FOUND.to_string(),
            })
            .collect();

        info!(
            action = %dto.action,
            success = success.len(),
            failed = failed.len(),
            "Batch material operation finished"
        );

        Ok(BatchOperationResult {
            message: "批量操作完成".to_string(),
            results: BatchOperationSummary {
                total: dto.ids.len(),
                success: success.len(),
                failed: failed.len(),
                details: BatchItemDetails { success, failed },
            },
        })
    }
}

#[cfg(test)]
#[path = "material_use_case_test.rs"]
mod tests;

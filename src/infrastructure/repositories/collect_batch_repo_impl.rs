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


use crate::domain::models::collect_batch::{BatchOutcome, BatchStatus, CollectBatch};
use crate::domain::repositories::collect_batch_repository::CollectBatchRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::collect_batch as batch_entity;
use crate::infrastructure::repositories::mapping::page_index;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 采集批次仓库实现
pub struct CollectBatchRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CollectBatchRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollectBatchRepository for CollectBatchRepositoryImpl {
    async fn create(&self, batch: &CollectBatch) -> Result<CollectBatch, RepositoryError> {
        let model: batch_entity::ActiveModel = batch.into();
        let inserted = model.insert(self.db.as_ref()).await?;
        CollectBatch::try_from(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CollectBatch>, RepositoryError> {
        batch_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(CollectBatch::try_from)
            .transpose()
    }

    async fn finish(
        &self,
        id: Uuid,
        outcome: &BatchOutcome,
    ) -> Result<CollectBatch, RepositoryError> {
        let model = batch_entity::ActiveModel {
            id: Set(id),
            total_count: Set(outcome.total_count),
            success_count: Set(outcome.success_count),
            error_count: Set(outcome.error_count),
            status: Set(outcome.status.to_string()),
            completed_at: Set(Some(outcome.completed_at.into())),
            ..Default::default()
        };

        match model.update(self.db.as_ref()).await {
            Ok(updated) => CollectBatch::try_from(updated),
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(
        &self,
        page: u64,
        limit: u64,
        status: Option<BatchStatus>,
    ) -> Result<(Vec<CollectBatch>, u64), RepositoryError> {
        let mut select = batch_entity::Entity::find();
        if let Some(status) = status {
            select = select.filter(batch_entity::Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(batch_entity::Column::CreatedAt)
            .order_by_asc(batch_entity::Column::Id)
            .paginate(self.db.as_ref(), limit.max(1));
        let total = paginator.num_items().await?;
        let Some(index) = page_index(page, limit) else {
            return Ok((Vec::new(), total));
        };
        let batches = paginator
            .fetch_page(index)
            .await?
            .into_iter()
            .map(CollectBatch::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((batches, total))
    }
}

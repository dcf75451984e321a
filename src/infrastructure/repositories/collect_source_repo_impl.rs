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


use crate::domain::models::collect_source::{
    CollectSource, CollectSourcePatch, SourceFilter, SourceUsage,
};
use crate::domain::repositories::collect_source_repository::{
    CascadeReport, CollectSourceRepository,
};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    collect_batch as batch_entity, collect_history as history_entity,
    collect_result as result_entity, collect_source as source_entity,
};
use crate::infrastructure::repositories::mapping::{uuid_list, uuid_list_json};
use async_trait::async_trait;
use sea_orm::{
    sea_query::{Alias, Expr, Func, SimpleExpr},
    *,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 采集源仓库实现
pub struct CollectSourceRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CollectSourceRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// 文本匹配预筛选 sourceIds 中含该 uuid 的批次
fn mentions_source(source_id: Uuid) -> SimpleExpr {
    Expr::expr(Func::cast_as(
        Expr::col(batch_entity::Column::SourceIds),
        Alias::new("TEXT"),
    ))
    .like(format!("%{}%", source_id))
}

/// 统计 sourceIds 中包含指定采集源的批次
///
/// 数据库端先按文本预筛选，再解析 JSON 精确比较
async fn referencing_batches<C: ConnectionTrait>(
    conn: &C,
    source_id: Uuid,
) -> Result<Vec<batch_entity::Model>, DbErr> {
    let batches = batch_entity::Entity::find()
        .filter(mentions_source(source_id))
        .all(conn)
        .await?;
    Ok(batches
        .into_iter()
        .filter(|b| uuid_list(&b.source_ids).contains(&source_id))
        .collect())
}

#[async_trait]
impl CollectSourceRepository for CollectSourceRepositoryImpl {
    async fn list(&self, filter: &SourceFilter) -> Result<Vec<CollectSource>, RepositoryError> {
        let mut select = source_entity::Entity::find();
        if let Some(platform) = &filter.platform {
            select = select.filter(source_entity::Column::Platform.eq(platform.as_str()));
        }
        if let Some(is_active) = filter.is_active {
            select = select.filter(source_entity::Column::IsActive.eq(is_active));
        }

        let models = select
            .order_by_desc(source_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(CollectSource::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CollectSource>, RepositoryError> {
        let model = source_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(CollectSource::from))
    }

    async fn find_by_hash_id(
        &self,
        hash_id: &str,
    ) -> Result<Option<CollectSource>, RepositoryError> {
        let model = source_entity::Entity::find()
            .filter(source_entity::Column::HashId.eq(hash_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(CollectSource::from))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CollectSource>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = source_entity::Entity::find()
            .filter(source_entity::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(CollectSource::from).collect())
    }

    async fn create(&self, source: &CollectSource) -> Result<CollectSource, RepositoryError> {
        let model: source_entity::ActiveModel = source.into();
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &CollectSourcePatch,
    ) -> Result<CollectSource, RepositoryError> {
        let mut model: source_entity::ActiveModel = source_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        if let Some(name) = &patch.name {
            model.name = Set(name.clone());
        }
        if let Some(platform) = &patch.platform {
            model.platform = Set(platform.clone());
        }
        if let Some(api_endpoint) = &patch.api_endpoint {
            model.api_endpoint = Set(Some(api_endpoint.clone()));
        }
        if let Some(hash_id) = &patch.hash_id {
            model.hash_id = Set(hash_id.clone());
        }
        if let Some(category) = &patch.category {
            model.category = Set(Some(category.clone()));
        }
        if let Some(description) = &patch.description {
            model.description = Set(Some(description.clone()));
        }
        if let Some(is_active) = patch.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(config) = &patch.config {
            model.config = Set(config.clone());
        }

        let updated = model
            .update(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(updated.into())
    }

    async fn usage(&self, id: Uuid) -> Result<SourceUsage, RepositoryError> {
        let results_count = result_entity::Entity::find()
            .filter(result_entity::Column::SourceId.eq(id))
            .count(self.db.as_ref())
            .await?;
        let batches_count = referencing_batches(self.db.as_ref(), id).await?.len() as u64;

        Ok(SourceUsage {
            results_count,
            batches_count,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let txn = self.db.begin().await?;

        history_entity::Entity::delete_many()
            .filter(history_entity::Column::SourceId.eq(id))
            .exec(&txn)
            .await?;
        let result = source_entity::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn cascade_delete(&self, id: Uuid) -> Result<CascadeReport, RepositoryError> {
        let txn = self.db.begin().await?;

        let results_deleted = result_entity::Entity::delete_many()
            .filter(result_entity::Column::SourceId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let batches = referencing_batches(&txn, id).await?;
        let batches_updated = batches.len() as u64;
        for batch in batches {
            let remaining: Vec<Uuid> = uuid_list(&batch.source_ids)
                .into_iter()
                .filter(|source_id| *source_id != id)
                .collect();
            let mut model: batch_entity::ActiveModel = batch.into();
            model.source_ids = Set(uuid_list_json(&remaining));
            model.update(&txn).await?;
        }

        history_entity::Entity::delete_many()
            .filter(history_entity::Column::SourceId.eq(id))
            .exec(&txn)
            .await?;

        let deleted = source_entity::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            // 未提交的事务在 drop 时回滚
            return Err(RepositoryError::NotFound);
        }

        txn.commit().await?;
        debug!(
            "Cascade deleted source {}: {} results, {} batches updated",
            id, results_deleted, batches_updated
        );

        Ok(CascadeReport {
            results_deleted,
            batches_updated,
        })
    }
}

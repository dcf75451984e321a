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


use crate::domain::models::article::ArticleStatus;
use crate::domain::models::collect_history::CollectHistory;
use crate::domain::models::collect_result::{CollectResult, ResultQuery};
use crate::domain::repositories::collect_result_repository::CollectResultRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    article as article_entity, collect_history as history_entity,
    collect_result as result_entity,
};
use crate::infrastructure::repositories::mapping::page_index;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 采集结果仓库实现
pub struct CollectResultRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CollectResultRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

async fn insert_results<C: ConnectionTrait>(
    conn: &C,
    results: &[CollectResult],
) -> Result<u64, DbErr> {
    if results.is_empty() {
        return Ok(0);
    }
    let models: Vec<result_entity::ActiveModel> = results.iter().map(Into::into).collect();
    result_entity::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await
}

/// 由采集结果生成待处理素材行
fn promoted_article(model: &result_entity::Model, now: DateTime<Utc>) -> article_entity::ActiveModel {
    article_entity::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(model.title.clone()),
        content: Set(model.content.clone()),
        source: Set(model.source.clone()),
        source_url: Set(model.source_url.clone()),
        author: Set(model.author.clone()),
        publish_time: Set(model.publish_time),
        collect_time: Set(model.collect_time),
        tags: Set(model.tags.clone()),
        category: Set(model.category.clone()),
        read_count: Set(model.read_count),
        like_count: Set(model.like_count),
        status: Set(ArticleStatus::Pending.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}

#[async_trait]
impl CollectResultRepository for CollectResultRepositoryImpl {
    async fn record_source_run(
        &self,
        results: &[CollectResult],
        history: &CollectHistory,
    ) -> Result<u64, RepositoryError> {
        let txn = self.db.begin().await?;

        let inserted = insert_results(&txn, results).await?;
        let history_model: history_entity::ActiveModel = history.into();
        history_model.insert(&txn).await?;

        txn.commit().await?;
        Ok(inserted)
    }

    async fn list(
        &self,
        query: &ResultQuery,
    ) -> Result<(Vec<CollectResult>, u64), RepositoryError> {
        let mut select = result_entity::Entity::find();
        if let Some(batch_id) = query.batch_id {
            select = select.filter(result_entity::Column::CollectBatchId.eq(batch_id));
        }
        if query.only_selected {
            select = select.filter(result_entity::Column::IsSelected.eq(true));
        }

        let paginator = select
            .order_by_desc(result_entity::Column::CollectTime)
            .order_by_asc(result_entity::Column::Id)
            .paginate(self.db.as_ref(), query.limit.max(1));
        let total = paginator.num_items().await?;
        let Some(index) = page_index(query.page, query.limit) else {
            return Ok((Vec::new(), total));
        };
        let models = paginator.fetch_page(index).await?;

        Ok((models.into_iter().map(CollectResult::from).collect(), total))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CollectResult>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = result_entity::Entity::find()
            .filter(result_entity::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(CollectResult::from).collect())
    }

    async fn set_selected(&self, ids: &[Uuid], selected: bool) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = result_entity::Entity::update_many()
            .col_expr(result_entity::Column::IsSelected, Expr::value(selected))
            .col_expr(
                result_entity::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(result_entity::Column::Id.is_in(ids.to_vec()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = result_entity::Entity::delete_many()
            .filter(result_entity::Column::Id.is_in(ids.to_vec()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn promote_to_materials(
        &self,
        ids: &[Uuid],
        duplicates: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let txn = self.db.begin().await?;

        let pending = result_entity::Entity::find()
            .filter(result_entity::Column::Id.is_in(ids.to_vec()))
            .filter(result_entity::Column::AddedToMaterials.eq(false))
            .all(&txn)
            .await?;
        if pending.is_empty() {
            txn.commit().await?;
            return Ok(0);
        }

        let articles: Vec<article_entity::ActiveModel> = pending
            .iter()
            .filter(|model| !duplicates.contains(&model.id))
            .map(|model| promoted_article(model, now))
            .collect();
        let added = articles.len() as u64;
        if !articles.is_empty() {
            article_entity::Entity::insert_many(articles)
                .exec_without_returning(&txn)
                .await?;
        }

        let promoted_ids: Vec<Uuid> = pending.iter().map(|m| m.id).collect();
        result_entity::Entity::update_many()
            .col_expr(result_entity::Column::AddedToMaterials, Expr::value(true))
            .col_expr(
                result_entity::Column::UpdatedAt,
                Expr::value(now.fixed_offset()),
            )
            .filter(result_entity::Column::Id.is_in(promoted_ids))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(added)
    }
}

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


use crate::domain::models::collect_history::{
    success_percentage, CollectHistory, CollectStats, HistoryQuery,
};
use crate::domain::models::collect_source::CollectSource;
use crate::domain::repositories::collect_history_repository::CollectHistoryRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    collect_history as history_entity, collect_source as source_entity,
};
use crate::infrastructure::repositories::mapping::page_index;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;

/// 采集历史仓库实现
pub struct CollectHistoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CollectHistoryRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn history_condition(query: &HistoryQuery) -> Condition {
        let mut condition = Condition::all();
        if let Some(ids) = &query.source_ids {
            condition = condition.add(history_entity::Column::SourceId.is_in(ids.clone()));
        }
        if let Some(start) = query.start {
            condition = condition.add(history_entity::Column::CollectedAt.gte(start.fixed_offset()));
        }
        if let Some(end) = query.end {
            condition = condition.add(history_entity::Column::CollectedAt.lte(end.fixed_offset()));
        }
        condition
    }
}

#[async_trait]
impl CollectHistoryRepository for CollectHistoryRepositoryImpl {
    async fn create(&self, history: &CollectHistory) -> Result<CollectHistory, RepositoryError> {
        let model: history_entity::ActiveModel = history.into();
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(CollectHistory::from(inserted))
    }

    async fn list(
        &self,
        query: &HistoryQuery,
    ) -> Result<(Vec<CollectHistory>, u64), RepositoryError> {
        // 来源集合为空时不会有匹配记录
        if matches!(&query.source_ids, Some(ids) if ids.is_empty()) {
            return Ok((Vec::new(), 0));
        }

        let paginator = history_entity::Entity::find()
            .filter(Self::history_condition(query))
            .find_also_related(source_entity::Entity)
            .order_by_desc(history_entity::Column::CollectedAt)
            .order_by_asc(history_entity::Column::Id)
            .paginate(self.db.as_ref(), query.limit.max(1));
        let total = paginator.num_items().await?;
        let Some(index) = page_index(query.page, query.limit) else {
            return Ok((Vec::new(), total));
        };
        let rows = paginator.fetch_page(index).await?;

        let history = rows
            .into_iter()
            .map(|(model, source)| {
                let mut record = CollectHistory::from(model);
                record.source = source.map(CollectSource::from);
                record
            })
            .collect();

        Ok((history, total))
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<CollectStats, RepositoryError> {
        let db = self.db.as_ref();

        let total_sources = source_entity::Entity::find().count(db).await?;
        let active_sources = source_entity::Entity::find()
            .filter(source_entity::Column::IsActive.eq(true))
            .count(db)
            .await?;
        let total_collects = history_entity::Entity::find().count(db).await?;

        let today_start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|t| t.and_utc())
            .unwrap_or(now);
        let today_collects = history_entity::Entity::find()
            .filter(history_entity::Column::CollectedAt.gte(today_start.fixed_offset()))
            .count(db)
            .await?;

        let totals: Option<(Option<i64>, Option<i64>)> = history_entity::Entity::find()
            .select_only()
            .column_as(
                Expr::col(history_entity::Column::ArticlesCount).sum(),
                "articles",
            )
            .column_as(
                Expr::col(history_entity::Column::SuccessCount).sum(),
                "success",
            )
            .into_tuple()
            .one(db)
            .await?;
        let (total_articles, total_success) = totals
            .map(|(articles, success)| (articles.unwrap_or(0), success.unwrap_or(0)))
            .unwrap_or((0, 0));

        let last_collect_time = history_entity::Entity::find()
            .order_by_desc(history_entity::Column::CollectedAt)
            .one(db)
            .await?
            .map(|m| m.collected_at.into());

        Ok(CollectStats {
            total_sources,
            active_sources,
            total_collects,
            today_collects,
            total_articles,
            success_rate: success_percentage(total_success, total_articles),
            last_collect_time,
        })
    }
}

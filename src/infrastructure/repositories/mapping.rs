// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 数据库行与领域记录之间的转换

use crate::domain::models::article::{Article, ArticleStatus};
use crate::domain::models::collect_batch::{BatchStatus, CollectBatch, CollectType};
use crate::domain::models::collect_history::CollectHistory;
use crate::domain::models::collect_result::CollectResult;
use crate::domain::models::collect_source::CollectSource;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    article as article_entity, collect_batch as batch_entity, collect_history as history_entity,
    collect_result as result_entity, collect_source as source_entity,
};
use sea_orm::{ActiveValue::Set, DbErr};
use serde_json::Value;
use uuid::Uuid;

fn invalid_column(column: &str, value: &str) -> RepositoryError {
    RepositoryError::Database(DbErr::Custom(format!("Invalid {}: {}", column, value)))
}

/// 1 起始的页码转为分页器的页索引
///
/// 偏移量超出数据库整数范围时返回 `None`，调用方直接返回空页
pub fn page_index(page: u64, limit: u64) -> Option<u64> {
    let index = page.saturating_sub(1);
    index
        .checked_mul(limit.max(1))
        .filter(|offset| i64::try_from(*offset).is_ok())
        .map(|_| index)
}

pub fn string_list(value: &Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

pub fn string_list_json(items: &[String]) -> Value {
    Value::from(items.to_vec())
}

pub fn uuid_list(value: &Value) -> Vec<Uuid> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

pub fn uuid_list_json(ids: &[Uuid]) -> Value {
    Value::Array(ids.iter().map(|id| Value::String(id.to_string())).collect())
}

impl TryFrom<article_entity::Model> for Article {
    type Error = RepositoryError;

    fn try_from(m: article_entity::Model) -> Result<Self, Self::Error> {
        let status = m
            .status
            .parse::<ArticleStatus>()
            .map_err(|_| invalid_column("article status", &m.status))?;

        Ok(Article {
            id: m.id,
            title: m.title,
            content: m.content,
            source: m.source,
            source_url: m.source_url,
            author: m.author,
            publish_time: m.publish_time.map(Into::into),
            collect_time: m.collect_time.into(),
            tags: string_list(&m.tags),
            category: m.category,
            read_count: m.read_count,
            like_count: m.like_count,
            status,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        })
    }
}

impl From<&Article> for article_entity::ActiveModel {
    fn from(a: &Article) -> Self {
        article_entity::ActiveModel {
            id: Set(a.id),
            title: Set(a.title.clone()),
            content: Set(a.content.clone()),
            source: Set(a.source.clone()),
            source_url: Set(a.source_url.clone()),
            author: Set(a.author.clone()),
            publish_time: Set(a.publish_time.map(Into::into)),
            collect_time: Set(a.collect_time.into()),
            tags: Set(string_list_json(&a.tags)),
            category: Set(a.category.clone()),
            read_count: Set(a.read_count),
            like_count: Set(a.like_count),
            status: Set(a.status.to_string()),
            created_at: Set(a.created_at.into()),
            updated_at: Set(a.updated_at.into()),
        }
    }
}

impl From<source_entity::Model> for CollectSource {
    fn from(m: source_entity::Model) -> Self {
        CollectSource {
            id: m.id,
            name: m.name,
            platform: m.platform,
            api_endpoint: m.api_endpoint,
            hash_id: m.hash_id,
            category: m.category,
            description: m.description,
            user_created: m.user_created,
            is_active: m.is_active,
            config: m.config,
            created_at: m.created_at.into(),
        }
    }
}

impl From<&CollectSource> for source_entity::ActiveModel {
    fn from(s: &CollectSource) -> Self {
        source_entity::ActiveModel {
            id: Set(s.id),
            name: Set(s.name.clone()),
            platform: Set(s.platform.clone()),
            api_endpoint: Set(s.api_endpoint.clone()),
            hash_id: Set(s.hash_id.clone()),
            category: Set(s.category.clone()),
            description: Set(s.description.clone()),
            user_created: Set(s.user_created),
            is_active: Set(s.is_active),
            config: Set(s.config.clone()),
            created_at: Set(s.created_at.into()),
        }
    }
}

impl TryFrom<batch_entity::Model> for CollectBatch {
    type Error = RepositoryError;

    fn try_from(m: batch_entity::Model) -> Result<Self, Self::Error> {
        let collect_type = m
            .collect_type
            .parse::<CollectType>()
            .map_err(|_| invalid_column("collect type", &m.collect_type))?;
        let status = m
            .status
            .parse::<BatchStatus>()
            .map_err(|_| invalid_column("batch status", &m.status))?;

        Ok(CollectBatch {
            id: m.id,
            name: m.name,
            description: m.description,
            collect_type,
            keyword: m.keyword,
            source_ids: uuid_list(&m.source_ids),
            total_count: m.total_count,
            success_count: m.success_count,
            error_count: m.error_count,
            status,
            started_at: m.started_at.map(Into::into),
            completed_at: m.completed_at.map(Into::into),
            created_at: m.created_at.into(),
        })
    }
}

impl From<&CollectBatch> for batch_entity::ActiveModel {
    fn from(b: &CollectBatch) -> Self {
        batch_entity::ActiveModel {
            id: Set(b.id),
            name: Set(b.name.clone()),
            description: Set(b.description.clone()),
            collect_type: Set(b.collect_type.to_string()),
            keyword: Set(b.keyword.clone()),
            source_ids: Set(uuid_list_json(&b.source_ids)),
            total_count: Set(b.total_count),
            success_count: Set(b.success_count),
            error_count: Set(b.error_count),
            status: Set(b.status.to_string()),
            started_at: Set(b.started_at.map(Into::into)),
            completed_at: Set(b.completed_at.map(Into::into)),
            created_at: Set(b.created_at.into()),
        }
    }
}

impl From<result_entity::Model> for CollectResult {
    fn from(m: result_entity::Model) -> Self {
        CollectResult {
            id: m.id,
            title: m.title,
            content: m.content,
            source: m.source,
            source_url: m.source_url,
            author: m.author,
            publish_time: m.publish_time.map(Into::into),
            collect_time: m.collect_time.into(),
            tags: string_list(&m.tags),
            category: m.category,
            read_count: m.read_count,
            like_count: m.like_count,
            source_id: m.source_id,
            collect_batch_id: m.collect_batch_id,
            keyword: m.keyword,
            is_selected: m.is_selected,
            added_to_materials: m.added_to_materials,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

impl From<&CollectResult> for result_entity::ActiveModel {
    fn from(r: &CollectResult) -> Self {
        result_entity::ActiveModel {
            id: Set(r.id),
            title: Set(r.title.clone()),
            content: Set(r.content.clone()),
            source: Set(r.source.clone()),
            source_url: Set(r.source_url.clone()),
            author: Set(r.author.clone()),
            publish_time: Set(r.publish_time.map(Into::into)),
            collect_time: Set(r.collect_time.into()),
            tags: Set(string_list_json(&r.tags)),
            category: Set(r.category.clone()),
            read_count: Set(r.read_count),
            like_count: Set(r.like_count),
            source_id: Set(r.source_id),
            collect_batch_id: Set(r.collect_batch_id),
            keyword: Set(r.keyword.clone()),
            is_selected: Set(r.is_selected),
            added_to_materials: Set(r.added_to_materials),
            created_at: Set(r.created_at.into()),
            updated_at: Set(r.updated_at.into()),
        }
    }
}

impl From<history_entity::Model> for CollectHistory {
    fn from(m: history_entity::Model) -> Self {
        CollectHistory {
            id: m.id,
            source_id: m.source_id,
            articles_count: m.articles_count,
            success_count: m.success_count,
            collected_at: m.collected_at.into(),
            source: None,
        }
    }
}

impl From<&CollectHistory> for history_entity::ActiveModel {
    fn from(h: &CollectHistory) -> Self {
        history_entity::ActiveModel {
            id: Set(h.id),
            source_id: Set(h.source_id),
            articles_count: Set(h.articles_count),
            success_count: Set(h.success_count),
            collected_at: Set(h.collected_at.into()),
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::validation::{
    validate_article_status, validate_batch_action, validate_not_blank, validate_sort_field,
    validate_sort_order, validate_url_or_empty,
};
use crate::domain::models::article::{
    ArticlePatch, ArticleQuery, ArticleSortField, ArticleStatus, NewArticle, SortOrder,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 素材列表查询参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialListQuery {
    #[validate(range(min = 1, message = "页码必须大于0"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "每页数量必须在1-100之间"))]
    pub limit: Option<u64>,
    #[validate(custom(function = "validate_article_status"))]
    pub status: Option<String>,
    pub search: Option<String>,
    #[validate(custom(function = "validate_sort_field"))]
    pub sort_by: Option<String>,
    #[validate(custom(function = "validate_sort_order"))]
    pub order: Option<String>,
}

impl MaterialListQuery {
    /// 转为领域查询条件，未提供的字段取默认值
    pub fn to_query(&self) -> ArticleQuery {
        let sort_by = match self.sort_by.as_deref() {
            Some("readCount") => ArticleSortField::ReadCount,
            Some("likeCount") => ArticleSortField::LikeCount,
            _ => ArticleSortField::CollectTime,
        };
        let order = match self.order.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };

        ArticleQuery {
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(20),
            status: self.status.as_deref().and_then(|s| s.parse().ok()),
            search: self
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sort_by,
            order,
        }
    }
}

/// 新建素材请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialDto {
    #[validate(length(min = 1, max = 200, message = "标题长度必须在1-200个字符之间"))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
    #[validate(custom(function = "validate_url_or_empty"))]
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub publish_time: Option<DateTime<Utc>>,
    pub collect_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "阅读数不能为负数"))]
    #[serde(default)]
    pub read_count: i64,
    #[validate(range(min = 0, message = "点赞数不能为负数"))]
    #[serde(default)]
    pub like_count: i64,
    #[validate(custom(function = "validate_article_status"))]
    pub status: Option<String>,
}

impl From<CreateMaterialDto> for NewArticle {
    fn from(dto: CreateMaterialDto) -> Self {
        NewArticle {
            title: dto.title,
            content: dto.content,
            source: dto.source,
            source_url: dto.source_url.filter(|u| !u.is_empty()),
            author: dto.author,
            publish_time: dto.publish_time,
            collect_time: dto.collect_time,
            tags: dto.tags,
            category: dto.category,
            read_count: dto.read_count,
            like_count: dto.like_count,
            status: dto
                .status
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// 素材部分更新请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialDto {
    #[validate(length(min = 1, max = 200, message = "标题长度必须在1-200个字符之间"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "内容不能为空"))]
    pub content: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub source: Option<String>,
    #[validate(custom(function = "validate_url_or_empty"))]
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub publish_time: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "阅读数不能为负数"))]
    pub read_count: Option<i64>,
    #[validate(range(min = 0, message = "点赞数不能为负数"))]
    pub like_count: Option<i64>,
    #[validate(custom(function = "validate_article_status"))]
    pub status: Option<String>,
}

impl From<UpdateMaterialDto> for ArticlePatch {
    fn from(dto: UpdateMaterialDto) -> Self {
        ArticlePatch {
            title: dto.title,
            content: dto.content,
            source: dto.source,
            source_url: dto.source_url,
            author: dto.author,
            publish_time: dto.publish_time,
            tags: dto.tags,
            category: dto.category,
            read_count: dto.read_count,
            like_count: dto.like_count,
            status: dto.status.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

/// 批量操作附带数据
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct BatchOperationData {
    #[validate(custom(function = "validate_article_status"))]
    pub status: Option<String>,
}

/// 素材批量操作请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct BatchOperationDto {
    #[validate(custom(function = "validate_batch_action"))]
    pub action: String,
    #[validate(length(min = 1, message = "至少需要选择一个项目"))]
    pub ids: Vec<Uuid>,
    #[validate(nested)]
    pub data: Option<BatchOperationData>,
}

/// 批量操作中成功的条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemSuccess {
    pub id: Uuid,
    pub title: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<ArticleStatus>,
}

/// 批量操作中失败的条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemFailure {
    pub id: Uuid,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchItemDetails {
    pub success: Vec<BatchItemSuccess>,
    pub failed: Vec<BatchItemFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOperationSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub details: BatchItemDetails,
}

/// 批量操作结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOperationResult {
    pub message: String,
    pub results: BatchOperationSummary,
}

/// 删除素材的返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedMaterial {
    pub id: Uuid,
    pub message: String,
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::validation::{
    validate_batch_status, validate_collect_type, validate_history_range, validate_not_blank,
    HASH_ID_REGEX,
};
use crate::domain::models::collect_history::{CollectHistory, CollectStats};
use crate::domain::models::collect_result::CollectResult;
use crate::domain::models::collect_source::{CollectSourcePatch, NewCollectSource, SourceFilter};
use crate::domain::models::hotlist::HotlistApiInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

/// 采集源列表过滤参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SourceListQuery {
    pub platform: Option<String>,
    pub is_active: Option<bool>,
}

impl From<&SourceListQuery> for SourceFilter {
    fn from(query: &SourceListQuery) -> Self {
        SourceFilter {
            platform: query.platform.clone().filter(|p| !p.is_empty()),
            is_active: query.is_active,
        }
    }
}

/// 新建采集源请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceDto {
    #[validate(length(min = 1, max = 100, message = "名称不能为空"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "平台不能为空"))]
    pub platform: String,
    #[validate(regex(path = *HASH_ID_REGEX, message = "hashId格式不正确，应为10位字母数字组合"))]
    pub hash_id: String,
    pub api_endpoint: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub config: Option<Value>,
}

impl From<CreateSourceDto> for NewCollectSource {
    fn from(dto: CreateSourceDto) -> Self {
        NewCollectSource {
            name: dto.name.trim().to_string(),
            platform: dto.platform.trim().to_string(),
            hash_id: dto.hash_id,
            api_endpoint: dto.api_endpoint,
            category: dto.category,
            description: dto.description,
            user_created: true,
            is_active: dto.is_active.unwrap_or(true),
            config: dto.config.unwrap_or_else(|| Value::Object(Default::default())),
        }
    }
}

/// 采集源部分更新请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub platform: Option<String>,
    #[validate(regex(path = *HASH_ID_REGEX, message = "hashId格式不正确，应为10位字母数字组合"))]
    pub hash_id: Option<String>,
    pub api_endpoint: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub config: Option<Value>,
}

impl From<UpdateSourceDto> for CollectSourcePatch {
    fn from(dto: UpdateSourceDto) -> Self {
        CollectSourcePatch {
            name: dto.name,
            platform: dto.platform,
            api_endpoint: dto.api_endpoint,
            hash_id: dto.hash_id,
            category: dto.category,
            description: dto.description,
            is_active: dto.is_active,
            config: dto.config,
        }
    }
}

/// `?id=` 形式的采集源定位参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct SourceIdQuery {
    pub id: Option<Uuid>,
    /// 删除时是否级联
    pub cascade: Option<bool>,
}

/// 删除采集源的返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDeleted {
    pub id: Uuid,
    pub cascade: bool,
    pub results_deleted: u64,
    pub batches_updated: u64,
}

/// 执行采集请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCollectDto {
    #[validate(length(min = 1, message = "请选择至少一个采集源"))]
    pub source_ids: Vec<Uuid>,
    #[validate(custom(function = "validate_collect_type"))]
    pub collect_type: String,
    pub keyword: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 100, message = "每个采集源的采集数量必须在1-100之间"))]
    pub limit: Option<u32>,
}

/// 执行采集的返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectOperationResult {
    /// 至少写入一条结果
    pub success: bool,
    /// 热榜返回的条目总数
    pub total: usize,
    pub collected: usize,
    pub duplicated: usize,
    /// 失败的采集源数
    pub failed: usize,
    pub batch_id: Uuid,
    pub results: Vec<CollectResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// 采集结果列表参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResultListQuery {
    pub batch_id: Option<Uuid>,
    #[validate(range(min = 1, message = "页码必须大于0"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "每页数量必须在1-100之间"))]
    pub limit: Option<u64>,
    pub only_selected: Option<bool>,
}

/// 批量勾选请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelectionDto {
    #[validate(length(min = 1, message = "请提供要更新的结果ID列表"))]
    pub ids: Vec<Uuid>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedCount {
    pub updated_count: u64,
}

/// 批量删除结果请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct DeleteResultsDto {
    #[validate(length(min = 1, message = "请提供要删除的结果ID列表"))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCount {
    pub deleted_count: u64,
}

/// 加入素材库请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToMaterialsDto {
    #[validate(length(min = 1, message = "请选择要添加到素材库的采集结果"))]
    pub result_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToMaterialsResult {
    pub added: u64,
    pub skipped: u64,
    pub total: u64,
}

/// 批次列表参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct BatchListQuery {
    #[validate(range(min = 1, message = "页码必须大于0"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "每页数量必须在1-100之间"))]
    pub limit: Option<u64>,
    #[validate(custom(function = "validate_batch_status"))]
    pub status: Option<String>,
}

/// 采集历史查询参数
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQueryDto {
    #[validate(range(min = 1, message = "页码必须大于0"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "每页数量必须在1-100之间"))]
    pub limit: Option<u64>,
    pub source_id: Option<Uuid>,
    pub platform: Option<String>,
    #[validate(custom(function = "validate_history_range"))]
    pub range: Option<String>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD，包含当天
    pub end_date: Option<String>,
    pub include_stats: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPagination {
    pub total_records: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_more: bool,
    pub records_on_page: usize,
}

/// 实际生效的过滤条件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilters {
    pub source_id: Option<Uuid>,
    pub platform: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub range: Option<String>,
}

/// 当前页汇总
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_articles: i64,
    pub total_success: i64,
    pub average_success_rate: f64,
    pub total_history_records: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub history: Vec<CollectHistory>,
    pub pagination: HistoryPagination,
    pub filters: HistoryFilters,
    pub summary: HistorySummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CollectStats>,
}

/// 连通性探测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionCheck {
    pub status: String,
    pub message: String,
}

/// 热榜服务状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub connection: ConnectionCheck,
    pub api_info: HotlistApiInfo,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

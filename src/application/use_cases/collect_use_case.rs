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


use crate::application::dto::collect_dto::{
    AddToMaterialsResult, BatchListQuery, CollectOperationResult, ConnectionCheck,
    DeletedCount, ExecuteCollectDto, HistoryFilters, HistoryPage, HistoryPagination,
    HistoryQueryDto, HistorySummary, ProviderStatus, ResultListQuery, UpdatedCount,
};
use crate::application::dto::response::{total_pages, Pagination};
use crate::application::errors::UseCaseError;
use crate::domain::models::collect_batch::{BatchStatus, CollectBatch, CollectType};
use crate::domain::models::collect_history::{success_percentage, HistoryQuery};
use crate::domain::models::collect_result::{CollectResult, ResultQuery};
use crate::domain::models::collect_source::SourceFilter;
use crate::domain::models::hotlist::HotlistNode;
use crate::domain::repositories::article_repository::ArticleRepository;
use crate::domain::repositories::collect_batch_repository::CollectBatchRepository;
use crate::domain::repositories::collect_history_repository::CollectHistoryRepository;
use crate::domain::repositories::collect_result_repository::CollectResultRepository;
use crate::domain::repositories::collect_source_repository::CollectSourceRepository;
use crate::domain::services::collect_service::{CollectPlan, CollectService, DEFAULT_COLLECT_LIMIT};
use crate::domain::services::hotlist_provider::HotlistProvider;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 热榜服务探测失败时的提示
pub const PROVIDER_UNAVAILABLE: &str = "今日热榜API连接失败，请检查网络或API密钥配置";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 采集相关用例：执行采集、结果管理、批次与历史查询
pub struct CollectUseCase {
    service: Arc<CollectService>,
    sources: Arc<dyn CollectSourceRepository>,
    batches: Arc<dyn CollectBatchRepository>,
    results: Arc<dyn CollectResultRepository>,
    history: Arc<dyn CollectHistoryRepository>,
    articles: Arc<dyn ArticleRepository>,
    provider: Arc<dyn HotlistProvider>,
}

impl CollectUseCase {
    pub fn new(
        service: Arc<CollectService>,
        sources: Arc<dyn CollectSourceRepository>,
        batches: Arc<dyn CollectBatchRepository>,
        results: Arc<dyn CollectResultRepository>,
        history: Arc<dyn CollectHistoryRepository>,
        articles: Arc<dyn ArticleRepository>,
        provider: Arc<dyn HotlistProvider>,
    ) -> Self {
        Self {
            service,
            sources,
            batches,
            results,
            history,
            articles,
            provider,
        }
    }

    /// 执行一次采集
    ///
    /// # 返回值
    ///
    /// * `Ok((CollectOperationResult, String))` - 执行汇总与提示信息
    /// * `Err(UseCaseError)` - 参数错误或批次读写失败
    pub async fn execute(
        &self,
        dto: ExecuteCollectDto,
    ) -> Result<(CollectOperationResult, String), UseCaseError> {
        let collect_type = CollectType::from_str(&dto.collect_type)
            .map_err(|_| UseCaseError::validation("参数验证失败: collectType: 采集类型不正确"))?;
        let keyword = dto
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if collect_type == CollectType::Keyword && keyword.is_none() {
            return Err(UseCaseError::validation("关键词采集时必须提供关键词"));
        }

        let name = dto
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_batch_name(collect_type, Utc::now()));

        let plan = CollectPlan {
            source_ids: dto.source_ids,
            collect_type,
            keyword,
            name,
            description: dto.description,
            limit: dto
                .limit
                .map(|l| l as usize)
                .unwrap_or(DEFAULT_COLLECT_LIMIT),
        };

        let report = self.service.execute(&plan).await?;
        let collected = report.collected();
        let message = format!("采集完成！成功采集 {} 篇文章", collected);
        let result = CollectOperationResult {
            success: collected > 0,
            total: report.fetched,
            collected,
            duplicated: report.fetched.saturating_sub(collected),
            failed: report.failed(),
            batch_id: report.batch.id,
            errors: (!report.errors.is_empty()).then(|| report.errors.clone()),
            results: report.results,
        };
        Ok((result, message))
    }

    /// 分页查询采集结果
    pub async fn list_results(
        &self,
        query: &ResultListQuery,
    ) -> Result<(Vec<CollectResult>, Pagination), UseCaseError> {
        let defaults = ResultQuery::default();
        let query = ResultQuery {
            batch_id: query.batch_id,
            only_selected: query.only_selected.unwrap_or(false),
            page: query.page.unwrap_or(defaults.page),
            limit: query.limit.unwrap_or(defaults.limit),
        };
        let (results, total) = self.results.list(&query).await?;
        let pagination = Pagination::new(query.page, query.limit, total).with_has_more();
        Ok((results, pagination))
    }

    pub async fn update_selection(
        &self,
        ids: &[Uuid],
        selected: bool,
    ) -> Result<(UpdatedCount, String), UseCaseError> {
        let updated_count = self.results.set_selected(ids, selected).await?;
        Ok((
            UpdatedCount { updated_count },
            format!("成功更新 {} 条采集结果的选中状态", updated_count),
        ))
    }

    pub async fn delete_results(
        &self,
        ids: &[Uuid],
    ) -> Result<(DeletedCount, String), UseCaseError> {
        let deleted_count = self.results.delete_many(ids).await?;
        info!(deleted = deleted_count, "Collect results deleted");
        Ok((
            DeletedCount { deleted_count },
            format!("成功删除 {} 条采集结果", deleted_count),
        ))
    }

    /// 把采集结果加入素材库
    ///
    /// 已加入、不存在，或素材库中已有相同标题与链接的结果记为跳过
    pub async fn add_to_materials(
        &self,
        ids: &[Uuid],
    ) -> Result<(AddToMaterialsResult, String), UseCaseError> {
        let mut duplicates = Vec::new();
        for result in self.results.find_by_ids(ids).await? {
            if result.added_to_materials {
                continue;
            }
            if self
                .articles
                .exists(&result.title, result.source_url.clone())
                .await?
            {
                duplicates.push(result.id);
            }
        }

        let added = self
            .results
            .promote_to_materials(ids, &duplicates, Utc::now())
            .await?;
        let total = ids.len() as u64;
        let skipped = total.saturating_sub(added);

        let mut message = format!("成功添加 {} 条采集结果到素材库", added);
        if skipped > 0 {
            message.push_str(&format!("，跳过 {} 条（已存在或已添加）", skipped));
        }
        info!(
            added,
            skipped,
            duplicates = duplicates.len(),
            "Collect results promoted to materials"
        );
        Ok((
            AddToMaterialsResult {
                added,
                skipped,
                total,
            },
            message,
        ))
    }

    pub async fn list_batches(
        &self,
        query: &BatchListQuery,
    ) -> Result<(Vec<CollectBatch>, Pagination), UseCaseError> {
        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(20);
        let status = match query.status.as_deref() {
            Some(s) => Some(
                BatchStatus::from_str(s)
                    .map_err(|_| UseCaseError::validation("参数验证失败: status: 批次状态不正确"))?,
            ),
            None => None,
        };
        let (batches, total) = self.batches.list(page, limit, status).await?;
        Ok((batches, Pagination::new(page, limit, total).with_has_more()))
    }

    /// 查询采集历史
    ///
    /// 显式日期优先于 `range`；`platform` 先解析为该平台下的采集源再过滤
    pub async fn history(
        &self,
        dto: &HistoryQueryDto,
    ) -> Result<(HistoryPage, String), UseCaseError> {
        let page = dto.page.unwrap_or(1);
        let limit = dto.limit.unwrap_or(20);
        let now = Utc::now();

        let (range_start, range_end) = range_dates(dto.range.as_deref(), now);
        let start_date = dto.start_date.clone().or(range_start);
        let end_date = dto.end_date.clone().or(range_end);
        let start = start_date.as_deref().map(day_start).transpose()?;
        let end = end_date.as_deref().map(day_end).transpose()?;

        let source_ids = self.scope_sources(dto.source_id, dto.platform.as_deref()).await?;
        let query = HistoryQuery {
            source_ids,
            start,
            end,
            page,
            limit,
        };
        let (history, total) = self.history.list(&query).await?;

        let total_articles: i64 = history.iter().map(|h| h.articles_count as i64).sum();
        let total_success: i64 = history.iter().map(|h| h.success_count as i64).sum();

        let stats = if dto.include_stats.unwrap_or(true) {
            match self.history.stats(now).await {
                Ok(stats) => Some(stats),
                Err(e) => {
                    warn!(error = %e, "Failed to load collect stats");
                    None
                }
            }
        } else {
            None
        };

        let message = format!("获取到 {} 条采集历史记录", history.len());
        let page_data = HistoryPage {
            pagination: HistoryPagination {
                total_records: total,
                current_page: page,
                total_pages: total_pages(total, limit),
                has_more: page.saturating_mul(limit) < total,
                records_on_page: history.len(),
            },
            filters: HistoryFilters {
                source_id: dto.source_id,
                platform: dto.platform.clone(),
                start_date,
                end_date,
                range: dto.range.clone(),
            },
            summary: HistorySummary {
                total_articles,
                total_success,
                average_success_rate: success_percentage(total_success, total_articles),
                total_history_records: total,
            },
            stats,
            history,
        };
        Ok((page_data, message))
    }

    async fn scope_sources(
        &self,
        source_id: Option<Uuid>,
        platform: Option<&str>,
    ) -> Result<Option<Vec<Uuid>>, UseCaseError> {
        let Some(platform) = platform.filter(|p| !p.is_empty()) else {
            return Ok(source_id.map(|id| vec![id]));
        };

        let filter = SourceFilter {
            platform: Some(platform.to_string()),
            is_active: None,
        };
        let ids = self
            .sources
            .list(&filter)
            .await?
            .into_iter()
            .map(|s| s.id)
            .filter(|id| source_id.map_or(true, |wanted| wanted == *id))
            .collect();
        Ok(Some(ids))
    }

    /// 探测热榜服务
    pub async fn provider_status(&self) -> Result<ProviderStatus, UseCaseError> {
        if !self.provider.test_connection().await {
            warn!("Hotlist provider ping failed");
            return Err(UseCaseError::Unavailable(PROVIDER_UNAVAILABLE.to_string()));
        }
        Ok(ProviderStatus {
            connection: ConnectionCheck {
                status: "connected".to_string(),
                message: "今日热榜API连接正常".to_string(),
            },
            api_info: self.provider.api_info(),
            timestamp: Utc::now(),
        })
    }

    pub async fn nodes(&self) -> Result<Vec<HotlistNode>, UseCaseError> {
        Ok(self.provider.list_nodes().await?)
    }
}

/// 默认批次名：`关键词采集任务_<毫秒时间戳>` 或 `一键采集任务_<毫秒时间戳>`
pub fn default_batch_name(collect_type: CollectType, now: DateTime<Utc>) -> String {
    let prefix = match collect_type {
        CollectType::Keyword => "关键词",
        CollectType::Full => "一键",
    };
    format!("{}采集任务_{}", prefix, now.timestamp_millis())
}

/// `today` / `week` / `month` 对应的起止日期
fn range_dates(range: Option<&str>, now: DateTime<Utc>) -> (Option<String>, Option<String>) {
    let days = match range {
        Some("today") => 0,
        Some("week") => 7,
        Some("month") => 30,
        _ => return (None, None),
    };
    let today = now.format(DATE_FORMAT).to_string();
    let start = (now - Duration::days(days)).format(DATE_FORMAT).to_string();
    (Some(start), Some(today))
}

fn parse_date(value: &str) -> Result<NaiveDate, UseCaseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| UseCaseError::validation(format!("日期格式不正确，应为YYYY-MM-DD: {}", value)))
}

fn day_start(value: &str) -> Result<DateTime<Utc>, UseCaseError> {
    let date = parse_date(value)?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| UseCaseError::validation(format!("日期格式不正确，应为YYYY-MM-DD: {}", value)))
}

/// 结束日期包含当天
fn day_end(value: &str) -> Result<DateTime<Utc>, UseCaseError> {
    let date = parse_date(value)?;
    date.and_hms_micro_opt(23, 59, 59, 999_999)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| UseCaseError::validation(format!("日期格式不正确，应为YYYY-MM-DD: {}", value)))
}

#[cfg(test)]
#[path = "collect_use_case_test.rs"]
mod tests;

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


use crate::domain::models::collect_batch::{BatchOutcome, BatchStatus, CollectBatch, CollectType};
use crate::domain::models::collect_history::CollectHistory;
use crate::domain::models::collect_result::CollectResult;
use crate::domain::models::collect_source::CollectSource;
use crate::domain::models::hotlist::{HotlistItem, SearchQuery};
use crate::domain::repositories::collect_batch_repository::CollectBatchRepository;
use crate::domain::repositories::collect_result_repository::CollectResultRepository;
use crate::domain::repositories::collect_source_repository::CollectSourceRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::hotlist_provider::HotlistProvider;
use crate::infrastructure::metrics::{
    COLLECT_BATCHES_TOTAL, COLLECT_DURATION_SECONDS, COLLECT_RESULTS_CREATED_TOTAL,
    COLLECT_SOURCES_FAILED_TOTAL,
};
use crate::utils::hot_value::parse_hot_value;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 每个采集源默认采集的条目数
pub const DEFAULT_COLLECT_LIMIT: usize = 20;

/// 一次采集任务的参数
#[derive(Debug, Clone, PartialEq)]
pub struct CollectPlan {
    pub source_ids: Vec<Uuid>,
    pub collect_type: CollectType,
    pub keyword: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// 每个采集源最多保留的条目数
    pub limit: usize,
}

/// 采集任务执行结果
#[derive(Debug, Clone)]
pub struct CollectReport {
    pub batch: CollectBatch,
    /// 本次写入的全部结果
    pub results: Vec<CollectResult>,
    /// 热榜返回的条目总数
    pub fetched: usize,
    /// 每个失败采集源一条，形如 `名称: 原因`
    pub errors: Vec<String>,
}

impl CollectReport {
    pub fn collected(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

/// 采集服务
///
/// 按顺序对每个采集源请求一次热榜数据并写入结果，
/// 单个采集源失败只记录为错误，不影响其他采集源
pub struct CollectService {
    sources: Arc<dyn CollectSourceRepository>,
    batches: Arc<dyn CollectBatchRepository>,
    results: Arc<dyn CollectResultRepository>,
    provider: Arc<dyn HotlistProvider>,
}

impl CollectService {
    pub fn new(
        sources: Arc<dyn CollectSourceRepository>,
        batches: Arc<dyn CollectBatchRepository>,
        results: Arc<dyn CollectResultRepository>,
        provider: Arc<dyn HotlistProvider>,
    ) -> Self {
        Self {
            sources,
            batches,
            results,
            provider,
        }
    }

    /// 执行采集任务
    ///
    /// 先创建 running 状态的批次，逐个采集源抓取并写入，最后写入批次终态。
    /// 所有采集源都失败时批次为 failed。
    ///
    /// # 返回值
    ///
    /// * `Ok(CollectReport)` - 执行汇总
    /// * `Err(RepositoryError)` - 批次创建或收尾失败
    pub async fn execute(&self, plan: &CollectPlan) -> Result<CollectReport, RepositoryError> {
        let started = Instant::now();
        let now = Utc::now();

        let batch = CollectBatch {
            id: Uuid::new_v4(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            collect_type: plan.collect_type,
            keyword: plan.keyword.clone(),
            source_ids: plan.source_ids.clone(),
            total_count: 0,
            success_count: 0,
            error_count: 0,
            status: BatchStatus::Running,
            started_at: Some(now),
            completed_at: None,
            created_at: now,
        };
        let batch = self.batches.create(&batch).await?;
        info!(
            batch_id = %batch.id,
            sources = plan.source_ids.len(),
            collect_type = %plan.collect_type,
            "Collect batch started"
        );

        let sources = match self.sources.find_by_ids(&plan.source_ids).await {
            Ok(found) => found
                .into_iter()
                .map(|s| (s.id, s))
                .collect::<HashMap<Uuid, CollectSource>>(),
            Err(e) => {
                self.compensate(batch.id, 0, 0).await;
                return Err(e);
            }
        };

        let mut results = Vec::new();
        let mut errors = Vec::new();
        let mut fetched = 0usize;

        for source_id in &plan.source_ids {
            let source = match sources.get(source_id) {
                Some(source) if source.is_active => source,
                Some(source) => {
                    warn!(source_id = %source_id, "Skipping disabled source");
                    errors.push(format!("采集源已禁用: {}", source.name));
                    continue;
                }
                None => {
                    warn!(source_id = %source_id, "Skipping missing source");
                    errors.push(format!("采集源不存在: {}", source_id));
                    continue;
                }
            };

            match self.collect_source(source, plan, batch.id).await {
                Ok((count, created)) => {
                    info!(
                        source = %source.name,
                        fetched = count,
                        created = created.len(),
                        "Source collected"
                    );
                    fetched += count;
                    results.extend(created);
                }
                Err(message) => {
                    error!(source = %source.name, error = %message, "Source collect failed");
                    errors.push(format!("{}: {}", source.name, message));
                }
            }
        }

        counter!(COLLECT_SOURCES_FAILED_TOTAL).increment(errors.len() as u64);
        counter!(COLLECT_RESULTS_CREATED_TOTAL).increment(results.len() as u64);

        let outcome = BatchOutcome::from_counts(
            fetched as i32,
            results.len() as i32,
            errors.len() as i32,
            plan.source_ids.len(),
            Utc::now(),
        );
        let batch = match self.batches.finish(batch.id, &outcome).await {
            Ok(batch) => batch,
            Err(e) => {
                error!(batch_id = %batch.id, error = %e, "Failed to finalize collect batch");
                self.compensate(batch.id, fetched as i32, results.len() as i32)
                    .await;
                return Err(e);
            }
        };

        counter!(COLLECT_BATCHES_TOTAL, "status" => batch.status.to_string()).increment(1);
        histogram!(COLLECT_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
        info!(
            batch_id = %batch.id,
            status = %batch.status,
            total = fetched,
            collected = results.len(),
            failed = errors.len(),
            "Collect batch finished"
        );

        Ok(CollectReport {
            batch,
            results,
            fetched,
            errors,
        })
    }

    /// 抓取单个采集源并在同一事务中写入结果与历史
    async fn collect_source(
        &self,
        source: &CollectSource,
        plan: &CollectPlan,
        batch_id: Uuid,
    ) -> Result<(usize, Vec<CollectResult>), String> {
        let keyword = match plan.collect_type {
            CollectType::Keyword => plan.keyword.as_deref().filter(|k| !k.trim().is_empty()),
            CollectType::Full => None,
        };

        let mut items = match keyword {
            Some(keyword) => {
                let query = SearchQuery::new(keyword).within(source.hash_id.clone());
                self.provider
                    .search(&query)
                    .await
                    .map_err(|e| e.to_string())?
                    .items
            }
            None => {
                self.provider
                    .node_detail(&source.hash_id)
                    .await
                    .map_err(|e| e.to_string())?
                    .items
            }
        };
        items.truncate(plan.limit);

        let now = Utc::now();
        let results: Vec<CollectResult> = items
            .iter()
            .map(|item| result_from_item(item, source, batch_id, keyword, now))
            .collect();

        let history = CollectHistory {
            id: Uuid::new_v4(),
            source_id: source.id,
            articles_count: items.len() as i32,
            success_count: results.len() as i32,
            collected_at: now,
            source: None,
        };
        self.results
            .record_source_run(&results, &history)
            .await
            .map_err(|e| e.to_string())?;

        Ok((items.len(), results))
    }

    /// 收尾失败时把批次标记为 failed
    async fn compensate(&self, batch_id: Uuid, total: i32, success: i32) {
        let outcome = BatchOutcome {
            total_count: total,
            success_count: success,
            error_count: 1,
            status: BatchStatus::Failed,
            completed_at: Utc::now(),
        };
        if let Err(e) = self.batches.finish(batch_id, &outcome).await {
            error!(batch_id = %batch_id, error = %e, "Failed to mark collect batch as failed");
        }
        counter!(COLLECT_BATCHES_TOTAL, "status" => BatchStatus::Failed.to_string()).increment(1);
    }
}

/// 把热榜条目转为采集结果
pub fn result_from_item(
    item: &HotlistItem,
    source: &CollectSource,
    batch_id: Uuid,
    keyword: Option<&str>,
    now: DateTime<Utc>,
) -> CollectResult {
    CollectResult {
        id: Uuid::new_v4(),
        title: item.display_title(),
        content: item.summary(),
        source: source.name.clone(),
        source_url: item.link_url(),
        author: item.author.clone().filter(|a| !a.is_empty()),
        publish_time: None,
        collect_time: now,
        tags: Vec::new(),
        category: source.category.clone(),
        read_count: parse_hot_value(item.extra_text().as_deref()),
        like_count: 0,
        source_id: source.id,
        collect_batch_id: batch_id,
        keyword: keyword.map(str::to_string),
        is_selected: false,
        added_to_materials: false,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
#[path = "collect_service_test.rs"]
mod tests;

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


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collect_source::CollectSource;

/// 采集历史，每次成功拉取一个采集源记录一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectHistory {
    pub id: Uuid,
    pub source_id: Uuid,
    /// 热榜返回的条目数
    pub articles_count: i32,
    /// 实际写入的条目数
    pub success_count: i32,
    pub collected_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<CollectSource>,
}

/// 采集历史查询条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    /// 限定的采集源集合，`None` 表示不过滤
    pub source_ids: Option<Vec<Uuid>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub page: u64,
    pub limit: u64,
}

/// 采集概览统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectStats {
    pub total_sources: u64,
    pub active_sources: u64,
    pub total_collects: u64,
    pub today_collects: u64,
    pub total_articles: i64,
    /// 成功率（百分比，保留两位小数）
    pub success_rate: f64,
    pub last_collect_time: Option<DateTime<Utc>>,
}

/// 百分比并保留两位小数，分母为 0 时返回 0
pub fn success_percentage(success: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let rate = success as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

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

/// 采集结果，尚未加入素材库的暂存条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectResult {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub source: String,
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub publish_time: Option<DateTime<Utc>>,
    pub collect_time: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub read_count: i64,
    pub like_count: i64,
    /// 所属采集源
    pub source_id: Uuid,
    /// 所属批次
    pub collect_batch_id: Uuid,
    pub keyword: Option<String>,
    /// 用户是否勾选
    pub is_selected: bool,
    /// 是否已加入素材库
    pub added_to_materials: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 采集结果列表查询条件
#[derive(Debug, Clone, PartialEq)]
pub struct ResultQuery {
    pub batch_id: Option<Uuid>,
    pub only_selected: bool,
    pub page: u64,
    pub limit: u64,
}

impl Default for ResultQuery {
    fn default() -> Self {
        Self {
            batch_id: None,
            only_selected: false,
            page: 1,
            limit: 50,
        }
    }
}

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

/// 采集源
///
/// 对应热榜服务中的一个节点，以 10 位字母数字的 hashId 标识
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectSource {
    pub id: Uuid,
    /// 采集源名称
    pub name: String,
    /// 平台标签，如 wechat、weibo
    pub platform: String,
    pub api_endpoint: Option<String>,
    /// 热榜节点标识
    pub hash_id: String,
    pub category: Option<String>,
    pub description: Option<String>,
    /// 是否为用户手动创建
    pub user_created: bool,
    /// 是否启用，禁用的源在采集时会被跳过
    pub is_active: bool,
    /// 自由格式的附加配置
    pub config: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// 新建采集源所需字段
#[derive(Debug, Clone)]
pub struct NewCollectSource {
    pub name: String,
    pub platform: String,
    pub hash_id: String,
    pub api_endpoint: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub user_created: bool,
    pub is_active: bool,
    pub config: serde_json::Value,
}

impl NewCollectSource {
    pub fn into_source(self, now: DateTime<Utc>) -> CollectSource {
        CollectSource {
            id: Uuid::new_v4(),
            name: self.name,
            platform: self.platform,
            api_endpoint: self.api_endpoint,
            hash_id: self.hash_id,
            category: self.category,
            description: self.description,
            user_created: self.user_created,
            is_active: self.is_active,
            config: self.config,
            created_at: now,
        }
    }
}

/// 采集源部分更新
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectSourcePatch {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub api_endpoint: Option<String>,
    pub hash_id: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub config: Option<serde_json::Value>,
}

impl CollectSourcePatch {
    pub fn is_empty(&self) -> bool {
        *self == CollectSourcePatch::default()
    }
}

/// 采集源被引用的情况
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUsage {
    pub results_count: u64,
    pub batches_count: u64,
}

impl SourceUsage {
    pub fn is_referenced(&self) -> bool {
        self.results_count > 0 || self.batches_count > 0
    }
}

/// 采集源列表过滤条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFilter {
    pub platform: Option<String>,
    pub is_active: Option<bool>,
}

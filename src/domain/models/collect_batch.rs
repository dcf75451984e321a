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
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 采集批次，记录一次采集任务的执行情况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectBatch {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub collect_type: CollectType,
    /// 关键词采集时使用的关键词
    pub keyword: Option<String>,
    /// 本次任务请求的采集源
    pub source_ids: Vec<Uuid>,
    /// 热榜返回的条目总数
    pub total_count: i32,
    /// 成功写入的结果条数
    pub success_count: i32,
    /// 出错的采集源数
    pub error_count: i32,
    pub status: BatchStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// 采集方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollectType {
    /// 按关键词搜索
    Keyword,
    /// 拉取节点当前全部条目
    #[default]
    Full,
}

impl fmt::Display for CollectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollectType::Keyword => write!(f, "keyword"),
            CollectType::Full => write!(f, "full"),
        }
    }
}

impl FromStr for CollectType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword" => Ok(CollectType::Keyword),
            "full" => Ok(CollectType::Full),
            _ => Err(()),
        }
    }
}

/// 批次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BatchStatus::Pending => write!(f, "pending"),
            BatchStatus::Running => write!(f, "running"),
            BatchStatus::Completed => write!(f, "completed"),
            BatchStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for BatchStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BatchStatus::Pending),
            "running" => Ok(BatchStatus::Running),
            "completed" => Ok(BatchStatus::Completed),
            "failed" => Ok(BatchStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 批次结束时写回的汇总数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub total_count: i32,
    pub success_count: i32,
    pub error_count: i32,
    pub status: BatchStatus,
    pub completed_at: DateTime<Utc>,
}

impl BatchOutcome {
    /// 得出批次终态：所有采集源都出错才算 failed
    pub fn from_counts(
        total_count: i32,
        success_count: i32,
        error_count: i32,
        requested_sources: usize,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let status = if error_count as usize >= requested_sources {
            BatchStatus::Failed
        } else {
            BatchStatus::Completed
        };
        Self {
            total_count,
            success_count,
            error_count,
            status,
            completed_at,
        }
    }
}

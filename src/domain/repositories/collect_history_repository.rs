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


use crate::domain::models::collect_history::{CollectHistory, CollectStats, HistoryQuery};
use crate::domain::repositories::repository_error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CollectHistoryRepository: Send + Sync {
    async fn create(&self, history: &CollectHistory) -> Result<CollectHistory, RepositoryError>;
    /// 分页查询历史，附带采集源信息，按采集时间倒序
    async fn list(
        &self,
        query: &HistoryQuery,
    ) -> Result<(Vec<CollectHistory>, u64), RepositoryError>;
    /// 全局统计，`now` 用于计算当日采集次数
    async fn stats(&self, now: DateTime<Utc>) -> Result<CollectStats, RepositoryError>;
}

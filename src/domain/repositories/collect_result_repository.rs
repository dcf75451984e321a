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


use crate::domain::models::collect_history::CollectHistory;
use crate::domain::models::collect_result::{CollectResult, ResultQuery};
use crate::domain::repositories::repository_error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait CollectResultRepository: Send + Sync {
    /// 在同一事务中写入一个采集源的结果与对应的历史记录
    async fn record_source_run(
        &self,
        results: &[CollectResult],
        history: &CollectHistory,
    ) -> Result<u64, RepositoryError>;
    /// 分页查询，按采集时间倒序
    async fn list(&self, query: &ResultQuery) -> Result<(Vec<CollectResult>, u64), RepositoryError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CollectResult>, RepositoryError>;
    /// 批量设置勾选状态，返回受影响行数
    async fn set_selected(&self, ids: &[Uuid], selected: bool) -> Result<u64, RepositoryError>;
    /// 批量删除，返回受影响行数
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
    /// 把尚未加入素材库的结果写入素材表并打标，返回新增素材数
    ///
    /// `duplicates` 中的结果素材库里已有同名文章，只打标不写入
    async fn promote_to_materials(
        &self,
        ids: &[Uuid],
        duplicates: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<u64, RepositoryError>;
}

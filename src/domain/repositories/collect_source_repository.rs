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


use crate::domain::models::collect_source::{
    CollectSource, CollectSourcePatch, SourceFilter, SourceUsage,
};
use crate::domain::repositories::repository_error::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 级联删除的影响范围
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub results_deleted: u64,
    pub batches_updated: u64,
}

#[async_trait]
pub trait CollectSourceRepository: Send + Sync {
    /// 按平台/启用状态过滤，按创建时间倒序
    async fn list(&self, filter: &SourceFilter) -> Result<Vec<CollectSource>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CollectSource>, RepositoryError>;
    async fn find_by_hash_id(&self, hash_id: &str)
        -> Result<Option<CollectSource>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CollectSource>, RepositoryError>;
    /// 创建采集源，hashId 重复时返回 Conflict
    async fn create(&self, source: &CollectSource) -> Result<CollectSource, RepositoryError>;
    /// 部分更新；记录不存在时返回 NotFound
    async fn update(
        &self,
        id: Uuid,
        patch: &CollectSourcePatch,
    ) -> Result<CollectSource, RepositoryError>;
    /// 统计引用该采集源的结果与批次数量
    async fn usage(&self, id: Uuid) -> Result<SourceUsage, RepositoryError>;
    /// 删除采集源及其历史记录
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
    /// 级联删除：删除结果、从批次的 sourceIds 中移除，再删除采集源
    async fn cascade_delete(&self, id: Uuid) -> Result<CascadeReport, RepositoryError>;
}

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


use crate::domain::models::collect_batch::{BatchOutcome, BatchStatus, CollectBatch};
use crate::domain::repositories::repository_error::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CollectBatchRepository: Send + Sync {
    /// 创建批次
    async fn create(&self, batch: &CollectBatch) -> Result<CollectBatch, RepositoryError>;
    /// 根据ID查找批次
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CollectBatch>, RepositoryError>;
    /// 写入批次终态与汇总数
    async fn finish(&self, id: Uuid, outcome: &BatchOutcome)
        -> Result<CollectBatch, RepositoryError>;
    /// 分页查询批次，按创建时间倒序
    async fn list(
        &self,
        page: u64,
        limit: u64,
        status: Option<BatchStatus>,
    ) -> Result<(Vec<CollectBatch>, u64), RepositoryError>;
}

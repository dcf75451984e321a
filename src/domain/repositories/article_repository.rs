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


use crate::domain::models::article::{Article, ArticlePatch, ArticleQuery, ArticleStatus};
use crate::domain::repositories::repository_error::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// 分页查询素材，返回当前页与总数
    async fn list(&self, query: &ArticleQuery) -> Result<(Vec<Article>, u64), RepositoryError>;
    /// 根据ID查找素材
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError>;
    /// 根据ID集合批量查找
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Article>, RepositoryError>;
    /// 创建素材
    async fn create(&self, article: &Article) -> Result<Article, RepositoryError>;
    /// 部分更新，同时刷新 updated_at；记录不存在时返回 NotFound
    async fn update(&self, id: Uuid, patch: &ArticlePatch) -> Result<Article, RepositoryError>;
    /// 删除素材，返回是否存在
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
    /// 批量修改状态
    async fn batch_update_status(
        &self,
        ids: &[Uuid],
        status: ArticleStatus,
    ) -> Result<u64, RepositoryError>;
    /// 批量删除
    async fn batch_delete(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
    /// 按标题（及可选链接）判断是否已存在
    async fn exists(&self, title: &str, source_url: Option<String>)
        -> Result<bool, RepositoryError>;
}

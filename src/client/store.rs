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


use crate::application::dto::collect_dto::{
    AddToMaterialsResult, BatchListQuery, CollectOperationResult, CreateSourceDto,
    ExecuteCollectDto, ResultListQuery, SourceDeleted, SourceListQuery, UpdateSourceDto,
};
use crate::application::dto::material_dto::{
    BatchOperationData, BatchOperationDto, BatchOperationResult, MaterialListQuery,
    UpdateMaterialDto,
};
use crate::client::api_client::{ClientError, DashboardApi};
use crate::client::workspace::Workspace;
use crate::domain::models::article::{Article, ArticlePatch, ArticleStatus};
use crate::domain::models::collect_batch::CollectBatch;
use crate::domain::models::collect_result::CollectResult;
use crate::domain::models::collect_source::CollectSource;
use crate::domain::models::workspace::{
    AccountPatch, AppConfig, AppConfigPatch, GeneratedImage, PublicationRecord,
    PublicationStatus, RewriteRecord, RewriteStyle, WeChatAccount,
};
use crate::domain::services::rewrite_service::RewriteDraft;
use chrono::Utc;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ClientError),
    #[error("素材不存在: {0}")]
    MaterialNotFound(Uuid),
    #[error("公众号账号不存在: {0}")]
    AccountNotFound(String),
    #[error("公众号账号未连接: {0}")]
    AccountDisconnected(String),
}

/// 控制台状态容器
///
/// 服务端数据的修改分两步：先修改本地副本，再调用接口；
/// 接口失败时整体重新拉取对应集合并返回错误，不做差异合并
pub struct AppStore<A: DashboardApi> {
    api: A,
    materials: Vec<Article>,
    material_query: MaterialListQuery,
    material_total: u64,
    sources: Vec<CollectSource>,
    source_query: SourceListQuery,
    results: Vec<CollectResult>,
    result_query: ResultListQuery,
    batches: Vec<CollectBatch>,
    workspace: Workspace,
}

impl<A: DashboardApi> AppStore<A> {
    pub fn new(api: A, workspace: Workspace) -> Self {
        Self {
            api,
            materials: Vec::new(),
            material_query: MaterialListQuery::default(),
            material_total: 0,
            sources: Vec::new(),
            source_query: SourceListQuery::default(),
            results: Vec::new(),
            result_query: ResultListQuery::default(),
            batches: Vec::new(),
            workspace,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn materials(&self) -> &[Article] {
        &self.materials
    }

    pub fn material_total(&self) -> u64 {
        self.material_total
    }

    pub fn material(&self, id: Uuid) -> Option<&Article> {
        self.materials.iter().find(|a| a.id == id)
    }

    pub fn sources(&self) -> &[CollectSource] {
        &self.sources
    }

    pub fn results(&self) -> &[CollectResult] {
        &self.results
    }

    pub fn batches(&self) -> &[CollectBatch] {
        &self.batches
    }

    pub fn rewrites(&self) -> &[RewriteRecord] {
        &self.workspace.rewrites
    }

    pub fn publications(&self) -> &[PublicationRecord] {
        &self.workspace.publications
    }

    pub fn accounts(&self) -> &[WeChatAccount] {
        &self.workspace.accounts
    }

    pub fn images(&self) -> &[GeneratedImage] {
        &self.workspace.images
    }

    pub fn config(&self) -> &AppConfig {
        &self.workspace.config
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    // ---- 素材 ----

    /// 按条件加载素材，并记住本次查询用于失败后的重新拉取
    pub async fn load_materials(&mut self, query: MaterialListQuery) -> Result<(), ClientError> {
        let page = self.api.list_materials(&query).await?;
        self.material_total = page
            .pagination
            .map(|p| p.total)
            .unwrap_or(page.items.len() as u64);
        self.materials = page.items;
        self.material_query = query;
        Ok(())
    }

    async fn refetch_materials(&mut self) {
        let query = self.material_query.clone();
        if let Err(e) = self.load_materials(query).await {
            warn!(error = %e, "Failed to refetch materials");
        }
    }

    pub async fn update_material(
        &mut self,
        id: Uuid,
        dto: UpdateMaterialDto,
    ) -> Result<Article, ClientError> {
        let patch = ArticlePatch::from(dto.clone());
        if let Some(local) = self.materials.iter_mut().find(|a| a.id == id) {
            patch.apply_to(local);
        }

        match self.api.update_material(id, &dto).await {
            Ok(article) => {
                if let Some(local) = self.materials.iter_mut().find(|a| a.id == id) {
                    *local = article.clone();
                }
                Ok(article)
            }
            Err(e) => {
                self.refetch_materials().await;
                Err(e)
            }
        }
    }

    pub async fn delete_material(&mut self, id: Uuid) -> Result<(), ClientError> {
        let before = self.materials.len();
        self.materials.retain(|a| a.id != id);
        self.material_total = self
            .material_total
            .saturating_sub((before - self.materials.len()) as u64);

        if let Err(e) = self.api.delete_material(id).await {
            self.refetch_materials().await;
            return Err(e);
        }
        Ok(())
    }

    /// 批量修改状态；部分失败时以服务端为准重新拉取
    pub async fn set_material_status(
        &mut self,
        ids: &[Uuid],
        status: ArticleStatus,
    ) -> Result<BatchOperationResult, ClientError> {
        let targets: HashSet<&Uuid> = ids.iter().collect();
        for article in self.materials.iter_mut().filter(|a| targets.contains(&a.id)) {
            article.status = status;
        }

        let dto = BatchOperationDto {
            action: "updateStatus".to_string(),
            ids: ids.to_vec(),
            data: Some(BatchOperationData {
                status: Some(status.to_string()),
            }),
        };
        self.run_batch(dto).await
    }

    pub async fn delete_materials(
        &mut self,
        ids: &[Uuid],
    ) -> Result<BatchOperationResult, ClientError> {
        let targets: HashSet<&Uuid> = ids.iter().collect();
        self.materials.retain(|a| !targets.contains(&a.id));

        let dto = BatchOperationDto {
            action: "delete".to_string(),
            ids: ids.to_vec(),
            data: None,
        };
        self.run_batch(dto).await
    }

    async fn run_batch(
        &mut self,
        dto: BatchOperationDto,
    ) -> Result<BatchOperationResult, ClientError> {
        match self.api.batch_materials(&dto).await {
            Ok(result) => {
                if result.results.failed > 0 || dto.action == "delete" {
                    self.refetch_materials().await;
                }
                Ok(result)
            }
            Err(e) => {
                self.refetch_materials().await;
                Err(e)
            }
        }
    }

    // ---- 采集源 ----

    pub async fn load_sources(&mut self, query: SourceListQuery) -> Result<(), ClientError> {
        self.sources = self.api.list_sources(&query).await?;
        self.source_query = query;
        Ok(())
    }

    async fn refetch_sources(&mut self) {
        let query = self.source_query.clone();
        if let Err(e) = self.load_sources(query).await {
            warn!(error = %e, "Failed to refetch collect sources");
        }
    }

    pub async fn create_source(&mut self, dto: CreateSourceDto) -> Result<CollectSource, ClientError> {
        let source = self.api.create_source(&dto).await?;
        self.sources.insert(0, source.clone());
        Ok(source)
    }

    pub async fn update_source(
        &mut self,
        id: Uuid,
        dto: UpdateSourceDto,
    ) -> Result<CollectSource, ClientError> {
        if let Some(local) = self.sources.iter_mut().find(|s| s.id == id) {
            apply_source_update(local, &dto);
        }

        match self.api.update_source(id, &dto).await {
            Ok(source) => {
                if let Some(local) = self.sources.iter_mut().find(|s| s.id == id) {
                    *local = source.clone();
                }
                Ok(source)
            }
            Err(e) => {
                self.refetch_sources().await;
                Err(e)
            }
        }
    }

    /// 删除采集源
    ///
    /// 被关联数据阻止时返回的错误满足 `is_related_data_conflict`，调用方可确认后级联重试
    pub async fn delete_source(
        &mut self,
        id: Uuid,
        cascade: bool,
    ) -> Result<SourceDeleted, ClientError> {
        self.sources.retain(|s| s.id != id);

        match self.api.delete_source(id, cascade).await {
            Ok(deleted) => {
                if deleted.cascade {
                    self.results.retain(|r| r.source_id != id);
                    for batch in self.batches.iter_mut() {
                        batch.source_ids.retain(|s| *s != id);
                    }
                }
                Ok(deleted)
            }
            Err(e) => {
                self.refetch_sources().await;
                Err(e)
            }
        }
    }

    // ---- 采集执行与结果 ----

    /// 执行采集，成功后结果列表替换为本次结果
    pub async fn run_collect(
        &mut self,
        dto: ExecuteCollectDto,
    ) -> Result<CollectOperationResult, ClientError> {
        let result = self.api.execute_collect(&dto).await?;
        info!(
            batch_id = %result.batch_id,
            collected = result.collected,
            failed = result.failed,
            "Collect finished"
        );
        self.results = result.results.clone();
        self.result_query = ResultListQuery {
            batch_id: Some(result.batch_id),
            ..Default::default()
        };
        if let Err(e) = self.load_batches(BatchListQuery::default()).await {
            warn!(error = %e, "Failed to refresh collect batches");
        }
        Ok(result)
    }

    pub async fn load_results(&mut self, query: ResultListQuery) -> Result<(), ClientError> {
        self.results = self.api.list_results(&query).await?.items;
        self.result_query = query;
        Ok(())
    }

    async fn refetch_results(&mut self) {
        let query = self.result_query.clone();
        if let Err(e) = self.load_results(query).await {
            warn!(error = %e, "Failed to refetch collect results");
        }
    }

    pub async fn set_result_selection(
        &mut self,
        ids: &[Uuid],
        selected: bool,
    ) -> Result<u64, ClientError> {
        let targets: HashSet<&Uuid> = ids.iter().collect();
        for result in self.results.iter_mut().filter(|r| targets.contains(&r.id)) {
            result.is_selected = selected;
        }

        match self.api.update_result_selection(ids, selected).await {
            Ok(updated) => Ok(updated.updated_count),
            Err(e) => {
                self.refetch_results().await;
                Err(e)
            }
        }
    }

    pub async fn delete_results(&mut self, ids: &[Uuid]) -> Result<u64, ClientError> {
        let targets: HashSet<&Uuid> = ids.iter().collect();
        self.results.retain(|r| !targets.contains(&r.id));

        match self.api.delete_results(ids).await {
            Ok(deleted) => Ok(deleted.deleted_count),
            Err(e) => {
                self.refetch_results().await;
                Err(e)
            }
        }
    }

    /// 加入素材库，成功后重新拉取素材列表
    pub async fn promote_results(
        &mut self,
        ids: &[Uuid],
    ) -> Result<AddToMaterialsResult, ClientError> {
        let targets: HashSet<&Uuid> = ids.iter().collect();
        for result in self.results.iter_mut().filter(|r| targets.contains(&r.id)) {
            result.added_to_materials = true;
        }

        match self.api.add_to_materials(ids).await {
            Ok(outcome) => {
                if outcome.added > 0 {
                    self.refetch_materials().await;
                }
                Ok(outcome)
            }
            Err(e) => {
                self.refetch_results().await;
                Err(e)
            }
        }
    }

    pub async fn load_batches(&mut self, query: BatchListQuery) -> Result<(), ClientError> {
        self.batches = self.api.list_batches(&query).await?.items;
        Ok(())
    }

    // ---- 本地数据 ----

    pub fn add_rewrite(&mut self, record: RewriteRecord) {
        self.workspace.rewrites.push(record);
    }

    pub fn add_publication(&mut self, record: PublicationRecord) {
        self.workspace.publications.push(record);
    }

    pub fn add_images(&mut self, images: Vec<GeneratedImage>) {
        self.workspace.images.extend(images);
    }

    /// 修改账号，账号不存在时返回 false
    pub fn update_account(&mut self, id: &str, patch: AccountPatch) -> bool {
        match self.workspace.accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn update_config(&mut self, patch: AppConfigPatch) {
        self.workspace.config.apply(patch);
    }

    async fn resolve_material(&self, id: Uuid) -> Result<Article, StoreError> {
        if let Some(article) = self.material(id) {
            return Ok(article.clone());
        }
        match self.api.get_material(id).await {
            Ok(article) => Ok(article),
            Err(e) if e.status == Some(404) => Err(StoreError::MaterialNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// 采纳改写结果
    ///
    /// 素材标题与正文替换为改写内容并标记为 rewritten，同时记录改写历史
    pub async fn save_rewrite(
        &mut self,
        article_id: Uuid,
        draft: &RewriteDraft,
        style: RewriteStyle,
        custom_prompt: Option<String>,
    ) -> Result<RewriteRecord, StoreError> {
        let original = self.resolve_material(article_id).await?;

        let dto = UpdateMaterialDto {
            title: Some(draft.title.clone()),
            content: Some(draft.content.clone()),
            status: Some(ArticleStatus::Rewritten.to_string()),
            ..Default::default()
        };
        self.update_material(article_id, dto).await?;

        let record = RewriteRecord {
            id: Uuid::new_v4(),
            article_id,
            original_title: original.title,
            rewritten_title: draft.title.clone(),
            original_content: original.content,
            rewritten_content: draft.content.clone(),
            style,
            custom_prompt,
            created_at: Utc::now(),
        };
        self.add_rewrite(record.clone());
        Ok(record)
    }

    /// 发布素材到公众号账号
    ///
    /// 账号必须已连接；服务端更新失败时记录一条 failed 发布记录并返回错误
    pub async fn publish(
        &mut self,
        article_id: Uuid,
        account_id: &str,
        images: Vec<String>,
    ) -> Result<PublicationRecord, StoreError> {
        let account = self
            .workspace
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .ok_or_else(|| StoreError::AccountNotFound(account_id.to_string()))?;
        if !account.is_connected {
            return Err(StoreError::AccountDisconnected(account.name.clone()));
        }

        let article = self.resolve_material(article_id).await?;
        let mut record = PublicationRecord {
            id: Uuid::new_v4(),
            article_id,
            account_id: account_id.to_string(),
            title: article.title,
            content: article.content,
            images,
            published_at: Utc::now(),
            status: PublicationStatus::Success,
            stats: None,
        };

        let dto = UpdateMaterialDto {
            status: Some(ArticleStatus::Published.to_string()),
            ..Default::default()
        };
        match self.update_material(article_id, dto).await {
            Ok(_) => {
                info!(%article_id, account = account_id, "Material published");
                self.add_publication(record.clone());
                Ok(record)
            }
            Err(e) => {
                warn!(%article_id, account = account_id, error = %e, "Publish failed");
                record.status = PublicationStatus::Failed;
                self.add_publication(record);
                Err(e.into())
            }
        }
    }
}

fn apply_source_update(source: &mut CollectSource, dto: &UpdateSourceDto) {
    if let Some(name) = &dto.name {
        source.name = name.clone();
    }
    if let Some(platform) = &dto.platform {
        source.platform = platform.clone();
    }
    if let Some(hash_id) = &dto.hash_id {
        source.hash_id = hash_id.clone();
    }
    if let Some(endpoint) = &dto.api_endpoint {
        source.api_endpoint = Some(endpoint.clone());
    }
    if let Some(category) = &dto.category {
        source.category = Some(category.clone());
    }
    if let Some(description) = &dto.description {
        source.description = Some(description.clone());
    }
    if let Some(is_active) = dto.is_active {
        source.is_active = is_active;
    }
    if let Some(config) = &dto.config {
        source.config = config.clone();
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

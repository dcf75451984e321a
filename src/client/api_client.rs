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
    AddToMaterialsDto, AddToMaterialsResult, BatchListQuery, CollectOperationResult,
    CreateSourceDto, DeleteResultsDto, DeletedCount, ExecuteCollectDto, HistoryPage,
    HistoryQueryDto, ProviderStatus, ResultListQuery, SourceDeleted, SourceIdQuery,
    SourceListQuery, UpdateSelectionDto, UpdateSourceDto, UpdatedCount,
};
use crate::application::dto::material_dto::{
    BatchOperationDto, BatchOperationResult, CreateMaterialDto, DeletedMaterial,
    MaterialListQuery, UpdateMaterialDto,
};
use crate::application::dto::response::{ApiResponse, Pagination};
use crate::domain::models::article::Article;
use crate::domain::models::collect_batch::CollectBatch;
use crate::domain::models::collect_result::CollectResult;
use crate::domain::models::collect_source::CollectSource;
use crate::domain::models::hotlist::HotlistNode;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// 默认服务地址
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000/api";

/// 阻止删除采集源时返回的错误码
const HAS_RELATED_DATA: &str = "HAS_RELATED_DATA";

/// 客户端错误
///
/// `status` 为空表示请求未得到 HTTP 响应
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ClientError {
    pub status: Option<u16>,
    pub message: String,
    pub details: Option<Value>,
}

impl ClientError {
    pub fn new(status: Option<u16>, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            status,
            message: message.into(),
            details,
        }
    }

    fn transport(err: reqwest::Error) -> Self {
        Self::new(
            err.status().map(|s| s.as_u16()),
            format!("API request failed: {}", err),
            None,
        )
    }

    /// 删除采集源被关联数据阻止，可改为级联删除重试
    pub fn is_related_data_conflict(&self) -> bool {
        self.status == Some(409)
            && self
                .details
                .as_ref()
                .and_then(|d| d.get("code"))
                .and_then(Value::as_str)
                == Some(HAS_RELATED_DATA)
    }

    /// 关联数据数量，`(结果数, 批次数)`
    pub fn related_counts(&self) -> Option<(u64, u64)> {
        let counts = self.details.as_ref()?.get("details")?;
        Some((
            counts.get("resultsCount")?.as_u64()?,
            counts.get("batchesCount")?.as_u64()?,
        ))
    }
}

/// 带分页信息的列表
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// 解包统一响应，失败或缺少 `data` 时返回错误
pub fn handle_api_response<T>(response: ApiResponse<T>) -> Result<T, ClientError> {
    if !response.success {
        return Err(ClientError::new(
            None,
            response.error.unwrap_or_else(|| "API request failed".to_string()),
            response.details,
        ));
    }
    response
        .data
        .ok_or_else(|| ClientError::new(None, "API response data is undefined", None))
}

/// 控制台与状态容器使用的接口集合
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_materials(&self, query: &MaterialListQuery) -> Result<Page<Article>, ClientError>;
    async fn get_material(&self, id: Uuid) -> Result<Article, ClientError>;
    async fn create_material(&self, dto: &CreateMaterialDto) -> Result<Article, ClientError>;
    async fn update_material(&self, id: Uuid, dto: &UpdateMaterialDto)
        -> Result<Article, ClientError>;
    async fn delete_material(&self, id: Uuid) -> Result<DeletedMaterial, ClientError>;
    async fn batch_materials(
        &self,
        dto: &BatchOperationDto,
    ) -> Result<BatchOperationResult, ClientError>;

    async fn list_sources(&self, query: &SourceListQuery)
        -> Result<Vec<CollectSource>, ClientError>;
    async fn create_source(&self, dto: &CreateSourceDto) -> Result<CollectSource, ClientError>;
    async fn update_source(
        &self,
        id: Uuid,
        dto: &UpdateSourceDto,
    ) -> Result<CollectSource, ClientError>;
    async fn delete_source(&self, id: Uuid, cascade: bool) -> Result<SourceDeleted, ClientError>;

    async fn execute_collect(
        &self,
        dto: &ExecuteCollectDto,
    ) -> Result<CollectOperationResult, ClientError>;
    async fn list_results(&self, query: &ResultListQuery)
        -> Result<Page<CollectResult>, ClientError>;
    async fn update_result_selection(
        &self,
        ids: &[Uuid],
        is_selected: bool,
    ) -> Result<UpdatedCount, ClientError>;
    async fn delete_results(&self, ids: &[Uuid]) -> Result<DeletedCount, ClientError>;
    async fn add_to_materials(&self, ids: &[Uuid]) -> Result<AddToMaterialsResult, ClientError>;
    async fn list_batches(&self, query: &BatchListQuery) -> Result<Page<CollectBatch>, ClientError>;
    async fn history(&self, query: &HistoryQueryDto) -> Result<HistoryPage, ClientError>;
    async fn provider_status(&self) -> Result<ProviderStatus, ClientError>;
    async fn list_nodes(&self) -> Result<Vec<HotlistNode>, ClientError>;
}

/// 基于 reqwest 的接口客户端
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(ClientError::transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// 发送请求并解析统一响应
    ///
    /// 非 2xx 时优先使用响应体中的 `error` 与 `details`；
    /// 响应体是 `success:false` 但没有 `details` 时，整个响应体作为 `details`
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = builder.send().await.map_err(ClientError::transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");

        if !status.is_success() {
            let reason = format!(
                "API request failed: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            );
            let body: Value = match response.json().await {
                Ok(body) => body,
                Err(_) => return Err(ClientError::new(Some(status.as_u16()), reason, None)),
            };
            let message = body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(reason);
            let details = match body.get("details") {
                Some(details) => Some(details.clone()),
                None if body.get("success").and_then(Value::as_bool) == Some(false) => {
                    Some(body.clone())
                }
                None => None,
            };
            warn!(status = status.as_u16(), error = %message, "API request rejected");
            return Err(ClientError::new(Some(status.as_u16()), message, details));
        }

        response.json().await.map_err(ClientError::transport)
    }

    async fn data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        handle_api_response(self.send(builder).await?)
    }

    async fn page<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Page<T>, ClientError> {
        let response = self.send::<Vec<T>>(builder).await?;
        let pagination = response.pagination.clone();
        Ok(Page {
            items: handle_api_response(response)?,
            pagination,
        })
    }

    fn get_with<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> RequestBuilder {
        self.request(Method::GET, path).query(query)
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn list_materials(&self, query: &MaterialListQuery) -> Result<Page<Article>, ClientError> {
        self.page(self.get_with("/materials", query)).await
    }

    async fn get_material(&self, id: Uuid) -> Result<Article, ClientError> {
        self.data(self.request(Method::GET, &format!("/materials/{}", id)))
            .await
    }

    async fn create_material(&self, dto: &CreateMaterialDto) -> Result<Article, ClientError> {
        self.data(self.request(Method::POST, "/materials").json(dto))
            .await
    }

    async fn update_material(
        &self,
        id: Uuid,
        dto: &UpdateMaterialDto,
    ) -> Result<Article, ClientError> {
        self.data(
            self.request(Method::PUT, &format!("/materials/{}", id))
                .json(dto),
        )
        .await
    }

    async fn delete_material(&self, id: Uuid) -> Result<DeletedMaterial, ClientError> {
        self.data(self.request(Method::DELETE, &format!("/materials/{}", id)))
            .await
    }

    async fn batch_materials(
        &self,
        dto: &BatchOperationDto,
    ) -> Result<BatchOperationResult, ClientError> {
        self.data(self.request(Method::POST, "/materials/batch").json(dto))
            .await
    }

    async fn list_sources(
        &self,
        query: &SourceListQuery,
    ) -> Result<Vec<CollectSource>, ClientError> {
        self.data(self.get_with("/collect/sources", query)).await
    }

    async fn create_source(&self, dto: &CreateSourceDto) -> Result<CollectSource, ClientError> {
        self.data(self.request(Method::POST, "/collect/sources").json(dto))
            .await
    }

    async fn update_source(
        &self,
        id: Uuid,
        dto: &UpdateSourceDto,
    ) -> Result<CollectSource, ClientError> {
        let target = SourceIdQuery {
            id: Some(id),
            cascade: None,
        };
        self.data(
            self.request(Method::PUT, "/collect/sources")
                .query(&target)
                .json(dto),
        )
        .await
    }

    async fn delete_source(&self, id: Uuid, cascade: bool) -> Result<SourceDeleted, ClientError> {
        let target = SourceIdQuery {
            id: Some(id),
            cascade: cascade.then_some(true),
        };
        self.data(self.request(Method::DELETE, "/collect/sources").query(&target))
            .await
    }

    async fn execute_collect(
        &self,
        dto: &ExecuteCollectDto,
    ) -> Result<CollectOperationResult, ClientError> {
        self.data(self.request(Method::POST, "/collect/execute").json(dto))
            .await
    }

    async fn list_results(
        &self,
        query: &ResultListQuery,
    ) -> Result<Page<CollectResult>, ClientError> {
        self.page(self.get_with("/collect/results", query)).await
    }

    async fn update_result_selection(
        &self,
        ids: &[Uuid],
        is_selected: bool,
    ) -> Result<UpdatedCount, ClientError> {
        let body = UpdateSelectionDto {
            ids: ids.to_vec(),
            is_selected,
        };
        self.data(self.request(Method::PUT, "/collect/results").json(&body))
            .await
    }

    async fn delete_results(&self, ids: &[Uuid]) -> Result<DeletedCount, ClientError> {
        let body = DeleteResultsDto { ids: ids.to_vec() };
        self.data(self.request(Method::DELETE, "/collect/results").json(&body))
            .await
    }

    async fn add_to_materials(&self, ids: &[Uuid]) -> Result<AddToMaterialsResult, ClientError> {
        let body = AddToMaterialsDto {
            result_ids: ids.to_vec(),
        };
        self.data(
            self.request(Method::POST, "/collect/add-to-materials")
                .json(&body),
        )
        .await
    }

    async fn list_batches(&self, query: &BatchListQuery) -> Result<Page<CollectBatch>, ClientError> {
        self.page(self.get_with("/collect/batches", query)).await
    }

    async fn history(&self, query: &HistoryQueryDto) -> Result<HistoryPage, ClientError> {
        self.data(self.get_with("/collect/history", query)).await
    }

    async fn provider_status(&self) -> Result<ProviderStatus, ClientError> {
        self.data(self.request(Method::GET, "/collect/provider"))
            .await
    }

    async fn list_nodes(&self) -> Result<Vec<HotlistNode>, ClientError> {
        self.data(self.request(Method::GET, "/collect/nodes")).await
    }
}

#[cfg(test)]
#[path = "api_client_test.rs"]
mod tests;

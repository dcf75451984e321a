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


use axum::{extract::Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::{
    application::{
        dto::{
            collect_dto::{
                AddToMaterialsDto, AddToMaterialsResult, BatchListQuery, CollectOperationResult,
                DeleteResultsDto, DeletedCount, ExecuteCollectDto, HistoryPage, HistoryQueryDto,
                ProviderStatus, ResultListQuery, UpdateSelectionDto, UpdatedCount,
            },
            response::ApiResponse,
        },
        use_cases::CollectUseCase,
    },
    domain::models::{
        collect_batch::CollectBatch, collect_result::CollectResult, hotlist::HotlistNode,
    },
    presentation::{
        errors::AppError,
        extractors::{ValidatedJson, ValidatedQuery},
    },
};

/// 执行采集任务
pub async fn execute_collect(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
    ValidatedJson(payload): ValidatedJson<ExecuteCollectDto>,
) -> Result<Json<ApiResponse<CollectOperationResult>>, AppError> {
    info!(
        sources = payload.source_ids.len(),
        collect_type = %payload.collect_type,
        keyword = ?payload.keyword,
        "POST /api/collect/execute"
    );
    let (result, message) = use_case.execute(payload).await?;
    Ok(Json(ApiResponse::ok(result).with_message(message)))
}

pub async fn list_results(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
    ValidatedQuery(params): ValidatedQuery<ResultListQuery>,
) -> Result<Json<ApiResponse<Vec<CollectResult>>>, AppError> {
    info!(?params, "GET /api/collect/results");
    let (results, pagination) = use_case.list_results(&params).await?;
    Ok(Json(ApiResponse::ok(results).with_pagination(pagination)))
}

/// 批量勾选/取消勾选
pub async fn update_results(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
    ValidatedJson(payload): ValidatedJson<UpdateSelectionDto>,
) -> Result<Json<ApiResponse<UpdatedCount>>, AppError> {
    info!(ids = payload.ids.len(), is_selected = payload.is_selected, "PUT /api/collect/results");
    let (updated, message) = use_case
        .update_selection(&payload.ids, payload.is_selected)
        .await?;
    Ok(Json(ApiResponse::ok(updated).with_message(message)))
}

pub async fn delete_results(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
    ValidatedJson(payload): ValidatedJson<DeleteResultsDto>,
) -> Result<Json<ApiResponse<DeletedCount>>, AppError> {
    info!(ids = payload.ids.len(), "DELETE /api/collect/results");
    let (deleted, message) = use_case.delete_results(&payload.ids).await?;
    Ok(Json(ApiResponse::ok(deleted).with_message(message)))
}

/// 把采集结果加入素材库
pub async fn add_to_materials(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
    ValidatedJson(payload): ValidatedJson<AddToMaterialsDto>,
) -> Result<Json<ApiResponse<AddToMaterialsResult>>, AppError> {
    info!(ids = payload.result_ids.len(), "POST /api/collect/add-to-materials");
    let (result, message) = use_case.add_to_materials(&payload.result_ids).await?;
    Ok(Json(ApiResponse::ok(result).with_message(message)))
}

pub async fn list_batches(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
    ValidatedQuery(params): ValidatedQuery<BatchListQuery>,
) -> Result<Json<ApiResponse<Vec<CollectBatch>>>, AppError> {
    info!(?params, "GET /api/collect/batches");
    let (batches, pagination) = use_case.list_batches(&params).await?;
    Ok(Json(ApiResponse::ok(batches).with_pagination(pagination)))
}

/// 采集历史与统计
pub async fn collect_history(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
    ValidatedQuery(params): ValidatedQuery<HistoryQueryDto>,
) -> Result<Json<ApiResponse<HistoryPage>>, AppError> {
    info!(?params, "GET /api/collect/history");
    let (page, message) = use_case.history(&params).await?;
    Ok(Json(ApiResponse::ok(page).with_message(message)))
}

/// 热榜服务连通性
pub async fn provider_status(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
) -> Result<Json<ApiResponse<ProviderStatus>>, AppError> {
    info!("GET /api/collect/provider");
    Ok(Json(ApiResponse::ok(use_case.provider_status().await?)))
}

pub async fn list_nodes(
    Extension(use_case): Extension<Arc<CollectUseCase>>,
) -> Result<Json<ApiResponse<Vec<HotlistNode>>>, AppError> {
    info!("GET /api/collect/nodes");
    Ok(Json(ApiResponse::ok(use_case.nodes().await?)))
}

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
                CreateSourceDto, SourceDeleted, SourceIdQuery, SourceListQuery, UpdateSourceDto,
            },
            response::ApiResponse,
        },
        use_cases::CollectSourceUseCase,
    },
    domain::models::collect_source::{CollectSource, SourceFilter},
    presentation::{
        errors::AppError,
        extractors::{ValidatedJson, ValidatedQuery},
    },
};

pub async fn list_sources(
    Extension(use_case): Extension<Arc<CollectSourceUseCase>>,
    ValidatedQuery(params): ValidatedQuery<SourceListQuery>,
) -> Result<Json<ApiResponse<Vec<CollectSource>>>, AppError> {
    info!(?params, "GET /api/collect/sources");
    let sources = use_case.list(&SourceFilter::from(&params)).await?;
    Ok(Json(ApiResponse::ok(sources)))
}

/// 新建采集源，hashId 重复返回 409
pub async fn create_source(
    Extension(use_case): Extension<Arc<CollectSourceUseCase>>,
    ValidatedJson(payload): ValidatedJson<CreateSourceDto>,
) -> Result<Json<ApiResponse<CollectSource>>, AppError> {
    info!(name = %payload.name, hash_id = %payload.hash_id, "POST /api/collect/sources");
    let source = use_case.create(payload).await?;
    Ok(Json(ApiResponse::ok(source).with_message("采集源创建成功")))
}

pub async fn update_source(
    Extension(use_case): Extension<Arc<CollectSourceUseCase>>,
    ValidatedQuery(target): ValidatedQuery<SourceIdQuery>,
    ValidatedJson(payload): ValidatedJson<UpdateSourceDto>,
) -> Result<Json<ApiResponse<CollectSource>>, AppError> {
    info!(id = ?target.id, "PUT /api/collect/sources");
    let source = use_case.update(target.id, payload).await?;
    Ok(Json(ApiResponse::ok(source).with_message("采集源更新成功")))
}

/// 删除采集源
///
/// 未指定 `cascade=true` 且存在关联数据时返回 409，`details.code` 为 `HAS_RELATED_DATA`
pub async fn delete_source(
    Extension(use_case): Extension<Arc<CollectSourceUseCase>>,
    ValidatedQuery(target): ValidatedQuery<SourceIdQuery>,
) -> Result<Json<ApiResponse<SourceDeleted>>, AppError> {
    let cascade = target.cascade.unwrap_or(false);
    info!(id = ?target.id, cascade, "DELETE /api/collect/sources");
    let (deleted, message) = use_case.delete(target.id, cascade).await?;
    Ok(Json(ApiResponse::ok(deleted).with_message(message)))
}

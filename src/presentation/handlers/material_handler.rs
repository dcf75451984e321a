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
            material_dto::{
                BatchOperationDto, BatchOperationResult, CreateMaterialDto, DeletedMaterial,
                MaterialListQuery, UpdateMaterialDto,
            },
            response::ApiResponse,
        },
        use_cases::MaterialUseCase,
    },
    domain::models::article::Article,
    presentation::{
        errors::AppError,
        extractors::{MaterialId, ValidatedJson, ValidatedQuery},
    },
};

/// 分页查询素材
pub async fn list_materials(
    Extension(use_case): Extension<Arc<MaterialUseCase>>,
    ValidatedQuery(params): ValidatedQuery<MaterialListQuery>,
) -> Result<Json<ApiResponse<Vec<Article>>>, AppError> {
    info!(?params, "GET /api/materials");
    let (articles, pagination) = use_case.list(&params.to_query()).await?;
    Ok(Json(ApiResponse::ok(articles).with_pagination(pagination)))
}

/// 新建素材
pub async fn create_material(
    Extension(use_case): Extension<Arc<MaterialUseCase>>,
    ValidatedJson(payload): ValidatedJson<CreateMaterialDto>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    info!(title = %payload.title, "POST /api/materials");
    let article = use_case.create(payload).await?;
    Ok(Json(ApiResponse::ok(article)))
}

pub async fn get_material(
    Extension(use_case): Extension<Arc<MaterialUseCase>>,
    MaterialId(id): MaterialId,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    info!(%id, "GET /api/materials/{{id}}");
    Ok(Json(ApiResponse::ok(use_case.get(id).await?)))
}

/// 部分更新素材
pub async fn update_material(
    Extension(use_case): Extension<Arc<MaterialUseCase>>,
    MaterialId(id): MaterialId,
    ValidatedJson(payload): ValidatedJson<UpdateMaterialDto>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    info!(%id, "PUT /api/materials/{{id}}");
    Ok(Json(ApiResponse::ok(use_case.update(id, payload).await?)))
}

pub async fn delete_material(
    Extension(use_case): Extension<Arc<MaterialUseCase>>,
    MaterialId(id): MaterialId,
) -> Result<Json<ApiResponse<DeletedMaterial>>, AppError> {
    info!(%id, "DELETE /api/materials/{{id}}");
    Ok(Json(ApiResponse::ok(use_case.delete(id).await?)))
}

/// 批量删除或修改状态
pub async fn batch_materials(
    Extension(use_case): Extension<Arc<MaterialUseCase>>,
    ValidatedJson(payload): ValidatedJson<BatchOperationDto>,
) -> Result<Json<ApiResponse<BatchOperationResult>>, AppError> {
    info!(action = %payload.action, ids = payload.ids.len(), "POST /api/materials/batch");
    Ok(Json(ApiResponse::ok(use_case.batch(payload).await?)))
}

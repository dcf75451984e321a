// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::{CollectSourceUseCase, CollectUseCase, MaterialUseCase};
use crate::domain::repositories::article_repository::ArticleRepository;
use crate::domain::repositories::collect_source_repository::CollectSourceRepository;
use crate::domain::services::collect_service::CollectService;
use crate::domain::services::hotlist_provider::HotlistProvider;
use crate::infrastructure::repositories::{
    article_repo_impl::ArticleRepositoryImpl, collect_batch_repo_impl::CollectBatchRepositoryImpl,
    collect_history_repo_impl::CollectHistoryRepositoryImpl,
    collect_result_repo_impl::CollectResultRepositoryImpl,
    collect_source_repo_impl::CollectSourceRepositoryImpl,
};
use crate::presentation::handlers::{collect_handler, collect_source_handler, material_handler};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 接口层依赖的全部用例
#[derive(Clone)]
pub struct AppServices {
    pub materials: Arc<MaterialUseCase>,
    pub sources: Arc<CollectSourceUseCase>,
    pub collect: Arc<CollectUseCase>,
}

impl AppServices {
    /// 基于数据库连接与热榜服务组装仓库和用例
    pub fn new(db: Arc<DatabaseConnection>, provider: Arc<dyn HotlistProvider>) -> Self {
        let articles: Arc<dyn ArticleRepository> =
            Arc::new(ArticleRepositoryImpl::new(db.clone()));
        let sources: Arc<dyn CollectSourceRepository> =
            Arc::new(CollectSourceRepositoryImpl::new(db.clone()));
        let batches = Arc::new(CollectBatchRepositoryImpl::new(db.clone()));
        let results = Arc::new(CollectResultRepositoryImpl::new(db.clone()));
        let history = Arc::new(CollectHistoryRepositoryImpl::new(db));

        let service = Arc::new(CollectService::new(
            sources.clone(),
            batches.clone(),
            results.clone(),
            provider.clone(),
        ));

        Self {
            materials: Arc::new(MaterialUseCase::new(articles.clone())),
            sources: Arc::new(CollectSourceUseCase::new(sources.clone())),
            collect: Arc::new(CollectUseCase::new(
                service, sources, batches, results, history, articles, provider,
            )),
        }
    }
}

/// `/api` 下的业务路由
pub fn api_routes() -> Router {
    Router::new()
        .route(
            "/materials",
            get(material_handler::list_materials).post(material_handler::create_material),
        )
        .route("/materials/batch", post(material_handler::batch_materials))
        .route(
            "/materials/{id}",
            get(material_handler::get_material)
                .put(material_handler::update_material)
                .delete(material_handler::delete_material),
        )
        .route(
            "/collect/sources",
            get(collect_source_handler::list_sources)
                .post(collect_source_handler::create_source)
                .put(collect_source_handler::update_source)
                .delete(collect_source_handler::delete_source),
        )
        .route("/collect/execute", post(collect_handler::execute_collect))
        .route(
            "/collect/results",
            get(collect_handler::list_results)
                .put(collect_handler::update_results)
                .delete(collect_handler::delete_results),
        )
        .route(
            "/collect/add-to-materials",
            post(collect_handler::add_to_materials),
        )
        .route("/collect/batches", get(collect_handler::list_batches))
        .route("/collect/history", get(collect_handler::collect_history))
        .route("/collect/provider", get(collect_handler::provider_status))
        .route("/collect/nodes", get(collect_handler::list_nodes))
}

/// 允许任意来源的 CORS 配置
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// 创建应用路由
///
/// # 返回值
///
/// 挂载了用例、CORS 与请求追踪的完整路由
pub fn routes(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .nest("/api", api_routes())
        .layer(Extension(services.materials))
        .layer(Extension(services.sources))
        .layer(Extension(services.collect))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

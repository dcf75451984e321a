// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义数据持久化的抽象契约，具体实现由基础设施层基于 sea-orm 提供。
///
/// 包含的仓库接口：
/// - 素材仓库（article_repository）
/// - 采集源仓库（collect_source_repository）：含引用统计与级联删除
/// - 采集批次仓库（collect_batch_repository）
/// - 采集结果仓库（collect_result_repository）：含加入素材库
/// - 采集历史仓库（collect_history_repository）：含全局统计
pub mod article_repository;
pub mod collect_batch_repository;
pub mod collect_history_repository;
pub mod collect_result_repository;
pub mod collect_source_repository;
pub mod repository_error;

pub use repository_error::RepositoryError;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的 sea-orm 实现
pub mod article_repo_impl;
pub mod collect_batch_repo_impl;
pub mod collect_history_repo_impl;
pub mod collect_result_repo_impl;
pub mod collect_source_repo_impl;
pub mod mapping;

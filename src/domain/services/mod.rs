// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 采集服务（collect_service）：按采集源抓取热榜并写入批次结果
/// - 热榜接口（hotlist_provider）：外部热榜服务的抽象
/// - 改写服务（rewrite_service）：AI 改写与配图
pub mod collect_service;
pub mod hotlist_provider;
pub mod rewrite_service;

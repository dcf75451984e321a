// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与数据库、热榜服务等外部系统交互。
///
/// 包含的子模块：
/// - 数据库（database）：提供数据库连接和实体映射
/// - 热榜（hotlist）：今日热榜接口客户端
/// - 指标（metrics）：采集相关的 Prometheus 指标
/// - 仓库实现（repositories）：提供领域仓库接口的具体实现
pub mod database;
pub mod hotlist;
pub mod metrics;
pub mod repositories;

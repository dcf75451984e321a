// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供日志初始化与热度文本解析等辅助功能
pub mod hot_value;
pub mod telemetry;

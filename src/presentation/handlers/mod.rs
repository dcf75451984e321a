// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 处理器模块
///
/// 每个处理器只负责参数提取、调用用例与包装响应
pub mod collect_handler;
pub mod collect_source_handler;
pub mod material_handler;

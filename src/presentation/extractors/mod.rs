// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求提取器模块
///
/// 解析请求参数并执行校验，失败时直接返回统一的错误响应
pub mod validated;

pub use validated::{MaterialId, ValidatedJson, ValidatedQuery};

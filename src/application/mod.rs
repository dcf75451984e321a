// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求/响应 DTO、用例实现与用例层错误
pub mod dto;
pub mod errors;
pub mod use_cases;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义接口层的请求与响应结构，以及基于 validator 的参数校验
pub mod collect_dto;
pub mod material_dto;
pub mod response;
pub mod validation;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 服务端接口客户端
pub mod api_client;
/// 控制台状态容器
pub mod store;
/// 本地工作区文件
pub mod workspace;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 外部热榜服务接入
pub mod tophub_client;

pub use tophub_client::TophubClient;

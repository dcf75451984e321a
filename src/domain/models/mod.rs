// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 素材、采集源、采集批次/结果/历史，以及仅存在于客户端的改写、发布、账号和设置记录
pub mod article;
pub mod collect_batch;
pub mod collect_history;
pub mod collect_result;
pub mod collect_source;
pub mod hotlist;
pub mod workspace;

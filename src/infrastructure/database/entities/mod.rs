// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// sea-orm 实体定义，与 migration crate 中的表结构一一对应
pub mod article;
pub mod collect_batch;
pub mod collect_history;
pub mod collect_result;
pub mod collect_source;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 每个用例封装一组接口背后的业务流程，接口层只负责参数与响应转换
pub mod collect_source_use_case;
pub mod collect_use_case;
pub mod material_use_case;

pub use collect_source_use_case::CollectSourceUseCase;
pub use collect_use_case::CollectUseCase;
pub use material_use_case::MaterialUseCase;

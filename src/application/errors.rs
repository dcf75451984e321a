// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use crate::application::dto::validation::format_validation_errors;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::hotlist_provider::HotlistError;
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

/// 用例层错误
///
/// 接口层据此映射 400 / 404 / 409 / 500
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// `details` 原样放入响应体
    #[error("{message}")]
    Conflict {
        message: String,
        details: Option<Value>,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Hotlist(#[from] HotlistError),
    #[error("{0}")]
    Unavailable(String),
}

impl From<ValidationErrors> for UseCaseError {
    fn from(errors: ValidationErrors) -> Self {
        UseCaseError::Validation(format!("参数验证失败: {}", format_validation_errors(&errors)))
    }
}

impl UseCaseError {
    pub fn validation(message: impl Into<String>) -> Self {
        UseCaseError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        UseCaseError::NotFound(message.into())
    }
}

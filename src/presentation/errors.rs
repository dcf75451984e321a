// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, warn};

use crate::application::dto::response::ApiResponse;
use crate::application::errors::UseCaseError;
use crate::domain::repositories::RepositoryError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一输出 `{success:false, error, details?}`
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 直接构造 400 错误
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(UseCaseError::Validation(message.into()).into())
    }

    fn classify(&self) -> (StatusCode, Option<Value>) {
        if let Some(err) = self.0.downcast_ref::<UseCaseError>() {
            return match err {
                UseCaseError::Validation(_) => (StatusCode::BAD_REQUEST, None),
                UseCaseError::NotFound(_) => (StatusCode::NOT_FOUND, None),
                UseCaseError::Conflict { details, .. } => (StatusCode::CONFLICT, details.clone()),
                UseCaseError::Repository(e) => (repository_status(e), None),
                UseCaseError::Hotlist(_) | UseCaseError::Unavailable(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, None)
                }
            };
        }
        if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            return (repository_status(err), None);
        }
        (StatusCode::INTERNAL_SERVER_ERROR, None)
    }
}

fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = self.classify();
        let error_message = self.0.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %error_message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %error_message, "Request rejected");
        }

        let body = Json(ApiResponse::<()>::failure(error_message, details));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::hotlist_provider::HotlistError;
    use axum::body::to_bytes;
    use serde_json::json;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_conflict_carries_details() {
        let err: AppError = UseCaseError::Conflict {
            message: "采集源有关联数据，无法直接删除".to_string(),
            details: Some(json!({"code": "HAS_RELATED_DATA"})),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_of(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["details"]["code"], "HAS_RELATED_DATA");
    }

    #[tokio::test]
    async fn test_repository_not_found_is_404() {
        let err: AppError = RepositoryError::NotFound.into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_provider_error_passes_message_through() {
        let err: AppError = UseCaseError::from(HotlistError::RateLimited).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["error"], "请求频率过高，请稍后重试");
    }

    #[tokio::test]
    async fn test_bad_request_shape() {
        let response = AppError::bad_request("缺少采集源ID").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body, json!({"success": false, "error": "缺少采集源ID"}));
    }
}

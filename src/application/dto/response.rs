// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 统一响应包装
///
/// 成功时 `{success: true, data, pagination?, message?}`，
/// 失败时 `{success: false, error, details?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    // 泛型字段不能加 `default`，否则反序列化要求 `T: Default`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            pagination: None,
            message: None,
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            pagination: None,
            message: None,
            details,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// 分页信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
            has_more: None,
        }
    }

    /// 附带 `hasMore`
    pub fn with_has_more(mut self) -> Self {
        self.has_more = Some(self.page.saturating_mul(self.limit) < self.total);
        self
    }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_counts_pages() {
        let p = Pagination::new(2, 20, 41).with_has_more();
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.has_more, Some(true));

        let last = Pagination::new(3, 20, 41).with_has_more();
        assert_eq!(last.has_more, Some(false));
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::failure(
            "采集源不存在",
            None,
        ))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "采集源不存在"})
        );
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> ApiResponse<T> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_envelope_decodes_payload_without_default() {
        let failed: ApiResponse<Item> =
            decode(serde_json::json!({"success": false, "error": "素材不存在"}));
        assert!(failed.data.is_none());
        assert_eq!(failed.error.as_deref(), Some("素材不存在"));

        let ok: ApiResponse<Item> = decode(serde_json::json!({"success": true, "data": {"id": 7}}));
        assert_eq!(ok.data, Some(Item { id: 7 }));
    }

    #[test]
    fn test_success_envelope_is_camel_case() {
        let body = serde_json::to_value(
            ApiResponse::ok(vec![1, 2])
                .with_pagination(Pagination::new(1, 20, 2))
                .with_message("完成"),
        )
        .unwrap();
        assert_eq!(body["pagination"]["totalPages"], 1);
        assert!(body["pagination"].get("hasMore").is_none());
        assert_eq!(body["message"], "完成");
        assert_eq!(body["data"], serde_json::json!([1, 2]));
    }
}

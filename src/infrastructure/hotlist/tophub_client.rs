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


use crate::config::settings::HotlistSettings;
use crate::domain::models::hotlist::{
    HotlistApiInfo, HotlistNode, NodeDetail, SearchPage, SearchQuery,
};
use crate::domain::services::hotlist_provider::{HotlistError, HotlistProvider};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 今日热榜 HTTP 客户端
///
/// 使用 `Authorization: <key>` 认证，普通请求与连通性探测各有独立超时
pub struct TophubClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    ping_timeout: Duration,
}

impl TophubClient {
    /// 根据配置创建客户端
    ///
    /// # 参数
    ///
    /// * `settings` - 热榜服务配置
    ///
    /// # 返回值
    ///
    /// * `Ok(TophubClient)` - 客户端实例
    /// * `Err(HotlistError)` - 密钥包含非法头部字符或客户端构建失败
    pub fn new(settings: &HotlistSettings) -> Result<Self, HotlistError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&settings.api_key)
            .map_err(|e| HotlistError::InvalidArgument(format!("访问密钥格式错误: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| HotlistError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            ping_timeout: Duration::from_secs(settings.ping_timeout_secs),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        failure: &str,
    ) -> Result<Option<Value>, HotlistError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| HotlistError::Request(e.to_string()))?;
        unwrap_envelope(body, failure)
    }
}

fn map_transport_error(err: reqwest::Error) -> HotlistError {
    if err.is_timeout() {
        return HotlistError::Timeout;
    }
    match err.status() {
        Some(status) => map_status(status),
        None => HotlistError::Request(err.to_string()),
    }
}

fn map_status(status: StatusCode) -> HotlistError {
    match status {
        StatusCode::UNAUTHORIZED => HotlistError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => HotlistError::RateLimited,
        other => HotlistError::Request(format!("Request failed with status code {}", other.as_u16())),
    }
}

/// 剥离 `{data: ...}` 包装，识别业务失败
fn unwrap_envelope(body: Value, failure: &str) -> Result<Option<Value>, HotlistError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(failure);
        return Err(HotlistError::Provider(message.to_string()));
    }
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
        return Err(HotlistError::Provider(message));
    }

    let payload = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => Value::Object(map),
        },
        other => other,
    };

    if payload.is_null() {
        return Ok(None);
    }
    Ok(Some(payload))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, HotlistError> {
    serde_json::from_value(value).map_err(|e| HotlistError::Request(format!("响应格式错误: {}", e)))
}

#[async_trait]
impl HotlistProvider for TophubClient {
    async fn list_nodes(&self) -> Result<Vec<HotlistNode>, HotlistError> {
        debug!("Fetching tophub nodes");
        let nodes: Vec<HotlistNode> = match self.get_json("/nodes", &[], "获取节点列表失败").await? {
            Some(value) => decode(value)?,
            None => Vec::new(),
        };
        info!(count = nodes.len(), "Fetched tophub nodes");
        Ok(nodes)
    }

    async fn node_detail(&self, hashid: &str) -> Result<NodeDetail, HotlistError> {
        let hashid = hashid.trim();
        if hashid.is_empty() {
            return Err(HotlistError::InvalidArgument("hashid参数不能为空".to_string()));
        }

        let path = format!("/nodes/{}", hashid);
        let detail: NodeDetail = match self.get_json(&path, &[], "获取榜单详情失败").await {
            Ok(Some(value)) => decode(value)?,
            Ok(None) => return Err(HotlistError::Provider("榜单数据为空".to_string())),
            Err(e) => {
                error!(hashid = %hashid, error = %e, "Failed to fetch node detail");
                return Err(e);
            }
        };
        debug!(hashid = %hashid, items = detail.items.len(), "Fetched node detail");
        Ok(detail)
    }

    async fn search(&self, search: &SearchQuery) -> Result<SearchPage, HotlistError> {
        let keyword = search.keyword.trim();
        if keyword.is_empty() {
            return Err(HotlistError::InvalidArgument("搜索关键词不能为空".to_string()));
        }

        let mut query = vec![
            ("q", keyword.to_string()),
            ("p", search.page.max(1).to_string()),
        ];
        if let Some(hashid) = search.hashid.as_deref().filter(|h| !h.is_empty()) {
            query.push(("hashid", hashid.to_string()));
        }

        let result: SearchPage = match self.get_json("/search", &query, "搜索失败").await? {
            Some(value) => decode(value)?,
            None => SearchPage::default(),
        };
        debug!(keyword = %keyword, items = result.items.len(), "Search finished");
        Ok(result)
    }

    async fn test_connection(&self) -> bool {
        let response = self
            .client
            .get(self.url("/nodes"))
            .timeout(self.ping_timeout)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == StatusCode::OK => match resp.json::<Value>().await {
                Ok(body) => !body.is_null(),
                Err(e) => {
                    warn!("Tophub ping returned unreadable body: {}", e);
                    false
                }
            },
            Ok(resp) => {
                warn!("Tophub ping failed with status {}", resp.status());
                false
            }
            Err(e) => {
                warn!("Tophub ping failed: {}", e);
                false
            }
        }
    }

    fn api_info(&self) -> HotlistApiInfo {
        let has_access_key = !self.api_key.is_empty();
        let access_key_prefix = if has_access_key {
            format!("{}...", self.api_key.chars().take(8).collect::<String>())
        } else {
            "未配置".to_string()
        };

        HotlistApiInfo {
            base_url: self.base_url.clone(),
            has_access_key,
            access_key_prefix,
        }
    }
}

#[cfg(test)]
#[path = "tophub_client_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 热榜节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotlistNode {
    pub hashid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 热榜条目
///
/// 不同榜单返回的字段并不统一：链接可能在 `url` 或 `link`，
/// 摘要可能在 `desc` 或 `description`，热度文本在 `extra`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotlistItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl HotlistItem {
    /// 非空标题，缺失时为 "无标题"
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("无标题")
            .to_string()
    }

    /// 摘要，优先取 `desc`
    pub fn summary(&self) -> String {
        non_empty(&self.desc)
            .or_else(|| non_empty(&self.description))
            .unwrap_or_default()
    }

    /// 原文链接，优先取 `url`
    pub fn link_url(&self) -> Option<String> {
        non_empty(&self.url).or_else(|| non_empty(&self.link))
    }

    /// 热度文本，数字会被转成字符串
    pub fn extra_text(&self) -> Option<String> {
        match &self.extra {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// 单个榜单的当前内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDetail {
    #[serde(default)]
    pub hashid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<HotlistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// 关键词搜索结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<HotlistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// 热榜服务配置摘要，不暴露完整密钥
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotlistApiInfo {
    pub base_url: String,
    pub has_access_key: bool,
    pub access_key_prefix: String,
}

/// 关键词搜索参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    /// 页码，从 1 开始
    pub page: u32,
    /// 限定的榜单
    pub hashid: Option<String>,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            page: 1,
            hashid: None,
        }
    }

    pub fn within(mut self, hashid: impl Into<String>) -> Self {
        self.hashid = Some(hashid.into());
        self
    }
}

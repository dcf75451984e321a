// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 改写风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStyle {
    #[default]
    General,
    Professional,
    Friendly,
    Marketing,
}

impl RewriteStyle {
    pub const ALL: [RewriteStyle; 4] = [
        RewriteStyle::General,
        RewriteStyle::Professional,
        RewriteStyle::Friendly,
        RewriteStyle::Marketing,
    ];

    /// 风格名称
    pub fn label(&self) -> &'static str {
        match self {
            RewriteStyle::General => "通用风格",
            RewriteStyle::Professional => "专业风格",
            RewriteStyle::Friendly => "亲民风格",
            RewriteStyle::Marketing => "营销风格",
        }
    }

    /// 风格对应的改写要求
    pub fn prompt(&self) -> &'static str {
        match self {
            RewriteStyle::General => "请保持原文核心观点，优化语言表达，使内容更加流畅易读",
            RewriteStyle::Professional => "请使用专业术语改写，增加权威性和专业性",
            RewriteStyle::Friendly => "请用通俗易懂的语言改写，贴近普通读者",
            RewriteStyle::Marketing => "请增强感染力和说服力，适合营销推广",
        }
    }
}

impl fmt::Display for RewriteStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RewriteStyle::General => write!(f, "general"),
            RewriteStyle::Professional => write!(f, "professional"),
            RewriteStyle::Friendly => write!(f, "friendly"),
            RewriteStyle::Marketing => write!(f, "marketing"),
        }
    }
}

impl FromStr for RewriteStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(RewriteStyle::General),
            "professional" => Ok(RewriteStyle::Professional),
            "friendly" => Ok(RewriteStyle::Friendly),
            "marketing" => Ok(RewriteStyle::Marketing),
            _ => Err(()),
        }
    }
}

/// 一次 AI 改写记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRecord {
    pub id: Uuid,
    pub article_id: Uuid,
    pub original_title: String,
    pub rewritten_title: String,
    pub original_content: String,
    pub rewritten_content: String,
    pub style: RewriteStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 配图风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageStyle {
    #[default]
    Realistic,
    Illustration,
    Abstract,
    Minimalist,
    Cartoon,
}

impl ImageStyle {
    pub fn label(&self) -> &'static str {
        match self {
            ImageStyle::Realistic => "写实风格",
            ImageStyle::Illustration => "插画风格",
            ImageStyle::Abstract => "抽象风格",
            ImageStyle::Minimalist => "简约风格",
            ImageStyle::Cartoon => "卡通风格",
        }
    }
}

impl FromStr for ImageStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "realistic" => Ok(ImageStyle::Realistic),
            "illustration" => Ok(ImageStyle::Illustration),
            "abstract" => Ok(ImageStyle::Abstract),
            "minimalist" => Ok(ImageStyle::Minimalist),
            "cartoon" => Ok(ImageStyle::Cartoon),
            _ => Err(()),
        }
    }
}

/// 生成的配图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: Uuid,
    pub article_id: Uuid,
    pub url: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

/// 发布状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Success,
    Failed,
    #[default]
    Pending,
}

/// 发布后的互动数据
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationStats {
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
}

/// 一次发布尝试
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    pub id: Uuid,
    pub article_id: Uuid,
    pub account_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub status: PublicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PublicationStats>,
}

/// 已绑定的公众号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeChatAccount {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub is_connected: bool,
    pub last_sync: DateTime<Utc>,
}

/// 应用设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub ai_api_key: String,
    pub ai_model: String,
    pub ai_api_base_url: String,
    /// 采集频率（分钟）
    pub collect_frequency: u32,
    pub auto_rewrite: bool,
    pub auto_publish: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_api_key: String::new(),
            ai_model: "gpt-4".to_string(),
            ai_api_base_url: "https://api.openai.com/v1".to_string(),
            collect_frequency: 60,
            auto_rewrite: false,
            auto_publish: false,
        }
    }
}

/// 设置项的部分更新
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfigPatch {
    pub ai_api_key: Option<String>,
    pub ai_model: Option<String>,
    pub ai_api_base_url: Option<String>,
    pub collect_frequency: Option<u32>,
    pub auto_rewrite: Option<bool>,
    pub auto_publish: Option<bool>,
}

impl AppConfig {
    pub fn apply(&mut self, patch: AppConfigPatch) {
        if let Some(v) = patch.ai_api_key {
            self.ai_api_key = v;
        }
        if let Some(v) = patch.ai_model {
            self.ai_model = v;
        }
        if let Some(v) = patch.ai_api_base_url {
            self.ai_api_base_url = v;
        }
        if let Some(v) = patch.collect_frequency {
            self.collect_frequency = v;
        }
        if let Some(v) = patch.auto_rewrite {
            self.auto_rewrite = v;
        }
        if let Some(v) = patch.auto_publish {
            self.auto_publish = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub is_connected: Option<bool>,
    pub last_sync: Option<DateTime<Utc>>,
}

impl WeChatAccount {
    pub fn apply(&mut self, patch: AccountPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.avatar {
            self.avatar = v;
        }
        if let Some(v) = patch.is_connected {
            self.is_connected = v;
        }
        if let Some(v) = patch.last_sync {
            self.last_sync = v;
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::Article;
use crate::domain::models::workspace::{AppConfig, ImageStyle, RewriteStyle};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// 正文截断长度（字符）
const MAX_SOURCE_CHARS: usize = 8000;
const DEFAULT_IMAGE_MODEL: &str = "dall-e-2";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// 改写结果草稿，尚未写回素材
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteDraft {
    pub title: String,
    pub content: String,
    pub usage: TokenUsage,
}

#[async_trait]
pub trait ContentRewriter: Send + Sync {
    /// 按风格改写素材标题与正文
    async fn rewrite(
        &self,
        article: &Article,
        style: RewriteStyle,
        custom_prompt: Option<String>,
    ) -> Result<RewriteDraft>;

    /// 生成配图，返回图片地址
    async fn illustrate(&self, prompt: &str, count: u8) -> Result<Vec<String>>;
}

/// 配图默认描述
pub fn illustration_prompt(title: &str, style: ImageStyle) -> String {
    format!("为文章\"{}\"生成{}的配图", title, style.label())
}

/// 兼容 OpenAI 接口的改写与配图服务
///
/// # 配置
///
/// 取自应用设置中的 `aiApiKey`、`aiModel`、`aiApiBaseUrl`
pub struct LlmRewriter {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    image_model: String,
    api_base_url: String,
}

impl LlmRewriter {
    pub fn new(api_key: Option<String>, model: String, api_base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Some(config.ai_api_key.clone()),
            config.ai_model.clone(),
            config.ai_api_base_url.clone(),
        )
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("AI API key not configured"))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.api_base_url, path);
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(body)
            .send()
            .await
            .context("Failed to send request to AI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "AI API returned error: {} - {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse AI API response")
    }
}

fn system_prompt(style: RewriteStyle, custom_prompt: Option<&str>) -> String {
    let mut prompt = format!(
        "你是一名资深的公众号编辑。{}。只输出 JSON 对象 {{\"title\": \"...\", \"content\": \"...\"}}，不要使用 markdown 代码块。",
        style.prompt()
    );
    if let Some(extra) = custom_prompt.filter(|p| !p.trim().is_empty()) {
        prompt.push_str("\n额外要求：");
        prompt.push_str(extra.trim());
    }
    prompt
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn parse_usage(body: &Value) -> TokenUsage {
    match body.get("usage") {
        Some(usage) => TokenUsage {
            prompt_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            completion_tokens: usage["completion_tokens"].as_u64().unwrap_or(0) as u32,
            total_tokens: usage["total_tokens"].as_u64().unwrap_or(0) as u32,
        },
        None => TokenUsage::default(),
    }
}

/// 解析模型回复；不是 JSON 时整段作为正文，标题沿用原文
fn parse_draft(reply: &str, fallback_title: &str) -> (String, String) {
    let clean = reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    #[derive(Deserialize)]
    struct Reply {
        title: Option<String>,
        content: String,
    }

    match serde_json::from_str::<Reply>(clean) {
        Ok(reply) => (
            reply
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| fallback_title.to_string()),
            reply.content,
        ),
        Err(_) => (fallback_title.to_string(), clean.to_string()),
    }
}

#[async_trait]
impl ContentRewriter for LlmRewriter {
    async fn rewrite(
        &self,
        article: &Article,
        style: RewriteStyle,
        custom_prompt: Option<String>,
    ) -> Result<RewriteDraft> {
        let request_body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt(style, custom_prompt.as_deref())
                },
                {
                    "role": "user",
                    "content": format!(
                        "标题：{}\n正文：{}",
                        article.title,
                        truncate_chars(&article.content, MAX_SOURCE_CHARS)
                    )
                }
            ],
            "temperature": 0.7
        });

        debug!(article_id = %article.id, style = %style, "Requesting rewrite");
        let body = self.post("/chat/completions", &request_body).await?;

        let reply = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format from AI API"))?;
        let (title, content) = parse_draft(reply, &article.title);

        Ok(RewriteDraft {
            title,
            content,
            usage: parse_usage(&body),
        })
    }

    async fn illustrate(&self, prompt: &str, count: u8) -> Result<Vec<String>> {
        let request_body = json!({
            "model": self.image_model,
            "prompt": prompt,
            "n": count.clamp(1, 4),
            "size": "1024x1024"
        });

        let body = self.post("/images/generations", &request_body).await?;
        let urls: Vec<String> = body["data"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["url"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            return Err(anyhow::anyhow!("AI API returned no images"));
        }
        Ok(urls)
    }
}

#[cfg(test)]
#[path = "rewrite_service_test.rs"]
mod tests;

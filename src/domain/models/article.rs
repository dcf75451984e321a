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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 素材（文章）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// 素材唯一标识符
    pub id: Uuid,
    /// 标题
    pub title: String,
    /// 正文
    pub content: String,
    /// 来源名称，采集时为采集源名称
    pub source: String,
    /// 原文链接
    pub source_url: Option<String>,
    pub author: Option<String>,
    /// 原文发布时间
    pub publish_time: Option<DateTime<Utc>>,
    /// 采集时间
    pub collect_time: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    /// 阅读数，采集时由热度文本换算
    pub read_count: i64,
    pub like_count: i64,
    /// 生命周期状态
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 素材状态
///
/// 界面流程为 pending -> rewritten -> published，服务端不强制流转顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// 待处理
    #[default]
    Pending,
    /// 已改写
    Rewritten,
    /// 已发布
    Published,
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArticleStatus::Pending => write!(f, "pending"),
            ArticleStatus::Rewritten => write!(f, "rewritten"),
            ArticleStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for ArticleStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ArticleStatus::Pending),
            "rewritten" => Ok(ArticleStatus::Rewritten),
            "published" => Ok(ArticleStatus::Published),
            _ => Err(()),
        }
    }
}

/// 新建素材所需字段
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub source: String,
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub publish_time: Option<DateTime<Utc>>,
    pub collect_time: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub read_count: i64,
    pub like_count: i64,
    pub status: ArticleStatus,
}

impl NewArticle {
    /// 生成完整素材记录，补齐 id 与时间戳
    pub fn into_article(self, now: DateTime<Utc>) -> Article {
        Article {
            id: Uuid::new_v4(),
            title: self.title,
            content: self.content,
            source: self.source,
            source_url: self.source_url,
            author: self.author,
            publish_time: self.publish_time,
            collect_time: self.collect_time.unwrap_or(now),
            tags: self.tags,
            category: self.category,
            read_count: self.read_count,
            like_count: self.like_count,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 素材部分更新，`None` 表示保持原值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub publish_time: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub read_count: Option<i64>,
    pub like_count: Option<i64>,
    pub status: Option<ArticleStatus>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        *self == ArticlePatch::default()
    }

    /// 仅修改状态
    pub fn status(status: ArticleStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// 把补丁应用到本地记录上，用于客户端乐观更新
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(content) = &self.content {
            article.content = content.clone();
        }
        if let Some(source) = &self.source {
            article.source = source.clone();
        }
        if let Some(source_url) = &self.source_url {
            article.source_url = Some(source_url.clone());
        }
        if let Some(author) = &self.author {
            article.author = Some(author.clone());
        }
        if let Some(publish_time) = self.publish_time {
            article.publish_time = Some(publish_time);
        }
        if let Some(tags) = &self.tags {
            article.tags = tags.clone();
        }
        if let Some(category) = &self.category {
            article.category = Some(category.clone());
        }
        if let Some(read_count) = self.read_count {
            article.read_count = read_count;
        }
        if let Some(like_count) = self.like_count {
            article.like_count = like_count;
        }
        if let Some(status) = self.status {
            article.status = status;
        }
    }
}

/// 素材列表排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ArticleSortField {
    #[default]
    CollectTime,
    ReadCount,
    LikeCount,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// 素材列表查询条件
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleQuery {
    pub page: u64,
    pub limit: u64,
    pub status: Option<ArticleStatus>,
    pub search: Option<String>,
    pub sort_by: ArticleSortField,
    pub order: SortOrder,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            status: None,
            search: None,
            sort_by: ArticleSortField::default(),
            order: SortOrder::default(),
        }
    }
}

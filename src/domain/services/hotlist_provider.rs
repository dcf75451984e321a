// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::hotlist::{
    HotlistApiInfo, HotlistNode, NodeDetail, SearchPage, SearchQuery,
};
use async_trait::async_trait;
use thiserror::Error;

/// 热榜服务错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HotlistError {
    #[error("请求超时，请稍后重试")]
    Timeout,
    #[error("API密钥无效，请检查TOPHUB_ACCESS_KEY配置")]
    Unauthorized,
    #[error("请求频率过高，请稍后重试")]
    RateLimited,
    /// 参数不合法，请求不会发出
    #[error("{0}")]
    InvalidArgument(String),
    /// 服务端返回 `success:false` 或携带 `error`
    #[error("{0}")]
    Provider(String),
    #[error("API请求失败: {0}")]
    Request(String),
}

/// 热榜数据提供方
///
/// 每次调用只请求一次，不做重试与缓存
#[async_trait]
pub trait HotlistProvider: Send + Sync {
    /// 获取全部榜单节点
    async fn list_nodes(&self) -> Result<Vec<HotlistNode>, HotlistError>;

    /// 获取单个榜单的当前内容
    async fn node_detail(&self, hashid: &str) -> Result<NodeDetail, HotlistError>;

    /// 关键词搜索
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, HotlistError>;

    /// 探测服务是否可用
    async fn test_connection(&self) -> bool;

    fn api_info(&self) -> HotlistApiInfo;
}

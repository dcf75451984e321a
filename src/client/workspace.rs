// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::workspace::{
    AppConfig, GeneratedImage, PublicationRecord, RewriteRecord, WeChatAccount,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 默认工作区文件
pub const DEFAULT_WORKSPACE_FILE: &str = "contentdesk-workspace.json";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("读取工作区文件失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("工作区文件格式错误 {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 仅保存在客户端的数据：改写记录、发布记录、公众号账号、配图与设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workspace {
    pub rewrites: Vec<RewriteRecord>,
    pub publications: Vec<PublicationRecord>,
    pub accounts: Vec<WeChatAccount>,
    pub images: Vec<GeneratedImage>,
    pub config: AppConfig,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            rewrites: Vec::new(),
            publications: Vec::new(),
            accounts: default_accounts(),
            images: Vec::new(),
            config: AppConfig::default(),
        }
    }
}

fn sync_time(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 16, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// 首次运行时的公众号账号
pub fn default_accounts() -> Vec<WeChatAccount> {
    vec![
        WeChatAccount {
            id: "acc1".to_string(),
            name: "科技前沿观察".to_string(),
            avatar: "/placeholder.svg?height=40&width=40".to_string(),
            is_connected: true,
            last_sync: sync_time(12, 0),
        },
        WeChatAccount {
            id: "acc2".to_string(),
            name: "创业者日记".to_string(),
            avatar: "/placeholder.svg?height=40&width=40".to_string(),
            is_connected: true,
            last_sync: sync_time(11, 30),
        },
    ]
}

impl Workspace {
    /// 读取工作区文件，文件不存在时返回默认工作区
    pub fn load(path: &Path) -> Result<Self, WorkspaceError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Workspace file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(WorkspaceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| WorkspaceError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 写入工作区文件
    ///
    /// 先写临时文件再重命名，中途失败不会留下半截文件
    pub fn save(&self, path: &Path) -> Result<(), WorkspaceError> {
        let io_error = |source| WorkspaceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let raw = serde_json::to_string_pretty(self).map_err(|source| WorkspaceError::Format {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, raw).map_err(io_error)?;
        std::fs::rename(&tmp, path).map_err(io_error)?;
        info!(path = %path.display(), "Workspace saved");
        Ok(())
    }
}

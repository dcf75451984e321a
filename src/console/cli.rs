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


use crate::client::api_client::DEFAULT_API_BASE;
use crate::client::workspace::DEFAULT_WORKSPACE_FILE;
use crate::domain::models::article::ArticleStatus;
use crate::domain::models::workspace::{ImageStyle, RewriteStyle};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// 内容运营控制台
#[derive(Debug, Parser)]
#[command(name = "contentdesk-console")]
#[command(about = "Content operations console: collect, rewrite and publish")]
#[command(version)]
pub struct Cli {
    /// 服务端接口地址
    #[arg(long, env = "CONTENTDESK_API", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// 本地工作区文件
    #[arg(long, env = "CONTENTDESK_WORKSPACE", default_value = DEFAULT_WORKSPACE_FILE, global = true)]
    pub workspace: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 数据采集
    Collect {
        #[command(subcommand)]
        command: CollectCommand,
    },
    /// 素材库
    Materials {
        #[command(subcommand)]
        command: MaterialsCommand,
    },
    /// AI 改写素材
    Rewrite(RewriteArgs),
    /// 生成配图
    Images(ImagesArgs),
    /// 发布到公众号
    Publish(PublishArgs),
    /// 公众号账号
    Accounts {
        #[command(subcommand)]
        command: Option<AccountsCommand>,
    },
    /// 应用设置
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

impl Command {
    /// 是否修改了本地工作区
    pub fn touches_workspace(&self) -> bool {
        match self {
            Command::Collect { .. } | Command::Materials { .. } => false,
            Command::Rewrite(args) => args.save,
            Command::Accounts { command } => command.is_some(),
            Command::Settings { command } => matches!(command, SettingsCommand::Set(_)),
            Command::Images(_) | Command::Publish(_) => true,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CollectCommand {
    /// 采集源管理
    Sources {
        #[command(subcommand)]
        command: SourcesCommand,
    },
    /// 执行采集
    Run(RunArgs),
    /// 查看采集结果
    Results {
        #[arg(long)]
        batch: Option<Uuid>,
        #[arg(long)]
        selected: bool,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 50)]
        limit: u64,
    },
    /// 勾选或取消勾选采集结果
    Select {
        #[arg(required = true)]
        ids: Vec<Uuid>,
        /// 取消勾选
        #[arg(long)]
        off: bool,
    },
    /// 删除采集结果
    Discard {
        #[arg(required = true)]
        ids: Vec<Uuid>,
    },
    /// 加入素材库，未指定 id 时使用已勾选的结果
    Promote {
        ids: Vec<Uuid>,
        #[arg(long)]
        batch: Option<Uuid>,
    },
    /// 采集批次
    Batches {
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// 采集历史
    History(HistoryArgs),
    /// 检查热榜服务连接
    Provider,
    /// 列出热榜节点
    Nodes,
}

#[derive(Debug, Subcommand)]
pub enum SourcesCommand {
    /// 列出采集源
    List {
        #[arg(long)]
        platform: Option<String>,
        /// 只显示启用的采集源
        #[arg(long)]
        active: bool,
    },
    /// 添加采集源
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        platform: String,
        #[arg(long)]
        hash_id: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// 创建后保持停用
        #[arg(long)]
        inactive: bool,
    },
    /// 启用采集源
    Enable { id: Uuid },
    /// 停用采集源
    Disable { id: Uuid },
    /// 删除采集源
    Remove {
        id: Uuid,
        /// 存在关联数据时直接级联删除
        #[arg(long)]
        cascade: bool,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// 采集源，未指定时使用全部启用的采集源
    #[arg(long = "source")]
    pub sources: Vec<Uuid>,
    /// 关键词，指定后按关键词采集
    #[arg(long)]
    pub keyword: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// 每个采集源的条目上限
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// today、week 或 month
    #[arg(long)]
    pub range: Option<String>,
    #[arg(long)]
    pub source: Option<Uuid>,
    #[arg(long)]
    pub platform: Option<String>,
    /// 开始日期 YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,
    /// 结束日期 YYYY-MM-DD（含当天）
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: u64,
    #[arg(long, default_value_t = 20)]
    pub limit: u64,
}

#[derive(Debug, Subcommand)]
pub enum MaterialsCommand {
    /// 列出素材
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<ArticleStatus>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 20)]
        limit: u64,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        order: Option<String>,
    },
    /// 查看素材详情
    Show { id: Uuid },
    /// 删除素材
    Delete {
        #[arg(required = true)]
        ids: Vec<Uuid>,
    },
    /// 批量修改素材状态
    Status {
        #[arg(value_parser = parse_status)]
        status: ArticleStatus,
        #[arg(required = true)]
        ids: Vec<Uuid>,
    },
}

#[derive(Debug, Args)]
pub struct RewriteArgs {
    pub id: Uuid,
    /// general、professional、friendly 或 marketing
    #[arg(long, default_value = "general", value_parser = parse_rewrite_style)]
    pub style: RewriteStyle,
    /// 额外改写要求
    #[arg(long)]
    pub prompt: Option<String>,
    /// 采纳改写结果并写回素材
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct ImagesArgs {
    pub id: Uuid,
    #[arg(long, default_value = "realistic", value_parser = parse_image_style)]
    pub style: ImageStyle,
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub count: u8,
    /// 自定义配图描述
    #[arg(long)]
    pub prompt: Option<String>,
}

#[derive(Debug, Args)]
pub struct PublishArgs {
    pub id: Uuid,
    #[arg(long)]
    pub account: String,
    /// 附带的图片地址
    #[arg(long = "image")]
    pub images: Vec<String>,
    /// 附带工作区中为该素材生成的全部配图
    #[arg(long)]
    pub with_generated: bool,
}

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// 连接账号
    Connect { id: String },
    /// 断开账号
    Disconnect { id: String },
    /// 同步账号
    Sync { id: String },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// 显示当前设置
    Show,
    /// 修改设置
    Set(SettingsArgs),
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub base_url: Option<String>,
    /// 采集频率（分钟）
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub frequency: Option<u32>,
    #[arg(long)]
    pub auto_rewrite: Option<bool>,
    #[arg(long)]
    pub auto_publish: Option<bool>,
}

fn parse_status(s: &str) -> Result<ArticleStatus, String> {
    s.parse()
        .map_err(|_| format!("unknown status '{}', expected one of pending, rewritten, published", s))
}

fn parse_rewrite_style(s: &str) -> Result<RewriteStyle, String> {
    s.parse()
        .map_err(|_| format!("unknown rewrite style '{}'", s))
}

fn parse_image_style(s: &str) -> Result<ImageStyle, String> {
    s.parse().map_err(|_| format!("unknown image style '{}'", s))
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

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


//! 控制台表示层
//!
//! 每个页面对应一组子命令，服务端数据经由 [`AppStore`] 读写，
//! 改写、配图、发布记录等本地数据保存在工作区文件中

pub mod cli;
mod collect;
mod content;
mod materials;

pub use cli::Cli;

use crate::client::api_client::{ApiClient, DashboardApi};
use crate::client::store::AppStore;
use crate::client::workspace::Workspace;
use anyhow::{Context, Result};
use cli::Command;
use std::io::{BufRead, Write};
use tracing::debug;

/// 执行一条控制台命令
pub async fn run(cli: Cli) -> Result<()> {
    let workspace = Workspace::load(&cli.workspace)?;
    let api = ApiClient::new(cli.api_base.as_str())?;
    let mut store = AppStore::new(api, workspace);
    let persist = cli.command.touches_workspace();

    // 发布失败时同样要保存失败记录
    let outcome = dispatch(&mut store, cli.command).await;

    if persist {
        store.workspace().save(&cli.workspace)?;
        debug!(path = %cli.workspace.display(), "Workspace saved");
    }
    outcome
}

async fn dispatch<A: DashboardApi>(store: &mut AppStore<A>, command: Command) -> Result<()> {
    match command {
        Command::Collect { command } => collect::handle(store, command).await,
        Command::Materials { command } => materials::handle(store, command).await,
        Command::Rewrite(args) => content::rewrite(store, args).await,
        Command::Images(args) => content::images(store, args).await,
        Command::Publish(args) => content::publish(store, args).await,
        Command::Accounts { command } => content::accounts(store, command),
        Command::Settings { command } => content::settings(store, command),
    }
}

/// 询问是否继续，只有输入 y 或 yes 时返回 true
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// 按字符截断，用于列表展示
fn truncate(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

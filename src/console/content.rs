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


use super::cli::{AccountsCommand, ImagesArgs, PublishArgs, RewriteArgs, SettingsCommand};
use crate::client::api_client::DashboardApi;
use crate::client::store::AppStore;
use crate::domain::models::workspace::{AccountPatch, AppConfig, AppConfigPatch, GeneratedImage};
use crate::domain::services::rewrite_service::{
    illustration_prompt, ContentRewriter, LlmRewriter,
};
use anyhow::{anyhow, Result};
use chrono::Utc;
use uuid::Uuid;

pub(super) async fn rewrite<A: DashboardApi>(
    store: &mut AppStore<A>,
    args: RewriteArgs,
) -> Result<()> {
    let article = store.api().get_material(args.id).await?;
    let rewriter = LlmRewriter::from_config(store.config());
    let draft = rewriter
        .rewrite(&article, args.style, args.prompt.clone())
        .await?;

    println!("【{}】{}", args.style.label(), draft.title);
    println!();
    println!("{}", draft.content);
    println!();
    println!("tokens: {}", draft.usage.total_tokens);

    if args.save {
        store
            .save_rewrite(args.id, &draft, args.style, args.prompt)
            .await?;
        println!("改写结果已保存");
    }
    Ok(())
}

pub(super) async fn images<A: DashboardApi>(
    store: &mut AppStore<A>,
    args: ImagesArgs,
) -> Result<()> {
    let article = store.api().get_material(args.id).await?;
    let prompt = args
        .prompt
        .unwrap_or_else(|| illustration_prompt(&article.title, args.style));

    let rewriter = LlmRewriter::from_config(store.config());
    let urls = rewriter.illustrate(&prompt, args.count).await?;

    let now = Utc::now();
    let images: Vec<GeneratedImage> = urls
        .into_iter()
        .map(|url| GeneratedImage {
            id: Uuid::new_v4(),
            article_id: article.id,
            url,
            prompt: prompt.clone(),
            created_at: now,
        })
        .collect();
    for image in &images {
        println!("{}", image.url);
    }
    store.add_images(images);
    Ok(())
}

pub(super) async fn publish<A: DashboardApi>(
    store: &mut AppStore<A>,
    args: PublishArgs,
) -> Result<()> {
    let mut images = args.images;
    if args.with_generated {
        images.extend(
            store
                .images()
                .iter()
                .filter(|i| i.article_id == args.id)
                .map(|i| i.url.clone()),
        );
    }

    let record = store.publish(args.id, &args.account, images).await?;
    println!("《{}》已发布到账号 {}", record.title, record.account_id);
    Ok(())
}

pub(super) fn accounts<A: DashboardApi>(
    store: &mut AppStore<A>,
    command: Option<AccountsCommand>,
) -> Result<()> {
    let (id, patch) = match command {
        None => {
            for account in store.accounts() {
                println!(
                    "{}  {}  {}  最近同步 {}",
                    account.id,
                    if account.is_connected { "已连接" } else { "未连接" },
                    account.name,
                    account.last_sync.format("%Y-%m-%d %H:%M")
                );
            }
            return Ok(());
        }
        Some(AccountsCommand::Connect { id }) => (
            id,
            AccountPatch {
                is_connected: Some(true),
                last_sync: Some(Utc::now()),
                ..Default::default()
            },
        ),
        Some(AccountsCommand::Disconnect { id }) => (
            id,
            AccountPatch {
                is_connected: Some(false),
                ..Default::default()
            },
        ),
        Some(AccountsCommand::Sync { id }) => (
            id,
            AccountPatch {
                last_sync: Some(Utc::now()),
                ..Default::default()
            },
        ),
    };

    if !store.update_account(&id, patch) {
        return Err(anyhow!("公众号账号不存在: {}", id));
    }
    println!("账号 {} 已更新", id);
    Ok(())
}

pub(super) fn settings<A: DashboardApi>(
    store: &mut AppStore<A>,
    command: SettingsCommand,
) -> Result<()> {
    if let SettingsCommand::Set(args) = command {
        store.update_config(AppConfigPatch {
            ai_api_key: args.api_key,
            ai_model: args.model,
            ai_api_base_url: args.base_url,
            collect_frequency: args.frequency,
            auto_rewrite: args.auto_rewrite,
            auto_publish: args.auto_publish,
        });
        println!("设置已保存");
    }
    print_config(store.config());
    Ok(())
}

fn print_config(config: &AppConfig) {
    println!("AI 接口地址: {}", config.ai_api_base_url);
    println!("AI 模型: {}", config.ai_model);
    println!("AI 密钥: {}", mask_key(&config.ai_api_key));
    println!("采集频率: {} 分钟", config.collect_frequency);
    println!("自动改写: {}", config.auto_rewrite);
    println!("自动发布: {}", config.auto_publish);
}

/// 只显示密钥前 4 位
fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "未配置".to_string();
    }
    let head: String = key.chars().take(4).collect();
    format!("{}****", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "未配置");
        assert_eq!(mask_key("sk-abcdef"), "sk-a****");
        assert_eq!(mask_key("ab"), "ab****");
    }
}

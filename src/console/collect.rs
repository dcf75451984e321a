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


use super::cli::{CollectCommand, HistoryArgs, RunArgs, SourcesCommand};
use super::{confirm, truncate};
use crate::application::dto::collect_dto::{
    BatchListQuery, CreateSourceDto, ExecuteCollectDto, HistoryQueryDto, ResultListQuery,
    SourceListQuery, UpdateSourceDto,
};
use crate::client::api_client::DashboardApi;
use crate::client::store::AppStore;
use crate::domain::models::collect_batch::CollectType;
use anyhow::{bail, Result};
use uuid::Uuid;

pub(super) async fn handle<A: DashboardApi>(
    store: &mut AppStore<A>,
    command: CollectCommand,
) -> Result<()> {
    match command {
        CollectCommand::Sources { command } => sources(store, command).await,
        CollectCommand::Run(args) => run(store, args).await,
        CollectCommand::Results {
            batch,
            selected,
            page,
            limit,
        } => {
            let query = ResultListQuery {
                batch_id: batch,
                page: Some(page),
                limit: Some(limit),
                only_selected: Some(selected),
            };
            store.load_results(query).await?;
            print_results(store);
            Ok(())
        }
        CollectCommand::Select { ids, off } => {
            let updated = store.set_result_selection(&ids, !off).await?;
            println!("已更新 {} 条采集结果", updated);
            Ok(())
        }
        CollectCommand::Discard { ids } => {
            let deleted = store.delete_results(&ids).await?;
            println!("已删除 {} 条采集结果", deleted);
            Ok(())
        }
        CollectCommand::Promote { ids, batch } => promote(store, ids, batch).await,
        CollectCommand::Batches {
            status,
            page,
            limit,
        } => {
            let query = BatchListQuery {
                page: Some(page),
                limit: Some(limit),
                status,
            };
            store.load_batches(query).await?;
            for batch in store.batches() {
                println!(
                    "{}  {}  [{}] {}  共 {} 条 成功 {} 失败 {}",
                    batch.id,
                    batch.created_at.format("%Y-%m-%d %H:%M"),
                    batch.status,
                    batch.name,
                    batch.total_count,
                    batch.success_count,
                    batch.error_count
                );
            }
            Ok(())
        }
        CollectCommand::History(args) => history(store, args).await,
        CollectCommand::Provider => {
            let status = store.api().provider_status().await?;
            println!("{}", status.connection.message);
            println!(
                "服务地址: {}  密钥: {}",
                status.api_info.base_url, status.api_info.access_key_prefix
            );
            Ok(())
        }
        CollectCommand::Nodes => {
            for node in store.api().list_nodes().await? {
                println!(
                    "{}  {}  {}",
                    node.hashid,
                    node.name,
                    node.display.as_deref().unwrap_or_default()
                );
            }
            Ok(())
        }
    }
}

async fn sources<A: DashboardApi>(store: &mut AppStore<A>, command: SourcesCommand) -> Result<()> {
    match command {
        SourcesCommand::List { platform, active } => {
            let query = SourceListQuery {
                platform,
                is_active: active.then_some(true),
            };
            store.load_sources(query).await?;
            for source in store.sources() {
                println!(
                    "{}  {} {}  {}  hashId={}",
                    source.id,
                    if source.is_active { "●" } else { "○" },
                    source.platform,
                    source.name,
                    source.hash_id
                );
            }
        }
        SourcesCommand::Add {
            name,
            platform,
            hash_id,
            category,
            description,
            inactive,
        } => {
            let dto = CreateSourceDto {
                name,
                platform,
                hash_id,
                category,
                description,
                is_active: Some(!inactive),
                ..Default::default()
            };
            let source = store.create_source(dto).await?;
            println!("采集源创建成功: {} ({})", source.name, source.id);
        }
        SourcesCommand::Enable { id } => toggle(store, id, true).await?,
        SourcesCommand::Disable { id } => toggle(store, id, false).await?,
        SourcesCommand::Remove { id, cascade } => remove_source(store, id, cascade).await?,
    }
    Ok(())
}

async fn toggle<A: DashboardApi>(store: &mut AppStore<A>, id: Uuid, active: bool) -> Result<()> {
    let dto = UpdateSourceDto {
        is_active: Some(active),
        ..Default::default()
    };
    let source = store.update_source(id, dto).await?;
    println!(
        "{} 已{}",
        source.name,
        if source.is_active { "启用" } else { "停用" }
    );
    Ok(())
}

/// 删除采集源，被关联数据阻止时询问是否级联删除
async fn remove_source<A: DashboardApi>(
    store: &mut AppStore<A>,
    id: Uuid,
    cascade: bool,
) -> Result<()> {
    let deleted = match store.delete_source(id, cascade).await {
        Ok(deleted) => deleted,
        Err(e) if e.is_related_data_conflict() => {
            let (results, batches) = e.related_counts().unwrap_or_default();
            println!(
                "该采集源存在关联数据：{} 条采集结果，{} 个采集批次",
                results, batches
            );
            if !confirm("是否同时删除相关数据？")? {
                println!("已取消");
                return Ok(());
            }
            store.delete_source(id, true).await?
        }
        Err(e) => return Err(e.into()),
    };

    if deleted.cascade {
        println!(
            "采集源及相关数据删除成功：删除 {} 条结果，更新 {} 个批次",
            deleted.results_deleted, deleted.batches_updated
        );
    } else {
        println!("采集源删除成功");
    }
    Ok(())
}

async fn run<A: DashboardApi>(store: &mut AppStore<A>, args: RunArgs) -> Result<()> {
    let source_ids = if args.sources.is_empty() {
        store
            .load_sources(SourceListQuery {
                is_active: Some(true),
                ..Default::default()
            })
            .await?;
        store.sources().iter().map(|s| s.id).collect()
    } else {
        args.sources
    };
    if source_ids.is_empty() {
        bail!("没有可用的采集源，请先添加或启用采集源");
    }

    let collect_type = if args.keyword.is_some() {
        CollectType::Keyword
    } else {
        CollectType::Full
    };
    let dto = ExecuteCollectDto {
        source_ids,
        collect_type: collect_type.to_string(),
        keyword: args.keyword,
        name: args.name,
        description: args.description,
        limit: args.limit,
    };

    let outcome = store.run_collect(dto).await?;
    println!(
        "批次 {}：共 {} 条，采集 {} 条，重复 {} 条，失败 {} 个采集源",
        outcome.batch_id, outcome.total, outcome.collected, outcome.duplicated, outcome.failed
    );
    for error in outcome.errors.iter().flatten() {
        println!("  ! {}", error);
    }
    print_results(store);
    Ok(())
}

async fn promote<A: DashboardApi>(
    store: &mut AppStore<A>,
    ids: Vec<Uuid>,
    batch: Option<Uuid>,
) -> Result<()> {
    let ids = if ids.is_empty() {
        let query = ResultListQuery {
            batch_id: batch,
            only_selected: Some(true),
            limit: Some(100),
            ..Default::default()
        };
        store.load_results(query).await?;
        store
            .results()
            .iter()
            .filter(|r| !r.added_to_materials)
            .map(|r| r.id)
            .collect()
    } else {
        ids
    };
    if ids.is_empty() {
        bail!("没有已勾选的采集结果");
    }

    let outcome = store.promote_results(&ids).await?;
    println!(
        "成功添加 {} 条内容到素材库，跳过 {} 条已添加的内容",
        outcome.added, outcome.skipped
    );
    Ok(())
}

async fn history<A: DashboardApi>(store: &mut AppStore<A>, args: HistoryArgs) -> Result<()> {
    let query = HistoryQueryDto {
        page: Some(args.page),
        limit: Some(args.limit),
        source_id: args.source,
        platform: args.platform,
        range: args.range,
        start_date: args.from,
        end_date: args.to,
        include_stats: Some(true),
    };
    let page = store.api().history(&query).await?;

    for record in &page.history {
        let name = record
            .source
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("未知采集源");
        println!(
            "{}  {}  返回 {} 条 写入 {} 条",
            record.collected_at.format("%Y-%m-%d %H:%M"),
            name,
            record.articles_count,
            record.success_count
        );
    }
    let summary = &page.summary;
    println!(
        "第 {}/{} 页，共 {} 条记录；累计 {} 条，成功 {} 条，平均成功率 {:.1}%",
        page.pagination.current_page,
        page.pagination.total_pages,
        summary.total_history_records,
        summary.total_articles,
        summary.total_success,
        summary.average_success_rate
    );
    Ok(())
}

fn print_results<A: DashboardApi>(store: &AppStore<A>) {
    for result in store.results() {
        println!(
            "{} {}{} {:>10}  [{}] {}",
            result.id,
            if result.is_selected { "☑" } else { "☐" },
            if result.added_to_materials { "✓" } else { " " },
            result.read_count,
            result.source,
            truncate(&result.title, 40)
        );
    }
}

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


use super::cli::MaterialsCommand;
use super::truncate;
use crate::application::dto::material_dto::{BatchOperationResult, MaterialListQuery};
use crate::client::api_client::DashboardApi;
use crate::client::store::AppStore;
use crate::domain::models::article::Article;
use anyhow::Result;

pub(super) async fn handle<A: DashboardApi>(
    store: &mut AppStore<A>,
    command: MaterialsCommand,
) -> Result<()> {
    match command {
        MaterialsCommand::List {
            status,
            search,
            page,
            limit,
            sort_by,
            order,
        } => {
            let query = MaterialListQuery {
                page: Some(page),
                limit: Some(limit),
                status: status.map(|s| s.to_string()),
                search,
                sort_by,
                order,
            };
            store.load_materials(query).await?;
            for article in store.materials() {
                print_row(article);
            }
            println!("共 {} 条素材", store.material_total());
        }
        MaterialsCommand::Show { id } => {
            let article = store.api().get_material(id).await?;
            print_detail(&article);
        }
        MaterialsCommand::Delete { ids } => {
            if let [id] = ids.as_slice() {
                store.delete_material(*id).await?;
                println!("素材删除成功");
            } else {
                let outcome = store.delete_materials(&ids).await?;
                print_batch(&outcome);
            }
        }
        MaterialsCommand::Status { status, ids } => {
            let outcome = store.set_material_status(&ids, status).await?;
            print_batch(&outcome);
        }
    }
    Ok(())
}

fn print_row(article: &Article) {
    println!(
        "{}  {:<9}  {}  [{}] {}",
        article.id,
        article.status.to_string(),
        article.collect_time.format("%m-%d %H:%M"),
        article.source,
        truncate(&article.title, 40)
    );
}

fn print_detail(article: &Article) {
    println!("{}", article.title);
    println!(
        "来源: {}  状态: {}  阅读: {}  点赞: {}",
        article.source, article.status, article.read_count, article.like_count
    );
    if let Some(url) = &article.source_url {
        println!("链接: {}", url);
    }
    if !article.tags.is_empty() {
        println!("标签: {}", article.tags.join(", "));
    }
    println!();
    println!("{}", article.content);
}

fn print_batch(outcome: &BatchOperationResult) {
    println!("{}", outcome.message);
    for failure in &outcome.results.details.failed {
        println!("  ! {}: {}", failure.id, failure.error);
    }
}

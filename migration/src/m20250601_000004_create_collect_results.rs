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

use sea_orm_migration::prelude::*;

use crate::m20250601_000002_create_collect_sources::CollectSources;
use crate::m20250601_000003_create_collect_batches::CollectBatches;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CollectResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectResults::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CollectResults::Title).string_len(500).not_null())
                    .col(ColumnDef::new(CollectResults::Content).text().not_null())
                    .col(ColumnDef::new(CollectResults::Source).string().not_null())
                    .col(ColumnDef::new(CollectResults::SourceUrl).text().null())
                    .col(ColumnDef::new(CollectResults::Author).string().null())
                    .col(
                        ColumnDef::new(CollectResults::PublishTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectResults::CollectTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(CollectResults::Tags).json().not_null())
                    .col(ColumnDef::new(CollectResults::Category).string().null())
                    .col(
                        ColumnDef::new(CollectResults::ReadCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CollectResults::LikeCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CollectResults::SourceId).uuid().not_null())
                    .col(
                        ColumnDef::new(CollectResults::CollectBatchId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CollectResults::Keyword).string().null())
                    .col(
                        ColumnDef::new(CollectResults::IsSelected)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CollectResults::AddedToMaterials)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CollectResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CollectResults::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collect_results_source")
                            .from(CollectResults::Table, CollectResults::SourceId)
                            .to(CollectSources::Table, CollectSources::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collect_results_batch")
                            .from(CollectResults::Table, CollectResults::CollectBatchId)
                            .to(CollectBatches::Table, CollectBatches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collect_results_batch")
                    .table(CollectResults::Table)
                    .col(CollectResults::CollectBatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collect_results_source")
                    .table(CollectResults::Table)
                    .col(CollectResults::SourceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectResults::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CollectResults {
    Table,
    Id,
    Title,
    Content,
    Source,
    SourceUrl,
    Author,
    PublishTime,
    CollectTime,
    Tags,
    Category,
    ReadCount,
    LikeCount,
    SourceId,
    CollectBatchId,
    Keyword,
    IsSelected,
    AddedToMaterials,
    CreatedAt,
    UpdatedAt,
}

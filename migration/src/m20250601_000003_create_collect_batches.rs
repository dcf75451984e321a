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

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CollectBatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectBatches::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CollectBatches::Name).string().not_null())
                    .col(ColumnDef::new(CollectBatches::Description).text().null())
                    .col(
                        ColumnDef::new(CollectBatches::CollectType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CollectBatches::Keyword).string().null())
                    // uuid 数组以 JSON 保存，兼容 Postgres 与 SQLite
                    .col(ColumnDef::new(CollectBatches::SourceIds).json().not_null())
                    .col(
                        ColumnDef::new(CollectBatches::TotalCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CollectBatches::SuccessCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CollectBatches::ErrorCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CollectBatches::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(CollectBatches::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectBatches::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectBatches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collect_batches_status")
                    .table(CollectBatches::Table)
                    .col(CollectBatches::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectBatches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CollectBatches {
    Table,
    Id,
    Name,
    Description,
    CollectType,
    Keyword,
    SourceIds,
    TotalCount,
    SuccessCount,
    ErrorCount,
    Status,
    StartedAt,
    CompletedAt,
    CreatedAt,
}

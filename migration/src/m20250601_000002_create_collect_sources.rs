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
                    .table(CollectSources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectSources::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CollectSources::Name).string().not_null())
                    .col(ColumnDef::new(CollectSources::Platform).string().not_null())
                    .col(ColumnDef::new(CollectSources::ApiEndpoint).string().null())
                    .col(
                        ColumnDef::new(CollectSources::HashId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CollectSources::Category).string().null())
                    .col(ColumnDef::new(CollectSources::Description).text().null())
                    .col(
                        ColumnDef::new(CollectSources::UserCreated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CollectSources::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(CollectSources::Config).json().not_null())
                    .col(
                        ColumnDef::new(CollectSources::CreatedAt)
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
                    .name("idx_collect_sources_platform")
                    .table(CollectSources::Table)
                    .col(CollectSources::Platform)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectSources::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CollectSources {
    Table,
    Id,
    Name,
    Platform,
    ApiEndpoint,
    HashId,
    Category,
    Description,
    UserCreated,
    IsActive,
    Config,
    CreatedAt,
}

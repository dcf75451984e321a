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


use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "collect_results")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub source: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub publish_time: Option<ChronoDateTimeWithTimeZone>,
    pub collect_time: ChronoDateTimeWithTimeZone,
    pub tags: Json,
    pub category: Option<String>,
    pub read_count: i64,
    pub like_count: i64,
    pub source_id: Uuid,
    pub collect_batch_id: Uuid,
    pub keyword: Option<String>,
    pub is_selected: bool,
    pub added_to_materials: bool,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::collect_source::Entity",
        from = "Column::SourceId",
        to = "super::collect_source::Column::Id"
    )]
    CollectSource,
    #[sea_orm(
        belongs_to = "super::collect_batch::Entity",
        from = "Column::CollectBatchId",
        to = "super::collect_batch::Column::Id"
    )]
    CollectBatch,
}

impl Related<super::collect_source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectSource.def()
    }
}

impl Related<super::collect_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectBatch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

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
#[sea_orm(table_name = "collect_sources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub platform: String,
    pub api_endpoint: Option<String>,
    #[sea_orm(unique)]
    pub hash_id: String,
    pub category: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub user_created: bool,
    pub is_active: bool,
    pub config: Json,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::collect_result::Entity")]
    CollectResult,
    #[sea_orm(has_many = "super::collect_history::Entity")]
    CollectHistory,
}

impl Related<super::collect_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectResult.def()
    }
}

impl Related<super::collect_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

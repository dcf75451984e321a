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


use crate::domain::models::article::{
    Article, ArticlePatch, ArticleQuery, ArticleSortField, ArticleStatus, SortOrder,
};
use crate::domain::repositories::article_repository::ArticleRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::article as article_entity;
use crate::infrastructure::repositories::mapping::{page_index, string_list_json};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    *,
};
use std::sync::Arc;
use uuid::Uuid;

/// 素材仓库实现
pub struct ArticleRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ArticleRepositoryImpl {
    /// 创建新的素材仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// 标题、正文、作者上的不区分大小写子串匹配
fn search_condition(term: &str) -> Condition {
    let pattern = format!("%{}%", term.to_lowercase());
    [
        article_entity::Column::Title,
        article_entity::Column::Content,
        article_entity::Column::Author,
    ]
    .into_iter()
    .fold(Condition::any(), |cond, column| {
        cond.add(Expr::expr(Func::lower(Expr::col(column))).like(pattern.clone()))
    })
}

fn sort_column(field: ArticleSortField) -> article_entity::Column {
    match field {
        ArticleSortField::CollectTime => article_entity::Column::CollectTime,
        ArticleSortField::ReadCount => article_entity::Column::ReadCount,
        ArticleSortField::LikeCount => article_entity::Column::LikeCount,
    }
}

#[async_trait]
impl ArticleRepository for ArticleRepositoryImpl {
    async fn list(&self, query: &ArticleQuery) -> Result<(Vec<Article>, u64), RepositoryError> {
        let mut select = article_entity::Entity::find();

        if let Some(status) = query.status {
            select = select.filter(article_entity::Column::Status.eq(status.to_string()));
        }

        if let Some(term) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            select = select.filter(search_condition(term));
        }

        let order = match query.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select = select
            .order_by(sort_column(query.sort_by), order)
            .order_by_asc(article_entity::Column::Id);

        let paginator = select.paginate(self.db.as_ref(), query.limit.max(1));
        let total = paginator.num_items().await?;
        let Some(index) = page_index(query.page, query.limit) else {
            return Ok((Vec::new(), total));
        };
        let models = paginator.fetch_page(index).await?;

        let articles = models
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((articles, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        article_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Article::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Article>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        article_entity::Entity::find()
            .filter(article_entity::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Article::try_from)
            .collect()
    }

    async fn create(&self, article: &Article) -> Result<Article, RepositoryError> {
        let model: article_entity::ActiveModel = article.into();
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Article::try_from(inserted)
    }

    async fn update(&self, id: Uuid, patch: &ArticlePatch) -> Result<Article, RepositoryError> {
        let mut model: article_entity::ActiveModel = article_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        if let Some(title) = &patch.title {
            model.title = Set(title.clone());
        }
        if let Some(content) = &patch.content {
            model.content = Set(content.clone());
        }
        if let Some(source) = &patch.source {
            model.source = Set(source.clone());
        }
        if let Some(source_url) = &patch.source_url {
            model.source_url = Set(Some(source_url.clone()));
        }
        if let Some(author) = &patch.author {
            model.author = Set(Some(author.clone()));
        }
        if let Some(publish_time) = patch.publish_time {
            model.publish_time = Set(Some(publish_time.into()));
        }
        if let Some(tags) = &patch.tags {
            model.tags = Set(string_list_json(tags));
        }
        if let Some(category) = &patch.category {
            model.category = Set(Some(category.clone()));
        }
        if let Some(read_count) = patch.read_count {
            model.read_count = Set(read_count);
        }
        if let Some(like_count) = patch.like_count {
            model.like_count = Set(like_count);
        }
        if let Some(status) = patch.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(self.db.as_ref()).await?;
        Article::try_from(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = article_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn batch_update_status(
        &self,
        ids: &[Uuid],
        status: ArticleStatus,
    ) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = article_entity::Entity::update_many()
            .col_expr(
                article_entity::Column::Status,
                Expr::value(status.to_string()),
            )
            .col_expr(
                article_entity::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(article_entity::Column::Id.is_in(ids.to_vec()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn batch_delete(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = article_entity::Entity::delete_many()
            .filter(article_entity::Column::Id.is_in(ids.to_vec()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn exists(
        &self,
        title: &str,
        source_url: Option<String>,
    ) -> Result<bool, RepositoryError> {
        let mut select =
            article_entity::Entity::find().filter(article_entity::Column::Title.eq(title));
        if let Some(url) = source_url {
            select = select.filter(article_entity::Column::SourceUrl.eq(url));
        }
        Ok(select.count(self.db.as_ref()).await? > 0)
    }
}

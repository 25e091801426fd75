//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, NotSet, PaginatorTrait, QueryOrder, Set,
};

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::pagination::Page;
use blog_core::ports::{Hydration, PostRepository};

use super::connections::SharedConn;
use super::entity::post::{self, Entity as PostEntity};
use super::hydrate;
use super::postgres_base::map_db_err;

pub struct PostgresPostRepository {
    db: SharedConn,
}

impl PostgresPostRepository {
    pub fn new(db: impl Into<SharedConn>) -> Self {
        Self { db: db.into() }
    }

    async fn reload(&self, id: i32) -> Result<Post, RepoError> {
        self.find_by_id(id, Hydration::Full)
            .await?
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i32, hydration: Hydration) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(hydrate::posts(&self.db, vec![model], hydration).await?.pop())
    }

    async fn find_all_paginated(&self, per_page: u64, page: u64) -> Result<Page<Post>, RepoError> {
        let per_page = per_page.max(1);
        let page = page.max(1);

        let paginator = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .paginate(self.db.as_ref(), per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        // Past the end nothing is fetched, which also keeps the offset in range.
        if page > total.div_ceil(per_page).max(1) {
            tracing::debug!(total, page, per_page, "Requested page is past the end");
            return Ok(Page::new(Vec::new(), total, per_page, page));
        }
        let models = paginator.fetch_page(page - 1).await.map_err(map_db_err)?;
        tracing::debug!(total, page, per_page, rows = models.len(), "Fetched post page");

        let posts = hydrate::posts(&self.db, models, Hydration::Full).await?;
        Ok(Page::new(posts, total, per_page, page))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let row = post::ActiveModel {
            id: NotSet,
            user_id: Set(post.author().id),
            title: Set(post.title().as_str().to_owned()),
            content: Set(post.content().as_str().to_owned()),
            image_path: Set(post.image_path().map(str::to_owned)),
            created_at: Set(post.created_at().into()),
            updated_at: Set(post.updated_at().into()),
        };

        let inserted = row.insert(self.db.as_ref()).await.map_err(map_db_err)?;
        tracing::info!(post_id = inserted.id, author_id = inserted.user_id, "Post created");

        self.reload(inserted.id).await
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(post.id())
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut row = existing.into_active_model();
        row.title = Set(post.title().as_str().to_owned());
        row.content = Set(post.content().as_str().to_owned());
        row.image_path = Set(post.image_path().map(str::to_owned));
        row.updated_at = Set(post.updated_at().into());
        row.update(self.db.as_ref()).await.map_err(map_db_err)?;

        self.reload(post.id()).await
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }
}

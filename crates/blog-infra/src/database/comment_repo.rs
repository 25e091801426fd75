//! PostgreSQL comment repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, NotSet, QueryFilter,
    QueryOrder, Set,
};

use blog_core::domain::Comment;
use blog_core::error::RepoError;
use blog_core::ports::CommentRepository;

use super::connections::SharedConn;
use super::entity::comment::{self, Entity as CommentEntity};
use super::hydrate;
use super::postgres_base::map_db_err;

pub struct PostgresCommentRepository {
    db: SharedConn,
}

impl PostgresCommentRepository {
    pub fn new(db: impl Into<SharedConn>) -> Self {
        Self { db: db.into() }
    }

    async fn hydrate_one(&self, model: comment::Model) -> Result<Comment, RepoError> {
        hydrate::comments(&self.db, vec![model])
            .await?
            .pop()
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        match CommentEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
        {
            Some(model) => Ok(Some(self.hydrate_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let models = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        hydrate::comments(&self.db, models).await
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let row = comment::ActiveModel {
            id: NotSet,
            post_id: Set(comment.post_id()),
            user_id: Set(comment.author().id),
            content: Set(comment.content().as_str().to_owned()),
            created_at: Set(comment.created_at().into()),
            updated_at: Set(comment.updated_at().into()),
        };

        let inserted = row.insert(self.db.as_ref()).await.map_err(map_db_err)?;
        tracing::info!(
            comment_id = inserted.id,
            post_id = inserted.post_id,
            "Comment created"
        );

        self.hydrate_one(inserted).await
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let existing = CommentEntity::find_by_id(comment.id())
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut row = existing.into_active_model();
        row.content = Set(comment.content().as_str().to_owned());
        row.updated_at = Set(comment.updated_at().into());
        let updated = row.update(self.db.as_ref()).await.map_err(map_db_err)?;

        self.hydrate_one(updated).await
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = CommentEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }
}

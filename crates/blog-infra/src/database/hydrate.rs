//! Row -> entity hydration.
//!
//! Relations are loaded in batches, one query per table: posts first, then
//! their comments (for [`Hydration::Full`]), then every referenced user.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};

use blog_core::domain::{Author, Comment, CommentContent, Post, PostContent, PostTitle};
use blog_core::error::RepoError;
use blog_core::ports::Hydration;

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post;
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::map_db_err;

type Authors = HashMap<i32, Author>;

async fn load_authors(db: &DbConn, ids: BTreeSet<i32>) -> Result<Authors, RepoError> {
    if ids.is_empty() {
        return Ok(Authors::new());
    }

    let users = UserEntity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(map_db_err)?;

    Ok(users.iter().map(|u| (u.id, u.author())).collect())
}

fn author_of(authors: &Authors, user_id: i32) -> Result<Author, RepoError> {
    authors
        .get(&user_id)
        .cloned()
        .ok_or(RepoError::MissingRelation("author"))
}

fn comment_from_model(model: comment::Model, authors: &Authors) -> Result<Comment, RepoError> {
    Ok(Comment::restore(
        model.id,
        CommentContent::new(model.content)?,
        author_of(authors, model.user_id)?,
        model.post_id,
        model.created_at.into(),
        model.updated_at.into(),
    ))
}

/// Attach authors to comment rows, preserving their order.
pub(crate) async fn comments(
    db: &DbConn,
    models: Vec<comment::Model>,
) -> Result<Vec<Comment>, RepoError> {
    let authors = load_authors(db, models.iter().map(|c| c.user_id).collect()).await?;

    models
        .into_iter()
        .map(|model| comment_from_model(model, &authors))
        .collect()
}

/// Attach authors (and comments, for [`Hydration::Full`]) to post rows,
/// preserving their order.
pub(crate) async fn posts(
    db: &DbConn,
    models: Vec<post::Model>,
    hydration: Hydration,
) -> Result<Vec<Post>, RepoError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let comment_rows = match hydration {
        Hydration::Shallow => Vec::new(),
        Hydration::Full => {
            let post_ids: Vec<i32> = models.iter().map(|p| p.id).collect();
            CommentEntity::find()
                .filter(comment::Column::PostId.is_in(post_ids))
                .order_by_asc(comment::Column::CreatedAt)
                .order_by_asc(comment::Column::Id)
                .all(db)
                .await
                .map_err(map_db_err)?
        }
    };

    let user_ids: BTreeSet<i32> = models
        .iter()
        .map(|p| p.user_id)
        .chain(comment_rows.iter().map(|c| c.user_id))
        .collect();
    let authors = load_authors(db, user_ids).await?;

    let mut threads: HashMap<i32, Vec<Comment>> = HashMap::new();
    for row in comment_rows {
        let post_id = row.post_id;
        threads
            .entry(post_id)
            .or_default()
            .push(comment_from_model(row, &authors)?);
    }

    models
        .into_iter()
        .map(|model| -> Result<Post, RepoError> {
            let comments = match hydration {
                Hydration::Shallow => None,
                Hydration::Full => Some(threads.remove(&model.id).unwrap_or_default()),
            };
            Ok(Post::restore(
                model.id,
                PostTitle::new(model.title)?,
                PostContent::new(model.content)?,
                model.image_path,
                author_of(&authors, model.user_id)?,
                model.created_at.into(),
                model.updated_at.into(),
                comments,
            ))
        })
        .collect()
}

//! Postgres post repository with eager author loading.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, TransactionTrait,
};

use byline_core::domain::{NewPost, Post, PostDraft, PostWithAuthor};
use byline_core::error::RepoError;
use byline_core::ports::PostRepository;

use super::entity::{author, post};
use super::guard;

/// Postgres-backed implementation of [`PostRepository`].
///
/// Reads that embed an author view join both tables in one statement, so
/// the round-trip count stays constant no matter how many rows come back.
pub struct PostgresPostRepository {
    pub(crate) db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: impl Into<Arc<DbConn>>) -> Self {
        Self { db: db.into() }
    }
}

/// Pair a joined row into the read model. The FK is NOT NULL, so a missing
/// author half means the join hit broken referential integrity.
fn with_author(row: (post::Model, Option<author::Model>)) -> Result<PostWithAuthor, RepoError> {
    let (post, author) = row;
    let author = author
        .ok_or_else(|| RepoError::Query(format!("post {} joined no author row", post.id)))?;

    Ok(PostWithAuthor {
        post: post.into(),
        author: author.into(),
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new: NewPost) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(guard::map_db_err)?;

        if let Err(err) = guard::author_exists(&txn, new.author_id).await {
            txn.rollback().await.map_err(guard::map_db_err)?;
            return Err(err);
        }

        let author_id = new.author_id;
        let inserted = post::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            author_id: Set(new.author_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| guard::translate_post_write(e, author_id))?;

        txn.commit()
            .await
            .map_err(|e| guard::translate_post_write(e, author_id))?;

        tracing::info!(post_id = inserted.id, author_id, "post created");
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = post::Entity::find_by_id(id)
            .find_also_related(author::Entity)
            .one(self.db.as_ref())
            .await
            .map_err(guard::map_db_err)?;

        row.map(with_author).transpose()
    }

    async fn list(&self, author_id: Option<i32>) -> Result<Vec<PostWithAuthor>, RepoError> {
        let mut select = post::Entity::find().order_by_asc(post::Column::Id);
        if let Some(author_id) = author_id {
            select = select.filter(post::Column::AuthorId.eq(author_id));
        }

        // One joined query serves every row; never a per-post author fetch.
        let rows = select
            .find_also_related(author::Entity)
            .all(self.db.as_ref())
            .await
            .map_err(guard::map_db_err)?;

        rows.into_iter().map(with_author).collect()
    }

    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError> {
        let rows = post::Entity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(guard::map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(guard::map_db_err)?;

        let Some(found) = post::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(guard::map_db_err)?
        else {
            txn.rollback().await.map_err(guard::map_db_err)?;
            return Err(RepoError::NotFound);
        };

        // Only title and content move; the author reference stays put.
        let mut active = found.into_active_model();
        active.title = Set(draft.title);
        active.content = Set(draft.content);

        let updated = active.update(&txn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => guard::map_db_err(other),
        })?;

        txn.commit().await.map_err(guard::map_db_err)?;

        tracing::info!(post_id = id, "post updated");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = post::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(guard::map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = id, "post deleted");
        Ok(())
    }
}

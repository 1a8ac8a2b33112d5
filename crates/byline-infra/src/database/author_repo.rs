//! Postgres author repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use byline_core::domain::{Author, AuthorDraft};
use byline_core::error::RepoError;
use byline_core::ports::{AuthorRepository, Page};

use super::entity::{author, post};
use super::guard;

/// Postgres-backed implementation of [`AuthorRepository`].
///
/// Every check-then-act flow runs inside one store transaction, so a
/// concurrent worker never observes a partial state.
pub struct PostgresAuthorRepository {
    pub(crate) db: Arc<DbConn>,
}

impl PostgresAuthorRepository {
    pub fn new(db: impl Into<Arc<DbConn>>) -> Self {
        Self { db: db.into() }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError> {
        let found = author::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(guard::map_db_err)?;

        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, RepoError> {
        // Mask the email so no PII lands in log streams.
        tracing::debug!(author_email = %mask_email(email), "looking up author by email");

        let found = author::Entity::find()
            .filter(author::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(guard::map_db_err)?;

        Ok(found.map(Into::into))
    }

    async fn list(&self, page: Page) -> Result<Vec<Author>, RepoError> {
        let rows = author::Entity::find()
            .order_by_asc(author::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db.as_ref())
            .await
            .map_err(guard::map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: AuthorDraft) -> Result<Author, RepoError> {
        let txn = self.db.begin().await.map_err(guard::map_db_err)?;

        if let Err(err) = guard::email_unused(&txn, &draft.email).await {
            txn.rollback().await.map_err(guard::map_db_err)?;
            return Err(err);
        }

        let email = draft.email.clone();
        let inserted = author::ActiveModel {
            name: Set(draft.name),
            email: Set(draft.email),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| guard::translate_author_write(e, &email))?;

        txn.commit()
            .await
            .map_err(|e| guard::translate_author_write(e, &email))?;

        tracing::info!(author_id = inserted.id, "author created");
        Ok(inserted.into())
    }

    async fn update(&self, id: i32, draft: AuthorDraft) -> Result<Author, RepoError> {
        let txn = self.db.begin().await.map_err(guard::map_db_err)?;

        let Some(found) = author::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(guard::map_db_err)?
        else {
            txn.rollback().await.map_err(guard::map_db_err)?;
            return Err(RepoError::NotFound);
        };

        // Uniqueness is not re-checked against other authors here; the
        // UNIQUE constraint still has the last word on a collision.
        let email = draft.email.clone();
        let mut active = found.into_active_model();
        active.name = Set(draft.name);
        active.email = Set(draft.email);

        let updated = active.update(&txn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => guard::translate_author_write(other, &email),
        })?;

        txn.commit()
            .await
            .map_err(|e| guard::translate_author_write(e, &email))?;

        tracing::info!(author_id = id, "author updated");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(guard::map_db_err)?;

        if author::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(guard::map_db_err)?
            .is_none()
        {
            txn.rollback().await.map_err(guard::map_db_err)?;
            return Err(RepoError::NotFound);
        }

        // Children first, parent second. The schema's ON DELETE CASCADE
        // backstops the same rule at the store.
        let posts = post::Entity::delete_many()
            .filter(post::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(guard::map_db_err)?;

        author::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(guard::map_db_err)?;

        txn.commit().await.map_err(guard::map_db_err)?;

        tracing::info!(
            author_id = id,
            cascaded_posts = posts.rows_affected,
            "author deleted with owned posts"
        );
        Ok(())
    }
}

/// Keep everything after the first character of the local part out of logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let mut masked = String::new();
            if let Some(first) = local.chars().next() {
                if local.chars().count() > 1 {
                    masked.push(first);
                }
            }
            masked.push_str("***@");
            masked.push_str(domain);
            masked
        }
        None => "***".to_string(),
    }
}

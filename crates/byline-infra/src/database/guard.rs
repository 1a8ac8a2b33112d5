//! Transactional precondition checks and constraint translation.
//!
//! The application-level checks give a fast path with a precise error; the
//! store's own UNIQUE/FK constraints stay the final authority when two
//! workers race past the same check. Whichever side reports the violation,
//! callers see the same typed error; a raw database error never leaks.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, SqlErr};

use byline_core::error::RepoError;

use super::entity::author;

/// Succeeds when no author currently holds `email`.
///
/// Generic over the connection so the check runs against the same open
/// transaction as the insert it protects.
pub(crate) async fn email_unused<C>(conn: &C, email: &str) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    let existing = author::Entity::find()
        .filter(author::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(map_db_err)?;

    match existing {
        Some(_) => Err(RepoError::DuplicateEmail(email.to_string())),
        None => Ok(()),
    }
}

/// Succeeds when `author_id` resolves to an existing author.
pub(crate) async fn author_exists<C>(conn: &C, author_id: i32) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    let found = author::Entity::find_by_id(author_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;

    match found {
        Some(_) => Ok(()),
        None => Err(RepoError::InvalidReference(author_id)),
    }
}

/// The two constraint families the schema declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
    Unique,
    ForeignKey,
}

/// Classify a database error as a constraint violation, if it is one.
///
/// `DbErr::sql_err()` covers the live Postgres path; the message sniff
/// covers backends and test doubles that only carry text.
pub(crate) fn constraint_kind(err: &DbErr) -> Option<ConstraintKind> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return Some(ConstraintKind::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => return Some(ConstraintKind::ForeignKey),
        _ => {}
    }

    let msg = err.to_string().to_ascii_lowercase();
    if msg.contains("foreign key") {
        Some(ConstraintKind::ForeignKey)
    } else if msg.contains("unique") || msg.contains("duplicate") {
        Some(ConstraintKind::Unique)
    } else {
        None
    }
}

/// Map an untranslated database error onto the store-failure taxonomy.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// Translate a write error on the authors table. A duplicate-email race
/// lost at commit time surfaces here as a unique violation.
pub(crate) fn translate_author_write(err: DbErr, email: &str) -> RepoError {
    match constraint_kind(&err) {
        Some(ConstraintKind::Unique) => RepoError::DuplicateEmail(email.to_string()),
        _ => map_db_err(err),
    }
}

/// Translate a write error on the posts table. An author deleted between
/// the existence check and commit surfaces here as an FK violation.
pub(crate) fn translate_post_write(err: DbErr, author_id: i32) -> RepoError {
    match constraint_kind(&err) {
        Some(ConstraintKind::ForeignKey) => RepoError::InvalidReference(author_id),
        _ => map_db_err(err),
    }
}

//! Repository-level error taxonomy.

use thiserror::Error;

/// Typed outcomes of repository operations.
///
/// `Connection` and `Query` are both store failures; they stay separate so
/// connectivity loss can be told apart from a failed statement in logs.
/// Constraint violations surfacing at commit time are translated into
/// `DuplicateEmail` / `InvalidReference` before they reach a caller; a
/// raw database error is never part of the contract.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("entity not found")]
    NotFound,

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("author does not exist: {0}")]
    InvalidReference(i32),

    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),
}

impl RepoError {
    /// True for the two store-failure variants (not business outcomes).
    pub fn is_store_failure(&self) -> bool {
        matches!(self, RepoError::Connection(_) | RepoError::Query(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_offending_value() {
        let err = RepoError::DuplicateEmail("ada@x.com".to_string());
        assert_eq!(err.to_string(), "email already registered: ada@x.com");

        let err = RepoError::InvalidReference(99);
        assert_eq!(err.to_string(), "author does not exist: 99");
    }

    #[test]
    fn store_failures_are_classified() {
        assert!(RepoError::Connection("refused".into()).is_store_failure());
        assert!(RepoError::Query("syntax".into()).is_store_failure());
        assert!(!RepoError::NotFound.is_store_failure());
        assert!(!RepoError::DuplicateEmail("a@b.c".into()).is_store_failure());
    }
}

//! Repository tests against `sea_orm::MockDatabase`.
//!
//! The mock records every statement it sees, grouped per transaction, so
//! these tests can prove the shape guarantees (single-transaction
//! check-then-act flows, one round trip for eager loads) without a live
//! Postgres.

use std::sync::Arc;

use sea_orm::{
    DatabaseBackend, DbConn, DbErr, MockDatabase, MockExecResult, RuntimeErr, Transaction,
};

use byline_core::domain::{AuthorDraft, NewPost, PostDraft};
use byline_core::error::RepoError;
use byline_core::ports::{AuthorRepository, Page, PostRepository};

use super::entity::{author, post};
use super::{author_repo, guard, PostgresAuthorRepository, PostgresPostRepository};

fn author_model(id: i32) -> author::Model {
    author::Model {
        id,
        name: format!("Author {id}"),
        email: format!("author{id}@example.com"),
    }
}

fn post_model(id: i32, author_id: i32) -> post::Model {
    post::Model {
        id,
        title: format!("Post {id}"),
        content: "Lorem ipsum".to_string(),
        author_id,
    }
}

fn unique_violation() -> DbErr {
    DbErr::Query(RuntimeErr::Internal(
        "duplicate key value violates unique constraint \"authors_email_key\"".to_string(),
    ))
}

fn fk_violation() -> DbErr {
    DbErr::Exec(RuntimeErr::Internal(
        "insert or update on table \"posts\" violates foreign key constraint \"fk_posts_author_id\""
            .to_string(),
    ))
}

// Each repository holds the only handle to its mock, so the connection can
// be taken back out of it to inspect the recorded statements.
fn drain_log(db: Arc<DbConn>) -> Vec<Transaction> {
    Arc::into_inner(db)
        .expect("the repository held the sole connection handle")
        .into_transaction_log()
}

mod author_repository {
    use super::*;

    #[tokio::test]
    async fn create_returns_store_assigned_id() {
        let inserted = author::Model {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<author::Model>::new(), vec![inserted.clone()]])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let created = repo
            .create(AuthorDraft::new("Ada", "ada@x.com"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Ada");
        assert_eq!(created.email, "ada@x.com");

        // Duplicate check and insert share one transaction.
        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert_eq!(sql.matches("SELECT").count(), 1);
        assert_eq!(sql.matches("INSERT").count(), 1);
    }

    #[tokio::test]
    async fn create_with_taken_email_stops_before_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(1)]])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let err = repo
            .create(AuthorDraft::new("Imposter", "author1@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RepoError::DuplicateEmail(ref email) if email == "author1@example.com"
        ));

        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        assert!(!format!("{log:?}").contains("INSERT"));
    }

    #[tokio::test]
    async fn create_translates_lost_race_to_duplicate_email() {
        // Pre-check passes, then a concurrent insert wins: the UNIQUE
        // constraint fires at insert time and must come back typed.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<author::Model>::new()])
            .append_query_errors([unique_violation()])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let err = repo
            .create(AuthorDraft::new("Ada", "ada@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::DuplicateEmail(ref email) if email == "ada@x.com"));
    }

    #[tokio::test]
    async fn find_by_id_maps_the_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(7)]])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let found = repo.find_by_id(7).await.unwrap().unwrap();
        assert_eq!(found.id, 7);
        assert_eq!(found.email, "author7@example.com");
    }

    #[tokio::test]
    async fn find_by_id_absent_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<author::Model>::new()])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        assert!(repo.find_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_email_matches_exactly() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(3)]])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let found = repo.find_by_email("author3@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, 3);
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(1), author_model(2)]])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let authors = repo.list(Page::default()).await.unwrap();

        let ids: Vec<i32> = authors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert!(sql.contains("ORDER BY"));
        assert!(sql.contains("LIMIT"));
    }

    #[tokio::test]
    async fn update_overwrites_name_and_email() {
        let updated = author::Model {
            id: 5,
            name: "Grace".to_string(),
            email: "grace@x.com".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(5)], vec![updated.clone()]])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let author = repo
            .update(5, AuthorDraft::new("Grace", "grace@x.com"))
            .await
            .unwrap();

        assert_eq!(author.id, 5);
        assert_eq!(author.name, "Grace");
        assert_eq!(author.email, "grace@x.com");

        // One SELECT (the existence check) and the UPDATE. No second
        // lookup re-checking email uniqueness; that gap is intentional.
        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert_eq!(sql.matches("SELECT").count(), 1);
        assert_eq!(sql.matches("UPDATE").count(), 1);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<author::Model>::new()])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let err = repo
            .update(404, AuthorDraft::new("Nobody", "nobody@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn update_to_taken_email_hits_the_store_constraint() {
        // There is no application-level re-check on update; the UNIQUE
        // constraint rejects the collision and the error comes back typed
        // instead of as a raw store failure.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(5)]])
            .append_query_errors([unique_violation()])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let err = repo
            .update(5, AuthorDraft::new("Ada", "author1@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RepoError::DuplicateEmail(ref email) if email == "author1@example.com"
        ));
    }

    #[tokio::test]
    async fn delete_cascades_posts_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(1)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        repo.delete(1).await.unwrap();

        // Check, child delete, parent delete, all inside one transaction,
        // so a failure anywhere leaves both author and posts in place.
        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert_eq!(sql.matches("SELECT").count(), 1);
        assert_eq!(sql.matches("DELETE").count(), 2);
    }

    #[tokio::test]
    async fn delete_missing_id_rolls_back_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<author::Model>::new()])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let err = repo.delete(404).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));

        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        assert!(!format!("{log:?}").contains("DELETE"));
    }

    #[tokio::test]
    async fn delete_rolls_back_when_the_post_delete_fails() {
        // A failure mid-cascade must leave both halves in place: the
        // transaction rolls back and the author row stays.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(1)]])
            .append_exec_errors([DbErr::Exec(RuntimeErr::Internal(
                "deadlock detected".to_string(),
            ))])
            .into_connection();
        let repo = PostgresAuthorRepository::new(db);

        let err = repo.delete(1).await.unwrap_err();
        assert!(matches!(err, RepoError::Query(_)));

        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert!(sql.contains("ROLLBACK"));
        assert!(!sql.contains("COMMIT"));

        // The store saw exactly one DELETE, the failed sweep of the posts
        // by author_id; the author row itself was never deleted.
        assert_eq!(sql.matches("DELETE").count(), 1);
        assert!(sql[sql.find("DELETE").unwrap()..].contains("author_id"));
    }
}

mod post_repository {
    use super::*;

    #[tokio::test]
    async fn create_checks_author_then_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(1)]])
            .append_query_results([vec![post_model(10, 1)]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let created = repo
            .create(NewPost {
                title: "Hi".to_string(),
                content: "World".to_string(),
                author_id: 1,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 10);
        assert_eq!(created.author_id, 1);

        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert_eq!(sql.matches("SELECT").count(), 1);
        assert_eq!(sql.matches("INSERT").count(), 1);
    }

    #[tokio::test]
    async fn create_with_unknown_author_is_invalid_reference() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<author::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let err = repo
            .create(NewPost {
                title: "Hi".to_string(),
                content: "World".to_string(),
                author_id: 99,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::InvalidReference(99)));

        // Nothing was inserted.
        assert!(!format!("{:?}", drain_log(repo.db)).contains("INSERT"));
    }

    #[tokio::test]
    async fn create_translates_lost_race_to_invalid_reference() {
        // The author existed at check time but a concurrent delete won;
        // the FK constraint fires at insert time and must come back typed.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_model(1)]])
            .append_query_errors([fk_violation()])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let err = repo
            .create(NewPost {
                title: "Hi".to_string(),
                content: "World".to_string(),
                author_id: 1,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::InvalidReference(1)));
    }

    #[tokio::test]
    async fn get_eager_loads_author_in_the_same_round_trip() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![(post_model(10, 1), author_model(1))]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let found = repo.find_by_id(10).await.unwrap().unwrap();
        assert_eq!(found.post.id, 10);
        assert_eq!(found.author.id, 1);
        assert_eq!(found.author.email, "author1@example.com");

        // Exactly one statement went to the store.
        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert_eq!(sql.matches("SELECT").count(), 1);
        assert!(sql.contains("JOIN"));
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<(post::Model, author::Model)>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        assert!(repo.find_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_serves_any_result_size_from_one_query() {
        let rows = vec![
            (post_model(1, 1), author_model(1)),
            (post_model(2, 1), author_model(1)),
            (post_model(3, 2), author_model(2)),
        ];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let posts = repo.list(None).await.unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].author.id, 1);
        assert_eq!(posts[2].author.id, 2);

        // Three posts, one round trip: the round-trip count must not grow
        // with the result size.
        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        let sql = format!("{log:?}");
        assert_eq!(sql.matches("SELECT").count(), 1);
        assert!(sql.contains("JOIN"));
    }

    #[tokio::test]
    async fn list_filters_by_author() {
        let rows = vec![
            (post_model(1, 1), author_model(1)),
            (post_model(2, 1), author_model(1)),
        ];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let posts = repo.list(Some(1)).await.unwrap();

        assert!(posts.iter().all(|p| p.post.author_id == 1));

        let sql = format!("{:?}", drain_log(repo.db));
        assert!(sql.contains("author_id"));
        assert!(sql.contains("JOIN"));
    }

    #[tokio::test]
    async fn list_by_author_skips_the_author_join() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(1, 1), post_model(2, 1)]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let posts = repo.list_by_author(1).await.unwrap();
        assert_eq!(posts.len(), 2);

        let log = drain_log(repo.db);
        assert_eq!(log.len(), 1);
        assert!(!format!("{log:?}").contains("JOIN"));
    }

    #[tokio::test]
    async fn update_touches_title_and_content_only() {
        let updated = post::Model {
            id: 10,
            title: "Edited".to_string(),
            content: "New body".to_string(),
            author_id: 1,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(10, 1)], vec![updated.clone()]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let post = repo
            .update(
                10,
                PostDraft {
                    title: "Edited".to_string(),
                    content: "New body".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(post.title, "Edited");
        assert_eq!(post.author_id, 1);

        // The SET clause of the UPDATE must not mention the author column.
        let sql = format!("{:?}", drain_log(repo.db));
        let set_at = sql.find("SET").unwrap();
        let set_clause = sql[set_at..].split("WHERE").next().unwrap();
        assert!(!set_clause.contains("author_id"));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let err = repo
            .update(
                404,
                PostDraft {
                    title: "Gone".to_string(),
                    content: "Gone".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn delete_succeeds_when_a_row_went_away() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        assert!(repo.delete(10).await.is_ok());
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let err = repo.delete(404).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}

mod guard_translation {
    use super::*;

    #[test]
    fn sniffs_unique_violations() {
        assert_eq!(
            guard::constraint_kind(&unique_violation()),
            Some(guard::ConstraintKind::Unique)
        );
    }

    #[test]
    fn sniffs_foreign_key_violations() {
        assert_eq!(
            guard::constraint_kind(&fk_violation()),
            Some(guard::ConstraintKind::ForeignKey)
        );
    }

    #[test]
    fn leaves_other_errors_unclassified() {
        let err = DbErr::Query(RuntimeErr::Internal("syntax error near SELECT".to_string()));
        assert_eq!(guard::constraint_kind(&err), None);
    }

    #[test]
    fn splits_connection_loss_from_failed_statements() {
        let conn = guard::map_db_err(DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        )));
        assert!(matches!(conn, RepoError::Connection(_)));
        assert!(conn.is_store_failure());

        let query = guard::map_db_err(DbErr::Query(RuntimeErr::Internal("bad".to_string())));
        assert!(matches!(query, RepoError::Query(_)));
        assert!(query.is_store_failure());
    }

    #[test]
    fn untranslatable_write_errors_stay_store_failures() {
        let err = guard::translate_author_write(
            DbErr::Query(RuntimeErr::Internal("disk full".to_string())),
            "ada@x.com",
        );
        assert!(matches!(err, RepoError::Query(_)));
    }
}

mod log_masking {
    use super::*;

    #[test]
    fn keeps_only_the_first_local_character() {
        assert_eq!(author_repo::mask_email("ada@x.com"), "a***@x.com");
        assert_eq!(author_repo::mask_email("grace.hopper@navy.mil"), "g***@navy.mil");
    }

    #[test]
    fn hides_single_character_locals_entirely() {
        assert_eq!(author_repo::mask_email("a@x.com"), "***@x.com");
    }

    #[test]
    fn masks_malformed_addresses_completely() {
        assert_eq!(author_repo::mask_email("not-an-email"), "***");
    }
}

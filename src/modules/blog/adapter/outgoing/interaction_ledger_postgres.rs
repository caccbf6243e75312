use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, DbErr, QueryResult,
    Statement, TransactionTrait,
};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::blog::application::domain::reaction::{
    CommentTarget, InteractionTarget, PostTarget, Reaction, ReactionState, ReactionSummary,
};
use crate::blog::application::ports::outgoing::{InteractionLedger, InteractionLedgerError};

/// Where a target kind keeps its like/dislike records. Both tables have
/// `(<target_column>, user_id)` as a unique key.
pub trait ReactionTables: InteractionTarget {
    const LIKES: &'static str;
    const DISLIKES: &'static str;
    const TARGET_COLUMN: &'static str;
    /// Returns a row when `$1` may receive reactions.
    const VISIBLE_SQL: &'static str;
}

impl ReactionTables for PostTarget {
    const LIKES: &'static str = "post_likes";
    const DISLIKES: &'static str = "post_dislikes";
    const TARGET_COLUMN: &'static str = "post_id";
    const VISIBLE_SQL: &'static str =
        "SELECT 1 AS visible FROM posts WHERE id = $1 AND status = 'published'";
}

impl ReactionTables for CommentTarget {
    const LIKES: &'static str = "comment_likes";
    const DISLIKES: &'static str = "comment_dislikes";
    const TARGET_COLUMN: &'static str = "comment_id";
    const VISIBLE_SQL: &'static str = "SELECT 1 AS visible FROM comments WHERE id = $1 AND active";
}

fn table_for<T: ReactionTables>(reaction: Reaction) -> &'static str {
    match reaction {
        Reaction::Like => T::LIKES,
        Reaction::Dislike => T::DISLIKES,
    }
}

fn stmt(sql: String, values: Vec<sea_orm::Value>) -> Statement {
    Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values)
}

#[derive(Debug, Clone)]
pub struct InteractionLedgerPostgres<T: ReactionTables> {
    db: Arc<DatabaseConnection>,
    _target: PhantomData<fn() -> T>,
}

impl<T: ReactionTables> InteractionLedgerPostgres<T> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _target: PhantomData,
        }
    }

    fn map_db_err(e: DbErr) -> InteractionLedgerError {
        InteractionLedgerError::DatabaseError(e.to_string())
    }

    fn flag(row: &QueryResult, column: &str) -> Result<bool, InteractionLedgerError> {
        row.try_get::<bool>("", column).map_err(Self::map_db_err)
    }

    async fn ensure_visible<C: ConnectionTrait>(
        conn: &C,
        target_id: Uuid,
    ) -> Result<(), InteractionLedgerError> {
        conn.query_one(stmt(T::VISIBLE_SQL.to_string(), vec![target_id.into()]))
            .await
            .map_err(Self::map_db_err)?
            .map(|_| ())
            .ok_or(InteractionLedgerError::TargetNotFound)
    }

    async fn apply_toggle(
        txn: &DatabaseTransaction,
        target_id: Uuid,
        user_id: Uuid,
        pressed: Reaction,
    ) -> Result<ReactionState, InteractionLedgerError> {
        Self::ensure_visible(txn, target_id).await?;

        // Serialises concurrent presses by the same user on the same target.
        txn.execute(stmt(
            "SELECT pg_advisory_xact_lock(hashtext($1))".to_string(),
            vec![format!("{}:{target_id}:{user_id}", T::KIND).into()],
        ))
        .await
        .map_err(Self::map_db_err)?;

        let row = txn
            .query_one(stmt(
                format!(
                    "SELECT EXISTS (SELECT 1 FROM {likes} WHERE {col} = $1 AND user_id = $2) AS liked, \
                     EXISTS (SELECT 1 FROM {dislikes} WHERE {col} = $1 AND user_id = $2) AS disliked",
                    likes = T::LIKES,
                    dislikes = T::DISLIKES,
                    col = T::TARGET_COLUMN,
                ),
                vec![target_id.into(), user_id.into()],
            ))
            .await
            .map_err(Self::map_db_err)?
            .ok_or_else(|| InteractionLedgerError::DatabaseError("State query returned no rows".to_string()))?;

        let before = ReactionState {
            liked: Self::flag(&row, "liked")?,
            disliked: Self::flag(&row, "disliked")?,
        };
        let after = before.toggle(pressed);

        for reaction in [Reaction::Like, Reaction::Dislike] {
            let table = table_for::<T>(reaction);
            let sql = match (before.has(reaction), after.has(reaction)) {
                (false, true) => format!(
                    "INSERT INTO {table} ({col}, user_id, created_at) VALUES ($1, $2, NOW()) \
                     ON CONFLICT DO NOTHING",
                    col = T::TARGET_COLUMN
                ),
                (true, false) => format!(
                    "DELETE FROM {table} WHERE {col} = $1 AND user_id = $2",
                    col = T::TARGET_COLUMN
                ),
                _ => continue,
            };
            txn.execute(stmt(sql, vec![target_id.into(), user_id.into()]))
                .await
                .map_err(Self::map_db_err)?;
        }

        Ok(after)
    }
}

#[async_trait]
impl<T: ReactionTables> InteractionLedger<T> for InteractionLedgerPostgres<T> {
    async fn toggle(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        pressed: Reaction,
    ) -> Result<ReactionState, InteractionLedgerError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        match Self::apply_toggle(&txn, target_id, user_id, pressed).await {
            Ok(state) => {
                txn.commit().await.map_err(Self::map_db_err)?;
                Ok(state)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                if let InteractionLedgerError::DatabaseError(msg) = &e {
                    tracing::error!(kind = T::KIND, target_id = %target_id, error = %msg, "Reaction toggle failed");
                }
                Err(e)
            }
        }
    }

    async fn summary(
        &self,
        target_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<ReactionSummary, InteractionLedgerError> {
        Self::ensure_visible(&*self.db, target_id).await?;

        let row = self
            .db
            .query_one(stmt(
                format!(
                    "SELECT (SELECT COUNT(*) FROM {likes} WHERE {col} = $1) AS likes, \
                     (SELECT COUNT(*) FROM {dislikes} WHERE {col} = $1) AS dislikes, \
                     EXISTS (SELECT 1 FROM {likes} WHERE {col} = $1 AND user_id = $2) AS viewer_liked, \
                     EXISTS (SELECT 1 FROM {dislikes} WHERE {col} = $1 AND user_id = $2) AS viewer_disliked",
                    likes = T::LIKES,
                    dislikes = T::DISLIKES,
                    col = T::TARGET_COLUMN,
                ),
                vec![target_id.into(), viewer.into()],
            ))
            .await
            .map_err(Self::map_db_err)?
            .ok_or_else(|| InteractionLedgerError::DatabaseError("Summary query returned no rows".to_string()))?;

        let count = |column: &str| -> Result<u64, InteractionLedgerError> {
            let n: i64 = row.try_get("", column).map_err(Self::map_db_err)?;
            Ok(n.max(0) as u64)
        };
        let viewer_state = ReactionState {
            liked: Self::flag(&row, "viewer_liked")?,
            disliked: Self::flag(&row, "viewer_disliked")?,
        };

        Ok(ReactionSummary {
            likes: count("likes")?,
            dislikes: count("dislikes")?,
            viewer: viewer.and_then(|_| viewer_state.current()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn ok_exec() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    fn visible() -> Vec<BTreeMap<&'static str, Value>> {
        vec![BTreeMap::from([("visible", Value::from(1i32))])]
    }

    fn state(liked: bool, disliked: bool) -> Vec<BTreeMap<&'static str, Value>> {
        vec![BTreeMap::from([
            ("liked", Value::from(liked)),
            ("disliked", Value::from(disliked)),
        ])]
    }

    #[tokio::test]
    async fn test_like_over_dislike_swaps_rows_in_one_transaction() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([visible(), state(false, true)])
                .append_exec_results([ok_exec(), ok_exec(), ok_exec()])
                .into_connection(),
        );
        let ledger = InteractionLedgerPostgres::<PostTarget>::new(db.clone());

        let after = ledger
            .toggle(Uuid::new_v4(), Uuid::new_v4(), Reaction::Like)
            .await
            .unwrap();
        assert_eq!(
            after,
            ReactionState {
                liked: true,
                disliked: false
            }
        );

        drop(ledger);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        let lock_at = sql.find("pg_advisory_xact_lock").unwrap();
        let insert_at = sql.find("INSERT INTO post_likes").unwrap();
        let delete_at = sql.find("DELETE FROM post_dislikes").unwrap();
        assert!(lock_at < insert_at && insert_at < delete_at);
    }

    #[tokio::test]
    async fn test_toggle_hidden_target() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let ledger = InteractionLedgerPostgres::<CommentTarget>::new(Arc::new(db));

        assert_eq!(
            ledger
                .toggle(Uuid::new_v4(), Uuid::new_v4(), Reaction::Dislike)
                .await
                .unwrap_err(),
            InteractionLedgerError::TargetNotFound
        );
    }

    #[tokio::test]
    async fn test_summary_reads_counts_and_viewer() {
        let counts = vec![BTreeMap::from([
            ("likes", Value::from(3i64)),
            ("dislikes", Value::from(1i64)),
            ("viewer_liked", Value::from(false)),
            ("viewer_disliked", Value::from(true)),
        ])];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([visible(), counts])
            .into_connection();
        let ledger = InteractionLedgerPostgres::<CommentTarget>::new(Arc::new(db));

        let summary = ledger
            .summary(Uuid::new_v4(), Some(Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(summary.likes, 3);
        assert_eq!(summary.dislikes, 1);
        assert_eq!(summary.viewer, Some(Reaction::Dislike));
    }
}

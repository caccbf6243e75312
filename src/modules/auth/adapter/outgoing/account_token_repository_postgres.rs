use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{AccountToken, TokenKind};
use crate::auth::application::ports::outgoing::{
    AccountTokenRepository, AccountTokenRepositoryError,
};

use super::user_repository_postgres::is_unique_violation;

/// Both token tables share one shape (`id`, `user_id` unique, `token` unique,
/// `created_at`), so the queries only differ by table name.
#[derive(Clone, Debug)]
pub struct AccountTokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountTokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn table(kind: TokenKind) -> &'static str {
        match kind {
            TokenKind::Activation => "activation_tokens",
            TokenKind::PasswordReset => "password_reset_tokens",
        }
    }

    fn map_db_err(e: DbErr) -> AccountTokenRepositoryError {
        AccountTokenRepositoryError::DatabaseError(e.to_string())
    }

    fn delete_stmt(kind: TokenKind, user_id: Uuid) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!("DELETE FROM {} WHERE user_id = $1", Self::table(kind)),
            vec![user_id.into()],
        )
    }

    fn map_row(kind: TokenKind, row: QueryResult) -> Result<AccountToken, AccountTokenRepositoryError> {
        let user_id: Uuid = row.try_get("", "user_id").map_err(Self::map_db_err)?;
        let value: String = row.try_get("", "token").map_err(Self::map_db_err)?;
        let created_at: DateTimeWithTimeZone =
            row.try_get("", "created_at").map_err(Self::map_db_err)?;

        Ok(AccountToken {
            user_id,
            kind,
            value,
            created_at: created_at.with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl AccountTokenRepository for AccountTokenRepositoryPostgres {
    async fn replace(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<AccountToken, AccountTokenRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        if let Err(e) = txn.execute(Self::delete_stmt(kind, user_id)).await {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        let insert_stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                r#"
                INSERT INTO {} (id, user_id, token, created_at)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, token, created_at
                "#,
                Self::table(kind)
            ),
            vec![
                Uuid::new_v4().into(),
                user_id.into(),
                value.to_string().into(),
                Utc::now().fixed_offset().into(),
            ],
        );

        let row = match txn.query_one(insert_stmt).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                let _ = txn.rollback().await;
                return Err(AccountTokenRepositoryError::DatabaseError(
                    "Insert returned no rows".to_string(),
                ));
            }
            Err(e) => {
                let _ = txn.rollback().await;
                if is_unique_violation(&e) {
                    tracing::warn!(user_id = %user_id, kind = %kind, "Account token conflict");
                    return Err(AccountTokenRepositoryError::Conflict);
                }
                return Err(Self::map_db_err(e));
            }
        };

        let token = match Self::map_row(kind, row) {
            Ok(token) => token,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(e);
            }
        };

        txn.commit().await.map_err(Self::map_db_err)?;

        Ok(token)
    }

    async fn find(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<Option<AccountToken>, AccountTokenRepositoryError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "SELECT user_id, token, created_at FROM {} WHERE user_id = $1 AND token = $2",
                Self::table(kind)
            ),
            vec![user_id.into(), value.to_string().into()],
        );

        self.db
            .query_one(stmt)
            .await
            .map_err(Self::map_db_err)?
            .map(|row| Self::map_row(kind, row))
            .transpose()
    }

    async fn delete(
        &self,
        kind: TokenKind,
        user_id: Uuid,
    ) -> Result<(), AccountTokenRepositoryError> {
        let result = self
            .db
            .execute(Self::delete_stmt(kind, user_id))
            .await
            .map_err(Self::map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(AccountTokenRepositoryError::NotFound);
        }
        Ok(())
    }
}

use crate::domain::{
    models::{activity::ActivityLog, scope::CompanyScope},
    ports::ActivityRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};

pub struct SqliteActivityRepo {
    pool: SqlitePool,
}

impl SqliteActivityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Shared by every repository that audits inside its own transaction.
pub(crate) async fn insert_activity<'e, E>(executor: E, log: &ActivityLog) -> Result<(), AppError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO activity_logs (id, user_id, company_id, action, details, "timestamp") VALUES (?, ?, ?, ?, ?, ?)"#
    )
        .bind(&log.id)
        .bind(&log.user_id)
        .bind(&log.company_id)
        .bind(&log.action)
        .bind(&log.details)
        .bind(log.timestamp)
        .execute(executor)
        .await
        .map_err(AppError::Database)?;
    Ok(())
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepo {
    async fn append(&self, log: &ActivityLog) -> Result<(), AppError> {
        insert_activity(&self.pool, log).await
    }

    async fn list_recent(&self, scope: &CompanyScope, limit: i64) -> Result<Vec<ActivityLog>, AppError> {
        sqlx::query_as::<_, ActivityLog>(
            r#"SELECT id, user_id, company_id, action, details, "timestamp" FROM activity_logs
               WHERE company_id = ? ORDER BY "timestamp" DESC, id DESC LIMIT ?"#
        )
            .bind(scope.company_id())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}

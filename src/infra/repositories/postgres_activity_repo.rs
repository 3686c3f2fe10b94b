use crate::domain::{
    models::{activity::ActivityLog, scope::CompanyScope},
    ports::ActivityRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Postgres, PgPool};

pub struct PostgresActivityRepo {
    pool: PgPool,
}

impl PostgresActivityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Shared by every repository that audits inside its own transaction.
pub(crate) async fn insert_activity<'e, E>(executor: E, log: &ActivityLog) -> Result<(), AppError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"INSERT INTO activity_logs (id, user_id, company_id, action, details, "timestamp") VALUES ($1, $2, $3, $4, $5, $6)"#
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
impl ActivityRepository for PostgresActivityRepo {
    async fn append(&self, log: &ActivityLog) -> Result<(), AppError> {
        insert_activity(&self.pool, log).await
    }

    async fn list_recent(&self, scope: &CompanyScope, limit: i64) -> Result<Vec<ActivityLog>, AppError> {
        sqlx::query_as::<_, ActivityLog>(
            r#"SELECT id, user_id, company_id, action, details, "timestamp" FROM activity_logs
               WHERE company_id = $1 ORDER BY "timestamp" DESC, id DESC LIMIT $2"#
        )
            .bind(scope.company_id())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}

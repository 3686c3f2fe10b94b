use crate::domain::{
    models::{activity::ActivityLog, company::Company, scope::CompanyScope},
    ports::CompanyRepository,
};
use crate::error::AppError;
use crate::infra::repositories::postgres_activity_repo::insert_activity;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCompanyRepo {
    pool: PgPool,
}

impl PostgresCompanyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepo {
    async fn find(&self, scope: &CompanyScope) -> Result<Option<Company>, AppError> {
        sqlx::query_as::<_, Company>(
            "SELECT id, name, status, created_at FROM companies WHERE id = $1",
        )
            .bind(scope.company_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, scope: &CompanyScope, company: &Company, audit: &ActivityLog) -> Result<Company, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $1, status = $2 WHERE id = $3 RETURNING id, name, status, created_at"
        )
            .bind(&company.name)
            .bind(&company.status)
            .bind(scope.company_id())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::unique_or(e, AppError::NameTaken))?
            .ok_or(AppError::NotFound("Company not found".into()))?;

        insert_activity(&mut *tx, audit).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, scope: &CompanyScope, audit: &ActivityLog) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(scope.company_id())
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Company not found".into()));
        }

        insert_activity(&mut *tx, audit).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn name_taken_by_other(&self, scope: &CompanyScope, name: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies WHERE name = $1 AND id != $2")
            .bind(name)
            .bind(scope.company_id())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }
}

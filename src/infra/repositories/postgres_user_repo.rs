use crate::domain::{
    models::{
        activity::{ActivityLog, AuditAction},
        company::Company,
        scope::CompanyScope,
        user::{Role, User},
    },
    ports::UserRepository,
};
use crate::error::AppError;
use crate::infra::repositories::postgres_activity_repo::insert_activity;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn signup(&self, company_name: &str, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let candidate = Company::new(company_name.to_string());
        let inserted = sqlx::query(
            "INSERT INTO companies (id, name, status, created_at) VALUES ($1, $2, $3, $4) ON CONFLICT(name) DO NOTHING"
        )
            .bind(&candidate.id)
            .bind(&candidate.name)
            .bind(&candidate.status)
            .bind(candidate.created_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .rows_affected();

        let company_id: String = sqlx::query_scalar("SELECT id FROM companies WHERE name = $1")
            .bind(company_name)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let role = if inserted == 1 { Role::CompanyAdmin } else { Role::Employee };
        let user = User::new(company_id, email.to_string(), password_hash.to_string(), role);

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, role, company_id, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id, email, password_hash, role, company_id, created_at",
        )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.company_id)
            .bind(user.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::unique_or(e, AppError::EmailTaken))?;

        let scope = CompanyScope::of(&created);
        let log = ActivityLog::new(&scope, &created.id, AuditAction::UserSignup, format!("User {} signed up as {}", created.email, created.role));
        insert_activity(&mut *tx, &log).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, company_id, created_at FROM users WHERE email = $1",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, company_id, created_at FROM users WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_in_company(&self, scope: &CompanyScope, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, company_id, created_at FROM users WHERE company_id = $1 AND id = $2",
        )
            .bind(scope.company_id())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, scope: &CompanyScope) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, company_id, created_at FROM users WHERE company_id = $1 ORDER BY created_at ASC"
        )
            .bind(scope.company_id())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count(&self, scope: &CompanyScope) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE company_id = $1")
            .bind(scope.company_id())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, scope: &CompanyScope, user: &User, audit: &ActivityLog) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, role, company_id, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id, email, password_hash, role, company_id, created_at",
        )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(scope.company_id())
            .bind(user.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::unique_or(e, AppError::EmailTaken))?;

        insert_activity(&mut *tx, audit).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn update_role(&self, scope: &CompanyScope, user: &User, audit: &ActivityLog) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, User>(
            "UPDATE users SET role = $1 WHERE company_id = $2 AND id = $3 RETURNING id, email, password_hash, role, company_id, created_at",
        )
            .bind(user.role.as_str())
            .bind(scope.company_id())
            .bind(&user.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("User not found".into()))?;

        insert_activity(&mut *tx, audit).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, scope: &CompanyScope, id: &str, audit: &ActivityLog) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM users WHERE company_id = $1 AND id = $2")
            .bind(scope.company_id())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Postgres User Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }

        insert_activity(&mut *tx, audit).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}

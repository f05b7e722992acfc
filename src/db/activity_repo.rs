// src/db/activity_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::crm::Activity};

// A trilha de auditoria. record() aceita um executor porque o registro
// acontece na MESMA transação da mutação que ele descreve; se a mutação
// sofre rollback, o registro some junto.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        actor_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<Activity, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (tenant_id, user_id, kind, title, description)
            VALUES ($1, $2, 'system', $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(actor_id)
        .bind(title)
        .bind(description)
        .fetch_one(executor)
        .await?;
        Ok(activity)
    }

    pub async fn list(&self, tenant_id: Uuid, limit: i64) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activities
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }
}

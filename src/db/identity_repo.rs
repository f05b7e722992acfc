// src/db/identity_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::AuthAccount};

// O armazenamento de credenciais do provedor de identidade local
// (tabela 'auth_accounts'). O core nunca fala com esta tabela diretamente;
// só o JwtIdentityProvider usa este repositório.
#[derive(Clone)]
pub struct IdentityRepository {
    pool: PgPool,
}

impl IdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccount>, AppError> {
        let account =
            sqlx::query_as::<_, AuthAccount>("SELECT * FROM auth_accounts WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(account)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthAccount>, AppError> {
        let account = sqlx::query_as::<_, AuthAccount>("SELECT * FROM auth_accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<AuthAccount, AppError> {
        let account = sqlx::query_as::<_, AuthAccount>(
            r#"
            INSERT INTO auth_accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(account)
    }

    pub async fn delete_account(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM auth_accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

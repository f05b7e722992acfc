// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

// O repositório de principals, responsável por todas as interações com a
// tabela 'users'. Usamos a API runtime do sqlx com binds posicionais.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca pelo id da identidade externa (o vínculo com o provedor)
    pub async fn find_by_external_id(&self, external_id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users WHERE external_id = $1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Busca pelo e-mail (usuários pré-provisionados que ainda não logaram)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Cria um novo principal. external_id fica nulo para placeholders de
    // convite; o e-mail tem constraint UNIQUE (backstop contra duplicação).
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        external_id: Option<Uuid>,
        email: &str,
        display_name: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (external_id, email, display_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(external_id)
        .bind(email)
        .bind(display_name)
        .fetch_one(executor)
        .await?;
        Ok(user)
    }

    // Preenche o external_id de um usuário pré-provisionado no primeiro login
    // (cura o dessincronismo entre provedor de identidade e registro local).
    pub async fn set_external_id<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        external_id: Uuid,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET external_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(external_id)
        .fetch_one(executor)
        .await?;
        Ok(user)
    }

    // Apaga o principal (só chamado quando a última membership dele caiu)
    pub async fn delete_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

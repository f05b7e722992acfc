// src/services/principal_service.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::is_unique_violation, error::AppError},
    db::UserRepository,
    models::auth::{Identity, User},
};

// O Principal Mapper: transforma uma identidade externa no User interno,
// criando-o na primeira aparição. Idempotente sob chamadas concorrentes:
// a constraint UNIQUE de e-mail é o backstop, e quem perde a corrida de
// INSERT refaz o lookup em vez de falhar.
#[derive(Clone)]
pub struct PrincipalService {
    user_repo: UserRepository,
    pool: PgPool,
}

impl PrincipalService {
    pub fn new(user_repo: UserRepository, pool: PgPool) -> Self {
        Self { user_repo, pool }
    }

    pub async fn resolve_user(&self, identity: &Identity) -> Result<User, AppError> {
        // 1. Caminho rápido: já vimos esta identidade antes
        if let Some(user) = self.user_repo.find_by_external_id(identity.id).await? {
            return Ok(user);
        }

        // 2. Fallback por e-mail: usuário pré-provisionado (convite ou criação
        //    direta por um admin) que está logando pela primeira vez.
        if let Some(user) = self.user_repo.find_by_email(&identity.email).await? {
            if user.external_id.is_none() {
                // Backfill do vínculo com o provedor (last-writer-wins)
                return self
                    .user_repo
                    .set_external_id(&self.pool, user.id, identity.id)
                    .await;
            }
            return Ok(user);
        }

        // 3. Primeira aparição: cria o principal
        let name = display_name_from(identity.name.as_deref(), &identity.email);
        match self
            .user_repo
            .create_user(&self.pool, Some(identity.id), &identity.email, &name)
            .await
        {
            Ok(user) => Ok(user),
            // Perdemos a corrida para outro caminho (convite simultâneo):
            // o usuário existe agora, então buscamos em vez de falhar.
            Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => self
                .user_repo
                .find_by_email(&identity.email)
                .await?
                .ok_or_else(|| {
                    AppError::InternalServerError(anyhow::anyhow!(
                        "Usuário sumiu após violação de unicidade"
                    ))
                }),
            Err(e) => Err(e),
        }
    }
}

/// Nome de exibição: a dica do provedor ou a parte local do e-mail.
pub(crate) fn display_name_from(hint: Option<&str>, email: &str) -> String {
    match hint {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usa_a_dica_de_nome_quando_existe() {
        assert_eq!(display_name_from(Some("Alex"), "alex@empresa.com"), "Alex");
        assert_eq!(display_name_from(Some("  Alex  "), "a@b.com"), "Alex");
    }

    #[test]
    fn cai_para_a_parte_local_do_email() {
        assert_eq!(display_name_from(None, "alex@empresa.com"), "alex");
        assert_eq!(display_name_from(Some("   "), "bob@x.com"), "bob");
    }
}

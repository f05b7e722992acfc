// src/services/identity.rs

use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    common::{db_utils::is_unique_violation, error::AppError},
    db::IdentityRepository,
    models::auth::{AuthAccount, Claims, Identity},
};

// ---
// 1. O contrato do provedor de identidade
// ---
// O core só conhece este trait: resolver um token em identidade, criar e
// apagar contas. Mecânica de JWT/senha fica toda na implementação.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve as credenciais da requisição em uma identidade estável.
    ///
    /// Qualquer falha de resolução (token expirado, má configuração) degrada
    /// para None — o chamador cai no comportamento anônimo em vez de receber
    /// um erro duro.
    async fn get_identity(&self, bearer_token: &str) -> Option<Identity>;

    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AppError>;

    async fn delete_account(&self, identity_id: Uuid) -> Result<(), AppError>;
}

// ---
// 2. Implementação local: bcrypt + JWT
// ---
#[derive(Clone)]
pub struct JwtIdentityProvider {
    repo: IdentityRepository,
    jwt_secret: String,
}

impl JwtIdentityProvider {
    pub fn new(repo: IdentityRepository, jwt_secret: String) -> Self {
        Self { repo, jwt_secret }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let account = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let hash_clone = account.password_hash.clone();

        // Verificação bcrypt é cara; roda fora do executor async
        let is_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.issue_token(&account, None)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name_hint: Option<&str>,
    ) -> Result<String, AppError> {
        let identity = self.create_account(email, password).await?;
        let account = self
            .repo
            .find_by_id(identity.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Conta recém-criada não encontrada"))?;
        self.issue_token(&account, name_hint)
    }

    fn issue_token(&self, account: &AuthAccount, name_hint: Option<&str>) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            name: name_hint.map(|n| n.to_string()),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn get_identity(&self, bearer_token: &str) -> Option<Identity> {
        match decode_identity(bearer_token, &self.jwt_secret) {
            Ok(identity) => Some(identity),
            Err(e) => {
                // Degrada para anônimo em vez de propagar falha dura
                tracing::warn!("Falha ao resolver identidade: {}", e);
                None
            }
        }
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let password_clone = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let account = match self.repo.create_account(email, &password_hash).await {
            Ok(account) => account,
            Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => {
                return Err(AppError::EmailAlreadyExists);
            }
            Err(e) => return Err(e),
        };

        Ok(Identity {
            id: account.id,
            email: account.email,
            name: None,
        })
    }

    async fn delete_account(&self, identity_id: Uuid) -> Result<(), AppError> {
        self.repo.delete_account(identity_id).await
    }
}

/// Decodifica o JWT em uma identidade. Puro: não toca banco nem rede.
pub(crate) fn decode_identity(token: &str, secret: &str) -> Result<Identity, AppError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(Identity {
        id: token_data.claims.sub,
        email: token_data.claims.email,
        name: token_data.claims.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn token_valido_resolve_identidade() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "alex@empresa.com".into(),
            name: Some("Alex".into()),
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = token_for(&claims, "segredo");
        let identity = decode_identity(&token, "segredo").unwrap();

        assert_eq!(identity.id, claims.sub);
        assert_eq!(identity.email, "alex@empresa.com");
        assert_eq!(identity.name.as_deref(), Some("Alex"));
    }

    #[test]
    fn token_invalido_nao_resolve() {
        assert!(decode_identity("lixo", "segredo").is_err());
    }

    #[test]
    fn token_com_segredo_errado_nao_resolve() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "alex@empresa.com".into(),
            name: None,
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = token_for(&claims, "segredo-a");
        assert!(decode_identity(&token, "segredo-b").is_err());
    }

    #[test]
    fn token_expirado_nao_resolve() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "alex@empresa.com".into(),
            name: None,
            exp: (now - chrono::Duration::hours(2)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(3)).timestamp() as usize,
        };

        let token = token_for(&claims, "segredo");
        assert!(decode_identity(&token, "segredo").is_err());
    }
}

// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. User (o principal interno)
// ---
// Criado no primeiro login (Principal Mapper) ou por convite/criação direta.
// Só é apagado quando a última membership dele é removida.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    // Nulo até o primeiro login (usuários pré-provisionados ainda sem conta vinculada)
    pub external_id: Option<Uuid>,

    pub email: String,
    pub display_name: String,

    // Legado: papel global, substituído pelo papel por tenant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_role: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. Identity (o que o provedor de identidade devolve)
// ---
// Identidade externa estável: id + e-mail. Nenhuma lógica de negócio aqui.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

// ---
// 3. AuthAccount (credencial no provedor local)
// ---
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuthAccount {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,            // ID da identidade externa (auth_accounts.id)
    pub email: String,        // E-mail no momento da emissão
    pub name: Option<String>, // Dica de nome para o primeiro login
    pub exp: usize,           // Expiration time (quando o token expira)
    pub iat: usize,           // Issued At (quando o token foi criado)
}

// ---
// 4. Payloads públicos
// ---

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "alex@empresa.com")]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    // Usado como dica de nome no primeiro login
    #[schema(example = "Alex")]
    pub display_name: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::common::i18n::{DEFAULT_LANG, I18nStore};
use crate::middleware::i18n::Locale;

// A taxonomia de erros do domínio. Todos são locais, recuperáveis e voltados
// ao usuário; nenhum derruba o processo. A ordem de checagem importa nos
// serviços: NotFound é sempre verificado ANTES de Forbidden.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- 401 ---
    #[error("Não autenticado")]
    Unauthenticated,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // --- 403 ---
    #[error("Permissão insuficiente")]
    Forbidden,

    #[error("Nenhuma membership ativa")]
    NoActiveMembership,

    #[error("Apenas o OWNER concede o papel OWNER")]
    OnlyOwnerGrantsOwner,

    // --- 404 ---
    #[error("{0} não encontrado")]
    NotFound(&'static str),

    // --- 409 ---
    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Usuário já é membro deste workspace")]
    AlreadyMember,

    // --- 400 (violações de invariante do ciclo de vida) ---
    #[error("Convite não está pendente")]
    InviteNotPending,

    #[error("Auto-suspensão bloqueada")]
    CannotSuspendSelf,

    #[error("Não é possível remover a própria membership")]
    CannotRemoveSelf,

    #[error("OWNER não pode rebaixar o próprio papel")]
    CannotDemoteSelf,

    #[error("O tenant não pode ficar sem OWNER")]
    LastOwner,

    // --- 500 ---
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,

            AppError::Unauthenticated
            | AppError::InvalidCredentials
            | AppError::InvalidToken => StatusCode::UNAUTHORIZED,

            AppError::Forbidden
            | AppError::NoActiveMembership
            | AppError::OnlyOwnerGrantsOwner => StatusCode::FORBIDDEN,

            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            AppError::EmailAlreadyExists | AppError::AlreadyMember => StatusCode::CONFLICT,

            AppError::InviteNotPending
            | AppError::CannotSuspendSelf
            | AppError::CannotRemoveSelf
            | AppError::CannotDemoteSelf
            | AppError::LastOwner => StatusCode::BAD_REQUEST,

            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // A chave de tradução usada pela I18nStore.
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "error.validation",
            AppError::Unauthenticated => "error.unauthenticated",
            AppError::InvalidCredentials => "error.invalid_credentials",
            AppError::InvalidToken => "error.invalid_token",
            AppError::Forbidden => "error.forbidden",
            AppError::NoActiveMembership => "error.no_active_membership",
            AppError::OnlyOwnerGrantsOwner => "error.only_owner_grants_owner",
            AppError::NotFound(_) => "error.not_found",
            AppError::EmailAlreadyExists => "error.email_already_exists",
            AppError::AlreadyMember => "error.already_member",
            AppError::InviteNotPending => "error.invite_not_pending",
            AppError::CannotSuspendSelf => "error.cannot_suspend_self",
            AppError::CannotRemoveSelf => "error.cannot_remove_self",
            AppError::CannotDemoteSelf => "error.cannot_demote_self",
            AppError::LastOwner => "error.last_owner",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "error.internal",
        }
    }

    // Detalhes estruturados que acompanham a mensagem (quando existem).
    fn details(&self) -> Option<Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::NotFound(resource) => Some(json!({ "resource": resource })),
            _ => None,
        }
    }

    /// Converte o erro de domínio na representação HTTP, já traduzida para o
    /// idioma pedido pelo cliente (Accept-Language).
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        // Internos viram 500 genérico; o tracing guarda o detalhe.
        if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro interno do servidor: {self}");
        }

        ApiError {
            status: self.status(),
            error: store.translate(&locale.0, self.message_key()).to_string(),
            details: self.details(),
        }
    }
}

// Resposta de erro da API: status + mensagem traduzida + detalhes opcionais.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.error, "details": details })),
            None => Json(json!({ "error": self.error })),
        };
        (self.status, body).into_response()
    }
}

// Os guards (extractors/middlewares) rejeitam com AppError direto; nesse
// caminho não há Locale, então respondemos no idioma padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro interno do servidor: {self}");
        }

        let body = Json(json!({
            "error": crate::common::i18n::translate(DEFAULT_LANG, self.message_key()),
        }));
        (self.status(), body).into_response()
    }
}

// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::User,
    services::identity::IdentityProvider,
};

// Credencial → identidade → principal. Falha de resolução de identidade
// degrada para anônimo (o provedor devolve None), e anônimo aqui vira
// Unauthenticated; nada disso é falha dura.
pub(crate) async fn resolve_principal(
    app_state: &AppState,
    headers: &HeaderMap,
) -> Result<User, AppError> {
    let token = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthenticated)?;

    let identity = app_state
        .identity_provider
        .get_identity(token)
        .await
        .ok_or(AppError::Unauthenticated)?;

    app_state.principal_service.resolve_user(&identity).await
}

// O guard "autenticado": exige identidade + principal resolvidos.
// Não exige membership nenhuma — é o nível das rotas de convite.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_principal(&app_state, request.headers()).await?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthenticated)
    }
}

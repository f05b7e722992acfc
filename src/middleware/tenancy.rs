// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::resolve_principal,
    models::tenancy::TenantScope,
};

// O guard "tenant-scoped": tudo do auth_guard E uma membership ACTIVE com
// tenant resolvido. É o único lugar do sistema que estabelece o tenant do
// contexto — nenhum cabeçalho ou payload do cliente é consultado para isso.
//
// Rodar o guard duas vezes na mesma requisição não tem efeito colateral
// além do auto-provisionamento do primeiro login, que é idempotente (a
// segunda passada enxerga a membership já criada).
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_principal(&app_state, request.headers()).await?;

    // Encontra a membership ativa ou auto-provisiona o workspace
    let outcome = app_state.tenancy_service.resolve_tenancy(&user).await?;
    let (membership, tenant) = outcome.into_parts();

    let scope = TenantScope {
        user: user.clone(),
        membership,
        tenant,
    };

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(scope);
    Ok(next.run(request).await)
}

// Extrator do contexto autorizado {user, membership, tenant}
pub struct TenantContext(pub TenantScope);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantScope>()
            .cloned()
            .map(TenantContext)
            .ok_or(AppError::NoActiveMembership)
    }
}

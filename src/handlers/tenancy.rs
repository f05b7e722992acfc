// src/handlers/tenancy.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::crm::Activity,
    models::tenancy::{
        InvitationView, Membership, MembershipRole, MembershipStatus, Tenant, TenantMember,
    },
};

// ---
// 1. Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitePayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "bob@empresa.com")]
    pub email: String,
    pub role: MembershipRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    pub display_name: Option<String>,
    pub role: MembershipRole,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    pub role: MembershipRole,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: MembershipStatus,
}

// O que o cliente enxerga do próprio contexto autorizado
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub tenant: Tenant,
    pub membership: Membership,
}

// ---
// 2. Handlers tenant-scoped (gestão de membros)
// ---

// GET /api/tenant
#[utoipa::path(
    get,
    path = "/api/tenant",
    tag = "Tenancy",
    responses((status = 200, description = "O workspace do contexto", body = WorkspaceView)),
    security(("api_jwt" = []))
)]
pub async fn get_workspace(TenantContext(scope): TenantContext) -> Json<WorkspaceView> {
    Json(WorkspaceView {
        tenant: scope.tenant,
        membership: scope.membership,
    })
}

// GET /api/tenant/members
#[utoipa::path(
    get,
    path = "/api/tenant/members",
    tag = "Tenancy",
    responses((status = 200, description = "Membros do workspace", body = Vec<TenantMember>)),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
) -> Result<Json<Vec<TenantMember>>, ApiError> {
    let members = app_state
        .membership_service
        .list_members(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(members))
}

// POST /api/tenant/members/invite
#[utoipa::path(
    post,
    path = "/api/tenant/members/invite",
    tag = "Tenancy",
    request_body = InvitePayload,
    responses(
        (status = 201, description = "Convite criado (membership pendente)", body = Membership),
        (status = 403, description = "Papel insuficiente"),
        (status = 409, description = "Já é membro")
    ),
    security(("api_jwt" = []))
)]
pub async fn invite_member(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Json(payload): Json<InvitePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| crate::common::error::AppError::ValidationError(e)
            .to_api_error(&locale, &app_state.i18n_store))?;

    let membership = app_state
        .membership_service
        .invite(&scope, &payload.email, payload.role)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(membership)))
}

// POST /api/tenant/members
#[utoipa::path(
    post,
    path = "/api/tenant/members",
    tag = "Tenancy",
    request_body = CreateMemberPayload,
    responses(
        (status = 201, description = "Membro criado com credenciais", body = Membership),
        (status = 403, description = "Apenas o OWNER cria membros diretos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_member(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Json(payload): Json<CreateMemberPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| crate::common::error::AppError::ValidationError(e)
            .to_api_error(&locale, &app_state.i18n_store))?;

    let membership = app_state
        .membership_service
        .create_member(
            &scope,
            &payload.email,
            &payload.password,
            payload.display_name.as_deref(),
            payload.role,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(membership)))
}

// PATCH /api/tenant/members/{id}/role
#[utoipa::path(
    patch,
    path = "/api/tenant/members/{id}/role",
    tag = "Tenancy",
    request_body = UpdateRolePayload,
    params(("id" = Uuid, Path, description = "ID da membership")),
    responses(
        (status = 200, description = "Papel atualizado", body = Membership),
        (status = 400, description = "Violação de invariante (auto-rebaixamento)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_member_role(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<Json<Membership>, ApiError> {
    let membership = app_state
        .membership_service
        .update_role(&scope, id, payload.role)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(membership))
}

// PATCH /api/tenant/members/{id}/status
#[utoipa::path(
    patch,
    path = "/api/tenant/members/{id}/status",
    tag = "Tenancy",
    request_body = UpdateStatusPayload,
    params(("id" = Uuid, Path, description = "ID da membership")),
    responses(
        (status = 200, description = "Estado atualizado", body = Membership),
        (status = 400, description = "Violação de invariante (auto-suspensão)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_member_status(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<Membership>, ApiError> {
    let membership = app_state
        .membership_service
        .update_status(&scope, id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(membership))
}

// DELETE /api/tenant/members/{id}
#[utoipa::path(
    delete,
    path = "/api/tenant/members/{id}",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID da membership")),
    responses(
        (status = 204, description = "Membro removido"),
        (status = 400, description = "Violação de invariante (último owner / auto-remoção)")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_member(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .membership_service
        .remove(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/tenant/activities
#[utoipa::path(
    get,
    path = "/api/tenant/activities",
    tag = "Tenancy",
    responses((status = 200, description = "Trilha de auditoria do workspace", body = Vec<Activity>)),
    security(("api_jwt" = []))
)]
pub async fn list_activities(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let activities = app_state
        .tenancy_service
        .list_activities(scope.tenant.id, 100)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(activities))
}

// ---
// 3. Handlers de convite (só autenticado; sem membership ativa ainda)
// ---

// GET /api/invitations
#[utoipa::path(
    get,
    path = "/api/invitations",
    tag = "Invitations",
    responses((status = 200, description = "Convites pendentes do usuário", body = Vec<InvitationView>)),
    security(("api_jwt" = []))
)]
pub async fn list_my_invitations(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<InvitationView>>, ApiError> {
    let invitations = app_state
        .membership_service
        .list_my_invitations(&user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(invitations))
}

// POST /api/invitations/{id}/accept
#[utoipa::path(
    post,
    path = "/api/invitations/{id}/accept",
    tag = "Invitations",
    params(("id" = Uuid, Path, description = "ID da membership pendente")),
    responses(
        (status = 200, description = "Convite aceito; membership ativa", body = Membership),
        (status = 400, description = "Convite não está pendente"),
        (status = 403, description = "Convite de outro usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn accept_invitation(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Membership>, ApiError> {
    let membership = app_state
        .membership_service
        .accept_invitation(&user, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(membership))
}

// POST /api/invitations/{id}/decline
#[utoipa::path(
    post,
    path = "/api/invitations/{id}/decline",
    tag = "Invitations",
    params(("id" = Uuid, Path, description = "ID da membership pendente")),
    responses(
        (status = 204, description = "Convite recusado e descartado")
    ),
    security(("api_jwt" = []))
)]
pub async fn decline_invitation(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .membership_service
        .decline_invitation(&user, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

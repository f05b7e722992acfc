// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::crm::{Campaign, Contact, Deal, Lead, OutreachHistory, Task},
};

// ---
// 1. Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub assigned_to_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealPayload {
    #[validate(length(min = 1, message = "O título não pode ser vazio."))]
    pub title: String,
    #[schema(example = "2500.00")]
    pub value: Decimal,
    #[validate(length(min = 1, message = "O estágio não pode ser vazio."))]
    pub stage: String,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[validate(length(min = 1, message = "O título não pode ser vazio."))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub assigned_to_id: Option<Uuid>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: String,
    pub description: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub full_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutreachPayload {
    #[validate(length(min = 1, message = "O canal não pode ser vazio."))]
    #[schema(example = "email")]
    pub channel: String,
    pub note: Option<String>,
}

fn validate_payload<T: Validate>(
    payload: &T,
    locale: &Locale,
    app_state: &AppState,
) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))
}

// ---
// 2. Leads
// ---

#[utoipa::path(
    post,
    path = "/api/crm/leads",
    tag = "CRM",
    request_body = LeadPayload,
    responses((status = 201, body = Lead)),
    security(("api_jwt" = []))
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Json(payload): Json<LeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let lead = app_state
        .crm_service
        .create_lead(
            &scope,
            payload.assigned_to_id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.source.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(lead)))
}

#[utoipa::path(
    get,
    path = "/api/crm/leads",
    tag = "CRM",
    responses((status = 200, body = Vec<Lead>)),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
) -> Result<Json<Vec<Lead>>, ApiError> {
    let leads = app_state
        .crm_service
        .list_leads(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(leads))
}

#[utoipa::path(
    get,
    path = "/api/crm/leads/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Lead), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Lead>, ApiError> {
    let lead = app_state
        .crm_service
        .get_lead(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(lead))
}

#[utoipa::path(
    put,
    path = "/api/crm/leads/{id}",
    tag = "CRM",
    request_body = LeadPayload,
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Lead), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<LeadPayload>,
) -> Result<Json<Lead>, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let lead = app_state
        .crm_service
        .update_lead(
            &scope,
            id,
            payload.assigned_to_id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.source.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(lead))
}

#[utoipa::path(
    delete,
    path = "/api/crm/leads/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .crm_service
        .delete_lead(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// 3. Negócios
// ---

#[utoipa::path(
    post,
    path = "/api/crm/deals",
    tag = "CRM",
    request_body = DealPayload,
    responses((status = 201, body = Deal)),
    security(("api_jwt" = []))
)]
pub async fn create_deal(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Json(payload): Json<DealPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let deal = app_state
        .crm_service
        .create_deal(&scope, payload.owner_id, &payload.title, payload.value, &payload.stage)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(deal)))
}

#[utoipa::path(
    get,
    path = "/api/crm/deals",
    tag = "CRM",
    responses((status = 200, body = Vec<Deal>)),
    security(("api_jwt" = []))
)]
pub async fn list_deals(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
) -> Result<Json<Vec<Deal>>, ApiError> {
    let deals = app_state
        .crm_service
        .list_deals(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(deals))
}

#[utoipa::path(
    get,
    path = "/api/crm/deals/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Deal), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_deal(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Deal>, ApiError> {
    let deal = app_state
        .crm_service
        .get_deal(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(deal))
}

#[utoipa::path(
    put,
    path = "/api/crm/deals/{id}",
    tag = "CRM",
    request_body = DealPayload,
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Deal), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_deal(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<DealPayload>,
) -> Result<Json<Deal>, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let deal = app_state
        .crm_service
        .update_deal(&scope, id, payload.owner_id, &payload.title, payload.value, &payload.stage)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(deal))
}

#[utoipa::path(
    delete,
    path = "/api/crm/deals/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_deal(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .crm_service
        .delete_deal(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// 4. Tarefas
// ---

#[utoipa::path(
    post,
    path = "/api/crm/tasks",
    tag = "CRM",
    request_body = TaskPayload,
    responses((status = 201, body = Task)),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Json(payload): Json<TaskPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let task = app_state
        .crm_service
        .create_task(
            &scope,
            payload.assigned_to_id,
            &payload.title,
            payload.description.as_deref(),
            payload.due_date,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/api/crm/tasks",
    tag = "CRM",
    responses((status = 200, body = Vec<Task>)),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = app_state
        .crm_service
        .list_tasks(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(tasks))
}

#[utoipa::path(
    get,
    path = "/api/crm/tasks/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Task), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_task(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = app_state
        .crm_service
        .get_task(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(task))
}

#[utoipa::path(
    put,
    path = "/api/crm/tasks/{id}",
    tag = "CRM",
    request_body = TaskPayload,
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Task), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let task = app_state
        .crm_service
        .update_task(
            &scope,
            id,
            payload.assigned_to_id,
            &payload.title,
            payload.description.as_deref(),
            payload.due_date,
            payload.done,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/api/crm/tasks/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .crm_service
        .delete_task(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// 5. Campanhas
// ---

#[utoipa::path(
    post,
    path = "/api/crm/campaigns",
    tag = "CRM",
    request_body = CampaignPayload,
    responses((status = 201, body = Campaign)),
    security(("api_jwt" = []))
)]
pub async fn create_campaign(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Json(payload): Json<CampaignPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let campaign = app_state
        .crm_service
        .create_campaign(
            &scope,
            &payload.name,
            payload.description.as_deref(),
            payload.starts_on,
            payload.ends_on,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

#[utoipa::path(
    get,
    path = "/api/crm/campaigns",
    tag = "CRM",
    responses((status = 200, body = Vec<Campaign>)),
    security(("api_jwt" = []))
)]
pub async fn list_campaigns(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let campaigns = app_state
        .crm_service
        .list_campaigns(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(campaigns))
}

#[utoipa::path(
    get,
    path = "/api/crm/campaigns/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Campaign), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_campaign(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, ApiError> {
    let campaign = app_state
        .crm_service
        .get_campaign(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(campaign))
}

#[utoipa::path(
    delete,
    path = "/api/crm/campaigns/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_campaign(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .crm_service
        .delete_campaign(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// 6. Contatos & histórico de contato
// ---

#[utoipa::path(
    post,
    path = "/api/crm/contacts",
    tag = "CRM",
    request_body = ContactPayload,
    responses((status = 201, body = Contact)),
    security(("api_jwt" = []))
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Json(payload): Json<ContactPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let contact = app_state
        .crm_service
        .create_contact(&scope, &payload.full_name, payload.email.as_deref(), payload.phone.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(contact)))
}

#[utoipa::path(
    get,
    path = "/api/crm/contacts",
    tag = "CRM",
    responses((status = 200, body = Vec<Contact>)),
    security(("api_jwt" = []))
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = app_state
        .crm_service
        .list_contacts(&scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(contacts))
}

#[utoipa::path(
    post,
    path = "/api/crm/contacts/{id}/outreach",
    tag = "CRM",
    request_body = OutreachPayload,
    params(("id" = Uuid, Path, description = "ID do contato")),
    responses((status = 201, body = OutreachHistory), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn record_outreach(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<OutreachPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &locale, &app_state)?;
    let entry = app_state
        .crm_service
        .record_outreach(&scope, id, &payload.channel, payload.note.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/api/crm/contacts/{id}/outreach",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do contato")),
    responses((status = 200, body = Vec<OutreachHistory>), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn list_outreach(
    State(app_state): State<AppState>,
    locale: Locale,
    TenantContext(scope): TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OutreachHistory>>, ApiError> {
    let entries = app_state
        .crm_service
        .list_outreach(&scope, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(entries))
}

// src/models/crm.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Todos os recursos do CRM carregam tenant_id (isolamento) e um ponteiro de
// dono (assigned_to_id / owner_id / created_by_id) usado pelo fallback de
// propriedade em models::rbac.

// ---
// 1. Lead
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub assigned_to_id: Option<Uuid>,

    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. Deal (Negócio)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner_id: Option<Uuid>,

    pub title: String,
    // NUMERIC(14,2) no banco
    #[schema(value_type = f64, example = 1500.0)]
    pub value: Decimal,
    pub stage: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 3. Task (Tarefa)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub assigned_to_id: Option<Uuid>,

    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub done: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 4. Campaign (Campanha)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub created_by_id: Option<Uuid>,

    pub name: String,
    pub description: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 5. Contact (Contato)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub created_by_id: Option<Uuid>,

    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 6. OutreachHistory (histórico de abordagens de um contato)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutreachHistory {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub contact_id: Uuid,
    pub created_by_id: Option<Uuid>,

    // Ex: "email", "phone", "whatsapp"
    pub channel: String,
    pub note: Option<String>,

    pub occurred_at: DateTime<Utc>,
}

// ---
// 7. Activity (a trilha de auditoria)
// ---
// Toda operação mutante do ciclo de vida de memberships registra uma entrada
// aqui, na MESMA transação da mutação. É a única trilha durável do sistema.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    // Ator; fica nulo se o usuário for removido depois
    pub user_id: Option<Uuid>,

    pub kind: String,
    pub title: String,
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

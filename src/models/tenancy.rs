// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Papel da Membership (hierarquia fechada)
// ---
// A ordem de declaração importa: derivamos Ord, então User < Admin < Owner.
// Mapeia o CREATE TYPE membership_role do banco.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema,
)]
#[sqlx(type_name = "membership_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipRole {
    User,
    Admin,
    Owner,
}

// ---
// 2. Estado da Membership
// ---
// Só ACTIVE dá acesso aos recursos do tenant.
// Mapeia o CREATE TYPE membership_status do banco.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "membership_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    Pending,
    Active,
    Suspended,
}

// ---
// 3. Tenant (o "Workspace")
// ---
// A conta isolada: cada organização vive dentro de um tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 4. Membership (a "Ponte" Usuário-Tenant)
// ---
// A unidade de autorização: liga um usuário a um tenant com papel e estado.
// Invariante do banco: UNIQUE (user_id, tenant_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 5. TenantMember (linha do JOIN membership + usuário)
// ---
// O que a tela de "Membros" consome.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

// ---
// 6. TenantScope (o contexto autorizado)
// ---
// O valor imutável que o tenant_guard monta e TODA operação tenant-scoped
// recebe. Nenhum handler reconstrói o próprio contexto, e nenhum tenant id
// vindo do cliente é confiado: este é o único caminho que estabelece tenant.
#[derive(Debug, Clone)]
pub struct TenantScope {
    pub user: crate::models::auth::User,
    pub membership: Membership,
    pub tenant: Tenant,
}

// ---
// 7. InvitationView (convite pendente visto pelo convidado)
// ---
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationView {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub role: MembershipRole,
    pub created_at: DateTime<Utc>,
}

// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Invitations ---
        handlers::tenancy::list_my_invitations,
        handlers::tenancy::accept_invitation,
        handlers::tenancy::decline_invitation,

        // --- Tenancy ---
        handlers::tenancy::get_workspace,
        handlers::tenancy::list_members,
        handlers::tenancy::invite_member,
        handlers::tenancy::create_member,
        handlers::tenancy::update_member_role,
        handlers::tenancy::update_member_status,
        handlers::tenancy::remove_member,
        handlers::tenancy::list_activities,

        // --- CRM ---
        handlers::crm::create_lead,
        handlers::crm::list_leads,
        handlers::crm::get_lead,
        handlers::crm::update_lead,
        handlers::crm::delete_lead,
        handlers::crm::create_deal,
        handlers::crm::list_deals,
        handlers::crm::get_deal,
        handlers::crm::update_deal,
        handlers::crm::delete_deal,
        handlers::crm::create_task,
        handlers::crm::list_tasks,
        handlers::crm::get_task,
        handlers::crm::update_task,
        handlers::crm::delete_task,
        handlers::crm::create_campaign,
        handlers::crm::list_campaigns,
        handlers::crm::get_campaign,
        handlers::crm::delete_campaign,
        handlers::crm::create_contact,
        handlers::crm::list_contacts,
        handlers::crm::record_outreach,
        handlers::crm::list_outreach,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Tenancy ---
            models::tenancy::MembershipRole,
            models::tenancy::MembershipStatus,
            models::tenancy::Tenant,
            models::tenancy::Membership,
            models::tenancy::TenantMember,
            models::tenancy::InvitationView,
            handlers::tenancy::WorkspaceView,
            handlers::tenancy::InvitePayload,
            handlers::tenancy::CreateMemberPayload,
            handlers::tenancy::UpdateRolePayload,
            handlers::tenancy::UpdateStatusPayload,

            // --- CRM ---
            models::crm::Lead,
            models::crm::Deal,
            models::crm::Task,
            models::crm::Campaign,
            models::crm::Contact,
            models::crm::OutreachHistory,
            models::crm::Activity,

            // --- Payloads ---
            handlers::crm::LeadPayload,
            handlers::crm::DealPayload,
            handlers::crm::TaskPayload,
            handlers::crm::CampaignPayload,
            handlers::crm::ContactPayload,
            handlers::crm::OutreachPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Invitations", description = "Convites do Usuário"),
        (name = "Tenancy", description = "Gestão do Workspace e Membros"),
        (name = "CRM", description = "Leads, Negócios, Tarefas e Campanhas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

// src/services/crm_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CrmRepository,
    models::crm::{Campaign, Contact, Deal, Lead, OutreachHistory, Task},
    models::rbac,
    models::tenancy::TenantScope,
};

// O serviço dos recursos do CRM. A lógica aqui é deliberadamente rasa:
// toda chamada (1) busca escopada por tenant — NotFound antes de qualquer
// checagem de permissão — e (2) aplica o fallback de propriedade de
// models::rbac antes de ler ou escrever o registro individual.
#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
}

impl CrmService {
    pub fn new(repo: CrmRepository) -> Self {
        Self { repo }
    }

    // NotFound já foi descartado pelo chamador; aqui só decide Forbidden.
    fn authorize(&self, scope: &TenantScope, record_tenant: Uuid, owner: Option<Uuid>) -> Result<(), AppError> {
        if !rbac::can_access_record(
            scope.membership.role,
            scope.user.id,
            scope.tenant.id,
            record_tenant,
            owner,
        ) {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    pub async fn create_lead(
        &self,
        scope: &TenantScope,
        assigned_to_id: Option<Uuid>,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        source: Option<&str>,
    ) -> Result<Lead, AppError> {
        // Quem cria sem atribuir explicitamente vira o responsável
        let assignee = assigned_to_id.or(Some(scope.user.id));
        self.repo
            .create_lead(scope.tenant.id, assignee, name, email, phone, source)
            .await
    }

    pub async fn get_lead(&self, scope: &TenantScope, id: Uuid) -> Result<Lead, AppError> {
        let lead = self
            .repo
            .find_lead(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;
        self.authorize(scope, lead.tenant_id, lead.assigned_to_id)?;
        Ok(lead)
    }

    pub async fn list_leads(&self, scope: &TenantScope) -> Result<Vec<Lead>, AppError> {
        if rbac::can_view_all_records(scope.membership.role) {
            self.repo.list_leads(scope.tenant.id).await
        } else {
            self.repo
                .list_leads_assigned_to(scope.tenant.id, scope.user.id)
                .await
        }
    }

    pub async fn update_lead(
        &self,
        scope: &TenantScope,
        id: Uuid,
        assigned_to_id: Option<Uuid>,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        source: Option<&str>,
    ) -> Result<Lead, AppError> {
        let existing = self
            .repo
            .find_lead(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;
        self.authorize(scope, existing.tenant_id, existing.assigned_to_id)?;

        self.repo
            .update_lead(scope.tenant.id, id, assigned_to_id, name, email, phone, source)
            .await
    }

    pub async fn delete_lead(&self, scope: &TenantScope, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .repo
            .find_lead(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;
        self.authorize(scope, existing.tenant_id, existing.assigned_to_id)?;

        self.repo.delete_lead(scope.tenant.id, id).await
    }

    // =========================================================================
    //  DEALS
    // =========================================================================

    pub async fn create_deal(
        &self,
        scope: &TenantScope,
        owner_id: Option<Uuid>,
        title: &str,
        value: Decimal,
        stage: &str,
    ) -> Result<Deal, AppError> {
        let owner = owner_id.or(Some(scope.user.id));
        self.repo
            .create_deal(scope.tenant.id, owner, title, value, stage)
            .await
    }

    pub async fn get_deal(&self, scope: &TenantScope, id: Uuid) -> Result<Deal, AppError> {
        let deal = self
            .repo
            .find_deal(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Negócio"))?;
        self.authorize(scope, deal.tenant_id, deal.owner_id)?;
        Ok(deal)
    }

    pub async fn list_deals(&self, scope: &TenantScope) -> Result<Vec<Deal>, AppError> {
        if rbac::can_view_all_records(scope.membership.role) {
            self.repo.list_deals(scope.tenant.id).await
        } else {
            self.repo
                .list_deals_owned_by(scope.tenant.id, scope.user.id)
                .await
        }
    }

    pub async fn update_deal(
        &self,
        scope: &TenantScope,
        id: Uuid,
        owner_id: Option<Uuid>,
        title: &str,
        value: Decimal,
        stage: &str,
    ) -> Result<Deal, AppError> {
        let existing = self
            .repo
            .find_deal(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Negócio"))?;
        self.authorize(scope, existing.tenant_id, existing.owner_id)?;

        self.repo
            .update_deal(scope.tenant.id, id, owner_id, title, value, stage)
            .await
    }

    pub async fn delete_deal(&self, scope: &TenantScope, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .repo
            .find_deal(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Negócio"))?;
        self.authorize(scope, existing.tenant_id, existing.owner_id)?;

        self.repo.delete_deal(scope.tenant.id, id).await
    }

    // =========================================================================
    //  TASKS
    // =========================================================================

    pub async fn create_task(
        &self,
        scope: &TenantScope,
        assigned_to_id: Option<Uuid>,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<Task, AppError> {
        let assignee = assigned_to_id.or(Some(scope.user.id));
        self.repo
            .create_task(scope.tenant.id, assignee, title, description, due_date)
            .await
    }

    pub async fn get_task(&self, scope: &TenantScope, id: Uuid) -> Result<Task, AppError> {
        let task = self
            .repo
            .find_task(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Tarefa"))?;
        self.authorize(scope, task.tenant_id, task.assigned_to_id)?;
        Ok(task)
    }

    pub async fn list_tasks(&self, scope: &TenantScope) -> Result<Vec<Task>, AppError> {
        if rbac::can_view_all_records(scope.membership.role) {
            self.repo.list_tasks(scope.tenant.id).await
        } else {
            self.repo
                .list_tasks_assigned_to(scope.tenant.id, scope.user.id)
                .await
        }
    }

    pub async fn update_task(
        &self,
        scope: &TenantScope,
        id: Uuid,
        assigned_to_id: Option<Uuid>,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        done: bool,
    ) -> Result<Task, AppError> {
        let existing = self
            .repo
            .find_task(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Tarefa"))?;
        self.authorize(scope, existing.tenant_id, existing.assigned_to_id)?;

        self.repo
            .update_task(scope.tenant.id, id, assigned_to_id, title, description, due_date, done)
            .await
    }

    pub async fn delete_task(&self, scope: &TenantScope, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .repo
            .find_task(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Tarefa"))?;
        self.authorize(scope, existing.tenant_id, existing.assigned_to_id)?;

        self.repo.delete_task(scope.tenant.id, id).await
    }

    // =========================================================================
    //  CAMPAIGNS
    // =========================================================================

    pub async fn create_campaign(
        &self,
        scope: &TenantScope,
        name: &str,
        description: Option<&str>,
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
    ) -> Result<Campaign, AppError> {
        self.repo
            .create_campaign(scope.tenant.id, scope.user.id, name, description, starts_on, ends_on)
            .await
    }

    pub async fn get_campaign(&self, scope: &TenantScope, id: Uuid) -> Result<Campaign, AppError> {
        let campaign = self
            .repo
            .find_campaign(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Campanha"))?;
        self.authorize(scope, campaign.tenant_id, campaign.created_by_id)?;
        Ok(campaign)
    }

    pub async fn list_campaigns(&self, scope: &TenantScope) -> Result<Vec<Campaign>, AppError> {
        if rbac::can_view_all_records(scope.membership.role) {
            self.repo.list_campaigns(scope.tenant.id).await
        } else {
            self.repo
                .list_campaigns_created_by(scope.tenant.id, scope.user.id)
                .await
        }
    }

    pub async fn delete_campaign(&self, scope: &TenantScope, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .repo
            .find_campaign(scope.tenant.id, id)
            .await?
            .ok_or(AppError::NotFound("Campanha"))?;
        self.authorize(scope, existing.tenant_id, existing.created_by_id)?;

        self.repo.delete_campaign(scope.tenant.id, id).await
    }

    // =========================================================================
    //  CONTACTS + OUTREACH
    // =========================================================================

    pub async fn create_contact(
        &self,
        scope: &TenantScope,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Contact, AppError> {
        self.repo
            .create_contact(scope.tenant.id, scope.user.id, full_name, email, phone)
            .await
    }

    // Contatos são a agenda compartilhada do tenant: leitura liberada para
    // qualquer membro ativo.
    pub async fn list_contacts(&self, scope: &TenantScope) -> Result<Vec<Contact>, AppError> {
        self.repo.list_contacts(scope.tenant.id).await
    }

    pub async fn record_outreach(
        &self,
        scope: &TenantScope,
        contact_id: Uuid,
        channel: &str,
        note: Option<&str>,
    ) -> Result<OutreachHistory, AppError> {
        // O contato precisa existir no tenant
        self.repo
            .find_contact(scope.tenant.id, contact_id)
            .await?
            .ok_or(AppError::NotFound("Contato"))?;

        self.repo
            .create_outreach(scope.tenant.id, contact_id, scope.user.id, channel, note)
            .await
    }

    pub async fn list_outreach(
        &self,
        scope: &TenantScope,
        contact_id: Uuid,
    ) -> Result<Vec<OutreachHistory>, AppError> {
        self.repo
            .find_contact(scope.tenant.id, contact_id)
            .await?
            .ok_or(AppError::NotFound("Contato"))?;

        self.repo
            .list_outreach_for_contact(scope.tenant.id, contact_id)
            .await
    }
}

// src/db/crm_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::crm::{Campaign, Contact, Deal, Lead, OutreachHistory, Task};

// CRUD dos recursos do CRM. Regra de ouro: TODA consulta filtra por
// tenant_id no servidor; um id de outro tenant simplesmente "não existe"
// (o serviço devolve NotFound antes de qualquer checagem de permissão).
#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    pub async fn create_lead(
        &self,
        tenant_id: Uuid,
        assigned_to_id: Option<Uuid>,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        source: Option<&str>,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (tenant_id, assigned_to_id, name, email, phone, source)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(assigned_to_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(source)
        .fetch_one(&self.pool)
        .await?;
        Ok(lead)
    }

    pub async fn find_lead(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead =
            sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1 AND tenant_id = $2")
                .bind(id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(lead)
    }

    // OWNER/ADMIN: lista tudo do tenant
    pub async fn list_leads(&self, tenant_id: Uuid) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    // USER: só o que está atribuído a ele
    pub async fn list_leads_assigned_to(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE tenant_id = $1 AND assigned_to_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn update_lead(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        assigned_to_id: Option<Uuid>,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        source: Option<&str>,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET assigned_to_id = $3, name = $4, email = $5, phone = $6,
                source = $7, updated_at = now()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(assigned_to_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(source)
        .fetch_one(&self.pool)
        .await?;
        Ok(lead)
    }

    pub async fn delete_lead(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM leads WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  DEALS
    // =========================================================================

    pub async fn create_deal(
        &self,
        tenant_id: Uuid,
        owner_id: Option<Uuid>,
        title: &str,
        value: Decimal,
        stage: &str,
    ) -> Result<Deal, AppError> {
        let deal = sqlx::query_as::<_, Deal>(
            r#"
            INSERT INTO deals (tenant_id, owner_id, title, value, stage)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(owner_id)
        .bind(title)
        .bind(value)
        .bind(stage)
        .fetch_one(&self.pool)
        .await?;
        Ok(deal)
    }

    pub async fn find_deal(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Deal>, AppError> {
        let deal =
            sqlx::query_as::<_, Deal>("SELECT * FROM deals WHERE id = $1 AND tenant_id = $2")
                .bind(id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(deal)
    }

    pub async fn list_deals(&self, tenant_id: Uuid) -> Result<Vec<Deal>, AppError> {
        let deals = sqlx::query_as::<_, Deal>(
            "SELECT * FROM deals WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(deals)
    }

    pub async fn list_deals_owned_by(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Deal>, AppError> {
        let deals = sqlx::query_as::<_, Deal>(
            r#"
            SELECT * FROM deals
            WHERE tenant_id = $1 AND owner_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(deals)
    }

    pub async fn update_deal(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        owner_id: Option<Uuid>,
        title: &str,
        value: Decimal,
        stage: &str,
    ) -> Result<Deal, AppError> {
        let deal = sqlx::query_as::<_, Deal>(
            r#"
            UPDATE deals
            SET owner_id = $3, title = $4, value = $5, stage = $6, updated_at = now()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(owner_id)
        .bind(title)
        .bind(value)
        .bind(stage)
        .fetch_one(&self.pool)
        .await?;
        Ok(deal)
    }

    pub async fn delete_deal(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM deals WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  TASKS
    // =========================================================================

    pub async fn create_task(
        &self,
        tenant_id: Uuid,
        assigned_to_id: Option<Uuid>,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (tenant_id, assigned_to_id, title, description, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(assigned_to_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn find_task(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let task =
            sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND tenant_id = $2")
                .bind(id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(task)
    }

    pub async fn list_tasks(&self, tenant_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE tenant_id = $1 ORDER BY due_date NULLS LAST",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn list_tasks_assigned_to(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE tenant_id = $1 AND assigned_to_id = $2
            ORDER BY due_date NULLS LAST
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn update_task(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        assigned_to_id: Option<Uuid>,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        done: bool,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET assigned_to_id = $3, title = $4, description = $5,
                due_date = $6, done = $7, updated_at = now()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(assigned_to_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(done)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn delete_task(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  CAMPAIGNS
    // =========================================================================

    pub async fn create_campaign(
        &self,
        tenant_id: Uuid,
        created_by_id: Uuid,
        name: &str,
        description: Option<&str>,
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
    ) -> Result<Campaign, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (tenant_id, created_by_id, name, description, starts_on, ends_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(created_by_id)
        .bind(name)
        .bind(description)
        .bind(starts_on)
        .bind(ends_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn find_campaign(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Campaign>, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn list_campaigns(&self, tenant_id: Uuid) -> Result<Vec<Campaign>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    pub async fn list_campaigns_created_by(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Campaign>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            r#"
            SELECT * FROM campaigns
            WHERE tenant_id = $1 AND created_by_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    pub async fn delete_campaign(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM campaigns WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  CONTACTS + OUTREACH
    // =========================================================================

    pub async fn create_contact(
        &self,
        tenant_id: Uuid,
        created_by_id: Uuid,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Contact, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (tenant_id, created_by_id, full_name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(created_by_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(contact)
    }

    pub async fn find_contact(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Contact>, AppError> {
        let contact =
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1 AND tenant_id = $2")
                .bind(id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(contact)
    }

    pub async fn list_contacts(&self, tenant_id: Uuid) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE tenant_id = $1 ORDER BY full_name",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contacts)
    }

    pub async fn create_outreach(
        &self,
        tenant_id: Uuid,
        contact_id: Uuid,
        created_by_id: Uuid,
        channel: &str,
        note: Option<&str>,
    ) -> Result<OutreachHistory, AppError> {
        let outreach = sqlx::query_as::<_, OutreachHistory>(
            r#"
            INSERT INTO outreach_history (tenant_id, contact_id, created_by_id, channel, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(contact_id)
        .bind(created_by_id)
        .bind(channel)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;
        Ok(outreach)
    }

    pub async fn list_outreach_for_contact(
        &self,
        tenant_id: Uuid,
        contact_id: Uuid,
    ) -> Result<Vec<OutreachHistory>, AppError> {
        let history = sqlx::query_as::<_, OutreachHistory>(
            r#"
            SELECT * FROM outreach_history
            WHERE tenant_id = $1 AND contact_id = $2
            ORDER BY occurred_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(history)
    }
}

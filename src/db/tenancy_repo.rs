// src/db/tenancy_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::tenancy::{
    InvitationView, Membership, MembershipRole, MembershipStatus, Tenant, TenantMember,
};

// Repositório de tenants e memberships. Toda leitura usada para decidir uma
// mutação aceita um executor, para poder rodar DENTRO da transação que muta.
#[derive(Clone)]
pub struct TenancyRepository {
    pool: PgPool,
}

impl TenancyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Tenants
    // ---

    pub async fn create_tenant<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, slug)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(executor)
        .await?;
        Ok(tenant)
    }

    pub async fn find_tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    // ---
    // Memberships
    // ---

    pub async fn create_membership<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        tenant_id: Uuid,
        role: MembershipRole,
        status: MembershipStatus,
    ) -> Result<Membership, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (user_id, tenant_id, role, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .bind(role)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(membership)
    }

    /// TODAS as memberships do usuário, em qualquer estado. O resolver de
    /// tenancy decide a partir desta lista (nunca só das ativas).
    pub async fn find_memberships_for_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<Membership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let memberships = sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;
        Ok(memberships)
    }

    pub async fn find_membership_by_id(&self, id: Uuid) -> Result<Option<Membership>, AppError> {
        let membership = sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(membership)
    }

    /// Releitura com lock de linha, usada pelos serviços para revalidar
    /// invariantes imediatamente antes da escrita (evita TOCTOU entre dois
    /// admins agindo ao mesmo tempo).
    pub async fn find_membership_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Membership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership =
            sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(membership)
    }

    pub async fn find_membership_for_user_in_tenant(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<Membership>, AppError> {
        let membership = sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = $1 AND tenant_id = $2",
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(membership)
    }

    /// Tranca TODAS as memberships OWNER do tenant e conta as ativas.
    /// Serializa remoções/rebaixamentos concorrentes de owners: a contagem
    /// que decide "é o último owner?" só acontece com as linhas trancadas.
    pub async fn count_active_owners_for_update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Membership>(
            r#"
            SELECT * FROM memberships
            WHERE tenant_id = $1 AND role = 'OWNER'
            FOR UPDATE
            "#,
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;

        Ok(rows
            .iter()
            .filter(|m| m.status == MembershipStatus::Active)
            .count() as i64)
    }

    /// Quantas memberships o usuário ainda tem (em qualquer tenant).
    /// Zero => o principal vira órfão e deve ser apagado.
    pub async fn count_memberships_for_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM memberships WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(executor)
                .await?;
        Ok(count.0)
    }

    pub async fn update_membership_role<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        role: MembershipRole,
    ) -> Result<Membership, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            UPDATE memberships
            SET role = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_one(executor)
        .await?;
        Ok(membership)
    }

    pub async fn update_membership_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: MembershipStatus,
    ) -> Result<Membership, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            UPDATE memberships
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(membership)
    }

    pub async fn delete_membership<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // ---
    // Leituras de apresentação
    // ---

    pub async fn list_members(&self, tenant_id: Uuid) -> Result<Vec<TenantMember>, AppError> {
        let members = sqlx::query_as::<_, TenantMember>(
            r#"
            SELECT m.id, m.user_id, m.tenant_id, m.role, m.status,
                   u.email, u.display_name, m.created_at
            FROM memberships m
            JOIN users u ON u.id = m.user_id
            WHERE m.tenant_id = $1
            ORDER BY m.created_at
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn list_pending_invitations_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvitationView>, AppError> {
        let invitations = sqlx::query_as::<_, InvitationView>(
            r#"
            SELECT m.id, m.tenant_id, t.name AS tenant_name, m.role, m.created_at
            FROM memberships m
            JOIN tenants t ON t.id = m.tenant_id
            WHERE m.user_id = $1 AND m.status = 'PENDING'
            ORDER BY m.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invitations)
    }
}

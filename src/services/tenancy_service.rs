// src/services/tenancy_service.rs

use sqlx::{Acquire, PgPool};
use uuid::Uuid;

use crate::{
    common::{db_utils::is_unique_violation, error::AppError},
    db::{ActivityRepository, TenancyRepository},
    models::auth::User,
    models::tenancy::{Membership, MembershipRole, MembershipStatus, Tenant},
};

// ---
// 1. Os dois desfechos nomeados do resolver
// ---
// Explícitos para que os testes possam afirmar qual ramo disparou.
#[derive(Debug)]
pub enum TenancyOutcome {
    /// Já existia uma membership ativa.
    Found {
        membership: Membership,
        tenant: Tenant,
    },
    /// Primeiro login sem nenhuma membership: tenant + OWNER recém-criados.
    Provisioned {
        membership: Membership,
        tenant: Tenant,
    },
}

impl TenancyOutcome {
    pub fn into_parts(self) -> (Membership, Tenant) {
        match self {
            TenancyOutcome::Found { membership, tenant }
            | TenancyOutcome::Provisioned { membership, tenant } => (membership, tenant),
        }
    }
}

// A decisão pura do resolver, calculada sobre TODAS as memberships do
// usuário (qualquer estado). Um convite pendente ou uma suspensão bloqueia
// o auto-provisionamento: o usuário não pode acabar com dois tenants.
#[derive(Debug, PartialEq)]
pub(crate) enum TenancyDecision {
    /// Usa a membership ativa existente.
    UseActive(usize),
    /// Sem acesso: só memberships pendentes/suspensas. Nada é criado.
    Blocked,
    /// Nenhuma membership: auto-provisiona tenant + OWNER.
    Provision,
}

pub(crate) fn decide(memberships: &[Membership]) -> TenancyDecision {
    if let Some(idx) = memberships
        .iter()
        .position(|m| m.status == MembershipStatus::Active)
    {
        return TenancyDecision::UseActive(idx);
    }
    if memberships.is_empty() {
        TenancyDecision::Provision
    } else {
        TenancyDecision::Blocked
    }
}

// ---
// 2. O serviço
// ---
#[derive(Clone)]
pub struct TenancyService {
    tenancy_repo: TenancyRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl TenancyService {
    pub fn new(
        tenancy_repo: TenancyRepository,
        activity_repo: ActivityRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            tenancy_repo,
            activity_repo,
            pool,
        }
    }

    /// O Tenancy Resolver: encontra a membership ativa do usuário ou
    /// auto-provisiona um workspace novo. Chamado pelo tenant_guard a cada
    /// requisição tenant-scoped; idempotente.
    pub async fn resolve_tenancy(&self, user: &User) -> Result<TenancyOutcome, AppError> {
        let memberships = self
            .tenancy_repo
            .find_memberships_for_user(&self.pool, user.id)
            .await?;

        match decide(&memberships) {
            TenancyDecision::UseActive(idx) => {
                let membership = memberships.into_iter().nth(idx).expect("índice da decisão");
                let tenant = self
                    .tenancy_repo
                    .find_tenant_by_id(membership.tenant_id)
                    .await?
                    .ok_or_else(|| {
                        // Nunca deve acontecer: membership sem tenant é violação
                        AppError::InternalServerError(anyhow::anyhow!(
                            "Membership {} aponta para tenant inexistente",
                            membership.id
                        ))
                    })?;
                Ok(TenancyOutcome::Found { membership, tenant })
            }
            TenancyDecision::Blocked => Err(AppError::NoActiveMembership),
            TenancyDecision::Provision => self.auto_provision(user).await,
        }
    }

    // Cria tenant + membership OWNER ativa em UMA transação: ou os dois
    // registros entram juntos, ou nenhum entra.
    async fn auto_provision(&self, user: &User) -> Result<TenancyOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock consultivo por usuário: dois primeiros-logins simultâneos do
        // mesmo usuário serializam aqui em vez de criarem dois tenants.
        let key = advisory_lock_key(user.id);
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(key)
            .execute(&mut *tx)
            .await?;

        // Releitura dentro da transação: quem chegou em segundo enxerga a
        // membership que o primeiro acabou de criar e não provisiona de novo.
        let memberships = self
            .tenancy_repo
            .find_memberships_for_user(&mut *tx, user.id)
            .await?;
        match decide(&memberships) {
            TenancyDecision::UseActive(idx) => {
                let membership = memberships.into_iter().nth(idx).expect("índice da decisão");
                drop(tx);
                let tenant = self
                    .tenancy_repo
                    .find_tenant_by_id(membership.tenant_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalServerError(anyhow::anyhow!(
                            "Membership {} aponta para tenant inexistente",
                            membership.id
                        ))
                    })?;
                return Ok(TenancyOutcome::Found { membership, tenant });
            }
            TenancyDecision::Blocked => return Err(AppError::NoActiveMembership),
            TenancyDecision::Provision => {}
        }

        let name = workspace_name_for(&user.display_name);

        // Slug único: base legível + sufixo aleatório. A colisão é re-tentada
        // sob savepoint, senão o erro abortaria a transação inteira.
        let tenant = loop {
            let slug = generate_slug(&user.display_name);
            let mut savepoint = tx.begin().await?;
            match self
                .tenancy_repo
                .create_tenant(&mut *savepoint, &name, &slug)
                .await
            {
                Ok(tenant) => {
                    savepoint.commit().await?;
                    break tenant;
                }
                Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => {
                    savepoint.rollback().await?;
                    continue;
                }
                Err(e) => return Err(e),
            }
        };

        let membership = self
            .tenancy_repo
            .create_membership(
                &mut *tx,
                user.id,
                tenant.id,
                MembershipRole::Owner,
                MembershipStatus::Active,
            )
            .await?;

        self.activity_repo
            .record(
                &mut *tx,
                tenant.id,
                user.id,
                "Workspace criado",
                Some(&format!("Workspace '{}' provisionado no primeiro login", name)),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Workspace '{}' provisionado para o usuário {}",
            tenant.slug,
            user.id
        );

        Ok(TenancyOutcome::Provisioned { membership, tenant })
    }

    pub async fn list_activities(
        &self,
        tenant_id: Uuid,
        limit: i64,
    ) -> Result<Vec<crate::models::crm::Activity>, AppError> {
        self.activity_repo.list(tenant_id, limit).await
    }
}

// pg_advisory_xact_lock recebe bigint; derivamos a chave dos primeiros
// 8 bytes do UUID do usuário.
fn advisory_lock_key(user_id: Uuid) -> i64 {
    let bytes = user_id.as_bytes();
    i64::from_be_bytes(bytes[0..8].try_into().expect("UUID tem 16 bytes"))
}

pub(crate) fn workspace_name_for(display_name: &str) -> String {
    format!("{}'s Workspace", display_name)
}

/// Base legível do nome + token aleatório curto.
pub(crate) fn generate_slug(display_name: &str) -> String {
    let base: String = display_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let base = base.trim_matches('-');
    let token = Uuid::new_v4().simple().to_string();

    if base.is_empty() {
        format!("workspace-{}", &token[..8])
    } else {
        format!("{}-{}", base, &token[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn membership_with_status(status: MembershipStatus) -> Membership {
        Membership {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            role: MembershipRole::User,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sem_membership_provisiona() {
        assert_eq!(decide(&[]), TenancyDecision::Provision);
    }

    #[test]
    fn membership_ativa_e_usada() {
        let memberships = vec![
            membership_with_status(MembershipStatus::Pending),
            membership_with_status(MembershipStatus::Active),
        ];
        assert_eq!(decide(&memberships), TenancyDecision::UseActive(1));
    }

    // Convite pendente bloqueia o auto-provisionamento: o usuário decide o
    // convite em vez de ganhar um segundo tenant.
    #[test]
    fn convite_pendente_bloqueia_provisionamento() {
        let memberships = vec![membership_with_status(MembershipStatus::Pending)];
        assert_eq!(decide(&memberships), TenancyDecision::Blocked);
    }

    #[test]
    fn suspensao_bloqueia_sem_provisionar() {
        let memberships = vec![membership_with_status(MembershipStatus::Suspended)];
        assert_eq!(decide(&memberships), TenancyDecision::Blocked);
    }

    #[test]
    fn nome_do_workspace_deriva_do_usuario() {
        assert_eq!(workspace_name_for("Alex"), "Alex's Workspace");
    }

    #[test]
    fn slug_e_legivel_e_unico_por_geracao() {
        let a = generate_slug("Alex Souza");
        let b = generate_slug("Alex Souza");
        assert!(a.starts_with("alex-souza-"));
        assert_ne!(a, b);
    }

    #[test]
    fn slug_de_nome_vazio_nao_quebra() {
        let slug = generate_slug("!!!");
        assert!(slug.starts_with("workspace-"));
    }
}

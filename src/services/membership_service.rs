// src/services/membership_service.rs

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::is_unique_violation, error::AppError},
    db::{ActivityRepository, TenancyRepository, UserRepository},
    models::auth::User,
    models::rbac,
    models::tenancy::{
        InvitationView, Membership, MembershipRole, MembershipStatus, TenantMember, TenantScope,
    },
    services::identity::IdentityProvider,
    services::principal_service::display_name_from,
};

// O gerente do ciclo de vida de memberships. Cada operação segue o mesmo
// desenho: guard → fetch → checagem pura de invariante → transação que
// RELÊ o alvo com lock e revalida antes de escrever → registro de auditoria
// na mesma transação.

// ---
// 1. Checagens puras de invariante
// ---
// Funções sem IO, chamadas duas vezes: no fetch inicial e de novo sobre a
// linha trancada, imediatamente antes da escrita (evita TOCTOU).

pub(crate) fn check_invite(
    actor_role: MembershipRole,
    invited_role: MembershipRole,
    existing: Option<&Membership>,
) -> Result<(), AppError> {
    if !rbac::can_manage_members(actor_role) {
        return Err(AppError::Forbidden);
    }
    if !rbac::can_grant_role(actor_role, invited_role) {
        return Err(AppError::OnlyOwnerGrantsOwner);
    }
    // Membership existente em QUALQUER estado é conflito: re-convidar um
    // suspenso não cria segunda membership (reative via update_status).
    if existing.is_some() {
        return Err(AppError::AlreadyMember);
    }
    Ok(())
}

pub(crate) fn check_accept(actor_id: Uuid, target: &Membership) -> Result<(), AppError> {
    // Só o próprio convidado decide o convite
    if target.user_id != actor_id {
        return Err(AppError::Forbidden);
    }
    if target.status != MembershipStatus::Pending {
        return Err(AppError::InviteNotPending);
    }
    Ok(())
}

pub(crate) fn check_update_status(
    actor_id: Uuid,
    actor_role: MembershipRole,
    target: &Membership,
    new_status: MembershipStatus,
) -> Result<(), AppError> {
    if !rbac::can_manage_members(actor_role) {
        return Err(AppError::Forbidden);
    }
    // ADMIN não gerencia memberships OWNER
    if target.role == MembershipRole::Owner && actor_role != MembershipRole::Owner {
        return Err(AppError::Forbidden);
    }
    if target.user_id == actor_id && new_status == MembershipStatus::Suspended {
        return Err(AppError::CannotSuspendSelf);
    }
    // Qualquer outra transição é permitida por decreto administrativo
    // (pending→active sem accept, suspended→active etc.)
    Ok(())
}

pub(crate) fn check_update_role(
    actor_id: Uuid,
    actor_role: MembershipRole,
    target: &Membership,
    new_role: MembershipRole,
) -> Result<(), AppError> {
    if !rbac::can_manage_members(actor_role) {
        return Err(AppError::Forbidden);
    }
    // Conceder OWNER é exclusivo de OWNER...
    if !rbac::can_grant_role(actor_role, new_role) {
        return Err(AppError::OnlyOwnerGrantsOwner);
    }
    // ...e revogar também
    if target.role == MembershipRole::Owner && actor_role != MembershipRole::Owner {
        return Err(AppError::OnlyOwnerGrantsOwner);
    }
    // Auto-rebaixamento de OWNER é bloqueado SEMPRE, independente de quantos
    // owners o tenant tenha; junto com "não remove o último owner" isso
    // garante ≥ 1 owner através de qualquer troca de papel.
    if target.user_id == actor_id
        && target.role == MembershipRole::Owner
        && new_role != MembershipRole::Owner
    {
        return Err(AppError::CannotDemoteSelf);
    }
    Ok(())
}

pub(crate) fn check_remove(
    actor_id: Uuid,
    actor_role: MembershipRole,
    target: &Membership,
    active_owner_count: i64,
) -> Result<(), AppError> {
    if !rbac::can_manage_members(actor_role) {
        return Err(AppError::Forbidden);
    }
    if target.user_id == actor_id {
        return Err(AppError::CannotRemoveSelf);
    }
    if target.role == MembershipRole::Owner {
        if actor_role != MembershipRole::Owner {
            return Err(AppError::Forbidden);
        }
        if active_owner_count <= 1 {
            return Err(AppError::LastOwner);
        }
    }
    Ok(())
}

// ---
// 2. O serviço
// ---
#[derive(Clone)]
pub struct MembershipService {
    tenancy_repo: TenancyRepository,
    user_repo: UserRepository,
    activity_repo: ActivityRepository,
    identity_provider: Arc<dyn IdentityProvider>,
    pool: PgPool,
}

impl MembershipService {
    pub fn new(
        tenancy_repo: TenancyRepository,
        user_repo: UserRepository,
        activity_repo: ActivityRepository,
        identity_provider: Arc<dyn IdentityProvider>,
        pool: PgPool,
    ) -> Self {
        Self {
            tenancy_repo,
            user_repo,
            activity_repo,
            identity_provider,
            pool,
        }
    }

    // O alvo precisa existir E pertencer ao tenant do ator. Um id de outro
    // tenant devolve NotFound (checado antes de qualquer Forbidden, e sem
    // vazar existência entre tenants).
    async fn fetch_target(
        &self,
        scope: &TenantScope,
        membership_id: Uuid,
    ) -> Result<Membership, AppError> {
        let target = self
            .tenancy_repo
            .find_membership_by_id(membership_id)
            .await?
            .ok_or(AppError::NotFound("Membership"))?;
        if target.tenant_id != scope.tenant.id {
            return Err(AppError::NotFound("Membership"));
        }
        Ok(target)
    }

    /// Convida um e-mail para o tenant com o papel dado.
    ///
    /// Cria um User placeholder (sem external_id) se o e-mail nunca foi
    /// visto; `Conflict` se já existe membership em QUALQUER estado.
    pub async fn invite(
        &self,
        scope: &TenantScope,
        email: &str,
        role: MembershipRole,
    ) -> Result<Membership, AppError> {
        // Guard de papel antes de qualquer IO; o conflito de membership é
        // rechecado abaixo, quando o convidado está resolvido.
        check_invite(scope.membership.role, role, None)?;

        // 1. Resolve (ou cria) o placeholder pelo e-mail
        let invited = match self.user_repo.find_by_email(email).await? {
            Some(user) => user,
            None => {
                let name = display_name_from(None, email);
                match self
                    .user_repo
                    .create_user(&self.pool, None, email, &name)
                    .await
                {
                    Ok(user) => user,
                    // Signup simultâneo ganhou a corrida: busca em vez de falhar
                    Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => self
                        .user_repo
                        .find_by_email(email)
                        .await?
                        .ok_or(AppError::AlreadyMember)?,
                    Err(e) => return Err(e),
                }
            }
        };

        // 2. Membership duplicada (qualquer estado) é conflito
        let existing = self
            .tenancy_repo
            .find_membership_for_user_in_tenant(invited.id, scope.tenant.id)
            .await?;
        check_invite(scope.membership.role, role, existing.as_ref())?;

        // 3. Cria o convite + auditoria na mesma transação
        let mut tx = self.pool.begin().await?;

        let membership = match self
            .tenancy_repo
            .create_membership(
                &mut *tx,
                invited.id,
                scope.tenant.id,
                role,
                MembershipStatus::Pending,
            )
            .await
        {
            Ok(m) => m,
            // Dois admins convidando o mesmo e-mail ao mesmo tempo
            Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => {
                return Err(AppError::AlreadyMember);
            }
            Err(e) => return Err(e),
        };

        self.activity_repo
            .record(
                &mut *tx,
                scope.tenant.id,
                scope.user.id,
                "Membro convidado",
                Some(&format!("{} convidado com papel {:?}", email, role)),
            )
            .await?;

        tx.commit().await?;
        Ok(membership)
    }

    /// O convidado aceita o próprio convite pendente.
    pub async fn accept_invitation(
        &self,
        actor: &User,
        membership_id: Uuid,
    ) -> Result<Membership, AppError> {
        let target = self
            .tenancy_repo
            .find_membership_by_id(membership_id)
            .await?
            .ok_or(AppError::NotFound("Convite"))?;
        check_accept(actor.id, &target)?;

        let mut tx = self.pool.begin().await?;

        // Revalida sobre a linha trancada
        let locked = self
            .tenancy_repo
            .find_membership_by_id_for_update(&mut *tx, membership_id)
            .await?
            .ok_or(AppError::NotFound("Convite"))?;
        check_accept(actor.id, &locked)?;

        let updated = self
            .tenancy_repo
            .update_membership_status(&mut *tx, membership_id, MembershipStatus::Active)
            .await?;

        self.activity_repo
            .record(
                &mut *tx,
                locked.tenant_id,
                actor.id,
                "Convite aceito",
                Some(&format!("{} entrou no workspace", actor.email)),
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// O convidado recusa o próprio convite pendente; a membership some.
    /// O principal fica: se for um usuário real ele segue para o
    /// auto-provisionamento no próximo acesso.
    pub async fn decline_invitation(
        &self,
        actor: &User,
        membership_id: Uuid,
    ) -> Result<(), AppError> {
        let target = self
            .tenancy_repo
            .find_membership_by_id(membership_id)
            .await?
            .ok_or(AppError::NotFound("Convite"))?;
        check_accept(actor.id, &target)?;

        let mut tx = self.pool.begin().await?;

        let locked = self
            .tenancy_repo
            .find_membership_by_id_for_update(&mut *tx, membership_id)
            .await?
            .ok_or(AppError::NotFound("Convite"))?;
        check_accept(actor.id, &locked)?;

        self.activity_repo
            .record(
                &mut *tx,
                locked.tenant_id,
                actor.id,
                "Convite recusado",
                Some(&format!("{} recusou o convite", actor.email)),
            )
            .await?;

        self.tenancy_repo
            .delete_membership(&mut *tx, membership_id)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Muda o estado de uma membership (fiat administrativo).
    pub async fn update_status(
        &self,
        scope: &TenantScope,
        membership_id: Uuid,
        new_status: MembershipStatus,
    ) -> Result<Membership, AppError> {
        let target = self.fetch_target(scope, membership_id).await?;
        check_update_status(scope.user.id, scope.membership.role, &target, new_status)?;

        let mut tx = self.pool.begin().await?;

        let locked = self
            .tenancy_repo
            .find_membership_by_id_for_update(&mut *tx, membership_id)
            .await?
            .ok_or(AppError::NotFound("Membership"))?;
        check_update_status(scope.user.id, scope.membership.role, &locked, new_status)?;

        let updated = self
            .tenancy_repo
            .update_membership_status(&mut *tx, membership_id, new_status)
            .await?;

        self.activity_repo
            .record(
                &mut *tx,
                scope.tenant.id,
                scope.user.id,
                "Estado de membro alterado",
                Some(&format!(
                    "Membership {} mudou para {:?}",
                    membership_id, new_status
                )),
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Muda o papel de uma membership.
    pub async fn update_role(
        &self,
        scope: &TenantScope,
        membership_id: Uuid,
        new_role: MembershipRole,
    ) -> Result<Membership, AppError> {
        let target = self.fetch_target(scope, membership_id).await?;
        check_update_role(scope.user.id, scope.membership.role, &target, new_role)?;

        let mut tx = self.pool.begin().await?;

        let locked = self
            .tenancy_repo
            .find_membership_by_id_for_update(&mut *tx, membership_id)
            .await?
            .ok_or(AppError::NotFound("Membership"))?;
        check_update_role(scope.user.id, scope.membership.role, &locked, new_role)?;

        let updated = self
            .tenancy_repo
            .update_membership_role(&mut *tx, membership_id, new_role)
            .await?;

        self.activity_repo
            .record(
                &mut *tx,
                scope.tenant.id,
                scope.user.id,
                "Papel de membro alterado",
                Some(&format!(
                    "Membership {} mudou para {:?}",
                    membership_id, new_role
                )),
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Remove uma membership. Se o usuário ficar sem nenhuma membership,
    /// o principal é apagado e a conta no provedor de identidade é removida
    /// em melhor esforço (falha ali NUNCA desfaz a remoção local).
    pub async fn remove(&self, scope: &TenantScope, membership_id: Uuid) -> Result<(), AppError> {
        let target = self.fetch_target(scope, membership_id).await?;
        // Pré-checagem sem a contagem de owners (ela só vale trancada)
        check_remove(scope.user.id, scope.membership.role, &target, i64::MAX)?;

        // O external_id é imutável depois do backfill; ler fora da transação
        // é seguro e evita segurar o lock durante a busca.
        let target_user = self
            .user_repo
            .find_by_id(target.user_id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;

        let mut tx = self.pool.begin().await?;

        // Tranca as linhas OWNER do tenant e conta as ativas: a decisão
        // "é o último owner?" acontece no commit, não no read.
        let active_owners = self
            .tenancy_repo
            .count_active_owners_for_update(&mut *tx, scope.tenant.id)
            .await?;

        let locked = self
            .tenancy_repo
            .find_membership_by_id_for_update(&mut *tx, membership_id)
            .await?
            .ok_or(AppError::NotFound("Membership"))?;
        check_remove(scope.user.id, scope.membership.role, &locked, active_owners)?;

        self.activity_repo
            .record(
                &mut *tx,
                scope.tenant.id,
                scope.user.id,
                "Membro removido",
                Some(&format!("{} removido do workspace", target_user.email)),
            )
            .await?;

        self.tenancy_repo
            .delete_membership(&mut *tx, membership_id)
            .await?;

        // Última membership do usuário em qualquer tenant? Apaga o principal.
        let remaining = self
            .tenancy_repo
            .count_memberships_for_user(&mut *tx, target.user_id)
            .await?;
        let orphaned_identity = if remaining == 0 {
            self.user_repo.delete_user(&mut *tx, target.user_id).await?;
            target_user.external_id
        } else {
            None
        };

        tx.commit().await?;

        // Limpeza no provedor: fire-and-forget com falha logada
        if let Some(identity_id) = orphaned_identity {
            if let Err(e) = self.identity_provider.delete_account(identity_id).await {
                tracing::warn!(
                    "Falha ao apagar conta {} no provedor de identidade (ignorada): {}",
                    identity_id,
                    e
                );
            }
        }

        Ok(())
    }

    /// Criação direta de membro com credenciais (exclusiva do OWNER).
    pub async fn create_member(
        &self,
        scope: &TenantScope,
        email: &str,
        password: &str,
        display_name: Option<&str>,
        role: MembershipRole,
    ) -> Result<Membership, AppError> {
        if !rbac::can_create_member_credentials(scope.membership.role) {
            return Err(AppError::Forbidden);
        }

        // Membro existente neste tenant é conflito, antes de criar a conta
        if let Some(existing) = self.user_repo.find_by_email(email).await? {
            if self
                .tenancy_repo
                .find_membership_for_user_in_tenant(existing.id, scope.tenant.id)
                .await?
                .is_some()
            {
                return Err(AppError::AlreadyMember);
            }
        }

        // 1. Conta no provedor de identidade
        let identity = self.identity_provider.create_account(email, password).await?;

        // 2. Principal local (novo, ou backfill de placeholder de convite)
        let user = match self.user_repo.find_by_email(email).await? {
            Some(user) if user.external_id.is_none() => {
                self.user_repo
                    .set_external_id(&self.pool, user.id, identity.id)
                    .await?
            }
            Some(user) => user,
            None => {
                let name = display_name_from(display_name, email);
                self.user_repo
                    .create_user(&self.pool, Some(identity.id), email, &name)
                    .await?
            }
        };

        // 3. Membership ativa direto (sem passar por pending)
        let mut tx = self.pool.begin().await?;

        let membership = match self
            .tenancy_repo
            .create_membership(&mut *tx, user.id, scope.tenant.id, role, MembershipStatus::Active)
            .await
        {
            Ok(m) => m,
            Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => {
                return Err(AppError::AlreadyMember);
            }
            Err(e) => return Err(e),
        };

        self.activity_repo
            .record(
                &mut *tx,
                scope.tenant.id,
                scope.user.id,
                "Membro criado",
                Some(&format!("{} criado com papel {:?}", email, role)),
            )
            .await?;

        tx.commit().await?;
        Ok(membership)
    }

    // ---
    // Leituras
    // ---

    pub async fn list_members(&self, scope: &TenantScope) -> Result<Vec<TenantMember>, AppError> {
        self.tenancy_repo.list_members(scope.tenant.id).await
    }

    pub async fn list_my_invitations(&self, actor: &User) -> Result<Vec<InvitationView>, AppError> {
        self.tenancy_repo
            .list_pending_invitations_for_user(actor.id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use MembershipRole::*;
    use MembershipStatus::*;

    fn membership(user_id: Uuid, tenant_id: Uuid, role: MembershipRole, status: MembershipStatus) -> Membership {
        Membership {
            id: Uuid::new_v4(),
            user_id,
            tenant_id,
            role,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // --- invite ---

    #[test]
    fn user_nao_convida_ninguem() {
        assert!(matches!(
            check_invite(User, User, None),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn admin_convida_ate_admin_mas_nao_owner() {
        assert!(check_invite(Admin, User, None).is_ok());
        assert!(check_invite(Admin, Admin, None).is_ok());
        assert!(matches!(
            check_invite(Admin, Owner, None),
            Err(AppError::OnlyOwnerGrantsOwner)
        ));
    }

    #[test]
    fn owner_convida_qualquer_papel() {
        assert!(check_invite(Owner, Owner, None).is_ok());
        assert!(check_invite(Owner, User, None).is_ok());
    }

    // Propriedade: membership existente em QUALQUER estado torna o
    // re-convite um conflito — pendente, ativa ou suspensa.
    #[test]
    fn reconvidar_membro_existente_e_conflito_em_qualquer_estado() {
        let tenant = Uuid::new_v4();
        for status in [Pending, Active, Suspended] {
            let existente = membership(Uuid::new_v4(), tenant, User, status);
            assert!(matches!(
                check_invite(Owner, User, Some(&existente)),
                Err(AppError::AlreadyMember)
            ));
        }
    }

    // --- accept / decline ---

    #[test]
    fn aceitar_convite_de_outro_usuario_e_proibido() {
        let tenant = Uuid::new_v4();
        let convite = membership(Uuid::new_v4(), tenant, User, Pending);
        let intruso = Uuid::new_v4();
        assert!(matches!(
            check_accept(intruso, &convite),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn aceitar_convite_ja_ativo_e_bad_request() {
        let alvo = Uuid::new_v4();
        let convite = membership(alvo, Uuid::new_v4(), User, Active);
        assert!(matches!(
            check_accept(alvo, &convite),
            Err(AppError::InviteNotPending)
        ));
    }

    #[test]
    fn aceitar_o_proprio_convite_pendente_passa() {
        let alvo = Uuid::new_v4();
        let convite = membership(alvo, Uuid::new_v4(), Admin, Pending);
        assert!(check_accept(alvo, &convite).is_ok());
    }

    // --- update_status ---

    #[test]
    fn auto_suspensao_e_sempre_bloqueada() {
        let tenant = Uuid::new_v4();
        let eu = Uuid::new_v4();
        let minha = membership(eu, tenant, Owner, Active);
        assert!(matches!(
            check_update_status(eu, Owner, &minha, Suspended),
            Err(AppError::CannotSuspendSelf)
        ));

        let minha_admin = membership(eu, tenant, Admin, Active);
        assert!(matches!(
            check_update_status(eu, Admin, &minha_admin, Suspended),
            Err(AppError::CannotSuspendSelf)
        ));
    }

    #[test]
    fn admin_suspende_e_reativa_outros() {
        let tenant = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let outro = membership(Uuid::new_v4(), tenant, User, Active);
        assert!(check_update_status(admin, Admin, &outro, Suspended).is_ok());

        // Ativação direta de pending (override administrativo, sem accept)
        let pendente = membership(Uuid::new_v4(), tenant, User, Pending);
        assert!(check_update_status(admin, Admin, &pendente, Active).is_ok());
    }

    #[test]
    fn admin_nao_mexe_no_estado_de_owner() {
        let tenant = Uuid::new_v4();
        let dono = membership(Uuid::new_v4(), tenant, Owner, Active);
        assert!(matches!(
            check_update_status(Uuid::new_v4(), Admin, &dono, Suspended),
            Err(AppError::Forbidden)
        ));
    }

    // --- update_role ---

    #[test]
    fn user_nao_muda_papel_de_ninguem() {
        let alvo = membership(Uuid::new_v4(), Uuid::new_v4(), User, Active);
        assert!(matches!(
            check_update_role(Uuid::new_v4(), User, &alvo, Admin),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn admin_nao_concede_nem_revoga_owner() {
        let tenant = Uuid::new_v4();
        let admin = Uuid::new_v4();

        let comum = membership(Uuid::new_v4(), tenant, User, Active);
        assert!(matches!(
            check_update_role(admin, Admin, &comum, Owner),
            Err(AppError::OnlyOwnerGrantsOwner)
        ));

        let dono = membership(Uuid::new_v4(), tenant, Owner, Active);
        assert!(matches!(
            check_update_role(admin, Admin, &dono, Admin),
            Err(AppError::OnlyOwnerGrantsOwner)
        ));
    }

    // Propriedade: auto-rebaixamento de OWNER falha SEMPRE, não importa
    // quantos owners o tenant tenha.
    #[test]
    fn owner_nao_se_rebaixa() {
        let tenant = Uuid::new_v4();
        let eu = Uuid::new_v4();
        let minha = membership(eu, tenant, Owner, Active);

        assert!(matches!(
            check_update_role(eu, Owner, &minha, Admin),
            Err(AppError::CannotDemoteSelf)
        ));
        assert!(matches!(
            check_update_role(eu, Owner, &minha, User),
            Err(AppError::CannotDemoteSelf)
        ));
        // Reafirmar o próprio papel OWNER é inofensivo
        assert!(check_update_role(eu, Owner, &minha, Owner).is_ok());
    }

    #[test]
    fn owner_promove_e_rebaixa_outros() {
        let tenant = Uuid::new_v4();
        let eu = Uuid::new_v4();
        let outro = membership(Uuid::new_v4(), tenant, Admin, Active);

        assert!(check_update_role(eu, Owner, &outro, Owner).is_ok());
        assert!(check_update_role(eu, Owner, &outro, User).is_ok());
    }

    // --- remove ---

    #[test]
    fn remover_a_propria_membership_e_bad_request() {
        let tenant = Uuid::new_v4();
        let eu = Uuid::new_v4();
        let minha = membership(eu, tenant, Owner, Active);
        // Vale até com vários owners: a mensagem manda transferir antes
        assert!(matches!(
            check_remove(eu, Owner, &minha, 5),
            Err(AppError::CannotRemoveSelf)
        ));
    }

    // Propriedade: remover membership OWNER falha com BadRequest sse ela é
    // a única OWNER ativa do tenant; passa caso contrário.
    #[test]
    fn ultimo_owner_nao_pode_ser_removido() {
        let tenant = Uuid::new_v4();
        let carol = Uuid::new_v4();
        let alice = membership(Uuid::new_v4(), tenant, Owner, Active);

        assert!(matches!(
            check_remove(carol, Owner, &alice, 1),
            Err(AppError::LastOwner)
        ));
        // Com um segundo owner (Carol), remover a Alice passa
        assert!(check_remove(carol, Owner, &alice, 2).is_ok());
    }

    #[test]
    fn admin_nao_remove_owner() {
        let tenant = Uuid::new_v4();
        let dono = membership(Uuid::new_v4(), tenant, Owner, Active);
        assert!(matches!(
            check_remove(Uuid::new_v4(), Admin, &dono, 3),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn admin_remove_membros_comuns() {
        let tenant = Uuid::new_v4();
        let comum = membership(Uuid::new_v4(), tenant, User, Active);
        assert!(check_remove(Uuid::new_v4(), Admin, &comum, 1).is_ok());
    }

    #[test]
    fn user_nao_remove_ninguem() {
        let tenant = Uuid::new_v4();
        let comum = membership(Uuid::new_v4(), tenant, User, Active);
        assert!(matches!(
            check_remove(Uuid::new_v4(), User, &comum, 2),
            Err(AppError::Forbidden)
        ));
    }
}

// src/models/rbac.rs

// A tabela de capacidades do sistema, como funções puras sobre o enum fechado
// MembershipRole. Nada aqui toca banco ou request: os serviços buscam o
// estado e perguntam "pode?" antes de escrever.
//
// | Ação                               | OWNER | ADMIN | USER |
// |------------------------------------|-------|-------|------|
// | Ver os próprios registros          |  ✓    |  ✓    |  ✓   |
// | Ver todos os registros do tenant   |  ✓    |  ✓    |  ✗   |
// | Convidar membro (papel ≤ o seu)    |  ✓    |  ✓*   |  ✗   |  * ADMIN não concede OWNER
// | Criar membro com credenciais       |  ✓    |  ✗    |  ✗   |
// | Mudar papel / estado / remover     |  ✓    |  ✓*   |  ✗   |

use uuid::Uuid;

use crate::models::tenancy::MembershipRole;

/// OWNER e ADMIN enxergam todos os registros do tenant; USER só os seus.
pub fn can_view_all_records(role: MembershipRole) -> bool {
    matches!(role, MembershipRole::Owner | MembershipRole::Admin)
}

/// Quem pode gerenciar memberships (convidar, mudar papel/estado, remover).
pub fn can_manage_members(role: MembershipRole) -> bool {
    matches!(role, MembershipRole::Owner | MembershipRole::Admin)
}

/// Criar membro direto com credenciais é exclusivo do OWNER.
pub fn can_create_member_credentials(role: MembershipRole) -> bool {
    matches!(role, MembershipRole::Owner)
}

/// Só OWNER atribui (ou revoga) o papel OWNER; ADMIN gerencia ADMIN e USER.
pub fn can_grant_role(actor: MembershipRole, granted: MembershipRole) -> bool {
    match actor {
        MembershipRole::Owner => true,
        MembershipRole::Admin => granted != MembershipRole::Owner,
        MembershipRole::User => false,
    }
}

/// O fallback de propriedade em nível de registro.
///
/// Um registro é acessível quando pertence ao tenant do contexto E o ator
/// é OWNER/ADMIN ou é o dono/atribuído/criador do registro.
pub fn can_access_record(
    role: MembershipRole,
    actor_id: Uuid,
    scope_tenant_id: Uuid,
    record_tenant_id: Uuid,
    record_owner_id: Option<Uuid>,
) -> bool {
    if record_tenant_id != scope_tenant_id {
        return false;
    }
    can_view_all_records(role) || record_owner_id == Some(actor_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use MembershipRole::*;

    #[test]
    fn papel_e_ordenado_pela_hierarquia() {
        assert!(Owner > Admin);
        assert!(Admin > User);
    }

    #[test]
    fn apenas_owner_e_admin_gerenciam_membros() {
        assert!(can_manage_members(Owner));
        assert!(can_manage_members(Admin));
        assert!(!can_manage_members(User));
    }

    #[test]
    fn apenas_owner_concede_owner() {
        assert!(can_grant_role(Owner, Owner));
        assert!(can_grant_role(Owner, Admin));
        assert!(!can_grant_role(Admin, Owner));
        assert!(can_grant_role(Admin, Admin));
        assert!(can_grant_role(Admin, User));
        assert!(!can_grant_role(User, User));
    }

    #[test]
    fn criar_credenciais_e_exclusivo_do_owner() {
        assert!(can_create_member_credentials(Owner));
        assert!(!can_create_member_credentials(Admin));
        assert!(!can_create_member_credentials(User));
    }

    #[test]
    fn user_so_acessa_registro_proprio() {
        let tenant = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        // Dono do registro: pode
        assert!(can_access_record(User, alice, tenant, tenant, Some(alice)));
        // Registro de outro usuário: não pode
        assert!(!can_access_record(User, alice, tenant, tenant, Some(bob)));
        // Registro sem dono atribuído: só admin/owner
        assert!(!can_access_record(User, alice, tenant, tenant, None));
    }

    #[test]
    fn admin_e_owner_tem_fallback_sobre_qualquer_registro() {
        let tenant = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        assert!(can_access_record(Admin, alice, tenant, tenant, Some(bob)));
        assert!(can_access_record(Owner, alice, tenant, tenant, None));
    }

    #[test]
    fn registro_de_outro_tenant_nunca_e_acessivel() {
        let tenant_a = Uuid::new_v4();
        let tenant_b = Uuid::new_v4();
        let alice = Uuid::new_v4();

        // Nem OWNER atravessa a fronteira do tenant
        assert!(!can_access_record(Owner, alice, tenant_a, tenant_b, Some(alice)));
    }
}

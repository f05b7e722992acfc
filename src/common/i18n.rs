// src/common/i18n.rs

// Tradução das mensagens voltadas ao usuário. As chaves são as de
// AppError::message_key(); "en" é o idioma padrão e "pt" a tradução local.
// As mensagens de invariante (400) são exibidas textualmente ao ator.

pub const DEFAULT_LANG: &str = "en";

// (chave, en, pt)
const MESSAGES: &[(&str, &str, &str)] = &[
    (
        "error.validation",
        "One or more fields are invalid.",
        "Um ou mais campos são inválidos.",
    ),
    (
        "error.unauthenticated",
        "Please sign in to continue.",
        "Faça login para continuar.",
    ),
    (
        "error.invalid_credentials",
        "Invalid e-mail or password.",
        "E-mail ou senha inválidos.",
    ),
    (
        "error.invalid_token",
        "Authentication token is invalid or missing.",
        "Token de autenticação inválido ou ausente.",
    ),
    (
        "error.forbidden",
        "You do not have permission to perform this action.",
        "Você não tem permissão para realizar esta ação.",
    ),
    (
        "error.no_active_membership",
        "No active membership. Accept a pending invitation or contact an administrator.",
        "Nenhuma membership ativa. Aceite um convite pendente ou contate um administrador.",
    ),
    (
        "error.only_owner_grants_owner",
        "Only an owner can grant or revoke the OWNER role.",
        "Apenas um owner pode conceder ou revogar o papel OWNER.",
    ),
    (
        "error.not_found",
        "Resource not found.",
        "Recurso não encontrado.",
    ),
    (
        "error.email_already_exists",
        "This e-mail is already in use.",
        "Este e-mail já está em uso.",
    ),
    (
        "error.already_member",
        "This user is already a member of the workspace.",
        "Este usuário já é membro do workspace.",
    ),
    (
        "error.invite_not_pending",
        "This invitation is no longer pending.",
        "Este convite não está mais pendente.",
    ),
    (
        "error.cannot_suspend_self",
        "You cannot suspend your own membership.",
        "Você não pode suspender a própria membership.",
    ),
    (
        "error.cannot_remove_self",
        "You cannot remove your own membership. Transfer ownership first.",
        "Você não pode remover a própria membership. Transfira a propriedade primeiro.",
    ),
    (
        "error.cannot_demote_self",
        "Owners cannot demote their own membership.",
        "Owners não podem rebaixar a própria membership.",
    ),
    (
        "error.last_owner",
        "A workspace must keep at least one owner.",
        "Um workspace precisa manter pelo menos um owner.",
    ),
    (
        "error.internal",
        "An unexpected error occurred.",
        "Ocorreu um erro inesperado.",
    ),
];

/// Busca a mensagem para (idioma, chave), caindo para o idioma padrão e,
/// em último caso, para a própria chave.
pub fn translate(lang: &str, key: &str) -> &'static str {
    let column = |entry: &(&str, &'static str, &'static str)| match lang {
        "pt" => entry.2,
        _ => entry.1,
    };

    MESSAGES
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(column)
        .unwrap_or("An unexpected error occurred.")
}

// A loja de traduções que vive no AppState. Hoje só embrulha a tabela
// estática, mas mantém o ponto único por onde os handlers traduzem.
#[derive(Clone, Default)]
pub struct I18nStore;

impl I18nStore {
    pub fn new() -> Self {
        Self
    }

    pub fn translate(&self, lang: &str, key: &str) -> &'static str {
        translate(lang, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traduz_para_pt_e_cai_para_en() {
        assert_eq!(
            translate("pt", "error.last_owner"),
            "Um workspace precisa manter pelo menos um owner."
        );
        assert_eq!(
            translate("de", "error.last_owner"),
            "A workspace must keep at least one owner."
        );
    }

    #[test]
    fn chave_desconhecida_nao_explode() {
        assert_eq!(translate("en", "error.nope"), "An unexpected error occurred.");
    }
}

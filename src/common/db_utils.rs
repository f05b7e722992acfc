// src/common/db_utils.rs

// ---
// Helpers de banco compartilhados pelos repositórios e serviços.
// ---

/// Detecta violação de constraint UNIQUE (código SQLSTATE 23505).
///
/// É o backstop das corridas "convite vs. signup simultâneo": quem perder a
/// corrida de INSERT converte o erro em retry-por-lookup em vez de falhar.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

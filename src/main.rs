// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::tenancy::tenant_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário (só exigem identidade; ainda sem workspace)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Convites: o usuário pode não ter nenhuma membership ativa ainda,
    // então aqui entra só o auth_guard, nunca o tenant_guard.
    let invitation_routes = Router::new()
        .route("/", get(handlers::tenancy::list_my_invitations))
        .route("/{id}/accept", post(handlers::tenancy::accept_invitation))
        .route("/{id}/decline", post(handlers::tenancy::decline_invitation))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Gestão do workspace e dos membros (contexto de tenant resolvido)
    let tenant_routes = Router::new()
        .route("/", get(handlers::tenancy::get_workspace))
        .route("/members"
               ,get(handlers::tenancy::list_members)
               .post(handlers::tenancy::create_member)
        )
        .route("/members/invite", post(handlers::tenancy::invite_member))
        .route("/members/{id}/role", patch(handlers::tenancy::update_member_role))
        .route("/members/{id}/status", patch(handlers::tenancy::update_member_status))
        .route("/members/{id}", delete(handlers::tenancy::remove_member))
        .route("/activities", get(handlers::tenancy::list_activities))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let crm_routes = Router::new()
        .route("/leads"
               ,post(handlers::crm::create_lead)
               .get(handlers::crm::list_leads)
        )
        .route("/leads/{id}"
               ,get(handlers::crm::get_lead)
               .put(handlers::crm::update_lead)
               .delete(handlers::crm::delete_lead)
        )
        .route("/deals"
               ,post(handlers::crm::create_deal)
               .get(handlers::crm::list_deals)
        )
        .route("/deals/{id}"
               ,get(handlers::crm::get_deal)
               .put(handlers::crm::update_deal)
               .delete(handlers::crm::delete_deal)
        )
        .route("/tasks"
               ,post(handlers::crm::create_task)
               .get(handlers::crm::list_tasks)
        )
        .route("/tasks/{id}"
               ,get(handlers::crm::get_task)
               .put(handlers::crm::update_task)
               .delete(handlers::crm::delete_task)
        )
        .route("/campaigns"
               ,post(handlers::crm::create_campaign)
               .get(handlers::crm::list_campaigns)
        )
        .route("/campaigns/{id}"
               ,get(handlers::crm::get_campaign)
               .delete(handlers::crm::delete_campaign)
        )
        .route("/contacts"
               ,post(handlers::crm::create_contact)
               .get(handlers::crm::list_contacts)
        )
        .route("/contacts/{id}/outreach"
               ,post(handlers::crm::record_outreach)
               .get(handlers::crm::list_outreach)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/invitations", invitation_routes)
        .nest("/api/tenant", tenant_routes)
        .nest("/api/crm", crm_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

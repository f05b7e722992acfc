// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    common::i18n::I18nStore,
    db::{
        ActivityRepository, CrmRepository, IdentityRepository, TenancyRepository, UserRepository,
    },
    services::{
        crm_service::CrmService, identity::JwtIdentityProvider,
        membership_service::MembershipService, principal_service::PrincipalService,
        tenancy_service::TenancyService,
    },
};

// O estado compartilhado, acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,

    pub identity_provider: Arc<JwtIdentityProvider>,
    pub principal_service: PrincipalService,
    pub tenancy_service: TenancyService,
    pub membership_service: MembershipService,
    pub crm_service: CrmService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let tenancy_repo = TenancyRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let identity_repo = IdentityRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());

        let identity_provider = Arc::new(JwtIdentityProvider::new(identity_repo, jwt_secret));

        let principal_service = PrincipalService::new(user_repo.clone(), db_pool.clone());
        let tenancy_service = TenancyService::new(
            tenancy_repo.clone(),
            activity_repo.clone(),
            db_pool.clone(),
        );
        let membership_service = MembershipService::new(
            tenancy_repo,
            user_repo,
            activity_repo,
            identity_provider.clone(),
            db_pool.clone(),
        );
        let crm_service = CrmService::new(crm_repo);

        Ok(Self {
            db_pool,
            i18n_store: I18nStore::new(),
            identity_provider,
            principal_service,
            tenancy_service,
            membership_service,
            crm_service,
        })
    }
}

// src/db.rs

pub mod activity_repo;
pub use activity_repo::ActivityRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod identity_repo;
pub use identity_repo::IdentityRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenancyRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

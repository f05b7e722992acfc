// src/services.rs

pub mod crm_service;
pub mod identity;
pub mod membership_service;
pub mod principal_service;
pub mod tenancy_service;

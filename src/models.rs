// src/models.rs

pub mod auth;
pub mod crm;
pub mod rbac;
pub mod tenancy;

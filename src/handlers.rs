// src/handlers.rs

pub mod auth;
pub mod crm;
pub mod tenancy;

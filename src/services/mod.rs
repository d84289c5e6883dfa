pub mod auth_service;
pub mod execution_service;

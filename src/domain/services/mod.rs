pub mod auth_service;
pub mod authorization;
pub mod password;
pub mod token_service;

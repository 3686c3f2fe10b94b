pub mod activity;
pub mod auth;
pub mod company;
pub mod insights;
pub mod scope;
pub mod user;

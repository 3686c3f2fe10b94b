pub mod activity;
pub mod ai;
pub mod auth;
pub mod company;
pub mod dashboard;
pub mod health;
pub mod user;

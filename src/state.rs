use std::sync::Arc;
use crate::domain::ports::{ActivityRepository, CompanyRepository, InsightsProvider, UserRepository};
use crate::domain::services::{auth_service::AuthService, token_service::TokenService};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub company_repo: Arc<dyn CompanyRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub insights_provider: Arc<dyn InsightsProvider>,
}

impl AppState {
    pub fn new(
        config: &Config,
        company_repo: Arc<dyn CompanyRepository>,
        user_repo: Arc<dyn UserRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        insights_provider: Arc<dyn InsightsProvider>,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(config));
        let auth_service = Arc::new(AuthService::new(user_repo.clone(), activity_repo.clone(), token_service.clone()));

        Self {
            company_repo,
            user_repo,
            activity_repo,
            token_service,
            auth_service,
            insights_provider,
        }
    }
}

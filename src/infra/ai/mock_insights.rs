use crate::domain::{
    models::{insights::Insights, scope::CompanyScope},
    ports::InsightsProvider,
};
use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument};

const CANNED_INSIGHTS: [&str; 3] = [
    "Your company has seen a 15% increase in user activity this week.",
    "Consider automating 'Task XYZ' as it was repeated 40 times across your team.",
    "Meeting times have increased; try enforcing a 30-minute default.",
];

/// Stand-in for an external model call: waits a fixed latency, then returns
/// canned insights tagged with the caller's company.
pub struct MockInsightsProvider {
    latency: Duration,
}

impl MockInsightsProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl InsightsProvider for MockInsightsProvider {
    #[instrument(skip(self, scope), fields(company_id = scope.company_id()))]
    async fn generate_insights(&self, scope: &CompanyScope) -> Result<Insights, AppError> {
        sleep(self.latency).await;

        info!("Generated mock insights after {}ms", self.latency.as_millis());
        Ok(Insights {
            status: "success".to_string(),
            company_id: scope.company_id().to_string(),
            insights: CANNED_INSIGHTS.iter().map(|s| s.to_string()).collect(),
            generated_by: "Mock AI Engine (Ready for OpenAI/Gemini Integration)".to_string(),
        })
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub status: String,
    pub company_id: String,
    pub insights: Vec<String>,
    pub generated_by: String,
}

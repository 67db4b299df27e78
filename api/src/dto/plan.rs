use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gx_core::domain::entities::plan::Plan;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub plan_name: String,
    /// Union of canonical and legacy exam lists, deduplicated
    pub exam_ids: Vec<String>,
    pub is_active: bool,
    pub purchased_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        let exam_ids = plan.granted_exams().into_iter().collect();
        Self {
            id: plan.id,
            plan_name: plan.plan_name,
            exam_ids,
            is_active: plan.is_active,
            purchased_at: plan.purchased_at,
            expires_at: plan.expires_at,
        }
    }
}

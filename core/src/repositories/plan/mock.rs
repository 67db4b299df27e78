//! In-memory implementation of PlanRepository for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::plan::Plan;
use crate::errors::DomainError;

use super::trait_::PlanRepository;

/// In-memory plan repository for tests and local development
pub struct MockPlanRepository {
    plans: Arc<RwLock<HashMap<Uuid, Plan>>>,
}

impl MockPlanRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            plans: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with a plan (test helper)
    pub async fn insert(&self, plan: Plan) {
        self.plans.write().await.insert(plan.id, plan);
    }
}

impl Default for MockPlanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanRepository for MockPlanRepository {
    async fn create(&self, plan: &Plan) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans.get(&id).cloned())
    }

    async fn find_active_by_phone(&self, phone: &str) -> Result<Vec<Plan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans
            .values()
            .filter(|p| p.student_phone == phone && p.is_active)
            .cloned()
            .collect())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Plan>, DomainError> {
        let mut plans = self.plans.write().await;
        match plans.get_mut(&id) {
            Some(plan) => {
                plan.is_active = is_active;
                Ok(Some(plan.clone()))
            }
            None => Ok(None),
        }
    }

    async fn merge_legacy_subjects(&self) -> Result<u64, DomainError> {
        let mut plans = self.plans.write().await;
        let mut rewritten = 0;
        for plan in plans.values_mut() {
            if plan.subjects.is_empty() {
                continue;
            }
            for subject in std::mem::take(&mut plan.subjects) {
                if !plan.exam_ids.contains(&subject) {
                    plan.exam_ids.push(subject);
                }
            }
            rewritten += 1;
        }
        Ok(rewritten)
    }
}

//! Entitlement service implementation

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use gx_shared::utils::phone::{canonical_phone, mask_phone_number};

use crate::domain::entities::plan::Plan;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::plan::r#trait::PlanRepository;

/// Service answering "does this student have access to this exam?"
///
/// Access derives purely from the student's plans: a plan grants an exam when
/// it is active, unexpired, and lists the exam in either `exam_ids` or the
/// legacy `subjects` field. There is no caching; every check reads the
/// current plan rows so a deactivation takes effect immediately.
pub struct EntitlementService<P: PlanRepository> {
    repository: Arc<P>,
}

impl<P: PlanRepository> EntitlementService<P> {
    /// Create a new entitlement service
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Whether any current plan of the student grants the given exam
    pub async fn has_access(&self, phone: &str, exam_id: &str) -> DomainResult<bool> {
        let phone = canonical_phone(phone);
        let plans = self.repository.find_active_by_phone(&phone).await?;

        let granted = plans
            .iter()
            .filter(|p| p.is_current())
            .any(|p| p.covers(exam_id));

        debug!(
            phone = %mask_phone_number(&phone),
            exam_id,
            granted,
            plan_count = plans.len(),
            "Entitlement check"
        );

        Ok(granted)
    }

    /// All exam identifiers the student's current plans cover, deduplicated
    /// and sorted
    pub async fn accessible_exams(&self, phone: &str) -> DomainResult<Vec<String>> {
        let phone = canonical_phone(phone);
        let plans = self.repository.find_active_by_phone(&phone).await?;

        let exams: BTreeSet<String> = plans
            .iter()
            .filter(|p| p.is_current())
            .flat_map(|p| p.granted_exams())
            .collect();

        Ok(exams.into_iter().collect())
    }

    /// Toggle a plan's active status (operator back-office)
    pub async fn set_plan_status(&self, plan_id: Uuid, is_active: bool) -> DomainResult<Plan> {
        match self.repository.set_active(plan_id, is_active).await? {
            Some(plan) => {
                info!(
                    plan_id = %plan.id,
                    is_active,
                    "Plan status updated"
                );
                Ok(plan)
            }
            None => Err(DomainError::NotFound {
                resource: format!("plan {}", plan_id),
            }),
        }
    }

    /// Fold the legacy `subjects` field into `exam_ids` across all plans.
    /// Returns the number of rows rewritten. Safe to run repeatedly.
    pub async fn migrate_legacy_subjects(&self) -> DomainResult<u64> {
        let rewritten = self.repository.merge_legacy_subjects().await?;
        if rewritten > 0 {
            info!(rewritten, "Folded legacy subjects into exam_ids");
        }
        Ok(rewritten)
    }
}

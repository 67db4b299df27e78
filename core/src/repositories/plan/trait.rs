//! Plan repository trait defining the interface for purchased-plan persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::plan::Plan;
use crate::errors::DomainError;

/// Repository trait for purchased plan persistence operations
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Persist a new plan (called after payment verification)
    async fn create(&self, plan: &Plan) -> Result<(), DomainError>;

    /// Find a plan by its identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, DomainError>;

    /// Load all active plans for a phone number
    ///
    /// Only the `is_active` flag is filtered here; expiry is evaluated in the
    /// domain so a freshly-expired plan and a deactivated one behave the same.
    async fn find_active_by_phone(&self, phone: &str) -> Result<Vec<Plan>, DomainError>;

    /// Toggle a plan's active status (operator back-office). Returns the
    /// updated plan, or `Ok(None)` when the plan does not exist.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Plan>, DomainError>;

    /// One-time migration folding the legacy `subjects` field into the
    /// canonical `exam_ids` field. Returns the number of rows rewritten.
    async fn merge_legacy_subjects(&self) -> Result<u64, DomainError>;
}

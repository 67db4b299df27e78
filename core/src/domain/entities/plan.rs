//! Purchased plan entity backing exam entitlements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A purchased subscription plan granting access to a set of exams
///
/// Plans are created when a payment is verified and are immutable afterwards,
/// except for the `is_active` flag which an operator may toggle. Older rows
/// carry the exam list in the legacy `subjects` field; `exam_ids` is the
/// canonical field and reads consider the union of both until the one-time
/// migration has folded `subjects` in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier for the plan row
    pub id: Uuid,

    /// Display name of the purchased plan (e.g. "DMLT Complete")
    pub plan_name: String,

    /// Phone number of the student who purchased the plan (canonical form)
    pub student_phone: String,

    /// Exam identifiers included in the plan (canonical field)
    pub exam_ids: Vec<String>,

    /// Legacy exam identifier field from older records
    #[serde(default)]
    pub subjects: Vec<String>,

    /// Whether the plan is currently active
    pub is_active: bool,

    /// When the plan was purchased
    pub purchased_at: DateTime<Utc>,

    /// Optional expiry; `None` means a lifetime plan
    pub expires_at: Option<DateTime<Utc>>,

    /// Amount paid, in rupees
    pub price_paid: f64,
}

impl Plan {
    /// Creates a new active plan
    pub fn new(
        plan_name: String,
        student_phone: String,
        exam_ids: Vec<String>,
        expires_at: Option<DateTime<Utc>>,
        price_paid: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            plan_name,
            student_phone,
            exam_ids,
            subjects: Vec::new(),
            is_active: true,
            purchased_at: Utc::now(),
            expires_at,
            price_paid,
        }
    }

    /// Checks whether the plan has passed its expiry time
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => false,
        }
    }

    /// Checks whether the plan currently grants any access
    pub fn is_current(&self) -> bool {
        self.is_active && !self.is_expired()
    }

    /// Checks whether this plan includes the given exam, consulting both the
    /// canonical `exam_ids` field and the legacy `subjects` field
    pub fn covers(&self, exam_id: &str) -> bool {
        self.exam_ids.iter().any(|id| id == exam_id)
            || self.subjects.iter().any(|id| id == exam_id)
    }

    /// All exam identifiers this plan grants, deduplicated
    pub fn granted_exams(&self) -> BTreeSet<String> {
        self.exam_ids
            .iter()
            .chain(self.subjects.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn plan_with(exam_ids: &[&str], subjects: &[&str]) -> Plan {
        let mut plan = Plan::new(
            "DMLT Complete".to_string(),
            "9876543210".to_string(),
            exam_ids.iter().map(|s| s.to_string()).collect(),
            None,
            499.0,
        );
        plan.subjects = subjects.iter().map(|s| s.to_string()).collect();
        plan
    }

    #[test]
    fn test_new_plan_is_current() {
        let plan = plan_with(&["dmlt-paper-1"], &[]);
        assert!(plan.is_active);
        assert!(!plan.is_expired());
        assert!(plan.is_current());
    }

    #[test]
    fn test_covers_canonical_field() {
        let plan = plan_with(&["dmlt-paper-1", "dmlt-paper-2"], &[]);
        assert!(plan.covers("dmlt-paper-1"));
        assert!(!plan.covers("cho-paper-1"));
    }

    #[test]
    fn test_covers_legacy_subjects_field() {
        let plan = plan_with(&[], &["hematology"]);
        assert!(plan.covers("hematology"));
    }

    #[test]
    fn test_expired_plan_not_current() {
        let mut plan = plan_with(&["dmlt-paper-1"], &[]);
        plan.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(plan.is_expired());
        assert!(!plan.is_current());
    }

    #[test]
    fn test_deactivated_plan_not_current() {
        let mut plan = plan_with(&["dmlt-paper-1"], &[]);
        plan.is_active = false;
        assert!(!plan.is_current());
    }

    #[test]
    fn test_granted_exams_union() {
        let plan = plan_with(&["a", "b"], &["b", "c"]);
        let granted: Vec<String> = plan.granted_exams().into_iter().collect();
        assert_eq!(granted, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_lifetime_plan_never_expires() {
        let plan = plan_with(&["a"], &[]);
        assert_eq!(plan.expires_at, None);
        assert!(!plan.is_expired());
    }
}

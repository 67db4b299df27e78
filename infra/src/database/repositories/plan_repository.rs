//! MySQL implementation of the PlanRepository trait.
//!
//! Persists purchased plans in the `plans` table. The exam lists live in
//! JSON columns: `exam_ids` is canonical and `subjects` carries the legacy
//! field from older rows until the one-time migration folds it in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gx_core::domain::entities::plan::Plan;
use gx_core::errors::DomainError;
use gx_core::repositories::plan::r#trait::PlanRepository;

/// MySQL implementation of PlanRepository
pub struct MySqlPlanRepository {
    pool: MySqlPool,
}

impl MySqlPlanRepository {
    /// Create a new MySQL plan repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_exam_list(raw: Option<String>, column: &str) -> Result<Vec<String>, DomainError> {
        match raw {
            Some(json) if !json.is_empty() => serde_json::from_str(&json).map_err(|e| {
                DomainError::database(format!("Invalid JSON in {}: {}", column, e))
            }),
            _ => Ok(Vec::new()),
        }
    }

    fn row_to_plan(row: &sqlx::mysql::MySqlRow) -> Result<Plan, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;

        let exam_ids: Option<String> = row
            .try_get("exam_ids")
            .map_err(|e| DomainError::database(format!("Failed to get exam_ids: {}", e)))?;
        let subjects: Option<String> = row
            .try_get("subjects")
            .map_err(|e| DomainError::database(format!("Failed to get subjects: {}", e)))?;

        Ok(Plan {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::database(format!("Invalid plan UUID: {}", e)))?,
            plan_name: row
                .try_get("plan_name")
                .map_err(|e| DomainError::database(format!("Failed to get plan_name: {}", e)))?,
            student_phone: row.try_get("student_phone").map_err(|e| {
                DomainError::database(format!("Failed to get student_phone: {}", e))
            })?,
            exam_ids: Self::parse_exam_list(exam_ids, "exam_ids")?,
            subjects: Self::parse_exam_list(subjects, "subjects")?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::database(format!("Failed to get is_active: {}", e)))?,
            purchased_at: row
                .try_get::<DateTime<Utc>, _>("purchased_at")
                .map_err(|e| DomainError::database(format!("Failed to get purchased_at: {}", e)))?,
            expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("expires_at")
                .map_err(|e| DomainError::database(format!("Failed to get expires_at: {}", e)))?,
            price_paid: row
                .try_get("price_paid")
                .map_err(|e| DomainError::database(format!("Failed to get price_paid: {}", e)))?,
        })
    }

    fn to_json(list: &[String]) -> Result<String, DomainError> {
        serde_json::to_string(list)
            .map_err(|e| DomainError::database(format!("Failed to serialize exam list: {}", e)))
    }
}

#[async_trait]
impl PlanRepository for MySqlPlanRepository {
    async fn create(&self, plan: &Plan) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO plans (
                id, plan_name, student_phone, exam_ids, subjects,
                is_active, purchased_at, expires_at, price_paid
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(plan.id.to_string())
            .bind(&plan.plan_name)
            .bind(&plan.student_phone)
            .bind(Self::to_json(&plan.exam_ids)?)
            .bind(Self::to_json(&plan.subjects)?)
            .bind(plan.is_active)
            .bind(plan.purchased_at)
            .bind(plan.expires_at)
            .bind(plan.price_paid)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to insert plan: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, DomainError> {
        let query = r#"
            SELECT id, plan_name, student_phone, exam_ids, subjects,
                   is_active, purchased_at, expires_at, price_paid
            FROM plans
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to query plan: {}", e)))?;

        row.as_ref().map(Self::row_to_plan).transpose()
    }

    async fn find_active_by_phone(&self, phone: &str) -> Result<Vec<Plan>, DomainError> {
        // Expiry is evaluated in the domain, not here
        let query = r#"
            SELECT id, plan_name, student_phone, exam_ids, subjects,
                   is_active, purchased_at, expires_at, price_paid
            FROM plans
            WHERE student_phone = ? AND is_active = TRUE
            ORDER BY purchased_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(phone)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to query plans: {}", e)))?;

        rows.iter().map(Self::row_to_plan).collect()
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Plan>, DomainError> {
        let result = sqlx::query("UPDATE plans SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update plan status: {}", e)))?;

        if result.rows_affected() == 0 {
            // Distinguish "missing" from "already in that state"
            if self.find_by_id(id).await?.is_none() {
                return Ok(None);
            }
        }

        self.find_by_id(id).await
    }

    async fn merge_legacy_subjects(&self) -> Result<u64, DomainError> {
        // Fold legacy subjects into exam_ids, deduplicating, then clear the
        // legacy column. Row-by-row in Rust keeps the dedup logic out of SQL.
        let query = r#"
            SELECT id, plan_name, student_phone, exam_ids, subjects,
                   is_active, purchased_at, expires_at, price_paid
            FROM plans
            WHERE subjects IS NOT NULL AND JSON_LENGTH(subjects) > 0
        "#;

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to query legacy plans: {}", e)))?;

        let mut rewritten = 0u64;
        for row in &rows {
            let mut plan = Self::row_to_plan(row)?;
            for subject in std::mem::take(&mut plan.subjects) {
                if !plan.exam_ids.contains(&subject) {
                    plan.exam_ids.push(subject);
                }
            }

            sqlx::query("UPDATE plans SET exam_ids = ?, subjects = ? WHERE id = ?")
                .bind(Self::to_json(&plan.exam_ids)?)
                .bind(Self::to_json(&plan.subjects)?)
                .bind(plan.id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to rewrite plan exam list: {}", e))
                })?;

            rewritten += 1;
        }

        Ok(rewritten)
    }
}

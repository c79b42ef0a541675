//! PostgreSQL implementation of DecisionRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::decision::{Decision, DecisionOption, DecisionStatus};
use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, OptionId, Timestamp, UserId,
};
use crate::domain::hats::HatColor;
use crate::ports::DecisionRepository;

/// PostgreSQL implementation of DecisionRepository.
#[derive(Clone)]
pub struct PostgresDecisionRepository {
    pool: PgPool,
}

impl PostgresDecisionRepository {
    /// Creates a new PostgresDecisionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DecisionRepository for PostgresDecisionRepository {
    async fn save(
        &self,
        decision: &Decision,
        options: &[DecisionOption],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO decisions (
                id, owner_id, title, description, status, current_hat, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(decision.id().as_uuid())
        .bind(decision.owner_id().as_str())
        .bind(decision.title())
        .bind(decision.description())
        .bind(status_to_str(decision.status()))
        .bind(decision.current_hat().map(|h| h.as_str()))
        .bind(decision.created_at().as_datetime())
        .bind(decision.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert decision: {}", e),
            )
        })?;

        for option in options {
            sqlx::query(
                r#"
                INSERT INTO decision_options (
                    id, decision_id, title, description, position, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(option.id().as_uuid())
            .bind(option.decision_id().as_uuid())
            .bind(option.title())
            .bind(option.description())
            .bind(option.position())
            .bind(option.created_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert option: {}", e),
                )
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit decision insert: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, decision: &Decision) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE decisions SET
                title = $2,
                description = $3,
                status = $4,
                current_hat = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(decision.id().as_uuid())
        .bind(decision.title())
        .bind(decision.description())
        .bind(status_to_str(decision.status()))
        .bind(decision.current_hat().map(|h| h.as_str()))
        .bind(decision.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update decision: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DecisionNotFound,
                format!("Decision not found: {}", decision.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, status, current_hat,
                   created_at, updated_at
            FROM decisions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch decision: {}", e),
            )
        })?;

        row.map(row_to_decision).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Decision>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, status, current_hat,
                   created_at, updated_at
            FROM decisions
            WHERE owner_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch decisions by owner: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_decision).collect()
    }

    async fn find_options(&self, id: &DecisionId) -> Result<Vec<DecisionOption>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, decision_id, title, description, position, created_at
            FROM decision_options
            WHERE decision_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch options: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_option).collect()
    }

    async fn delete(&self, id: &DecisionId) -> Result<(), DomainError> {
        // Options and events go with the decision via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM decisions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete decision: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DecisionNotFound,
                format!("Decision not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn status_to_str(status: DecisionStatus) -> &'static str {
    match status {
        DecisionStatus::Draft => "draft",
        DecisionStatus::InProgress => "in_progress",
        DecisionStatus::Completed => "completed",
    }
}

fn str_to_status(s: &str) -> Result<DecisionStatus, DomainError> {
    match s {
        "draft" => Ok(DecisionStatus::Draft),
        "in_progress" => Ok(DecisionStatus::InProgress),
        "completed" => Ok(DecisionStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid decision status: {}", s),
        )),
    }
}

fn str_to_hat(s: &str) -> Result<HatColor, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid hat color: {}", s),
        )
    })
}

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_decision(row: sqlx::postgres::PgRow) -> Result<Decision, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| db_err("Failed to get owner_id", e))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| db_err("Failed to get title", e))?;
    let description: String = row
        .try_get("description")
        .map_err(|e| db_err("Failed to get description", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_err("Failed to get status", e))?;
    let hat_str: Option<String> = row
        .try_get("current_hat")
        .map_err(|e| db_err("Failed to get current_hat", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_err("Failed to get updated_at", e))?;

    let current_hat = hat_str.as_deref().map(str_to_hat).transpose()?;

    Ok(Decision::reconstitute(
        DecisionId::from_uuid(id),
        UserId::new(owner_id).map_err(|e| db_err("Invalid owner_id", e))?,
        title,
        description,
        str_to_status(&status_str)?,
        current_hat,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_option(row: sqlx::postgres::PgRow) -> Result<DecisionOption, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let decision_id: uuid::Uuid = row
        .try_get("decision_id")
        .map_err(|e| db_err("Failed to get decision_id", e))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| db_err("Failed to get title", e))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| db_err("Failed to get description", e))?;
    let position: i32 = row
        .try_get("position")
        .map_err(|e| db_err("Failed to get position", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;

    Ok(DecisionOption::reconstitute(
        OptionId::from_uuid(id),
        DecisionId::from_uuid(decision_id),
        title,
        description,
        position,
        Timestamp::from_datetime(created_at),
    ))
}

//! Patient repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PatientEntity;
use crate::metrics::QueryTimer;

/// Repository for patient-related database operations.
#[derive(Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    /// Creates a new PatientRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a patient by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PatientEntity>, sqlx::Error> {
        let timer = QueryTimer::postgres("find_patient_by_id");
        let result = sqlx::query_as::<_, PatientEntity>(
            r#"
            SELECT id, name, age, created_at, updated_at
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a patient. Id and timestamps are assigned by the database.
    pub async fn insert(&self, name: &str, age: i32) -> Result<PatientEntity, sqlx::Error> {
        let timer = QueryTimer::postgres("insert_patient");
        let result = sqlx::query_as::<_, PatientEntity>(
            r#"
            INSERT INTO patients (name, age)
            VALUES ($1, $2)
            RETURNING id, name, age, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(age)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update the given fields of a patient.
    /// Returns None if the patient does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        age: Option<i32>,
    ) -> Result<Option<PatientEntity>, sqlx::Error> {
        let timer = QueryTimer::postgres("update_patient");
        let result = sqlx::query_as::<_, PatientEntity>(
            r#"
            UPDATE patients
            SET name = COALESCE($2, name),
                age = COALESCE($3, age),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, age, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(age)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

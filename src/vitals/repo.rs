use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One blood-sugar/weight reading; append-only time series.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VitalsReading {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sugar_reading: f64,
    pub weight_reading: f64,
    pub recorded_at: OffsetDateTime,
}

impl VitalsReading {
    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        sugar_reading: f64,
        weight_reading: f64,
    ) -> anyhow::Result<VitalsReading> {
        let reading = sqlx::query_as::<_, VitalsReading>(
            r#"
            INSERT INTO vitals (user_id, sugar_reading, weight_reading)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, sugar_reading, weight_reading, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(sugar_reading)
        .bind(weight_reading)
        .fetch_one(db)
        .await?;
        Ok(reading)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<VitalsReading>> {
        let rows = sqlx::query_as::<_, VitalsReading>(
            r#"
            SELECT id, user_id, sugar_reading, weight_reading, recorded_at
            FROM vitals
            WHERE user_id = $1
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

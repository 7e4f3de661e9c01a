use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A single logged food item; immutable once created, append-only history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_name: String,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub carb_g: f64,
    pub fat_g: f64,
    pub fibre_g: f64,
    pub glycemic_index: Option<f64>,
    pub created_at: OffsetDateTime,
}

const ENTRY_COLUMNS: &str = "id, user_id, food_name, energy_kcal, protein_g, carb_g, fat_g, \
                             fibre_g, glycemic_index, created_at";

impl FoodEntry {
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        food_name: &str,
        energy_kcal: f64,
        protein_g: f64,
        carb_g: f64,
        fat_g: f64,
        fibre_g: f64,
        glycemic_index: Option<f64>,
    ) -> anyhow::Result<FoodEntry> {
        let entry = sqlx::query_as::<_, FoodEntry>(&format!(
            r#"
            INSERT INTO food_entries
                (user_id, food_name, energy_kcal, protein_g, carb_g, fat_g, fibre_g, glycemic_index)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(food_name)
        .bind(energy_kcal)
        .bind(protein_g)
        .bind(carb_g)
        .bind(fat_g)
        .bind(fibre_g)
        .bind(glycemic_index)
        .fetch_one(db)
        .await?;
        Ok(entry)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<FoodEntry>> {
        let rows = sqlx::query_as::<_, FoodEntry>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM food_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn latest_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<FoodEntry>> {
        let row = sqlx::query_as::<_, FoodEntry>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM food_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}

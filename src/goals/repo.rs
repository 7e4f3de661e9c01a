use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::goals::calculator::{DailyMacros, GoalNumbers};

/// One row per user; overwritten on every recalculation.
///
/// `maintenance_calories` stores the goal-adjusted daily target the client
/// tracks against, not the raw maintenance number.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GoalProfile {
    pub user_id: Uuid,
    pub height: f64,
    pub weight: f64,
    pub age: f64,
    pub gender: String,
    pub activity_level: f64,
    pub weight_goal: f64,
    pub bmi: f64,
    pub maintenance_calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub fiber_g: f64,
    pub updated_at: OffsetDateTime,
}

impl GoalProfile {
    pub fn macros(&self) -> DailyMacros {
        DailyMacros {
            protein: self.protein_g,
            carbs: self.carbs_g,
            fats: self.fats_g,
            fiber: self.fiber_g,
        }
    }

    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<GoalProfile>> {
        let profile = sqlx::query_as::<_, GoalProfile>(
            r#"
            SELECT user_id, height, weight, age, gender, activity_level, weight_goal,
                   bmi, maintenance_calories, protein_g, carbs_g, fats_g, fiber_g, updated_at
            FROM goal_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// Insert-or-replace the user's single profile row.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        height: f64,
        weight: f64,
        age: f64,
        gender: &str,
        activity_level: f64,
        weight_goal: f64,
        numbers: &GoalNumbers,
    ) -> anyhow::Result<GoalProfile> {
        let profile = sqlx::query_as::<_, GoalProfile>(
            r#"
            INSERT INTO goal_profiles
                (user_id, height, weight, age, gender, activity_level, weight_goal,
                 bmi, maintenance_calories, protein_g, carbs_g, fats_g, fiber_g, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, now())
            ON CONFLICT (user_id) DO UPDATE SET
                height = EXCLUDED.height,
                weight = EXCLUDED.weight,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                activity_level = EXCLUDED.activity_level,
                weight_goal = EXCLUDED.weight_goal,
                bmi = EXCLUDED.bmi,
                maintenance_calories = EXCLUDED.maintenance_calories,
                protein_g = EXCLUDED.protein_g,
                carbs_g = EXCLUDED.carbs_g,
                fats_g = EXCLUDED.fats_g,
                fiber_g = EXCLUDED.fiber_g,
                updated_at = now()
            RETURNING user_id, height, weight, age, gender, activity_level, weight_goal,
                      bmi, maintenance_calories, protein_g, carbs_g, fats_g, fiber_g, updated_at
            "#,
        )
        .bind(user_id)
        .bind(height)
        .bind(weight)
        .bind(age)
        .bind(gender)
        .bind(activity_level)
        .bind(weight_goal)
        .bind(numbers.bmi)
        .bind(numbers.adjusted_calories)
        .bind(numbers.macros.protein)
        .bind(numbers.macros.carbs)
        .bind(numbers.macros.fats)
        .bind(numbers.macros.fiber)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }
}

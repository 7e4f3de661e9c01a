use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Per-entry macro deltas added to the day's running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroDelta {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

/// Running totals for one (user, calendar day). Created zeroed on the first
/// food log of the day, incremented additively, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyIntake {
    pub user_id: Uuid,
    pub date: Date,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

impl DailyIntake {
    pub fn empty(user_id: Uuid, date: Date) -> Self {
        Self {
            user_id,
            date,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
            fiber: 0.0,
        }
    }

    /// Find-or-create today's record and add the deltas, in one statement.
    ///
    /// The unique index on (user_id, date) plus ON CONFLICT .. DO UPDATE makes
    /// this safe against two concurrent adds for the same day: exactly one row
    /// exists per (user, day), and both increments land on it.
    pub async fn add(
        db: &PgPool,
        user_id: Uuid,
        date: Date,
        delta: MacroDelta,
    ) -> anyhow::Result<DailyIntake> {
        let record = sqlx::query_as::<_, DailyIntake>(
            r#"
            INSERT INTO daily_intake (user_id, date, calories, protein, carbs, fats, fiber)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, date) DO UPDATE SET
                calories = daily_intake.calories + EXCLUDED.calories,
                protein  = daily_intake.protein  + EXCLUDED.protein,
                carbs    = daily_intake.carbs    + EXCLUDED.carbs,
                fats     = daily_intake.fats     + EXCLUDED.fats,
                fiber    = daily_intake.fiber    + EXCLUDED.fiber
            RETURNING user_id, date, calories, protein, carbs, fats, fiber
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(delta.calories)
        .bind(delta.protein)
        .bind(delta.carbs)
        .bind(delta.fats)
        .bind(delta.fiber)
        .fetch_one(db)
        .await?;
        Ok(record)
    }

    pub async fn find_for_day(
        db: &PgPool,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Option<DailyIntake>> {
        let record = sqlx::query_as::<_, DailyIntake>(
            r#"
            SELECT user_id, date, calories, protein, carbs, fats, fiber
            FROM daily_intake
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(db)
        .await?;
        Ok(record)
    }
}

/// Truncates a timestamp to its UTC calendar day. Entries either side of
/// midnight bucket to distinct records.
pub fn bucket_date(at: OffsetDateTime) -> Date {
    at.date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn midnight_splits_buckets() {
        let before = bucket_date(datetime!(2025-03-01 23:59:59 UTC));
        let after = bucket_date(datetime!(2025-03-02 00:00:01 UTC));
        assert_ne!(before, after);
    }

    #[test]
    fn same_day_shares_a_bucket() {
        let morning = bucket_date(datetime!(2025-03-01 06:30:00 UTC));
        let evening = bucket_date(datetime!(2025-03-01 21:15:00 UTC));
        assert_eq!(morning, evening);
    }

    // Mirrors the ON CONFLICT increment arithmetic.
    fn apply(mut rec: DailyIntake, d: MacroDelta) -> DailyIntake {
        rec.calories += d.calories;
        rec.protein += d.protein;
        rec.carbs += d.carbs;
        rec.fats += d.fats;
        rec.fiber += d.fiber;
        rec
    }

    #[test]
    fn totals_accumulate_additively() {
        let day = bucket_date(datetime!(2025-03-01 12:00:00 UTC));
        let rec = DailyIntake::empty(Uuid::new_v4(), day);
        let rec = apply(
            rec,
            MacroDelta {
                calories: 100.0,
                ..MacroDelta::default()
            },
        );
        let rec = apply(
            rec,
            MacroDelta {
                calories: 50.0,
                protein: 3.0,
                ..MacroDelta::default()
            },
        );
        assert_eq!(rec.calories, 150.0);
        assert_eq!(rec.protein, 3.0);
        assert_eq!(rec.date, day);
    }

    #[test]
    fn empty_record_is_zeroed() {
        let rec = DailyIntake::empty(Uuid::new_v4(), datetime!(2025-03-01 12:00:00 UTC).date());
        assert_eq!(rec.calories, 0.0);
        assert_eq!(rec.protein, 0.0);
        assert_eq!(rec.fiber, 0.0);
    }
}

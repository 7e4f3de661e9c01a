use serde::{Deserialize, Serialize};

use crate::intake::repo::{DailyIntake, MacroDelta};

/// Per-entry macro values at logged quantity; missing fields count as zero,
/// matching how the client submits partial nutrition data.
#[derive(Debug, Deserialize)]
pub struct AddIntakeRequest {
    #[serde(default)]
    pub energy_kcal: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carb_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub fibre_g: f64,
}

impl AddIntakeRequest {
    /// Day totals only ever grow; negative (or NaN) inputs count as zero.
    pub fn delta(&self) -> MacroDelta {
        MacroDelta {
            calories: non_negative(self.energy_kcal),
            protein: non_negative(self.protein_g),
            carbs: non_negative(self.carb_g),
            fats: non_negative(self.fat_g),
            fiber: non_negative(self.fibre_g),
        }
    }
}

fn non_negative(v: f64) -> f64 {
    v.max(0.0)
}

#[derive(Debug, Serialize)]
pub struct Nutrients {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

/// Updated running totals for the current day.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub calories: f64,
    pub nutrients: Nutrients,
}

impl From<DailyIntake> for DashboardResponse {
    fn from(r: DailyIntake) -> Self {
        Self {
            calories: r.calories,
            nutrients: Nutrients {
                protein: r.protein,
                carbs: r.carbs,
                fats: r.fats,
                fiber: r.fiber,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let req: AddIntakeRequest = serde_json::from_str(r#"{"energy_kcal":100}"#).unwrap();
        let d = req.delta();
        assert_eq!(d.calories, 100.0);
        assert_eq!(d.protein, 0.0);
        assert_eq!(d.fiber, 0.0);
    }

    #[test]
    fn negative_values_never_shrink_the_day() {
        let req: AddIntakeRequest =
            serde_json::from_str(r#"{"energy_kcal":-250,"protein_g":-1,"carb_g":30}"#).unwrap();
        let d = req.delta();
        assert_eq!(d.calories, 0.0);
        assert_eq!(d.protein, 0.0);
        assert_eq!(d.carbs, 30.0);
        assert_eq!(d.fats, 0.0);
    }

    #[test]
    fn full_body_maps_field_for_field() {
        let req: AddIntakeRequest = serde_json::from_str(
            r#"{"energy_kcal":250,"protein_g":12,"carb_g":30,"fat_g":8,"fibre_g":4}"#,
        )
        .unwrap();
        let d = req.delta();
        assert_eq!(d.calories, 250.0);
        assert_eq!(d.protein, 12.0);
        assert_eq!(d.carbs, 30.0);
        assert_eq!(d.fats, 8.0);
        assert_eq!(d.fiber, 4.0);
    }
}

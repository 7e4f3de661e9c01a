use serde::{Deserialize, Serialize};

use crate::goals::calculator::{DailyMacros, Gender};
use crate::goals::repo::GoalProfile;

/// Body for POST /goals; field names match the client forms.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateGoalsRequest {
    pub height: f64,
    pub weight: f64,
    pub age: f64,
    pub gender: Gender,
    pub activity_level: f64,
    #[serde(default)]
    pub weight_goal: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProfileResponse {
    pub height: f64,
    pub weight: f64,
    pub age: f64,
    pub gender: String,
    pub activity_level: f64,
    pub weight_goal: f64,
    pub bmi: f64,
    pub maintenance_calories: f64,
    pub daily_macros: DailyMacros,
}

impl From<GoalProfile> for GoalProfileResponse {
    fn from(p: GoalProfile) -> Self {
        let daily_macros = p.macros();
        Self {
            height: p.height,
            weight: p.weight,
            age: p.age,
            gender: p.gender,
            activity_level: p.activity_level,
            weight_goal: p.weight_goal,
            bmi: p.bmi,
            maintenance_calories: p.maintenance_calories,
            daily_macros,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_camel_case_and_defaults_goal() {
        let req: CalculateGoalsRequest = serde_json::from_str(
            r#"{"height":175,"weight":70,"age":25,"gender":"male","activityLevel":1.2}"#,
        )
        .unwrap();
        assert_eq!(req.activity_level, 1.2);
        assert_eq!(req.gender, Gender::Male);
        assert_eq!(req.weight_goal, 0.0);
    }

    #[test]
    fn request_rejects_unknown_gender() {
        let res = serde_json::from_str::<CalculateGoalsRequest>(
            r#"{"height":175,"weight":70,"age":25,"gender":"x","activityLevel":1.2}"#,
        );
        assert!(res.is_err());
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One kilogram of body fat is roughly 7700 kcal; a weekly weight goal is
/// spread evenly over the seven days of the week.
const KCAL_PER_KG: f64 = 7700.0;
const DAYS_PER_WEEK: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = GoalInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(GoalInputError::InvalidGender),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalInputError {
    #[error("{0} must be a positive number")]
    NonPositive(&'static str),
    #[error("gender must be 'male' or 'female'")]
    InvalidGender,
}

/// Body metrics used to derive a daily calorie and macro target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalInput {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: f64,
    pub gender: Gender,
    pub activity_level: f64,
    /// Weekly weight goal in kg; negative to lose, positive to gain.
    pub weight_goal_kg_per_week: f64,
}

impl GoalInput {
    fn validate(&self) -> Result<(), GoalInputError> {
        if !(self.height_cm > 0.0) {
            return Err(GoalInputError::NonPositive("height"));
        }
        if !(self.weight_kg > 0.0) {
            return Err(GoalInputError::NonPositive("weight"));
        }
        if !(self.age_years > 0.0) {
            return Err(GoalInputError::NonPositive("age"));
        }
        if !(self.activity_level > 0.0) {
            return Err(GoalInputError::NonPositive("activityLevel"));
        }
        Ok(())
    }
}

/// Daily macro targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMacros {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

/// Fully derived goal numbers; a pure function of [`GoalInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalNumbers {
    pub bmi: f64,
    pub bmr: f64,
    /// Calories to maintain current weight (BMR x activity).
    pub maintenance_calories: f64,
    /// Maintenance shifted by the weekly weight goal.
    pub adjusted_calories: f64,
    pub macros: DailyMacros,
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Mifflin-St Jeor basal metabolic rate.
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: f64, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn maintenance_calories(bmr: f64, activity_level: f64) -> f64 {
    (bmr * activity_level).round()
}

/// Macro split: 1 g protein per kg body weight, 25% of calories from fat,
/// the remainder from carbs, 14 g fiber per 1000 kcal.
pub fn daily_macros(weight_kg: f64, calories: f64) -> DailyMacros {
    let protein = (weight_kg * 1.0).round();
    let fats = (calories * 0.25 / 9.0).round();
    let carbs = ((calories - (protein * 4.0 + fats * 9.0)) / 4.0).round();
    let fiber = (calories / 1000.0 * 14.0).round();
    DailyMacros {
        protein,
        carbs,
        fats,
        fiber,
    }
}

/// Derives the full goal profile numbers. Deterministic and side-effect free;
/// persistence is the caller's concern.
pub fn compute(input: GoalInput) -> Result<GoalNumbers, GoalInputError> {
    input.validate()?;

    let bmi = bmi(input.weight_kg, input.height_cm);
    let bmr = bmr(input.weight_kg, input.height_cm, input.age_years, input.gender);
    let maintenance = maintenance_calories(bmr, input.activity_level);
    let adjusted = maintenance + input.weight_goal_kg_per_week * KCAL_PER_KG / DAYS_PER_WEEK;
    let macros = daily_macros(input.weight_kg, adjusted);

    Ok(GoalNumbers {
        bmi,
        bmr,
        maintenance_calories: maintenance,
        adjusted_calories: adjusted,
        macros,
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> GoalInput {
        GoalInput {
            height_cm: 175.0,
            weight_kg: 70.0,
            age_years: 25.0,
            gender: Gender::Male,
            activity_level: 1.2,
            weight_goal_kg_per_week: 0.0,
        }
    }

    #[test]
    fn bmi_reference_value() {
        assert_eq!(bmi(70.0, 175.0), 22.86);
    }

    #[test]
    fn bmr_and_maintenance_reference_values() {
        let b = bmr(70.0, 175.0, 25.0, Gender::Male);
        assert_eq!(b, 1673.75);
        assert_eq!(maintenance_calories(b, 1.2), 2009.0);
    }

    #[test]
    fn female_bmr_offset() {
        let male = bmr(60.0, 165.0, 30.0, Gender::Male);
        let female = bmr(60.0, 165.0, 30.0, Gender::Female);
        assert_eq!(male - female, 166.0);
    }

    #[test]
    fn zero_weight_goal_keeps_maintenance() {
        let out = compute(input()).unwrap();
        assert_eq!(out.bmr, 1673.75);
        assert_eq!(out.adjusted_calories, out.maintenance_calories);
    }

    #[test]
    fn negative_weight_goal_cuts_calories() {
        let mut i = input();
        i.weight_goal_kg_per_week = -0.5;
        let out = compute(i).unwrap();
        assert!(out.adjusted_calories < out.maintenance_calories);
        assert_eq!(
            out.adjusted_calories,
            out.maintenance_calories - 0.5 * 7700.0 / 7.0
        );
    }

    #[test]
    fn macro_energy_adds_back_up() {
        for goal in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let mut i = input();
            i.weight_goal_kg_per_week = goal;
            let out = compute(i).unwrap();
            let m = out.macros;
            let energy = m.protein * 4.0 + m.fats * 9.0 + m.carbs * 4.0;
            assert!(
                (energy - out.adjusted_calories).abs() <= 5.0,
                "macro energy {} too far from {}",
                energy,
                out.adjusted_calories
            );
        }
    }

    #[test]
    fn fiber_scales_with_calories() {
        let m = daily_macros(70.0, 2000.0);
        assert_eq!(m.fiber, 28.0);
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let a = compute(input()).unwrap();
        let b = compute(input()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_zeroish_fields() {
        let mut i = input();
        i.height_cm = 0.0;
        assert_eq!(compute(i), Err(GoalInputError::NonPositive("height")));

        let mut i = input();
        i.weight_kg = -1.0;
        assert_eq!(compute(i), Err(GoalInputError::NonPositive("weight")));

        let mut i = input();
        i.age_years = 0.0;
        assert_eq!(compute(i), Err(GoalInputError::NonPositive("age")));

        let mut i = input();
        i.activity_level = 0.0;
        assert_eq!(compute(i), Err(GoalInputError::NonPositive("activityLevel")));
    }

    #[test]
    fn rejects_nan_inputs() {
        let mut i = input();
        i.weight_kg = f64::NAN;
        assert!(compute(i).is_err());
    }

    #[test]
    fn gender_round_trips_through_str() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
        assert_eq!(Gender::Female.as_str(), "female");
    }
}

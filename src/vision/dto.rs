use serde::Serialize;

use crate::foods::table::FoodRecord;
use crate::nutrition::NutritionFacts;

/// Simplified, plain-language version of an OCR'd medical report.
#[derive(Debug, Serialize)]
pub struct MedicalReportResponse {
    pub extracted_text: String,
}

/// Macros resolved for a detected food, tagged with where they came from.
#[derive(Debug, Serialize)]
pub struct DetectedMacros {
    pub source: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub glycemic_index: Option<f64>,
}

impl DetectedMacros {
    pub fn from_record(rec: &FoodRecord) -> Self {
        Self {
            source: "dataset",
            calories: rec.calories,
            protein: rec.protein,
            carbs: rec.carbs,
            fat: rec.fat,
            fiber: rec.fiber,
            glycemic_index: rec.glycemic_index,
        }
    }

    pub fn from_facts(facts: NutritionFacts) -> Self {
        Self {
            source: "llm",
            calories: facts.calories,
            protein: facts.protein,
            carbs: facts.carbs,
            fat: facts.fat,
            fiber: facts.fiber,
            glycemic_index: facts.glycemic_index,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            source: "llm_error",
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            glycemic_index: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetectFoodResponse {
    pub detected_food: String,
    pub macros: DetectedMacros,
}

use serde::{Deserialize, Serialize};

use crate::foods::table::FoodRecord;
use crate::nutrition::NutritionFacts;

#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    pub food_name: String,
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
    pub glycemic_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub food: String,
}

/// Nutrition facts for a searched food, from the dataset or the LLM.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub food: String,
    pub calorie: f64,
    pub carb: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub glycemic_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalyzeResponse {
    pub fn from_record(food: String, rec: &FoodRecord) -> Self {
        Self {
            food,
            calorie: rec.calories,
            carb: rec.carbs,
            protein: rec.protein,
            fat: rec.fat,
            fiber: rec.fiber,
            glycemic_index: rec.glycemic_index,
            recommendation: Some(rec.recommendation.clone()),
            portion: Some(rec.portion.clone()),
            message: None,
        }
    }

    pub fn from_facts(food: String, facts: NutritionFacts) -> Self {
        Self {
            food,
            calorie: facts.calories,
            carb: facts.carbs,
            protein: facts.protein,
            fat: facts.fat,
            fiber: facts.fiber,
            glycemic_index: facts.glycemic_index,
            recommendation: None,
            portion: None,
            message: None,
        }
    }

    pub fn unavailable(food: String) -> Self {
        Self {
            food,
            calorie: 0.0,
            carb: 0.0,
            protein: 0.0,
            fat: 0.0,
            fiber: 0.0,
            glycemic_index: None,
            recommendation: None,
            portion: None,
            message: Some("Nutrition data not available".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_carries_a_message_and_zeros() {
        let resp = AnalyzeResponse::unavailable("unknown dish".into());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["calorie"], 0.0);
        assert_eq!(json["message"], "Nutrition data not available");
        assert!(json.get("recommendation").is_none());
    }
}

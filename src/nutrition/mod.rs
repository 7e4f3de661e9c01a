mod together;

pub use together::TogetherClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-100g nutrition facts, as returned by the LLM lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub glycemic_index: Option<f64>,
}

impl NutritionFacts {
    pub fn zeroed() -> Self {
        Self {
            calories: 0.0,
            carbs: 0.0,
            protein: 0.0,
            fat: 0.0,
            fiber: 0.0,
            glycemic_index: None,
        }
    }
}

/// LLM-backed nutrition features. Behind a trait so tests can stub it out.
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Nutrition facts per 100g of the named food.
    async fn nutrition_facts(&self, food: &str) -> anyhow::Result<NutritionFacts>;
    /// Rewrites an OCR'd medical report in plain language.
    async fn simplify_report(&self, text: &str) -> anyhow::Result<String>;
}

/// Parses the model's message content into facts. Models sometimes wrap the
/// JSON in prose, so on a direct parse failure the first `{..}` block is
/// tried before giving up.
pub(crate) fn parse_facts_content(content: &str) -> Option<NutritionFacts> {
    let trimmed = content.trim();
    if let Ok(facts) = serde_json::from_str::<NutritionFacts>(trimmed) {
        return Some(facts);
    }
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<NutritionFacts>(&trimmed[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_json() {
        let facts = parse_facts_content(
            r#"{"calories":120,"carbs":20,"protein":4,"fat":2,"fiber":1,"glycemic_index":55}"#,
        )
        .unwrap();
        assert_eq!(facts.calories, 120.0);
        assert_eq!(facts.glycemic_index, Some(55.0));
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let content = "Here are the facts you asked for:\n\
            {\"calories\": 89, \"carbs\": 23, \"protein\": 1.1, \"fat\": 0.3, \"fiber\": 2.6, \"glycemic_index\": null}\n\
            Let me know if you need more.";
        let facts = parse_facts_content(content).unwrap();
        assert_eq!(facts.calories, 89.0);
        assert_eq!(facts.glycemic_index, None);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let facts = parse_facts_content(r#"{"calories": 50}"#).unwrap();
        assert_eq!(facts.carbs, 0.0);
        assert_eq!(facts.glycemic_index, None);
    }

    #[test]
    fn garbage_yields_none() {
        assert!(parse_facts_content("I cannot help with that.").is_none());
        assert!(parse_facts_content("").is_none());
        assert!(parse_facts_content("{not json}").is_none());
    }
}

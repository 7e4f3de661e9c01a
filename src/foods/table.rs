use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// One row of the food dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    /// Normalized: trimmed and lowercased at load time.
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub glycemic_index: Option<f64>,
    pub recommendation: String,
    pub portion: String,
}

/// Column names as they appear in the dataset CSV; numeric cells are kept as
/// strings so that blank or malformed values degrade to 0 instead of failing
/// the whole load.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Food Name")]
    name: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Calories", default)]
    calories: String,
    #[serde(rename = "Carbs", default)]
    carbs: String,
    #[serde(rename = "Protein", default)]
    protein: String,
    #[serde(rename = "Fats", default)]
    fats: String,
    #[serde(rename = "Fiber", default)]
    fiber: String,
    #[serde(rename = "GI", default)]
    gi: String,
    #[serde(rename = "recommendation", default)]
    recommendation: String,
    #[serde(rename = "portion_guidance", default)]
    portion: String,
}

fn parse_or_zero(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(0.0)
}

/// Read-only lookup table built once at startup and shared by reference
/// through `AppState`.
#[derive(Debug)]
pub struct FoodTable {
    items: Vec<FoodRecord>,
}

impl FoodTable {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("open {}", path.as_ref().display()))?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut items = Vec::new();
        for row in rdr.deserialize::<RawRow>() {
            let row = row.context("malformed csv row")?;
            items.push(FoodRecord {
                name: row.name.trim().to_lowercase(),
                category: row.category,
                calories: parse_or_zero(&row.calories),
                carbs: parse_or_zero(&row.carbs),
                protein: parse_or_zero(&row.protein),
                fat: parse_or_zero(&row.fats),
                fiber: parse_or_zero(&row.fiber),
                glycemic_index: row.gi.trim().parse::<f64>().ok(),
                recommendation: row.recommendation,
                portion: row.portion,
            });
        }
        Ok(Self { items })
    }

    /// Case-insensitive substring match in either direction, so "masala dosa"
    /// finds the "dosa" row and "dosa" finds "masala dosa".
    pub fn find(&self, query: &str) -> Option<&FoodRecord> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.name.contains(&q) || q.contains(&item.name))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Food Name,Category,Calories,Carbs,Protein,Fats,Fiber,GI,recommendation,portion_guidance
Idli,Breakfast,58,12.0,2.0,0.4,0.8,66,Good with sambar,2 pieces
Masala Dosa,Breakfast,250,34.0,5.0,10.0,2.0,,Occasional,1 piece
Dal Tadka,Main,abc,20.0,9.0,6.0,5.0,29,Rich in protein,1 bowl
";

    fn table() -> FoodTable {
        FoodTable::from_reader(CSV.as_bytes()).expect("csv parses")
    }

    #[test]
    fn loads_all_rows() {
        let t = table();
        assert_eq!(t.len(), 3);
        assert!(!t.is_empty());
    }

    #[test]
    fn find_is_case_and_whitespace_insensitive() {
        let t = table();
        let hit = t.find("  IDLI ").expect("idli found");
        assert_eq!(hit.calories, 58.0);
        assert_eq!(hit.glycemic_index, Some(66.0));
    }

    #[test]
    fn find_matches_substring_both_ways() {
        let t = table();
        // query is a superstring of the stored name
        assert!(t.find("plain idli steamed").is_some());
        // query is a substring of the stored name
        assert_eq!(t.find("dosa").unwrap().name, "masala dosa");
    }

    #[test]
    fn bad_numerics_default_to_zero_and_gi_to_none() {
        let t = table();
        let dal = t.find("dal tadka").unwrap();
        assert_eq!(dal.calories, 0.0);
        assert_eq!(dal.protein, 9.0);
        let dosa = t.find("masala dosa").unwrap();
        assert_eq!(dosa.glycemic_index, None);
    }

    #[test]
    fn empty_query_finds_nothing() {
        let t = table();
        assert!(t.find("").is_none());
        assert!(t.find("   ").is_none());
    }
}

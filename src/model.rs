use serde::{Deserialize, Serialize};

/// Lightweight recipe record used in result lists.
/// Every field is always populated; placeholders stand in for missing source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image: String,
}

/// Full recipe record used in the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub source_url: String,
    pub image: String,
    pub servings: u32,
    /// Minutes
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
}

/// A single ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    /// Empty when the line has no recognised unit
    pub unit: String,
    pub description: String,
}

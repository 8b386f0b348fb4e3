//! Raw recipe shapes as they arrive from the API or the local dataset, and the
//! normalizers that turn them into strict [`RecipeDetail`] / [`ResultSummary`].
//!
//! Each source has its own normalizer so that the field-name fallbacks for a
//! source live in exactly one place.

use crate::config::FallbackConfig;
use crate::ingredient::{parse_ingredient, parse_quantity};
use crate::model::{Ingredient, RecipeDetail, ResultSummary};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const PLACEHOLDER_TITLE: &str = "Sample Recipe";
pub const PLACEHOLDER_PUBLISHER: &str = "Local";

/// A recipe object as found in an API response or the local dataset.
/// Every field is optional; alternate field names are kept apart so that each
/// normalizer decides which ones it honours.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipe {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recipe_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub servings: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub cooking_time: Option<u32>,
    #[serde(default, rename = "cookingTime", deserialize_with = "lenient_u32")]
    pub cooking_time_camel: Option<u32>,
    #[serde(default, deserialize_with = "lenient_ingredients")]
    pub ingredients: Option<Vec<RawIngredient>>,
}

/// Ingredients come either as a descriptive line or as structured fields
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIngredient {
    Line(String),
    Structured {
        #[serde(default, deserialize_with = "lenient_quantity")]
        quantity: Option<f64>,
        #[serde(default)]
        unit: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        match raw {
            RawIngredient::Line(line) => parse_ingredient(&line),
            RawIngredient::Structured {
                quantity,
                unit,
                description,
            } => Ingredient {
                quantity,
                unit: unit.unwrap_or_default(),
                description: description.unwrap_or_default(),
            },
        }
    }
}

/// Normalize a recipe returned by the remote API.
///
/// `requested_id` fills in the id when the response omits both `id` and `recipe_id`.
pub fn normalize_remote_recipe(
    raw: RawRecipe,
    requested_id: &str,
    fallback: &FallbackConfig,
) -> RecipeDetail {
    RecipeDetail {
        id: raw
            .id
            .or(raw.recipe_id)
            .unwrap_or_else(|| requested_id.to_string()),
        title: raw.title.unwrap_or_default(),
        publisher: raw.publisher.unwrap_or_default(),
        source_url: raw.source_url.unwrap_or_default(),
        image: raw
            .image_url
            .unwrap_or_else(|| fallback.placeholder_image.clone()),
        servings: raw.servings.unwrap_or(fallback.default_servings),
        cooking_time: raw.cooking_time.unwrap_or(fallback.default_cooking_time),
        ingredients: into_ingredients(raw.ingredients),
    }
}

/// Normalize an entry of the local dataset, honouring every alternate field name.
///
/// `position` is the entry's index in the dataset; it names entries without an id.
pub fn normalize_local_recipe(
    raw: RawRecipe,
    position: usize,
    fallback: &FallbackConfig,
) -> RecipeDetail {
    RecipeDetail {
        id: local_id(&raw, position),
        title: raw.title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
        publisher: raw
            .publisher
            .unwrap_or_else(|| PLACEHOLDER_PUBLISHER.to_string()),
        source_url: raw.source_url.unwrap_or_default(),
        image: raw
            .image_url
            .or(raw.image)
            .unwrap_or_else(|| fallback.placeholder_image.clone()),
        servings: raw.servings.unwrap_or(fallback.default_servings),
        cooking_time: raw
            .cooking_time
            .or(raw.cooking_time_camel)
            .unwrap_or(fallback.default_cooking_time),
        ingredients: into_ingredients(raw.ingredients),
    }
}

/// Project a remote search hit onto a list entry
pub fn summarize_remote(raw: RawRecipe, position: usize, fallback: &FallbackConfig) -> ResultSummary {
    ResultSummary {
        id: raw
            .id
            .or(raw.recipe_id)
            .unwrap_or_else(|| generated_id(position)),
        title: raw.title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
        publisher: raw.publisher.unwrap_or_default(),
        image: raw
            .image_url
            .unwrap_or_else(|| fallback.placeholder_image.clone()),
    }
}

/// Project a local dataset entry onto a list entry
pub fn summarize_local(raw: RawRecipe, position: usize, fallback: &FallbackConfig) -> ResultSummary {
    ResultSummary {
        id: local_id(&raw, position),
        title: raw.title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
        publisher: raw
            .publisher
            .unwrap_or_else(|| PLACEHOLDER_PUBLISHER.to_string()),
        image: raw
            .image_url
            .or(raw.image)
            .unwrap_or_else(|| fallback.placeholder_image.clone()),
    }
}

/// Id a local entry is addressed by, generated from its position when absent
pub fn local_id(raw: &RawRecipe, position: usize) -> String {
    raw.id
        .clone()
        .or_else(|| raw.recipe_id.clone())
        .unwrap_or_else(|| generated_id(position))
}

fn generated_id(position: usize) -> String {
    format!("sample-{}", position + 1)
}

fn into_ingredients(raw: Option<Vec<RawIngredient>>) -> Vec<Ingredient> {
    raw.unwrap_or_default()
        .into_iter()
        .map(Ingredient::from)
        .collect()
}

/// Accepts strings and numbers (ids are numeric in some datasets); null and
/// empty strings become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts non-negative integers, floats and numeric strings
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n.round() as u32))
}

/// Anything but an array is treated as missing. Numeric elements become lines,
/// elements that are neither lines nor ingredient objects are dropped.
fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Option<Vec<RawIngredient>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(None);
    };

    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::Number(n) => Some(RawIngredient::Line(n.to_string())),
                Value::String(_) | Value::Object(_) => RawIngredient::deserialize(item).ok(),
                _ => None,
            })
            .collect(),
    ))
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_quantity(&s),
        _ => None,
    })
}

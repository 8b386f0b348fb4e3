use crate::error::LookupError;
use crate::normalize::RawRecipe;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

const BUNDLED_DATASET: &str = include_str!("../data/sample_recipes.json");

/// Where the fallback recipes are read from
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Sample recipes compiled into the binary
    Bundled,
    /// A JSON file read on every access
    File(PathBuf),
}

/// Static collection of sample recipes used when the remote API is unavailable
#[derive(Debug, Clone)]
pub struct LocalDataset {
    source: DatasetSource,
}

impl LocalDataset {
    pub fn bundled() -> Self {
        Self {
            source: DatasetSource::Bundled,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: DatasetSource::File(path.into()),
        }
    }

    /// Bundled dataset unless a path is given
    pub fn from_config(path: Option<&PathBuf>) -> Self {
        match path {
            Some(path) => Self::from_path(path.clone()),
            None => Self::bundled(),
        }
    }

    /// Read every entry, in document order
    pub async fn read(&self) -> Result<Vec<RawRecipe>, LookupError> {
        let recipes = match &self.source {
            DatasetSource::Bundled => parse_dataset(BUNDLED_DATASET)?,
            DatasetSource::File(path) => {
                let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                    LookupError::LocalDatasetRead(format!("{}: {}", path.display(), e))
                })?;
                parse_dataset(&contents)?
            }
        };

        debug!("Read {} recipes from local dataset", recipes.len());
        Ok(recipes)
    }
}

/// Parse a dataset document: a bare array, `{recipes: [...]}` or `{recipe: {...}}`.
///
/// Entries are read one by one; an entry that is not a recipe object is
/// skipped instead of failing the whole dataset.
pub fn parse_dataset(contents: &str) -> Result<Vec<RawRecipe>, LookupError> {
    let document: Value = serde_json::from_str(contents)
        .map_err(|e| LookupError::LocalDatasetRead(format!("invalid JSON: {}", e)))?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut root) => {
            if let Some(recipes) = root.remove("recipes") {
                match recipes {
                    Value::Array(entries) => entries,
                    other => {
                        return Err(LookupError::LocalDatasetRead(format!(
                            "`recipes` must be an array, found {}",
                            json_type(&other)
                        )))
                    }
                }
            } else if let Some(recipe) = root.remove("recipe") {
                vec![recipe]
            } else {
                return Err(LookupError::LocalDatasetRead(
                    "expected an array or an object with `recipes` or `recipe`".to_string(),
                ));
            }
        }
        other => {
            return Err(LookupError::LocalDatasetRead(format!(
                "expected an array or an object with `recipes` or `recipe`, found {}",
                json_type(&other)
            )))
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match RawRecipe::deserialize(entry) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                warn!("Skipping local recipe #{}: {}", position + 1, e);
                None
            }
        })
        .collect())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Whether an id can only refer to a local sample recipe
pub fn is_sample_id(id: &str, known_sample_ids: &[String]) -> bool {
    id.starts_with("sample-") || known_sample_ids.iter().any(|known| known == id)
}

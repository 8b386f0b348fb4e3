use crate::config::ApiConfig;
use crate::error::LookupError;
use crate::normalize::RawRecipe;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

/// Addresses the remote recipe API and unwraps its response envelopes
#[derive(Debug, Clone)]
pub struct RemoteApi {
    base_url: String,
    key: Option<String>,
}

impl RemoteApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            key: config.key.clone(),
        }
    }

    /// `<base_url>/<id>`
    pub fn recipe_url(&self, id: &str) -> Result<String, LookupError> {
        let mut url = self.parse_base()?;
        url.path_segments_mut()
            .map_err(|_| LookupError::RemoteFetch(format!("Invalid API URL: {}", self.base_url)))?
            .pop_if_empty()
            .push(id);
        self.append_key(&mut url);
        Ok(url.into())
    }

    /// `<base_url>?search=<query>`
    pub fn search_url(&self, query: &str) -> Result<String, LookupError> {
        let mut url = self.parse_base()?;
        url.query_pairs_mut().append_pair("search", query);
        self.append_key(&mut url);
        Ok(url.into())
    }

    fn parse_base(&self) -> Result<Url, LookupError> {
        Url::parse(&self.base_url)
            .map_err(|e| LookupError::RemoteFetch(format!("Invalid API URL {}: {}", self.base_url, e)))
    }

    fn append_key(&self, url: &mut Url) {
        if let Some(key) = &self.key {
            url.query_pairs_mut().append_pair("key", key);
        }
    }
}

/// Extract the `recipe` object from `{data: {recipe}}` or `{recipe}`
pub fn unwrap_recipe(json: &Value) -> Result<RawRecipe, LookupError> {
    let recipe = json
        .pointer("/data/recipe")
        .or_else(|| json.get("recipe"))
        .filter(|value| value.is_object())
        .ok_or_else(|| LookupError::RemoteParse("response has no recipe object".to_string()))?;

    parse_raw(recipe)
}

/// Extract the `recipes` array from `{data: {recipes}}` or `{recipes}`
pub fn unwrap_recipes(json: &Value) -> Result<Vec<RawRecipe>, LookupError> {
    let recipes = json
        .pointer("/data/recipes")
        .or_else(|| json.get("recipes"))
        .and_then(Value::as_array)
        .ok_or_else(|| LookupError::RemoteParse("response has no recipes array".to_string()))?;

    recipes.iter().map(parse_raw).collect()
}

fn parse_raw(value: &Value) -> Result<RawRecipe, LookupError> {
    RawRecipe::deserialize(value).map_err(|e| LookupError::RemoteParse(e.to_string()))
}

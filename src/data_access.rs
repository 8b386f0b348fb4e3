//! Data access with local fallback.
//!
//! Every load first asks the remote API. When that fails the local dataset is
//! used instead, and the remote error is only reported when the dataset cannot
//! be used either.

use crate::config::AppConfig;
use crate::dataset::LocalDataset;
use crate::error::LookupError;
use crate::fetcher::{HttpJsonFetcher, JsonFetcher};
use crate::model::{RecipeDetail, ResultSummary};
use crate::normalize::{
    local_id, normalize_local_recipe, normalize_remote_recipe, summarize_local, summarize_remote,
    RawRecipe,
};
use crate::remote::{unwrap_recipe, unwrap_recipes, RemoteApi};
use crate::state::{AppState, ALL_RECIPES_QUERY};
use log::{debug, info, warn};

/// Owns the application state and performs every load that mutates it
pub struct RecipeModel {
    fetcher: Box<dyn JsonFetcher>,
    dataset: LocalDataset,
    api: RemoteApi,
    config: AppConfig,
    state: AppState,
}

impl RecipeModel {
    pub fn new(config: AppConfig, fetcher: Box<dyn JsonFetcher>, dataset: LocalDataset) -> Self {
        Self {
            fetcher,
            dataset,
            api: RemoteApi::new(&config.api),
            state: AppState::new(config.search.results_per_page),
            config,
        }
    }

    /// Build a model that talks HTTP and reads the configured dataset
    pub fn from_config(config: AppConfig) -> Result<Self, LookupError> {
        let fetcher = HttpJsonFetcher::new(Some(config.api.timeout()))?;
        let dataset = LocalDataset::from_config(config.fallback.dataset_path.as_ref());
        Ok(Self::new(config, Box::new(fetcher), dataset))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load one recipe into `state.recipe`.
    ///
    /// Falls back to the local entry with the same id, or the first local entry.
    /// On total failure the remote error is returned and the current recipe is kept.
    pub async fn load_recipe(&mut self, id: &str) -> Result<(), LookupError> {
        match self.fetch_remote_recipe(id).await {
            Ok(recipe) => {
                debug!("Loaded recipe {} from API", recipe.id);
                self.state.set_recipe(recipe);
                self.state.set_using_local_data(false);
                Ok(())
            }
            Err(remote_err) => {
                warn!("Could not load recipe {} from API: {}", id, remote_err);
                match self.local_recipe(id).await {
                    Ok(recipe) => {
                        info!("Loaded recipe {} from local dataset", recipe.id);
                        self.state.set_recipe(recipe);
                        self.state.set_using_local_data(true);
                        Ok(())
                    }
                    Err(local_err) => {
                        warn!("Local fallback also failed: {}", local_err);
                        Err(remote_err)
                    }
                }
            }
        }
    }

    /// Whether the API answers a simple search at all
    pub(crate) async fn check_availability(&self) -> bool {
        match self.search_remote(&self.config.preload.availability_query).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Recipe API unavailable: {}", e);
                false
            }
        }
    }

    /// Fill the result list with a sample across the configured categories,
    /// or with the whole local dataset when the API is down or returns nothing.
    pub async fn load_all_recipes(&mut self) -> Result<(), LookupError> {
        if self.check_availability().await {
            self.state.set_using_local_data(false);
            let per_category = self.config.preload.per_category;
            let mut all = Vec::new();

            for category in &self.config.preload.categories {
                match self.search_remote(category).await {
                    Ok(recipes) => all.extend(recipes.into_iter().take(per_category)),
                    Err(e) => warn!("Error loading {} recipes: {}", category, e),
                }
            }

            if !all.is_empty() {
                let results = self.remote_summaries(all);
                info!("Loaded {} recipes from API", results.len());
                self.state.search_mut().replace(None, results);
                return Ok(());
            }
        }

        self.state.set_using_local_data(true);
        let recipes = self.dataset.read().await?;
        let results = self.local_summaries(recipes.into_iter().enumerate());
        info!("Loaded {} local recipes as fallback", results.len());
        self.state
            .search_mut()
            .replace(Some(ALL_RECIPES_QUERY), results);
        Ok(())
    }

    /// Search the API for `query`.
    ///
    /// When the API fails or finds nothing, local recipes whose title contains
    /// the query are shown, or every local recipe when none matches.
    pub async fn load_search_results(&mut self, query: &str) -> Result<(), LookupError> {
        self.state.set_using_local_data(false);

        let remote_err = match self.search_remote(query).await {
            Ok(recipes) if !recipes.is_empty() => {
                let results = self.remote_summaries(recipes);
                debug!("Found {} results for '{}' on API", results.len(), query);
                self.state.search_mut().replace(Some(query), results);
                return Ok(());
            }
            Ok(_) => {
                info!("API returned no results for '{}'", query);
                None
            }
            Err(e) => {
                warn!("Search for '{}' failed on API: {}", query, e);
                Some(e)
            }
        };

        self.state.set_using_local_data(true);
        match self.local_search(query).await {
            Ok(results) => {
                info!("Showing {} local results for '{}'", results.len(), query);
                self.state.search_mut().replace(Some(query), results);
                Ok(())
            }
            Err(local_err) => {
                warn!("Local fallback also failed: {}", local_err);
                match remote_err {
                    Some(e) => Err(e),
                    None => {
                        // The API did answer, so its empty result stands
                        self.state.set_using_local_data(false);
                        self.state.search_mut().replace(Some(query), Vec::new());
                        Ok(())
                    }
                }
            }
        }
    }

    /// Move the cursor to `page` (current page when `None`) and return its results.
    /// Pages past the end yield an empty slice.
    pub fn get_search_results_page(&mut self, page: Option<usize>) -> &[ResultSummary] {
        let page = page.unwrap_or_else(|| self.state.search().page()).max(1);
        self.state.search_mut().set_page(page);
        self.state.search().page_slice(page)
    }

    async fn fetch_remote_recipe(&self, id: &str) -> Result<RecipeDetail, LookupError> {
        let url = self.api.recipe_url(id)?;
        let json = self.fetcher.fetch_json(&url).await?;
        let raw = unwrap_recipe(&json)?;
        Ok(normalize_remote_recipe(raw, id, &self.config.fallback))
    }

    async fn search_remote(&self, query: &str) -> Result<Vec<RawRecipe>, LookupError> {
        let url = self.api.search_url(query)?;
        let json = self.fetcher.fetch_json(&url).await?;
        unwrap_recipes(&json)
    }

    async fn local_recipe(&self, id: &str) -> Result<RecipeDetail, LookupError> {
        let recipes = self.dataset.read().await?;
        let position = recipes
            .iter()
            .enumerate()
            .position(|(position, raw)| local_id(raw, position) == id)
            .unwrap_or(0);

        let raw = recipes
            .into_iter()
            .nth(position)
            .ok_or_else(|| LookupError::LocalDatasetRead("dataset is empty".to_string()))?;
        Ok(normalize_local_recipe(raw, position, &self.config.fallback))
    }

    async fn local_search(&self, query: &str) -> Result<Vec<ResultSummary>, LookupError> {
        let recipes = self.dataset.read().await?;
        let needle = query.to_lowercase();

        let matching: Vec<(usize, RawRecipe)> = recipes
            .iter()
            .enumerate()
            .filter(|(_, raw)| {
                raw.title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase().contains(&needle))
            })
            .map(|(position, raw)| (position, raw.clone()))
            .collect();

        if matching.is_empty() {
            debug!("No local titles match '{}', showing all", query);
            Ok(self.local_summaries(recipes.into_iter().enumerate()))
        } else {
            Ok(self.local_summaries(matching.into_iter()))
        }
    }

    fn remote_summaries(&self, recipes: Vec<RawRecipe>) -> Vec<ResultSummary> {
        recipes
            .into_iter()
            .enumerate()
            .map(|(position, raw)| summarize_remote(raw, position, &self.config.fallback))
            .collect()
    }

    fn local_summaries(
        &self,
        recipes: impl Iterator<Item = (usize, RawRecipe)>,
    ) -> Vec<ResultSummary> {
        recipes
            .map(|(position, raw)| summarize_local(raw, position, &self.config.fallback))
            .collect()
    }
}

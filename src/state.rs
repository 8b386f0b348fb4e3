use crate::model::{RecipeDetail, ResultSummary};

/// Query recorded when the result list shows every local recipe
pub const ALL_RECIPES_QUERY: &str = "all";

/// Current search results and pagination cursor
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    query: String,
    results: Vec<ResultSummary>,
    page: usize,
    results_per_page: usize,
}

impl SearchState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            results_per_page: results_per_page.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[ResultSummary] {
        &self.results
    }

    /// 1-based
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn results_per_page(&self) -> usize {
        self.results_per_page
    }

    pub fn page_count(&self) -> usize {
        self.results.len().div_ceil(self.results_per_page)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Results on `page`, empty when the page lies past the end
    pub fn page_slice(&self, page: usize) -> &[ResultSummary] {
        let page = page.max(1);
        let start = (page - 1)
            .saturating_mul(self.results_per_page)
            .min(self.results.len());
        let end = start
            .saturating_add(self.results_per_page)
            .min(self.results.len());
        &self.results[start..end]
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Replace the result list and rewind to the first page
    pub(crate) fn replace(&mut self, query: Option<&str>, results: Vec<ResultSummary>) {
        if let Some(query) = query {
            self.query = query.to_string();
        }
        self.results = results;
        self.page = 1;
    }
}

/// Everything the presentation layer reads back after a load
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    recipe: Option<RecipeDetail>,
    search: SearchState,
    using_local_data: bool,
}

impl AppState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            recipe: None,
            search: SearchState::new(results_per_page),
            using_local_data: false,
        }
    }

    /// The recipe last loaded, if any
    pub fn recipe(&self) -> Option<&RecipeDetail> {
        self.recipe.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// True when the most recent load was served from the local dataset
    pub fn is_using_local_data(&self) -> bool {
        self.using_local_data
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub(crate) fn set_recipe(&mut self, recipe: RecipeDetail) {
        self.recipe = Some(recipe);
    }

    pub(crate) fn set_using_local_data(&mut self, using_local_data: bool) {
        self.using_local_data = using_local_data;
    }
}

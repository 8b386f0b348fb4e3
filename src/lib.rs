pub mod config;
pub mod data_access;
pub mod dataset;
pub mod error;
pub mod fetcher;
pub mod ingredient;
pub mod model;
pub mod normalize;
pub mod remote;
pub mod state;

pub use config::AppConfig;
pub use data_access::RecipeModel;
pub use dataset::{is_sample_id, DatasetSource, LocalDataset};
pub use error::LookupError;
pub use fetcher::{HttpJsonFetcher, JsonFetcher};
pub use ingredient::parse_ingredient;
pub use model::{Ingredient, RecipeDetail, ResultSummary};
pub use state::{AppState, SearchState, ALL_RECIPES_QUERY};

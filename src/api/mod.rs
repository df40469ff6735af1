mod spoonacular;

pub use spoonacular::SpoonacularClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CandidateRecipe, RecipeDetails};
use crate::query::SearchQuery;

/// The two calls the search controller makes against a recipe service
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Find candidate recipes that use the given ingredients
    async fn find_by_ingredients(&self, query: &SearchQuery) -> Result<Vec<CandidateRecipe>>;

    /// Fetch full details for one candidate
    async fn recipe_information(&self, id: u64) -> Result<RecipeDetails>;
}

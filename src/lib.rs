//! Find recipes by the ingredients you have on hand.
//!
//! A submission of a comma-separated ingredient list searches the
//! Spoonacular API, fetches details for each candidate and renders one HTML
//! card per recipe into a results container.
//!
//! ```no_run
//! use recipe_finder::RecipeFinder;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let finder = RecipeFinder::builder().api_key("your-api-key").build()?;
//! finder.search("egg, milk, flour").await;
//! println!("{}", finder.html());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod builder;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod model;
pub mod query;
pub mod render;

pub use api::{RecipeApi, SpoonacularClient};
pub use builder::{RecipeFinder, RecipeFinderBuilder};
pub use config::FinderConfig;
pub use controller::{RenderSummary, SearchController, SearchOutcome};
pub use display::{HtmlBuffer, RenderCycle, ResultsContainer, StalePolicy, UiState};
pub use error::{FinderError, Result};
pub use model::{CandidateRecipe, IngredientRef, RecipeDetails};
pub use query::SearchQuery;

/// Run one search with configuration from `config.toml` and the environment,
/// returning the rendered container content.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let html = recipe_finder::search_to_html("egg, milk").await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_to_html(input: &str) -> Result<String> {
    let config = FinderConfig::load()?;
    let finder = RecipeFinder::builder().config(config).build()?;
    finder.search(input).await;
    Ok(finder.html())
}

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};

use crate::api::RecipeApi;
use crate::display::{RenderCycle, StalePolicy, UiState};
use crate::model::CandidateRecipe;
use crate::query::SearchQuery;
use crate::render;

/// What a single submission ended up showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Input was blank; nothing was requested
    Invalid,
    /// The search call failed; carries the description that was shown
    Failed(String),
    /// The search succeeded but returned no candidates
    Empty,
    /// Cards were rendered for the candidates
    Rendered(RenderSummary),
    /// A newer submission took over the container before this one finished
    Superseded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of full recipe cards appended
    pub cards: usize,
    /// Positions (in search order) that got an error placeholder instead
    pub failed: Vec<usize>,
}

/// Drives one form submission from input to rendered results
pub struct SearchController {
    api: Arc<dyn RecipeApi>,
    detail_concurrency: usize,
}

impl SearchController {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self {
            api,
            detail_concurrency: 1,
        }
    }

    /// Allow up to `limit` detail requests in flight. Cards are still
    /// appended in search order; 1 (the default) fetches one at a time.
    pub fn with_detail_concurrency(mut self, limit: usize) -> Self {
        self.detail_concurrency = limit.max(1);
        self
    }

    pub fn detail_concurrency(&self) -> usize {
        self.detail_concurrency
    }

    /// Handle one submission of the ingredient field
    pub async fn submit(&self, ui: &UiState, input: &str) -> SearchOutcome {
        let cycle = ui.begin_cycle();

        let query = match SearchQuery::parse(input) {
            Ok(query) => query,
            Err(e) => {
                debug!("rejecting input {:?}: {}", input, e);
                ui.replace(cycle, &render::validation_message());
                return SearchOutcome::Invalid;
            }
        };

        ui.replace(cycle, &render::loading_message());
        info!("Searching recipes for '{}'", query);

        let candidates = match self.api.find_by_ingredients(&query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("API Error: {}", e);
                let description = e.to_string();
                if !ui.replace(cycle, &render::search_error_message(&description)) {
                    return SearchOutcome::Superseded;
                }
                return SearchOutcome::Failed(description);
            }
        };

        if candidates.is_empty() {
            if !ui.replace(cycle, &render::no_recipes_message()) {
                return SearchOutcome::Superseded;
            }
            return SearchOutcome::Empty;
        }

        self.display_recipes(ui, cycle, &candidates).await
    }

    async fn display_recipes(
        &self,
        ui: &UiState,
        cycle: RenderCycle,
        candidates: &[CandidateRecipe],
    ) -> SearchOutcome {
        if !ui.replace(cycle, "") {
            return SearchOutcome::Superseded;
        }

        let api = &self.api;
        let mut details = stream::iter(candidates.iter().enumerate())
            .map(|(position, candidate)| async move {
                (position, candidate, api.recipe_information(candidate.id).await)
            })
            .buffered(self.detail_concurrency);

        let mut summary = RenderSummary::default();
        while let Some((position, candidate, result)) = details.next().await {
            if ui.policy() == StalePolicy::DropStale && !ui.is_current(cycle) {
                debug!("render cycle {} superseded, stopping", cycle.id());
                return SearchOutcome::Superseded;
            }

            match result {
                Ok(details) => {
                    ui.append(cycle, &render::recipe_card(candidate, &details));
                    summary.cards += 1;
                }
                Err(e) => {
                    warn!("Error fetching recipe details for {}: {}", candidate.id, e);
                    ui.append(cycle, &render::detail_error_card(candidate));
                    summary.failed.push(position);
                }
            }
        }

        info!(
            "Rendered {} recipe(s), {} failed",
            summary.cards,
            summary.failed.len()
        );
        SearchOutcome::Rendered(summary)
    }
}

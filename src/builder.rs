use std::sync::Arc;
use std::time::Duration;

use crate::api::{RecipeApi, SpoonacularClient};
use crate::config::FinderConfig;
use crate::controller::{SearchController, SearchOutcome};
use crate::display::{HtmlBuffer, ResultsContainer, StalePolicy, UiState};
use crate::error::{FinderError, Result};

/// Builder for configuring a [`RecipeFinder`]
#[derive(Default)]
pub struct RecipeFinderBuilder {
    config: Option<FinderConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    number: Option<u32>,
    timeout: Option<Duration>,
    detail_concurrency: Option<usize>,
    stale_policy: Option<StalePolicy>,
    api: Option<Arc<dyn RecipeApi>>,
    container: Option<Arc<dyn ResultsContainer>>,
}

impl RecipeFinderBuilder {
    /// Start from a loaded configuration instead of the defaults
    ///
    /// # Example
    /// ```no_run
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let config = FinderConfig::load().unwrap();
    /// let builder = RecipeFinder::builder().config(config);
    /// ```
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API key for the recipe service
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at a different endpoint (a proxy or a mock server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Number of candidates to request per search
    pub fn number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeFinder::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Maximum detail requests in flight; 1 keeps them sequential
    pub fn detail_concurrency(mut self, limit: usize) -> Self {
        self.detail_concurrency = Some(limit);
        self
    }

    pub fn stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = Some(policy);
        self
    }

    /// Use a custom recipe service instead of Spoonacular
    pub fn api(mut self, api: Arc<dyn RecipeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Render into a custom container instead of an in-memory buffer
    pub fn container(mut self, container: Arc<dyn ResultsContainer>) -> Self {
        self.container = Some(container);
        self
    }

    /// Resolve the effective configuration
    fn resolve(&mut self) -> FinderConfig {
        let mut config = self.config.take().unwrap_or_default();
        if let Some(key) = self.api_key.take() {
            config.api_key = Some(key);
        }
        if let Some(url) = self.base_url.take() {
            config.base_url = url;
        }
        if let Some(number) = self.number {
            config.number = number;
        }
        if let Some(limit) = self.detail_concurrency {
            config.detail_concurrency = limit;
        }
        if let Some(policy) = self.stale_policy {
            config.stale_policy = policy;
        }
        config
    }

    /// A timeout set on the builder keeps its full precision; otherwise the
    /// config's whole seconds apply
    fn request_timeout(&self, config: &FinderConfig) -> Duration {
        self.timeout.unwrap_or_else(|| Duration::from_secs(config.timeout))
    }

    /// Build the finder
    ///
    /// # Errors
    /// Returns `FinderError` if:
    /// - the candidate count or the request timeout is zero
    /// - no API key is available and no custom API was supplied
    /// - the HTTP client cannot be created
    pub fn build(mut self) -> Result<RecipeFinder> {
        let config = self.resolve();

        if config.number == 0 {
            return Err(FinderError::BuilderError(
                "Number of recipes must be at least 1".to_string(),
            ));
        }

        let timeout = self.request_timeout(&config);
        if timeout.is_zero() {
            return Err(FinderError::BuilderError(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        let api: Arc<dyn RecipeApi> = match self.api.take() {
            Some(api) => api,
            None => Arc::new(SpoonacularClient::with_timeout(&config, timeout)?),
        };
        let container: Arc<dyn ResultsContainer> = match self.container.take() {
            Some(container) => container,
            None => Arc::new(HtmlBuffer::new()),
        };

        Ok(RecipeFinder {
            controller: SearchController::new(api)
                .with_detail_concurrency(config.detail_concurrency),
            ui: UiState::new(container, config.stale_policy),
        })
    }
}

/// A search controller together with the UI state it renders into
pub struct RecipeFinder {
    controller: SearchController,
    ui: UiState,
}

impl RecipeFinder {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder();
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }

    /// Submit ingredient input, as if the search form was sent
    pub async fn search(&self, input: &str) -> SearchOutcome {
        self.controller.submit(&self.ui, input).await
    }

    /// Current container content
    pub fn html(&self) -> String {
        self.ui.html()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let mut builder = RecipeFinder::builder()
            .config(FinderConfig {
                number: 8,
                ..Default::default()
            })
            .api_key("key")
            .timeout(Duration::from_millis(200))
            .detail_concurrency(4);

        let config = builder.resolve();
        assert_eq!(config.number, 8);
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.detail_concurrency, 4);
        assert_eq!(
            builder.request_timeout(&config),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_timeout_defaults_to_config_seconds() {
        let mut builder = RecipeFinder::builder().config(FinderConfig {
            timeout: 12,
            ..Default::default()
        });

        let config = builder.resolve();
        assert_eq!(builder.request_timeout(&config), Duration::from_secs(12));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let from_config = RecipeFinder::builder()
            .config(FinderConfig {
                timeout: 0,
                ..Default::default()
            })
            .api_key("key")
            .build();
        assert!(matches!(from_config, Err(FinderError::BuilderError(_))));

        let from_builder = RecipeFinder::builder()
            .api_key("key")
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(from_builder, Err(FinderError::BuilderError(_))));
    }

    #[test]
    fn test_zero_number_is_rejected() {
        let result = RecipeFinder::builder().api_key("key").number(0).build();
        assert!(matches!(result, Err(FinderError::BuilderError(_))));
    }

    #[test]
    fn test_build_with_key() {
        let finder = RecipeFinder::builder()
            .api_key("key")
            .detail_concurrency(2)
            .stale_policy(StalePolicy::DropStale)
            .build()
            .unwrap();
        assert_eq!(finder.controller().detail_concurrency(), 2);
        assert_eq!(finder.ui().policy(), StalePolicy::DropStale);
        assert!(finder.html().is_empty());
    }
}

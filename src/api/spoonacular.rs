use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::RecipeApi;
use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::model::{CandidateRecipe, RecipeDetails};
use crate::query::SearchQuery;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
    number: u32,
}

impl SpoonacularClient {
    /// Create a new client from configuration
    pub fn new(config: &FinderConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(config.timeout))
    }

    /// Create a client from configuration with a request timeout finer than
    /// the config file's whole seconds
    pub fn with_timeout(config: &FinderConfig, timeout: Duration) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or(FinderError::MissingApiKey)?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(SpoonacularClient {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            number: config.number,
        })
    }

    /// Create a client with the default endpoint and search size
    pub fn with_api_key(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularClient {
            client: Client::new(),
            api_key,
            base_url,
            number: 5,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {}{} {:?}", self.base_url, path, params);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(redact)?;

        let body = check_status(response)
            .await?
            .text()
            .await
            .map_err(redact)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Request URLs carry the API key; keep them out of error messages
fn redact(error: reqwest::Error) -> FinderError {
    FinderError::FetchError(error.without_url())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!("recipe API answered {}: {}", status, body);
    Err(FinderError::HttpStatus {
        status: status.as_u16(),
    })
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn find_by_ingredients(&self, query: &SearchQuery) -> Result<Vec<CandidateRecipe>> {
        let params = [
            ("ingredients", query.to_csv()),
            ("number", self.number.to_string()),
        ];

        // A `null` body is treated the same as an empty list
        let body: Value = self.get_json("/recipes/findByIngredients", &params).await?;
        if body.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(body)?)
    }

    async fn recipe_information(&self, id: u64) -> Result<RecipeDetails> {
        let params = [("includeNutrition", "false".to_string())];
        self.get_json(&format!("/recipes/{}/information", id), &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_find_by_ingredients() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes/findByIngredients")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ingredients".into(), "egg,milk".into()),
                Matcher::UrlEncoded("number".into(), "5".into()),
                Matcher::UrlEncoded("apiKey".into(), "fake_api_key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id": 7, "usedIngredients": [{"original": "1 egg"}], "missedIngredients": []}]"#,
            )
            .create_async()
            .await;

        let client = SpoonacularClient::with_base_url("fake_api_key".to_string(), server.url());
        let query = SearchQuery::parse("egg, milk").unwrap();

        let candidates = client.find_by_ingredients(&query).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_by_ingredients_null_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/recipes/findByIngredients")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;

        let client = SpoonacularClient::with_base_url("fake_api_key".to_string(), server.url());
        let query = SearchQuery::parse("egg").unwrap();

        assert!(client.find_by_ingredients(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_error_keeps_code() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/recipes/findByIngredients")
            .match_query(Matcher::Any)
            .with_status(402)
            .with_body(r#"{"status": "failure", "message": "daily points limit"}"#)
            .create_async()
            .await;

        let client = SpoonacularClient::with_base_url("fake_api_key".to_string(), server.url());
        let query = SearchQuery::parse("egg").unwrap();

        let err = client.find_by_ingredients(&query).await.unwrap_err();
        assert!(matches!(err, FinderError::HttpStatus { status: 402 }));
    }

    #[tokio::test]
    async fn test_recipe_information() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes/42/information")
            .match_query(Matcher::UrlEncoded(
                "includeNutrition".into(),
                "false".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "id": 42,
                    "title": "Omelette",
                    "readyInMinutes": 10,
                    "servings": 1,
                    "extendedIngredients": [{"original": "2 eggs"}],
                    "analyzedInstructions": [{"name": "", "steps": [{"number": 1, "step": "Beat the eggs."}]}]
                }"#,
            )
            .create_async()
            .await;

        let client = SpoonacularClient::with_base_url("fake_api_key".to_string(), server.url());

        let details = client.recipe_information(42).await.unwrap();
        assert_eq!(details.title, "Omelette");
        assert_eq!(details.steps()[0].step, "Beat the eggs.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recipe_information_bad_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/recipes/42/information")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = SpoonacularClient::with_base_url("fake_api_key".to_string(), server.url());

        let err = client.recipe_information(42).await.unwrap_err();
        assert!(matches!(err, FinderError::ParseError(_)));
    }

    #[test]
    fn test_missing_api_key() {
        let config = FinderConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        if std::env::var(crate::config::API_KEY_ENV).is_err() {
            assert!(matches!(
                SpoonacularClient::new(&config),
                Err(FinderError::MissingApiKey)
            ));
        }
    }
}

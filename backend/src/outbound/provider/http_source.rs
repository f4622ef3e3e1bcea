//! Reqwest-backed provider source adapter.
//!
//! This adapter owns transport details only: request construction, the API
//! credential, timeout and HTTP status mapping, and JSON decoding into
//! domain records. The credential travels as a query parameter and is never
//! logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::dto::{
    IngredientInformationDto, IngredientSearchResponseDto, RecipeInformationDto,
    RecipeSearchResponseDto,
};
use crate::domain::ports::{CatalogSource, CatalogSourceError};
use crate::domain::{
    ExternalId, Ingredient, IngredientSearch, IngredientSearchPage, Recipe, RecipeSearch,
    RecipeSearchPage,
};

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Connection settings for the provider source.
#[derive(Debug, Clone)]
pub struct ProviderHttpConfig {
    /// Base URL of the provider API.
    pub base_url: Url,
    /// Per-call API credential.
    pub api_key: String,
    /// End-to-end request timeout.
    pub timeout: Duration,
}

impl ProviderHttpConfig {
    /// Build a configuration with the default request timeout.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Provider source adapter performing HTTP GET requests against one endpoint.
pub struct ProviderHttpSource {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ProviderHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ProviderHttpConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogSourceError>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|error| CatalogSourceError::invalid_request(error.to_string()))?;

        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            CatalogSourceError::decode(format!("invalid provider JSON payload: {error}"))
        })
    }
}

#[async_trait]
impl CatalogSource for ProviderHttpSource {
    async fn fetch_ingredient(&self, id: ExternalId) -> Result<Ingredient, CatalogSourceError> {
        let dto: IngredientInformationDto = self
            .get_json(&format!("food/ingredients/{id}/information"), &[])
            .await?;
        Ok(dto.into())
    }

    async fn fetch_recipe(&self, id: ExternalId) -> Result<Recipe, CatalogSourceError> {
        let dto: RecipeInformationDto = self
            .get_json(&format!("recipes/{id}/information"), &[])
            .await?;
        Ok(dto.into())
    }

    async fn search_ingredients(
        &self,
        search: &IngredientSearch,
    ) -> Result<IngredientSearchPage, CatalogSourceError> {
        let dto: IngredientSearchResponseDto = self
            .get_json("food/ingredients/search", &ingredient_search_params(search))
            .await?;
        Ok(dto.into())
    }

    async fn search_recipes(
        &self,
        search: &RecipeSearch,
    ) -> Result<RecipeSearchPage, CatalogSourceError> {
        let dto: RecipeSearchResponseDto = self
            .get_json("recipes/complexSearch", &recipe_search_params(search))
            .await?;
        Ok(dto.into())
    }
}

fn ingredient_search_params(search: &IngredientSearch) -> Vec<(&'static str, String)> {
    vec![
        ("query", search.query().to_owned()),
        ("offset", search.offset().to_string()),
        ("number", search.limit().to_string()),
    ]
}

fn recipe_search_params(search: &RecipeSearch) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("query", search.query().to_owned()),
        ("offset", search.offset().to_string()),
        ("number", search.limit().to_string()),
    ];
    if let Some(diet) = search.diet() {
        params.push(("diet", diet.to_owned()));
    }
    if let Some(cuisine) = search.cuisine() {
        params.push(("cuisine", cuisine.to_owned()));
    }
    params
}

fn map_transport_error(error: reqwest::Error) -> CatalogSourceError {
    if error.is_timeout() {
        CatalogSourceError::timeout(error.to_string())
    } else {
        CatalogSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CatalogSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => CatalogSourceError::not_found(message),
        // 402 is the provider's quota-exhausted answer.
        StatusCode::PAYMENT_REQUIRED | StatusCode::TOO_MANY_REQUESTS => {
            CatalogSourceError::rate_limited(message)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CatalogSourceError::timeout(message)
        }
        _ if status.is_client_error() => CatalogSourceError::invalid_request(message),
        _ => CatalogSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

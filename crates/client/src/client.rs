//! Main client for the backend store.

use crate::api::EntityApi;
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{MealPlannerError, MealPlannerResult};
use crate::transport::HttpTransport;
use meal_planner_core::{Entity, Ingredient, Recipe};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for the json-server style store holding ingredients and recipes.
#[derive(Debug, Clone)]
pub struct MealPlannerClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl MealPlannerClient {
    /// Create a new client builder.
    pub fn builder() -> MealPlannerClientBuilder {
        MealPlannerClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> MealPlannerResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL of the backend store.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the API for any entity collection.
    pub fn entities<E: Entity>(&self) -> EntityApi<'_, E> {
        EntityApi::new(self)
    }

    /// Get the ingredients API.
    pub fn ingredients(&self) -> EntityApi<'_, Ingredient> {
        self.entities()
    }

    /// Get the recipes API.
    pub fn recipes(&self) -> EntityApi<'_, Recipe> {
        self.entities()
    }

    /// Add an ingredient to a recipe, see [`EntityApi::add_ingredient`].
    pub async fn add_ingredient_to_recipe(
        &self,
        recipe_id: &str,
        ingredient_id: &str,
        quantity: Option<f64>,
    ) -> MealPlannerResult<Recipe> {
        self.recipes()
            .add_ingredient(recipe_id, ingredient_id, quantity)
            .await
    }
}

/// Builder for creating a MealPlannerClient.
pub struct MealPlannerClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
}

impl MealPlannerClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the backend store.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> MealPlannerResult<MealPlannerClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| MealPlannerError::Config("base_url is required".to_string()))?;

        let base_url = Url::parse(&base_url_str)?;

        let config = ClientConfig {
            base_url,
            timeout: self.timeout,
        };

        MealPlannerClient::from_config(config)
    }
}

impl Default for MealPlannerClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

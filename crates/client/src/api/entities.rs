//! Entity collection endpoints (`/ingredients`, `/recipes`).

use crate::client::MealPlannerClient;
use crate::error::{MealPlannerError, MealPlannerResult};
use meal_planner_core::schema::parse_list;
use meal_planner_core::{Entity, EntityPatch, Recipe, RecipeIngredient, RecipePatch, Schema};
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, info};

/// API for one backend collection.
pub struct EntityApi<'a, E> {
    client: &'a MealPlannerClient,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> EntityApi<'a, E> {
    pub(crate) fn new(client: &'a MealPlannerClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn collection(&self) -> &'static str {
        E::KIND.collection()
    }

    fn validate<T: Schema>(value: &Value) -> MealPlannerResult<T> {
        T::parse(value).map_err(|source| MealPlannerError::BackendValidation {
            kind: E::KIND,
            source,
        })
    }

    /// Get an entity by id; `None` when the backend reports it absent.
    pub async fn get(&self, id: &str) -> MealPlannerResult<Option<E>> {
        match self.client.http.get_optional(&[self.collection(), id]).await? {
            Some(value) => Self::validate(&value).map(Some),
            None => Ok(None),
        }
    }

    /// Get an entity by id, failing with `NotFound` when absent.
    pub async fn require(&self, id: &str) -> MealPlannerResult<E> {
        self.get(id)
            .await?
            .ok_or_else(|| MealPlannerError::not_found(E::KIND, id))
    }

    /// List every entity in the collection, in backend order.
    pub async fn list(&self) -> MealPlannerResult<Vec<E>> {
        let value = self.client.http.get(&[self.collection()]).await?;
        parse_list(&value).map_err(|source| MealPlannerError::BackendValidation {
            kind: E::KIND,
            source,
        })
    }

    /// Store a new entity.
    ///
    /// Fails with `DuplicateId` if the id is already taken. The existence check and
    /// the create are separate requests; a concurrent add of the same id can slip
    /// between them.
    pub async fn add(&self, entity: &E) -> MealPlannerResult<E> {
        if self.get(entity.id()).await?.is_some() {
            return Err(MealPlannerError::DuplicateId {
                kind: E::KIND,
                id: entity.id().to_string(),
            });
        }

        let value = self.client.http.post(&[self.collection()], entity).await?;
        let stored = Self::validate(&value)?;
        info!(kind = %E::KIND, id = %entity.id(), "Entity added");
        Ok(stored)
    }

    /// Delete an entity by id, returning whatever the backend answers.
    pub async fn delete(&self, id: &str) -> MealPlannerResult<Value> {
        let value = self.client.http.delete(&[self.collection(), id]).await?;
        info!(kind = %E::KIND, id = %id, "Entity deleted");
        Ok(value)
    }

    /// Merge-patch an entity: only the fields present in `patch` are sent.
    pub async fn update(&self, patch: &E::Patch) -> MealPlannerResult<Value> {
        let value = self
            .client
            .http
            .patch(&[self.collection(), patch.id()], patch)
            .await?;
        info!(kind = %E::KIND, id = %patch.id(), "Entity updated");
        Ok(value)
    }
}

impl EntityApi<'_, Recipe> {
    /// Append an ingredient to a recipe's ingredient list.
    ///
    /// A no-op returning the stored recipe when the ingredient is already listed.
    /// The recipe must exist; nothing is written otherwise.
    pub async fn add_ingredient(
        &self,
        recipe_id: &str,
        ingredient_id: &str,
        quantity: Option<f64>,
    ) -> MealPlannerResult<Recipe> {
        let recipe = self.require(recipe_id).await?;

        if recipe.contains_ingredient(ingredient_id) {
            debug!(recipe_id, ingredient_id, "Ingredient already in recipe");
            return Ok(recipe);
        }

        let mut ingredients = recipe.ingredients;
        ingredients.push(RecipeIngredient::new(ingredient_id, quantity));

        let value = self
            .client
            .http
            .patch(
                &[self.collection(), recipe_id],
                &RecipePatch::ingredients(recipe_id, ingredients),
            )
            .await?;
        info!(recipe_id, ingredient_id, "Ingredient added to recipe");
        Self::validate(&value)
    }
}

// add-ingredient-to-recipe

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{Tool, ToolTier};
use anyhow::Result;
use meal_planner_client::MealPlannerClient;
use meal_planner_core::schema::{json_schema_number, json_schema_object, json_schema_string};
use meal_planner_core::{RecipeEnvelope, Schema};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIngredientToRecipeArgs {
    pub recipe_id: String,
    pub ingredient_id: String,
    pub quantity: Option<f64>,
}

impl Schema for AddIngredientToRecipeArgs {
    const NAME: &'static str = "AddIngredientToRecipeArgs";

    fn json_schema() -> Value {
        json_schema_object(
            json!({
                "recipeId": json_schema_string("Id of the recipe to extend"),
                "ingredientId": json_schema_string("Id of the ingredient to add"),
                "quantity": json_schema_number("Amount of the ingredient, in its unit")
            }),
            vec!["recipeId", "ingredientId"],
        )
    }
}

/// Append an ingredient to a recipe; a no-op when it is already listed
pub struct AddIngredientToRecipeTool {
    client: Arc<MealPlannerClient>,
}

impl AddIngredientToRecipeTool {
    pub fn new(client: Arc<MealPlannerClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for AddIngredientToRecipeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "add-ingredient-to-recipe".to_string(),
            title: Some("Add Ingredient to Recipe Tool".to_string()),
            description: "Add an ingredient to a recipe".to_string(),
            input_schema: AddIngredientToRecipeArgs::json_schema(),
            output_schema: Some(RecipeEnvelope::json_schema()),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = AddIngredientToRecipeArgs::parse(&arguments)?;

        let recipe = self
            .client
            .add_ingredient_to_recipe(&args.recipe_id, &args.ingredient_id, args.quantity)
            .await?;

        Ok(CallToolResult::structured(
            "Ingredient added to recipe successfully",
            serde_json::to_value(RecipeEnvelope { recipe })?,
        ))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Write
    }
}

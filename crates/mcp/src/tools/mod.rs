pub mod entities;
pub mod recipe_ingredients;
mod registry;

pub use entities::{AddEntityTool, DeleteEntityTool, EntityIdArgs, ListEntitiesTool, UpdateEntityTool};
pub use recipe_ingredients::{AddIngredientToRecipeArgs, AddIngredientToRecipeTool};
pub use registry::{Tool, ToolRegistry, ToolTier};

use meal_planner_client::MealPlannerClient;
use meal_planner_core::{Entity, Ingredient, Recipe};
use std::sync::Arc;

fn register_crud<E: Entity>(registry: &mut ToolRegistry, client: &Arc<MealPlannerClient>) {
    registry.register(Arc::new(ListEntitiesTool::<E>::new(client.clone())));
    registry.register(Arc::new(AddEntityTool::<E>::new(client.clone())));
    registry.register(Arc::new(DeleteEntityTool::<E>::new(client.clone())));
    registry.register(Arc::new(UpdateEntityTool::<E>::new(client.clone())));
}

/// Registry holding every meal planner tool
pub fn meal_planner_tools(client: Arc<MealPlannerClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_crud::<Ingredient>(&mut registry, &client);
    register_crud::<Recipe>(&mut registry, &client);
    registry.register(Arc::new(AddIngredientToRecipeTool::new(client)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tools_registered_in_order() {
        let client = MealPlannerClient::builder()
            .base_url("http://localhost:3001")
            .build()
            .unwrap();
        let registry = meal_planner_tools(Arc::new(client));

        let names: Vec<_> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "list-ingredients",
                "add-ingredient",
                "delete-ingredient",
                "update-ingredient",
                "list-recipes",
                "add-recipe",
                "delete-recipe",
                "update-recipe",
                "add-ingredient-to-recipe",
            ]
        );
    }
}

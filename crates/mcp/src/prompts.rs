// Prompt directory

use crate::completion::Suggester;
use crate::error::{DirectoryError, DirectoryResult};
use crate::protocol::{Completion, Content, GetPromptResult, Prompt, PromptArgument, PromptMessage, Role};
use meal_planner_client::MealPlannerClient;
use meal_planner_core::EntityKind;
use std::collections::HashMap;
use std::sync::Arc;

pub const SUGGEST_INGREDIENTS: &str = "suggest-ingredients";
const RECIPE_ID: &str = "recipeId";

/// Prompts published by the server
pub struct PromptDirectory {
    client: Arc<MealPlannerClient>,
    suggester: Suggester,
}

impl PromptDirectory {
    pub fn new(client: Arc<MealPlannerClient>, suggester: Suggester) -> Self {
        Self { client, suggester }
    }

    pub fn list(&self) -> Vec<Prompt> {
        vec![Prompt {
            name: SUGGEST_INGREDIENTS.to_string(),
            title: Some("Suggest Ingredients".to_string()),
            description: Some("Suggest ingredients for a recipe".to_string()),
            arguments: vec![PromptArgument {
                name: RECIPE_ID.to_string(),
                description: Some("The ID of the recipe to suggest ingredients for".to_string()),
                required: true,
            }],
        }]
    }

    pub async fn get(
        &self,
        name: &str,
        arguments: &HashMap<String, String>,
    ) -> DirectoryResult<GetPromptResult> {
        if name != SUGGEST_INGREDIENTS {
            return Err(DirectoryError::UnknownPrompt(name.to_string()));
        }

        let recipe_id = arguments
            .get(RECIPE_ID)
            .ok_or_else(|| DirectoryError::MissingArgument(RECIPE_ID.to_string()))?;
        let recipe = self.client.recipes().require(recipe_id).await?;
        let recipe_json = serde_json::to_string(&recipe)?;

        let text = format!(
            "Here is my recipe with ID \"{recipe_id}\": {recipe_json}.\n\
             Please suggest some ingredients to add to it. Feel free to suggest new ingredients I don't have yet.\n\
             Use \"list-ingredients\" tool to get the list of ingredients I have available.\n\
             For each ingredient I approve, if it does not yet exist, create it with the MealPlanner \"add-ingredient\" tool. \
             Then add approved ingredients to the recipe with the MealPlanner \"add-ingredient-to-recipe\" tool."
        );

        Ok(GetPromptResult {
            description: Some("Suggest ingredients for a recipe".to_string()),
            messages: vec![PromptMessage {
                role: Role::User,
                content: Content::text(text),
            }],
        })
    }

    /// Complete a prompt argument. Only `recipeId` has suggestions.
    pub async fn complete(&self, name: &str, argument: &str, partial: &str) -> DirectoryResult<Completion> {
        if name != SUGGEST_INGREDIENTS {
            return Err(DirectoryError::UnknownPrompt(name.to_string()));
        }
        if argument != RECIPE_ID {
            return Ok(Completion::default());
        }

        Ok(self.suggester.complete(EntityKind::Recipe, partial).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal_planner_client::testing::FakeJsonServer;
    use serde_json::json;

    async fn directory(backend: &FakeJsonServer) -> (PromptDirectory, wiremock::MockServer) {
        let server = backend.start().await;
        let client = Arc::new(
            MealPlannerClient::builder()
                .base_url(server.uri())
                .build()
                .unwrap(),
        );
        (PromptDirectory::new(client.clone(), Suggester::new(client)), server)
    }

    fn cookbook() -> FakeJsonServer {
        FakeJsonServer::new().with_collection(
            "recipes",
            vec![
                json!({ "id": "pancakes", "name": "Pancakes", "ingredients": [{ "id": "flour", "quantity": 200 }] }),
                json!({ "id": "omelette", "name": "Omelette", "ingredients": [] }),
            ],
        )
    }

    fn args(recipe_id: &str) -> HashMap<String, String> {
        HashMap::from([(RECIPE_ID.to_string(), recipe_id.to_string())])
    }

    #[tokio::test]
    async fn test_get_embeds_recipe_and_tool_names() {
        let backend = cookbook();
        let (directory, _server) = directory(&backend).await;

        let result = directory.get(SUGGEST_INGREDIENTS, &args("pancakes")).await.unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].role, Role::User);

        let text = result.messages[0].content.as_text();
        assert!(text.starts_with("Here is my recipe with ID \"pancakes\": {\"id\":\"pancakes\""));
        assert!(text.contains("\"list-ingredients\""));
        assert!(text.contains("\"add-ingredient\""));
        assert!(text.contains("\"add-ingredient-to-recipe\""));
    }

    #[tokio::test]
    async fn test_get_does_not_mutate() {
        let backend = cookbook();
        let (directory, _server) = directory(&backend).await;

        directory.get(SUGGEST_INGREDIENTS, &args("pancakes")).await.unwrap();
        assert_eq!(backend.items("recipes"), cookbook().items("recipes"));
    }

    #[tokio::test]
    async fn test_get_missing_recipe() {
        let backend = cookbook();
        let (directory, _server) = directory(&backend).await;

        let err = directory.get(SUGGEST_INGREDIENTS, &args("waffles")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("waffles"));

        let err = directory.get(SUGGEST_INGREDIENTS, &HashMap::new()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::MissingArgument(_)));
    }

    #[tokio::test]
    async fn test_unknown_prompt() {
        let backend = cookbook();
        let (directory, _server) = directory(&backend).await;

        let err = directory.get("plan-week", &HashMap::new()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::UnknownPrompt(_)));
    }

    #[tokio::test]
    async fn test_complete_recipe_id() {
        let backend = cookbook();
        let (directory, _server) = directory(&backend).await;

        let completion = directory
            .complete(SUGGEST_INGREDIENTS, RECIPE_ID, "om")
            .await
            .unwrap();
        assert_eq!(completion.values, vec!["omelette"]);
    }
}

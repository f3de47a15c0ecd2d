// CRUD tools shared by every entity collection

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{Tool, ToolTier};
use anyhow::Result;
use meal_planner_client::MealPlannerClient;
use meal_planner_core::schema::{json_schema_object, json_schema_string};
use meal_planner_core::{Entity, EntityKind, EntityList, Schema};
use serde::Deserialize;
use serde_json::{json, Value};
use std::marker::PhantomData;
use std::sync::Arc;

fn with_article(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Ingredient => "an ingredient",
        EntityKind::Recipe => "a recipe",
    }
}

fn any_object() -> Value {
    json!({ "type": "object", "additionalProperties": true })
}

/// Wrap a raw backend answer as structured content, which must be an object.
fn raw_result(summary: String, response: Value) -> CallToolResult {
    let payload = if response.is_object() {
        response
    } else {
        json!({ "response": response })
    };
    CallToolResult::structured(summary, payload)
}

/// `{ "id": ... }` arguments of the delete tools
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityIdArgs {
    pub id: String,
}

impl Schema for EntityIdArgs {
    const NAME: &'static str = "EntityIdArgs";

    fn json_schema() -> Value {
        json_schema_object(json!({ "id": json_schema_string("Id of the record") }), vec!["id"])
    }
}

/// `list-ingredients` / `list-recipes`
pub struct ListEntitiesTool<E> {
    client: Arc<MealPlannerClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> ListEntitiesTool<E> {
    pub fn new(client: Arc<MealPlannerClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<E: Entity> Tool for ListEntitiesTool<E> {
    fn schema(&self) -> ToolSchema {
        let kind = E::KIND;
        ToolSchema {
            name: format!("list-{}", kind.collection()),
            title: Some(format!("List {}s Tool", kind.label())),
            description: format!("List all {} in the database", kind.collection()),
            input_schema: json_schema_object(json!({}), vec![]),
            output_schema: Some(EntityList::<E>::json_schema()),
            annotations: None,
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let items = self.client.entities::<E>().list().await?;
        let payload = serde_json::to_value(EntityList::new(items))?;

        Ok(CallToolResult::structured(
            format!("Here are the {} in the database:", E::KIND.collection()),
            payload,
        ))
    }
}

/// `add-ingredient` / `add-recipe`
pub struct AddEntityTool<E> {
    client: Arc<MealPlannerClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> AddEntityTool<E> {
    pub fn new(client: Arc<MealPlannerClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<E: Entity> Tool for AddEntityTool<E> {
    fn schema(&self) -> ToolSchema {
        let kind = E::KIND;
        ToolSchema {
            name: format!("add-{}", kind.singular()),
            title: Some(format!("Add {} Tool", kind.label())),
            description: format!("Add {} to the database", with_article(kind)),
            input_schema: E::json_schema(),
            output_schema: Some(E::json_schema()),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let entity = E::parse(&arguments)?;
        let stored = self.client.entities::<E>().add(&entity).await?;

        Ok(CallToolResult::structured(
            format!("{} added successfully", E::KIND.label()),
            serde_json::to_value(&stored)?,
        ))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Write
    }
}

/// `delete-ingredient` / `delete-recipe`
pub struct DeleteEntityTool<E> {
    client: Arc<MealPlannerClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DeleteEntityTool<E> {
    pub fn new(client: Arc<MealPlannerClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<E: Entity> Tool for DeleteEntityTool<E> {
    fn schema(&self) -> ToolSchema {
        let kind = E::KIND;
        ToolSchema {
            name: format!("delete-{}", kind.singular()),
            title: Some(format!("Delete {} Tool", kind.label())),
            description: format!("Delete {} from the database", with_article(kind)),
            input_schema: EntityIdArgs::json_schema(),
            output_schema: Some(any_object()),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = EntityIdArgs::parse(&arguments)?;
        let response = self.client.entities::<E>().delete(&args.id).await?;

        Ok(raw_result(
            format!("{} deleted successfully", E::KIND.label()),
            response,
        ))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Destructive
    }
}

/// `update-ingredient` / `update-recipe`
pub struct UpdateEntityTool<E> {
    client: Arc<MealPlannerClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> UpdateEntityTool<E> {
    pub fn new(client: Arc<MealPlannerClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<E: Entity> Tool for UpdateEntityTool<E> {
    fn schema(&self) -> ToolSchema {
        let kind = E::KIND;
        ToolSchema {
            name: format!("update-{}", kind.singular()),
            title: Some(format!("Update {} Tool", kind.label())),
            description: format!("Update {} in the database", with_article(kind)),
            input_schema: <E::Patch as Schema>::json_schema(),
            output_schema: Some(any_object()),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let patch = <E::Patch as Schema>::parse(&arguments)?;
        let response = self.client.entities::<E>().update(&patch).await?;

        Ok(raw_result(
            format!("{} updated successfully", E::KIND.label()),
            response,
        ))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Write
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal_planner_client::testing::FakeJsonServer;
    use meal_planner_core::{Ingredient, Recipe, SchemaValidationError};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Arc<MealPlannerClient> {
        Arc::new(
            MealPlannerClient::builder()
                .base_url(server.uri())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_tool_names_and_titles() {
        let server_uri = "http://localhost:3001";
        let client = Arc::new(MealPlannerClient::builder().base_url(server_uri).build().unwrap());

        let schema = ListEntitiesTool::<Ingredient>::new(client.clone()).schema();
        assert_eq!(schema.name, "list-ingredients");
        assert_eq!(schema.title.as_deref(), Some("List Ingredients Tool"));
        assert_eq!(schema.description, "List all ingredients in the database");

        let schema = AddEntityTool::<Recipe>::new(client.clone()).schema();
        assert_eq!(schema.name, "add-recipe");
        assert_eq!(schema.description, "Add a recipe to the database");

        let schema = DeleteEntityTool::<Ingredient>::new(client.clone()).schema();
        assert_eq!(schema.name, "delete-ingredient");
        assert_eq!(schema.description, "Delete an ingredient from the database");

        let schema = UpdateEntityTool::<Recipe>::new(client).schema();
        assert_eq!(schema.name, "update-recipe");
        assert_eq!(schema.title.as_deref(), Some("Update Recipe Tool"));
    }

    #[tokio::test]
    async fn test_list_wraps_items() {
        let backend = FakeJsonServer::new().with_collection(
            "ingredients",
            vec![json!({ "id": "egg", "name": "Egg", "unit": "pcs" })],
        );
        let server = backend.start().await;
        let tool = ListEntitiesTool::<Ingredient>::new(client_for(&server));

        let result = tool.execute(json!({})).await.unwrap();
        assert_eq!(
            result.structured_content,
            Some(json!({ "ingredients": [{ "id": "egg", "name": "Egg", "unit": "pcs" }] }))
        );
        assert_eq!(result.content[0].as_text(), "Here are the ingredients in the database:");
    }

    #[tokio::test]
    async fn test_add_rejects_bad_unit_before_backend() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        let tool = AddEntityTool::<Ingredient>::new(client_for(&server));

        let err = tool
            .execute(json!({ "id": "egg", "name": "Egg", "unit": "lb" }))
            .await
            .unwrap_err();
        let validation = err.downcast_ref::<SchemaValidationError>().unwrap();
        assert_eq!(validation.path, "unit");
    }

    #[tokio::test]
    async fn test_add_reports_duplicate_as_handler_error() {
        let backend = FakeJsonServer::new().with_collection(
            "ingredients",
            vec![json!({ "id": "egg", "name": "Egg", "unit": "pcs" })],
        );
        let server = backend.start().await;
        let tool = AddEntityTool::<Ingredient>::new(client_for(&server));

        let err = tool
            .execute(json!({ "id": "egg", "name": "Duck Egg", "unit": "pcs" }))
            .await
            .unwrap_err();
        assert!(!err.is::<SchemaValidationError>());
        assert_eq!(err.to_string(), "Ingredient with id egg already exists");
    }

    #[tokio::test]
    async fn test_update_returns_backend_response() {
        let backend = FakeJsonServer::new().with_collection(
            "ingredients",
            vec![json!({ "id": "x", "name": "Flour", "unit": "g" })],
        );
        let server = backend.start().await;
        let tool = UpdateEntityTool::<Ingredient>::new(client_for(&server));

        let result = tool
            .execute(json!({ "id": "x", "name": "Wheat Flour" }))
            .await
            .unwrap();
        assert_eq!(
            result.structured_content,
            Some(json!({ "id": "x", "name": "Wheat Flour", "unit": "g" }))
        );
        assert_eq!(result.content[0].as_text(), "Ingredient updated successfully");
    }

    #[tokio::test]
    async fn test_delete_wraps_non_object_response() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/recipes/cake"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let tool = DeleteEntityTool::<Recipe>::new(client_for(&server));

        let result = tool.execute(json!({ "id": "cake" })).await.unwrap();
        assert_eq!(result.structured_content, Some(json!({ "response": null })));
        assert_eq!(result.content[0].as_text(), "Recipe deleted successfully");
    }

    #[tokio::test]
    async fn test_list_surfaces_backend_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let tool = ListEntitiesTool::<Recipe>::new(client_for(&server));

        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(!err.is::<SchemaValidationError>());
        assert_eq!(err.to_string(), "backend error (status 503): empty response");
    }

    #[test]
    fn test_id_args_require_string() {
        let err = EntityIdArgs::parse(&json!({ "id": 3 })).unwrap_err();
        assert_eq!(err.path, "id");
    }
}

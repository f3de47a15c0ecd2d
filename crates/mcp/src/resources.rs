// Resource directory: collection listings and single-entity templates

use crate::completion::Suggester;
use crate::error::{DirectoryError, DirectoryResult};
use crate::protocol::{Completion, ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use crate::uri_template::UriTemplate;
use meal_planner_client::MealPlannerClient;
use meal_planner_core::{Entity, EntityKind, Ingredient, Recipe};
use std::collections::HashMap;
use std::sync::Arc;

pub const URI_SCHEME: &str = "meal-planner://";
pub const MIME_JSON: &str = "application/json";

/// Name of the single placeholder in every item template
const ID_VARIABLE: &str = "id";

fn collection_uri(kind: EntityKind) -> String {
    format!("{}{}", URI_SCHEME, kind.collection())
}

fn collection_description(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Ingredient => "All ingredients currently in the database",
        EntityKind::Recipe => "All recipes in the database",
    }
}

fn item_description(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Ingredient => "An ingredient in the database",
        EntityKind::Recipe => "A recipe in the database",
    }
}

fn json_contents(uri: &str, text: String) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContents {
            uri: uri.to_string(),
            mime_type: MIME_JSON.to_string(),
            text,
        }],
    }
}

struct ItemTemplate {
    kind: EntityKind,
    template: UriTemplate,
}

/// Resources published by the server.
///
/// Each entity kind has a fixed collection URI and an `{id}` template. Templates are
/// enumerated into concrete resources on `resources/list`.
pub struct ResourceDirectory {
    client: Arc<MealPlannerClient>,
    suggester: Suggester,
    templates: Vec<ItemTemplate>,
}

impl ResourceDirectory {
    pub fn new(client: Arc<MealPlannerClient>, suggester: Suggester) -> Self {
        let templates = EntityKind::ALL
            .into_iter()
            .map(|kind| ItemTemplate {
                kind,
                template: UriTemplate::new(format!("{}/{{{}}}", collection_uri(kind), ID_VARIABLE)),
            })
            .collect();

        Self {
            client,
            suggester,
            templates,
        }
    }

    fn static_resources(&self) -> impl Iterator<Item = Resource> {
        EntityKind::ALL.into_iter().map(|kind| Resource {
            uri: collection_uri(kind),
            name: kind.collection().to_string(),
            title: Some(format!("{}s", kind.label())),
            description: Some(collection_description(kind).to_string()),
            mime_type: Some(MIME_JSON.to_string()),
        })
    }

    async fn enumerate<E: Entity>(&self, template: &UriTemplate) -> DirectoryResult<Vec<Resource>> {
        let entities = self.client.entities::<E>().list().await?;

        Ok(entities
            .iter()
            .map(|entity| Resource {
                uri: template.expand(&HashMap::from([(ID_VARIABLE, entity.id())])),
                name: entity.name().to_string(),
                title: Some(entity.name().to_string()),
                description: None,
                mime_type: Some(MIME_JSON.to_string()),
            })
            .collect())
    }

    /// Static resources followed by one resource per stored entity
    pub async fn list(&self) -> DirectoryResult<Vec<Resource>> {
        let mut resources: Vec<Resource> = self.static_resources().collect();

        for item in &self.templates {
            let enumerated = match item.kind {
                EntityKind::Ingredient => self.enumerate::<Ingredient>(&item.template).await?,
                EntityKind::Recipe => self.enumerate::<Recipe>(&item.template).await?,
            };
            resources.extend(enumerated);
        }

        Ok(resources)
    }

    pub fn templates(&self) -> Vec<ResourceTemplate> {
        self.templates
            .iter()
            .map(|item| ResourceTemplate {
                uri_template: item.template.as_str().to_string(),
                name: item.kind.singular().to_string(),
                title: Some(item.kind.label().to_string()),
                description: Some(item_description(item.kind).to_string()),
                mime_type: Some(MIME_JSON.to_string()),
            })
            .collect()
    }

    async fn read_collection<E: Entity>(&self) -> DirectoryResult<String> {
        let entities = self.client.entities::<E>().list().await?;
        Ok(serde_json::to_string(&entities)?)
    }

    async fn read_entity<E: Entity>(&self, id: &str) -> DirectoryResult<String> {
        let entity = self.client.entities::<E>().require(id).await?;
        Ok(serde_json::to_string(&entity)?)
    }

    /// Read a collection or a single entity as JSON text.
    pub async fn read(&self, uri: &str) -> DirectoryResult<ReadResourceResult> {
        if let Some(kind) = EntityKind::ALL.into_iter().find(|kind| collection_uri(*kind) == uri) {
            let text = match kind {
                EntityKind::Ingredient => self.read_collection::<Ingredient>().await?,
                EntityKind::Recipe => self.read_collection::<Recipe>().await?,
            };
            return Ok(json_contents(uri, text));
        }

        for item in &self.templates {
            let Some(values) = item.template.matches(uri) else {
                continue;
            };
            let id = values.get(ID_VARIABLE).map(String::as_str).unwrap_or_default();
            let text = match item.kind {
                EntityKind::Ingredient => self.read_entity::<Ingredient>(id).await?,
                EntityKind::Recipe => self.read_entity::<Recipe>(id).await?,
            };
            return Ok(json_contents(uri, text));
        }

        Err(DirectoryError::UnknownResource(uri.to_string()))
    }

    /// Complete a template placeholder. Only `id` has suggestions.
    pub async fn complete(
        &self,
        uri_template: &str,
        argument: &str,
        partial: &str,
    ) -> DirectoryResult<Completion> {
        let item = self
            .templates
            .iter()
            .find(|item| item.template.as_str() == uri_template)
            .ok_or_else(|| DirectoryError::UnknownResource(uri_template.to_string()))?;

        if argument != ID_VARIABLE {
            return Ok(Completion::default());
        }

        Ok(self.suggester.complete(item.kind, partial).await?)
    }
}

// Id suggestions shared by resource templates and prompt arguments

use crate::protocol::Completion;
use meal_planner_client::{MealPlannerClient, MealPlannerResult};
use meal_planner_core::{Entity, EntityKind};
use std::sync::Arc;

/// Most values a single completion response may carry
pub const MAX_COMPLETION_VALUES: usize = 100;

/// Suggests entity ids for partially typed arguments
#[derive(Clone)]
pub struct Suggester {
    client: Arc<MealPlannerClient>,
}

impl Suggester {
    pub fn new(client: Arc<MealPlannerClient>) -> Self {
        Self { client }
    }

    /// Ids of `kind` containing `partial` (case-sensitive), in backend order.
    pub async fn suggest(&self, kind: EntityKind, partial: &str) -> MealPlannerResult<Vec<String>> {
        let ids = match kind {
            EntityKind::Ingredient => ids_of(self.client.ingredients().list().await?),
            EntityKind::Recipe => ids_of(self.client.recipes().list().await?),
        };

        Ok(ids.into_iter().filter(|id| id.contains(partial)).collect())
    }

    /// Suggestions shaped as a protocol completion
    pub async fn complete(&self, kind: EntityKind, partial: &str) -> MealPlannerResult<Completion> {
        let values = self.suggest(kind, partial).await?;
        tracing::debug!(kind = %kind, partial, matches = values.len(), "Completed id");
        Ok(truncate(values))
    }
}

fn ids_of<E: Entity>(entities: Vec<E>) -> Vec<String> {
    entities.iter().map(|e| e.id().to_string()).collect()
}

fn truncate(mut values: Vec<String>) -> Completion {
    let total = values.len();
    values.truncate(MAX_COMPLETION_VALUES);
    Completion {
        values,
        total: Some(total),
        has_more: total > MAX_COMPLETION_VALUES,
    }
}

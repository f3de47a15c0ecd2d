//! # Meal Planner Client
//!
//! Async client for the json-server style store that holds the meal planner's
//! ingredients and recipes. Every response is validated against the domain schema
//! before it is handed back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meal_planner_client::{MealPlannerClient, MealPlannerResult};
//! use meal_planner_core::{Ingredient, Unit};
//!
//! #[tokio::main]
//! async fn main() -> MealPlannerResult<()> {
//!     let client = MealPlannerClient::builder()
//!         .base_url("http://localhost:3001")
//!         .build()?;
//!
//!     client
//!         .ingredients()
//!         .add(&Ingredient::new("egg", "Egg", Unit::Piece))
//!         .await?;
//!
//!     let recipe = client.add_ingredient_to_recipe("pancakes", "egg", Some(2.0)).await?;
//!     println!("{} now has {} ingredients", recipe.name, recipe.ingredients.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export main client
pub use api::EntityApi;
pub use client::{MealPlannerClient, MealPlannerClientBuilder};
pub use config::ClientConfig;
pub use error::{MealPlannerError, MealPlannerResult};

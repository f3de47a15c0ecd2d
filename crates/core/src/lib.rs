// Domain schema for the meal planner: ingredients, recipes and their JSON schemas

pub mod schema;
pub mod types;

pub use schema::{Schema, SchemaValidationError};
pub use types::*;

//! API endpoints for the backend collections.

mod entities;

pub use entities::EntityApi;

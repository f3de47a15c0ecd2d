// MCP (Model Context Protocol) adapter exposing the meal planner backend
// as tools, resources and prompts to agent clients

pub mod completion;
pub mod error;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod session;
pub mod stdio;
pub mod tools;
pub mod uri_template;

pub use completion::Suggester;
pub use error::{DirectoryError, DirectoryResult};
pub use server::McpServer;
pub use session::McpSession;

//! Transport layer for the backend client.

pub mod http;

pub use http::HttpTransport;

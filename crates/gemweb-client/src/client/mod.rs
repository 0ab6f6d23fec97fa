//! Gemini web client.
//!
//! Composes the authenticator, uploader, envelope encoder and response
//! decoder behind `initialize` and `generate`.

mod api;
mod config;
mod web_client;


pub use config::{ClientConfig, Endpoints};
pub use web_client::GeminiWebClient;

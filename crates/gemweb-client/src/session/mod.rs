//! Per-conversation continuation state.
//!
//! A `ChatSession` holds the last triple the server issued and swaps it
//! wholesale after every successful turn.

mod chat;
mod manager;
mod types;


pub use manager::ChatSession;

// Public library interface for integration tests and embedding.
pub mod app;
pub mod color;
pub mod config;
pub mod events;
pub mod host;
pub mod hover;
pub mod input;
pub mod runtime;
pub mod trace;
pub mod ui;

//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - HTTP server setup (server)
//! - Configuration loading (config)
//! - Repository implementations (repositories)
//! - Application state (state)

pub mod config;
pub mod repositories;
pub mod server;
pub mod state;

pub use config::Config;
pub use repositories::*;
pub use state::AppState;

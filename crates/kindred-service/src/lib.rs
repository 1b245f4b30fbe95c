//! Command and query handlers for Kindred family trees.
//!
//! [`TreeService`] wraps the [`GenealogyGraph`](kindred_graph::GenealogyGraph)
//! aggregate with a [`TreeRepository`](kindred_store::TreeRepository). It
//! owns no tree state between calls: each command reloads the tree, applies
//! one operation, and saves under an optimistic version check.
//!
//! # Modules
//!
//! - [`service`] -- [`TreeService`] commands, queries, and conflict retry
//! - [`import`] -- Batch import rows and the per-row failure report
//! - [`config`] -- YAML configuration ([`KindredConfig`])
//! - [`logging`] -- `tracing-subscriber` bootstrap
//! - [`error`] -- [`ServiceError`]

pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod service;

// Re-export primary types for convenience.
pub use config::{ConfigError, KindredConfig, LoggingConfig, ServiceConfig};
pub use error::ServiceError;
pub use import::{ImportFailure, ImportReport, ImportRow};
pub use logging::init_logging;
pub use service::TreeService;

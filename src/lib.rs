//! # Media Store - Image Upload Service
//!
//! Stores base64 uploaded images on the local filesystem, keeps one database
//! record per image and serves the image list through a read-through cache.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Media records, ids, data URI payloads, blob names
//! - **Application**: Use cases, ports (interfaces) and the TTL cache
//! - **Infrastructure**: Filesystem blob store, Postgres and in-memory repositories
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use media_store::{api::create_router, application::builder::ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_repository()
//!     .await?
//!     .with_infrastructure()
//!     .await?
//!     .build()?;
//! let app = create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{cache, dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};

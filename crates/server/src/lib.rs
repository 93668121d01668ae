//! HTTP REST API for navcompat vehicle compatibility lookups.
//!
//! Exposes the catalog and the compatibility matcher as JSON endpoints for
//! the storefront frontend, plus the usual liveness, readiness and Prometheus
//! probes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (checks the catalog)
//! - `GET /metrics` - Prometheus metrics
//! - `GET /api/brands` - Brands with active products
//! - `GET /api/brands/{brand}` - Active products of a brand
//! - `GET /api/brands/{brand}/{model}` - Products compatible with a vehicle
//! - `GET /api/products/{slug}` - Product detail

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, install_metrics, start_server};
pub use state::ServerState;

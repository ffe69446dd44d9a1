//! HTTP service for the quantum algorithm demos and the visitor opinion board.
//!
//! Every demo can be described, run and compared against its classical
//! reference; runs store circuit diagrams, histograms and Bloch plots in the
//! configured artifact sink, served back under `/results`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qalgo_web::{AppConfig, AppState, create_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let bind_addr = config.bind_addr()?;
//!     let state = Arc::new(AppState::from_config(config)?);
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind(bind_addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use dto::{AlgorithmSummary, HealthResponse, JsonOrForm, PageAction, PageRequest, PageResponse};
pub use error::ApiError;
pub use server::create_router;
pub use state::AppState;

//! # Day Tracker Server
//!
//! Backend for a personal time tracker. Every calendar date owns one JSON
//! record of time blocks, a day plan and custom categories.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, static shell)
//!     ↓
//! Domain Layer (DayRecordService, summaries)
//!     ↓
//! Storage Layer (file or libSQL backend)
//! ```
//!
//! The storage backend is picked once from the environment and injected into
//! the service; the service is injected into the router through [`AppState`].

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::Result;
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::domain::DayRecordService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub day_record_service: DayRecordService,
}

impl AppState {
    pub fn new(day_record_service: DayRecordService) -> Self {
        Self { day_record_service }
    }
}

/// Open the configured storage backend and build the services on top of it
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up storage ({})", config.storage.describe());
    let storage = storage::open_storage(&config.storage).await?;

    info!("Setting up domain model");
    let day_record_service = DayRecordService::new(storage);

    Ok(AppState::new(day_record_service))
}

/// Create the Axum router with all routes configured
///
/// `public_directory` holds the application shell (`index.html`) served for
/// `/` and `/day/:date`, and any other static assets.
pub fn create_router(app_state: AppState, public_directory: impl AsRef<Path>) -> Router {
    let public_directory = public_directory.as_ref();
    let index_file = public_directory.join("index.html");
    if !index_file.exists() {
        warn!("Application shell not found at {}", index_file.display());
    }

    let api_routes = Router::new()
        .route(
            "/day/:date",
            get(io::get_day).post(io::save_day).delete(io::delete_day),
        )
        .route("/days", get(io::list_days));

    Router::new()
        .nest("/api", api_routes)
        .route_service("/", ServeFile::new(&index_file))
        .route_service("/day/:date", ServeFile::new(&index_file))
        .fallback_service(ServeDir::new(public_directory))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

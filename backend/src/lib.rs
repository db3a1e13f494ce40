//! # Homeschool Tracker Backend
//!
//! Prototype API for tracking homeschooling progress: children, subjects,
//! learning goals, logged activities, a PDF progress report and a simulated
//! progress analysis.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, report layout, analysis)
//!     ↓
//! Storage Layer (in-memory store behind storage traits)
//! ```
//!
//! Data lives in process memory only and is gone after a restart.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{
    default_subjects, ActivityService, AnalysisService, ChildService, EntityFactory, GoalService,
    PdfReportRenderer, ReportService, SimulatedAnalyzer, SubjectService,
};
use crate::storage::{InMemoryStore, Storage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub child_service: ChildService,
    pub subject_service: SubjectService,
    pub goal_service: GoalService,
    pub activity_service: ActivityService,
    pub report_service: ReportService,
    pub analysis_service: AnalysisService,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire every service onto the given storage backend
    pub fn new(storage: Arc<dyn Storage>, config: ServerConfig) -> Self {
        let factory = EntityFactory::default();

        let child_service = ChildService::new(storage.clone(), factory.clone());
        let subject_service = SubjectService::new(storage.clone());
        let goal_service = GoalService::new(
            storage.clone(),
            child_service.clone(),
            subject_service.clone(),
            factory.clone(),
        );
        let activity_service = ActivityService::new(
            storage.clone(),
            child_service.clone(),
            subject_service.clone(),
            factory,
        );
        let report_service =
            ReportService::new(storage, child_service.clone(), Arc::new(PdfReportRenderer));
        let analysis_service =
            AnalysisService::new(child_service.clone(), Arc::new(SimulatedAnalyzer));

        Self {
            child_service,
            subject_service,
            goal_service,
            activity_service,
            report_service,
            analysis_service,
            config: Arc::new(config),
        }
    }
}

/// Initialize the backend with a freshly seeded in-memory store
pub fn initialize_backend(config: ServerConfig) -> Result<AppState> {
    info!("Preparing report directory {}", config.report_dir.display());
    std::fs::create_dir_all(&config.report_dir).with_context(|| {
        format!("Failed to create report directory {}", config.report_dir.display())
    })?;

    info!("Seeding in-memory store");
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStore::with_subjects(default_subjects()));

    info!("Setting up application state");
    Ok(AppState::new(storage, config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // Any origin, method and header may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .merge(io::health_apis::router())
        .nest("/api", io::api_router());

    if let Some(frontend_dir) = app_state.config.frontend_dir.clone() {
        info!("Serving frontend from {}", frontend_dir.display());
        app = app.fallback_service(ServeDir::new(frontend_dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

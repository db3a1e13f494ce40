//! # REST API Interface Layer
//!
//! HTTP endpoints for the homeschool tracker. Each `*_apis` module exposes a
//! `router()` that is nested under `/api` by [`api_router`].
//!
//! | Method & Path                          | Handler                                   |
//! |----------------------------------------|-------------------------------------------|
//! | GET/POST `/api/children`               | [`child_apis`]                            |
//! | GET `/api/subjects`                    | [`subject_apis`]                          |
//! | GET/POST `/api/children/:id/goals`     | [`goal_apis`]                             |
//! | GET/POST `/api/children/:id/activities`| [`activity_apis`]                         |
//! | POST `/api/reports/generate-example`   | [`report_apis`]                           |
//! | POST `/api/ai/analyze-simulated`       | [`analysis_apis`]                         |

use axum::Router;

use crate::AppState;

pub mod activity_apis;
pub mod analysis_apis;
pub mod child_apis;
pub mod error;
pub mod goal_apis;
pub mod health_apis;
pub mod report_apis;
pub mod subject_apis;

/// All routes served under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest(
            "/children",
            child_apis::router()
                .merge(goal_apis::router())
                .merge(activity_apis::router()),
        )
        .nest("/subjects", subject_apis::router())
        .nest("/reports", report_apis::router())
        .nest("/ai", analysis_apis::router())
}

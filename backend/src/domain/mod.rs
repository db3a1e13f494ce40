//! # Domain Module
//!
//! Business logic for the homeschool tracker: children, the fixed subject
//! catalogue, learning goals, logged activities, progress reports and the
//! simulated progress analysis.
//!
//! ## Module Organization
//!
//! - **child_service**: Creating and looking up children
//! - **subject_service**: The seeded subject catalogue
//! - **goal_service** / **activity_service**: Per-child goals and activities
//! - **report_service**: Report layout and generation
//! - **report_renderer**: PDF serialization of a report layout
//! - **analysis_service**: Stubbed progress analysis
//! - **factory**: Generated ids, timestamps and defaults for new entities
//! - **error**: Failure taxonomy shared by every service
//!
//! ## Business Rules
//!
//! - Goals and activities must reference a known subject
//! - Goal and activity ids are unique per child, not globally
//! - Nothing is ever updated or deleted

pub mod activity_service;
pub mod analysis_service;
pub mod child_service;
pub mod error;
pub mod factory;
pub mod goal_service;
pub mod report_renderer;
pub mod report_service;
pub mod subject_service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use activity_service::*;
pub use analysis_service::*;
pub use child_service::*;
pub use error::*;
pub use factory::*;
pub use goal_service::*;
pub use report_renderer::*;
pub use report_service::*;
pub use subject_service::*;

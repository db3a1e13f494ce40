//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: REST endpoints for the browser frontend
//! - **Serialization**: JSON in and out via the `shared` DTOs
//! - **Error Translation**: Domain errors to HTTP status codes
//! - **File Delivery**: Spooling and streaming generated reports

pub mod rest;

pub use rest::*;

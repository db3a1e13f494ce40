//! # Storage Module
//!
//! Holds children, subjects, learning goals and logged activities for the
//! lifetime of the process. The domain layer only sees the traits in
//! [`traits`]; [`memory::InMemoryStore`] is the one backend.

pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::*;

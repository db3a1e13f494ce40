//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Inserts are insert-or-error: there is no update or delete for any entity.

use async_trait::async_trait;
use shared::{Child, LearningGoal, LoggedActivity, Subject};
use std::fmt;

/// Kind of entity involved in a storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Child,
    Goal,
    Activity,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Child => "criança",
            EntityKind::Goal => "meta",
            EntityKind::Activity => "atividade",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Child not found: {0}")]
    UnknownChild(String),
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Trait defining the interface for child storage operations
#[async_trait]
pub trait ChildStorage: Send + Sync {
    /// Store a new child and open its (empty) goal and activity collections.
    /// Fails with `DuplicateId` if the id is taken.
    async fn store_child(&self, child: &Child) -> StorageResult<()>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: &str) -> StorageResult<Option<Child>>;

    /// List all children in insertion order
    async fn list_children(&self) -> StorageResult<Vec<Child>>;
}

/// Read-only access to the seeded subject catalogue
#[async_trait]
pub trait SubjectStorage: Send + Sync {
    async fn get_subject(&self, subject_id: &str) -> StorageResult<Option<Subject>>;

    /// List subjects in seed order
    async fn list_subjects(&self) -> StorageResult<Vec<Subject>>;
}

/// Trait defining the interface for learning goal storage operations
#[async_trait]
pub trait GoalStorage: Send + Sync {
    /// Store a goal under a child. Ids only need to be unique per child.
    async fn store_goal(&self, child_id: &str, goal: &LearningGoal) -> StorageResult<()>;

    /// List a child's goals in insertion order
    async fn list_goals(&self, child_id: &str) -> StorageResult<Vec<LearningGoal>>;
}

/// Trait defining the interface for logged activity storage operations
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Store an activity under a child. Ids only need to be unique per child.
    async fn store_activity(&self, child_id: &str, activity: &LoggedActivity) -> StorageResult<()>;

    /// List a child's activities in insertion order (not by date)
    async fn list_activities(&self, child_id: &str) -> StorageResult<Vec<LoggedActivity>>;
}

/// Everything the domain services need from a backend
pub trait Storage: ChildStorage + SubjectStorage + GoalStorage + ActivityStorage {}

impl<T> Storage for T where T: ChildStorage + SubjectStorage + GoalStorage + ActivityStorage {}

//! Builds stored entities from partial client requests, filling in generated
//! ids, timestamps and the default goal status.

use chrono::{DateTime, Utc};
use shared::{
    Child, CreateChildRequest, CreateGoalRequest, LearningGoal, LogActivityRequest, LoggedActivity,
};
use std::sync::Arc;
use uuid::Uuid;

/// Source of "now" for generated timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone)]
pub struct EntityFactory {
    clock: Arc<dyn Clock>,
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl EntityFactory {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Fresh UUID v4 string
    pub fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn child(&self, request: CreateChildRequest) -> Child {
        Child {
            id: self.resolve_id(request.id),
            name: request.name,
            birth_date: request.birth_date,
            created_at: request.created_at.unwrap_or_else(|| self.now()),
        }
    }

    pub fn goal(&self, request: CreateGoalRequest) -> LearningGoal {
        LearningGoal {
            id: self.resolve_id(request.id),
            subject_id: request.subject_id,
            description: request.description,
            status: request.status.unwrap_or_default(),
            created_at: request.created_at.unwrap_or_else(|| self.now()),
        }
    }

    pub fn activity(&self, request: LogActivityRequest) -> LoggedActivity {
        let now = self.now();
        LoggedActivity {
            id: self.resolve_id(request.id),
            activity_date: request.activity_date.unwrap_or(now),
            subject_id: request.subject_id,
            description: request.description,
            observations: request.observations,
            related_goal_id: request.related_goal_id,
            created_at: request.created_at.unwrap_or(now),
        }
    }

    // Blank ids count as omitted.
    fn resolve_id(&self, supplied: Option<String>) -> String {
        supplied
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| self.generate_id())
    }
}

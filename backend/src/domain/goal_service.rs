use shared::{CreateGoalRequest, LearningGoal};
use std::sync::Arc;
use tracing::info;

use crate::domain::child_service::ChildService;
use crate::domain::error::DomainResult;
use crate::domain::factory::EntityFactory;
use crate::domain::subject_service::SubjectService;
use crate::storage::Storage;

/// Service for a child's learning goals.
///
/// Goals have a status but no operation changes it after creation.
#[derive(Clone)]
pub struct GoalService {
    storage: Arc<dyn Storage>,
    child_service: ChildService,
    subject_service: SubjectService,
    factory: EntityFactory,
}

impl GoalService {
    pub fn new(
        storage: Arc<dyn Storage>,
        child_service: ChildService,
        subject_service: SubjectService,
        factory: EntityFactory,
    ) -> Self {
        Self {
            storage,
            child_service,
            subject_service,
            factory,
        }
    }

    /// List goals for a child in the order they were added
    pub async fn list_goals(&self, child_id: &str) -> DomainResult<Vec<LearningGoal>> {
        self.child_service.require_child(child_id).await?;

        let goals = self.storage.list_goals(child_id).await?;
        info!("Found {} goals for child {}", goals.len(), child_id);
        Ok(goals)
    }

    /// Add a goal. Checks run in order: child exists, subject is known, id is
    /// free under this child.
    pub async fn create_goal(
        &self,
        child_id: &str,
        request: CreateGoalRequest,
    ) -> DomainResult<LearningGoal> {
        info!(
            "Creating goal for child {}: subject={}, description={}",
            child_id, request.subject_id, request.description
        );

        self.child_service.require_child(child_id).await?;
        self.subject_service.require_subject(&request.subject_id).await?;

        let goal = self.factory.goal(request);
        self.storage.store_goal(child_id, &goal).await?;

        info!("Created goal {} for child {} ({})", goal.id, child_id, goal.status);
        Ok(goal)
    }
}

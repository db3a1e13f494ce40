use shared::{LogActivityRequest, LoggedActivity};
use std::sync::Arc;
use tracing::info;

use crate::domain::child_service::ChildService;
use crate::domain::error::DomainResult;
use crate::domain::factory::EntityFactory;
use crate::domain::subject_service::SubjectService;
use crate::storage::Storage;

/// Service for logging and listing a child's activities
#[derive(Clone)]
pub struct ActivityService {
    storage: Arc<dyn Storage>,
    child_service: ChildService,
    subject_service: SubjectService,
    factory: EntityFactory,
}

impl ActivityService {
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

    /// List activities in the order they were logged, not by activity date
    pub async fn list_activities(&self, child_id: &str) -> DomainResult<Vec<LoggedActivity>> {
        self.child_service.require_child(child_id).await?;

        let activities = self.storage.list_activities(child_id).await?;
        info!("Found {} activities for child {}", activities.len(), child_id);
        Ok(activities)
    }

    /// Log an activity. The related goal id is stored as given.
    pub async fn log_activity(
        &self,
        child_id: &str,
        request: LogActivityRequest,
    ) -> DomainResult<LoggedActivity> {
        info!(
            "Logging activity for child {}: subject={}, description={}",
            child_id, request.subject_id, request.description
        );

        self.child_service.require_child(child_id).await?;
        self.subject_service.require_subject(&request.subject_id).await?;

        let activity = self.factory.activity(request);
        self.storage.store_activity(child_id, &activity).await?;

        info!("Logged activity {} for child {}", activity.id, child_id);
        Ok(activity)
    }
}

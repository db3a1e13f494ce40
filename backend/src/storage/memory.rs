//! In-memory storage backend.
//!
//! Everything lives in one `StoreState` behind a single `RwLock`. Each insert
//! runs its existence and duplicate checks under the same write guard as the
//! insertion itself, so two concurrent creates with the same id cannot both win.

use async_trait::async_trait;
use indexmap::IndexMap;
use shared::{Child, LearningGoal, LoggedActivity, Subject};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::{
    ActivityStorage, ChildStorage, EntityKind, GoalStorage, StorageError, StorageResult,
    SubjectStorage,
};

#[derive(Debug, Default)]
struct StoreState {
    children: IndexMap<String, Child>,
    subjects: IndexMap<String, Subject>,
    /// child id -> goal id -> goal
    goals: HashMap<String, IndexMap<String, LearningGoal>>,
    /// child id -> activity id -> activity
    activities: HashMap<String, IndexMap<String, LoggedActivity>>,
}

/// Process-lifetime store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store with no subjects
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a fixed subject catalogue
    pub fn with_subjects(subjects: impl IntoIterator<Item = Subject>) -> Self {
        let subjects = subjects
            .into_iter()
            .map(|subject| (subject.id.clone(), subject))
            .collect();

        Self {
            state: RwLock::new(StoreState {
                subjects,
                ..StoreState::default()
            }),
        }
    }
}

#[async_trait]
impl ChildStorage for InMemoryStore {
    async fn store_child(&self, child: &Child) -> StorageResult<()> {
        let mut state = self.state.write().await;

        if state.children.contains_key(&child.id) {
            return Err(StorageError::DuplicateId {
                kind: EntityKind::Child,
                id: child.id.clone(),
            });
        }

        state.children.insert(child.id.clone(), child.clone());
        state.goals.insert(child.id.clone(), IndexMap::new());
        state.activities.insert(child.id.clone(), IndexMap::new());
        debug!("Stored child {} ({} total)", child.id, state.children.len());

        Ok(())
    }

    async fn get_child(&self, child_id: &str) -> StorageResult<Option<Child>> {
        let state = self.state.read().await;
        Ok(state.children.get(child_id).cloned())
    }

    async fn list_children(&self) -> StorageResult<Vec<Child>> {
        let state = self.state.read().await;
        Ok(state.children.values().cloned().collect())
    }
}

#[async_trait]
impl SubjectStorage for InMemoryStore {
    async fn get_subject(&self, subject_id: &str) -> StorageResult<Option<Subject>> {
        let state = self.state.read().await;
        Ok(state.subjects.get(subject_id).cloned())
    }

    async fn list_subjects(&self) -> StorageResult<Vec<Subject>> {
        let state = self.state.read().await;
        Ok(state.subjects.values().cloned().collect())
    }
}

#[async_trait]
impl GoalStorage for InMemoryStore {
    async fn store_goal(&self, child_id: &str, goal: &LearningGoal) -> StorageResult<()> {
        let mut state = self.state.write().await;

        let goals = state
            .goals
            .get_mut(child_id)
            .ok_or_else(|| StorageError::UnknownChild(child_id.to_string()))?;

        if goals.contains_key(&goal.id) {
            return Err(StorageError::DuplicateId {
                kind: EntityKind::Goal,
                id: goal.id.clone(),
            });
        }

        goals.insert(goal.id.clone(), goal.clone());
        Ok(())
    }

    async fn list_goals(&self, child_id: &str) -> StorageResult<Vec<LearningGoal>> {
        let state = self.state.read().await;
        state
            .goals
            .get(child_id)
            .map(|goals| goals.values().cloned().collect())
            .ok_or_else(|| StorageError::UnknownChild(child_id.to_string()))
    }
}

#[async_trait]
impl ActivityStorage for InMemoryStore {
    async fn store_activity(&self, child_id: &str, activity: &LoggedActivity) -> StorageResult<()> {
        let mut state = self.state.write().await;

        let activities = state
            .activities
            .get_mut(child_id)
            .ok_or_else(|| StorageError::UnknownChild(child_id.to_string()))?;

        if activities.contains_key(&activity.id) {
            return Err(StorageError::DuplicateId {
                kind: EntityKind::Activity,
                id: activity.id.clone(),
            });
        }

        activities.insert(activity.id.clone(), activity.clone());
        Ok(())
    }

    async fn list_activities(&self, child_id: &str) -> StorageResult<Vec<LoggedActivity>> {
        let state = self.state.read().await;
        state
            .activities
            .get(child_id)
            .map(|activities| activities.values().cloned().collect())
            .ok_or_else(|| StorageError::UnknownChild(child_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::GoalStatus;
    use std::sync::Arc;

    fn child(id: &str, name: &str) -> Child {
        Child {
            id: id.to_string(),
            name: name.to_string(),
            birth_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn goal(id: &str) -> LearningGoal {
        LearningGoal {
            id: id.to_string(),
            subject_id: "math".to_string(),
            description: "Tabuada".to_string(),
            status: GoalStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn activity(id: &str) -> LoggedActivity {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        LoggedActivity {
            id: id.to_string(),
            activity_date: at,
            subject_id: "math".to_string(),
            description: "Praticou tabuada".to_string(),
            observations: None,
            related_goal_id: None,
            created_at: at,
        }
    }

    #[tokio::test]
    async fn test_children_keep_insertion_order() {
        let store = InMemoryStore::new();
        for (id, name) in [("z", "Zeca"), ("a", "Ana"), ("m", "Maria")] {
            store.store_child(&child(id, name)).await.unwrap();
        }

        let ids: Vec<String> = store
            .list_children()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[tokio::test]
    async fn test_duplicate_child_is_rejected() {
        let store = InMemoryStore::new();
        store.store_child(&child("c1", "Ana")).await.unwrap();

        let err = store.store_child(&child("c1", "Outra")).await.unwrap_err();
        assert_eq!(
            err,
            StorageError::DuplicateId {
                kind: EntityKind::Child,
                id: "c1".to_string()
            }
        );

        let stored = store.get_child("c1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana");
    }

    #[tokio::test]
    async fn test_new_child_has_empty_collections() {
        let store = InMemoryStore::new();
        store.store_child(&child("c1", "Ana")).await.unwrap();

        assert!(store.list_goals("c1").await.unwrap().is_empty());
        assert!(store.list_activities("c1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_child_collections() {
        let store = InMemoryStore::new();

        assert_eq!(
            store.list_goals("missing").await.unwrap_err(),
            StorageError::UnknownChild("missing".to_string())
        );
        assert_eq!(
            store.store_activity("missing", &activity("a1")).await.unwrap_err(),
            StorageError::UnknownChild("missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_goal_ids_are_scoped_per_child() {
        let store = InMemoryStore::new();
        store.store_child(&child("c1", "Ana")).await.unwrap();
        store.store_child(&child("c2", "Bia")).await.unwrap();

        store.store_goal("c1", &goal("g1")).await.unwrap();
        store.store_goal("c2", &goal("g1")).await.unwrap();

        let err = store.store_goal("c1", &goal("g1")).await.unwrap_err();
        assert!(matches!(err, StorageError::DuplicateId { kind: EntityKind::Goal, .. }));
        assert_eq!(store.list_goals("c1").await.unwrap().len(), 1);
        assert_eq!(store.list_goals("c2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_activity_inserts() {
        let store = Arc::new(InMemoryStore::new());
        store.store_child(&child("c1", "Ana")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.store_activity("c1", &activity("same")).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.list_activities("c1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_subjects_are_seeded_in_order() {
        let store = InMemoryStore::with_subjects(vec![
            Subject { id: "math".into(), name: "Matemática".into(), description: None },
            Subject { id: "hist".into(), name: "História".into(), description: None },
        ]);

        let ids: Vec<String> = store
            .list_subjects()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["math", "hist"]);
        assert!(store.get_subject("hist").await.unwrap().is_some());
        assert!(store.get_subject("art").await.unwrap().is_none());
    }
}

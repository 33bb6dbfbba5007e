use std::collections::HashMap;

use tokio::sync::RwLock;

use super::GroupStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{Group, GroupId};

/// Keeps groups in insertion order in process memory.
#[derive(Debug, Default)]
pub struct MemoryGroupStore {
    groups: RwLock<Vec<Group>>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn first_clash(groups: &[Group], candidate: &Group) -> Option<String> {
    candidate
        .members
        .iter()
        .find(|m| {
            groups
                .iter()
                .filter(|g| g.id != candidate.id)
                .any(|g| g.has_roll_number(&m.roll_number))
        })
        .map(|m| m.roll_number.clone())
}

impl GroupStore for MemoryGroupStore {
    async fn list_all(&self) -> StoreResult<Vec<Group>> {
        Ok(self.groups.read().await.clone())
    }

    async fn find_by_id(&self, id: &GroupId) -> StoreResult<Option<Group>> {
        Ok(self.groups.read().await.iter().find(|g| &g.id == id).cloned())
    }

    async fn find_by_roll_number(&self, roll_number: &str) -> StoreResult<Option<Group>> {
        Ok(self
            .groups
            .read()
            .await
            .iter()
            .find(|g| g.has_roll_number(roll_number))
            .cloned())
    }

    async fn topic_counts(&self) -> StoreResult<HashMap<String, usize>> {
        let groups = self.groups.read().await;
        let mut counts = HashMap::new();
        for group in groups.iter() {
            *counts.entry(group.topic.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn insert(&self, group: &Group) -> StoreResult<()> {
        let mut groups = self.groups.write().await;
        if let Some(roll) = first_clash(&groups, group) {
            return Err(StoreError::DuplicateRollNumber(roll));
        }
        groups.push(group.clone());
        Ok(())
    }

    async fn replace(&self, group: &Group) -> StoreResult<bool> {
        let mut groups = self.groups.write().await;
        let Some(index) = groups.iter().position(|g| g.id == group.id) else {
            return Ok(false);
        };
        if let Some(roll) = first_clash(&groups, group) {
            return Err(StoreError::DuplicateRollNumber(roll));
        }
        groups[index].topic = group.topic.clone();
        groups[index].members = group.members.clone();
        Ok(true)
    }

    async fn delete(&self, id: &GroupId) -> StoreResult<bool> {
        let mut groups = self.groups.write().await;
        let before = groups.len();
        groups.retain(|g| &g.id != id);
        Ok(groups.len() != before)
    }
}

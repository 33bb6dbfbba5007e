use log::{info, warn};
use tokio::sync::Mutex;

use crate::admission;
use crate::availability;
use crate::error::{AppError, AppResult};
use crate::models::{Group, GroupId, ProposedGroup, TopicAvailability, TopicCatalog};
use crate::store::GroupStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollNumberStatus {
    Taken,
    Available,
}

/// Registration, availability and admin operations over a [`GroupStore`].
///
/// Every admission decision (register and replace) runs under one lock, so the snapshot a
/// decision is made on cannot change before the write lands. That only covers this process;
/// across processes the store's unique roll-number index is the remaining guard.
pub struct GroupService<S> {
    store: S,
    catalog: TopicCatalog,
    admission: Mutex<()>,
}

impl<S: GroupStore> GroupService<S> {
    pub fn new(store: S, catalog: TopicCatalog) -> Self {
        GroupService {
            store,
            catalog,
            admission: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub async fn register(&self, proposed: ProposedGroup) -> AppResult<Group> {
        let _admission = self.admission.lock().await;

        let existing = self.store.list_all().await?;
        if let Err(rejection) = admission::evaluate(&proposed, &existing, self.catalog.capacity()) {
            info!("Registration for topic {} rejected: {}", proposed.topic, rejection);
            return Err(rejection.into());
        }

        let group = Group::create(proposed);
        self.store.insert(&group).await?;
        info!("Group {} registered for topic {}", group.id, group.topic);
        Ok(group)
    }

    /// Read-only lookup for form feedback. Does not reserve the roll number.
    pub async fn check_roll_number(&self, roll_number: &str) -> AppResult<RollNumberStatus> {
        let status = match self.store.find_by_roll_number(roll_number).await? {
            Some(_) => RollNumberStatus::Taken,
            None => RollNumberStatus::Available,
        };
        Ok(status)
    }

    pub async fn list_availability(&self) -> AppResult<Vec<TopicAvailability>> {
        let counts = self.store.topic_counts().await?;
        Ok(availability::list_availability(&self.catalog, &counts))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Group>> {
        Ok(self.store.list_all().await?)
    }

    pub async fn delete_by_id(&self, id: &GroupId) -> AppResult<()> {
        if self.store.delete(id).await? {
            info!("Group {} deleted", id);
            Ok(())
        } else {
            warn!("Delete requested for unknown group {}", id);
            Err(AppError::NotFound(id.to_string()))
        }
    }

    /// Overwrites topic and members of a group. The replacement goes through the same admission
    /// rules as a new registration, with the edited group itself left out of the snapshot.
    pub async fn replace(&self, id: &GroupId, proposed: ProposedGroup) -> AppResult<Group> {
        let _admission = self.admission.lock().await;

        let Some(current) = self.store.find_by_id(id).await? else {
            warn!("Update requested for unknown group {}", id);
            return Err(AppError::NotFound(id.to_string()));
        };

        let existing = self.store.list_all().await?;

        if let Err(rejection) =
            admission::evaluate_replacement(id, &proposed, &existing, self.catalog.capacity())
        {
            info!("Update of group {} rejected: {}", id, rejection);
            return Err(rejection.into());
        }

        let updated = Group {
            topic: proposed.topic,
            members: proposed.members,
            ..current
        };
        if !self.store.replace(&updated).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        info!("Group {} updated", id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::Rejection;
    use crate::models::topic::TOPICS;
    use crate::models::Member;
    use crate::store::MemoryGroupStore;

    fn service() -> GroupService<MemoryGroupStore> {
        GroupService::new(MemoryGroupStore::new(), TopicCatalog::default())
    }

    fn proposal(topic: &str, rolls: &[&str]) -> ProposedGroup {
        ProposedGroup {
            topic: topic.into(),
            members: rolls
                .iter()
                .map(|r| Member { name: "A".into(), roll_number: r.to_string() })
                .collect(),
        }
    }

    #[actix_web::test]
    async fn rejected_registration_persists_nothing() {
        let service = service();
        service.register(proposal(TOPICS[0], &["S1"])).await.unwrap();

        let err = service.register(proposal(TOPICS[1], &["S2", "S1"])).await.unwrap_err();
        assert!(matches!(err, AppError::Rejected(Rejection::RollNumberTaken(ref r)) if r == "S1"));
        assert_eq!(service.list_all().await.unwrap().len(), 1);
        assert_eq!(
            service.check_roll_number("S2").await.unwrap(),
            RollNumberStatus::Available
        );
    }

    #[actix_web::test]
    async fn replace_unknown_group_is_not_found() {
        let service = service();
        let err = service
            .replace(&GroupId::new(), proposal(TOPICS[0], &["S1"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn replace_keeps_id_and_created_at() {
        let service = service();
        let group = service.register(proposal(TOPICS[0], &["S1"])).await.unwrap();

        let updated = service
            .replace(&group.id, proposal(TOPICS[3], &["S1", "S2"]))
            .await
            .unwrap();
        assert_eq!(updated.id, group.id);
        assert_eq!(updated.created_at, group.created_at);
        assert_eq!(updated.topic, TOPICS[3]);

        let availability = service.list_availability().await.unwrap();
        assert_eq!(availability[0].available_slots, 3);
        assert_eq!(availability[3].available_slots, 2);
    }

    #[actix_web::test]
    async fn replace_cannot_steal_another_groups_roll_number() {
        let service = service();
        service.register(proposal(TOPICS[0], &["S1"])).await.unwrap();
        let second = service.register(proposal(TOPICS[1], &["S2"])).await.unwrap();

        let err = service
            .replace(&second.id, proposal(TOPICS[1], &["S2", "S1"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected(Rejection::RollNumberTaken(_))));
    }
}

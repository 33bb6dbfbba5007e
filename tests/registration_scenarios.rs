use std::sync::Arc;

use group_registry::admission::Rejection;
use group_registry::error::AppError;
use group_registry::models::topic::TOPICS;
use group_registry::models::{GroupId, Member, ProposedGroup, TopicCatalog};
use group_registry::service::{GroupService, RollNumberStatus};
use group_registry::store::MemoryGroupStore;

fn setup() -> GroupService<MemoryGroupStore> {
    GroupService::new(MemoryGroupStore::new(), TopicCatalog::default())
}

fn proposal(topic: &str, members: &[(&str, &str)]) -> ProposedGroup {
    ProposedGroup {
        topic: topic.into(),
        members: members
            .iter()
            .map(|(name, roll)| Member { name: name.to_string(), roll_number: roll.to_string() })
            .collect(),
    }
}

#[actix_web::test]
async fn empty_store_offers_every_topic() {
    let service = setup();

    let report = service.list_availability().await.unwrap();
    assert_eq!(report.len(), 10);
    for (entry, topic) in report.iter().zip(TOPICS) {
        assert_eq!(entry.topic, topic);
        assert_eq!(entry.available_slots, 3);
    }
}

#[actix_web::test]
async fn topic_closes_after_three_groups() {
    let service = setup();

    for roll in ["S2023001", "S2023002", "S2023003"] {
        service.register(proposal(TOPICS[0], &[("A", roll)])).await.unwrap();
    }

    let err = service
        .register(proposal(TOPICS[0], &[("A", "S2023004")]))
        .await
        .unwrap_err();
    match err {
        AppError::Rejected(Rejection::TopicFull { topic, capacity }) => {
            assert_eq!(topic, TOPICS[0]);
            assert_eq!(capacity, 3);
        }
        other => panic!("expected TopicFull, got {:?}", other),
    }

    let report = service.list_availability().await.unwrap();
    assert_eq!(report[0].available_slots, 0);
    assert_eq!(service.list_all().await.unwrap().len(), 3);
}

#[actix_web::test]
async fn roll_number_is_unique_across_topics() {
    let service = setup();

    service.register(proposal(TOPICS[0], &[("A", "S2023001")])).await.unwrap();

    let err = service
        .register(proposal(TOPICS[1], &[("B", "S2023002"), ("C", "S2023001")]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Rejected(Rejection::RollNumberTaken(ref roll)) if roll == "S2023001"
    ));
}

#[actix_web::test]
async fn deleting_unknown_group_is_not_found() {
    let service = setup();

    let err = service.delete_by_id(&GroupId::new()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_web::test]
async fn check_roll_number_is_stable_without_writes() {
    let service = setup();
    service.register(proposal(TOPICS[5], &[("A", "S1")])).await.unwrap();

    for roll in ["S1", "S2"] {
        let first = service.check_roll_number(roll).await.unwrap();
        let second = service.check_roll_number(roll).await.unwrap();
        assert_eq!(first, second);
    }
    assert_eq!(service.check_roll_number("S1").await.unwrap(), RollNumberStatus::Taken);
}

#[actix_web::test]
async fn open_slots_and_claimed_groups_add_up() {
    let service = setup();

    let mut roll = 0;
    for (topic, groups) in [(TOPICS[0], 3), (TOPICS[1], 2), (TOPICS[7], 1)] {
        for _ in 0..groups {
            roll += 1;
            let roll_number = format!("S{}", roll);
            service
                .register(proposal(topic, &[("A", roll_number.as_str())]))
                .await
                .unwrap();
        }
    }

    let report = service.list_availability().await.unwrap();
    let open: usize = report.iter().map(|t| t.available_slots).sum();
    assert_eq!(open + service.list_all().await.unwrap().len(), 10 * 3);
}

#[actix_web::test]
async fn concurrent_registrations_never_overfill_a_topic() {
    let service = Arc::new(setup());

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let service = Arc::clone(&service);
            actix_web::rt::spawn(async move {
                let roll_number = format!("S20239{}", i);
                let proposed = proposal(TOPICS[9], &[("A", roll_number.as_str())]);
                service.register(proposed).await
            })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(service.list_availability().await.unwrap()[9].available_slots, 0);
}

use std::collections::HashMap;

use crate::models::{TopicAvailability, TopicCatalog};

/// Remaining slots for every catalog topic, in catalog order. Counts for topics outside the
/// catalog are ignored.
pub fn list_availability(catalog: &TopicCatalog, counts: &HashMap<String, usize>) -> Vec<TopicAvailability> {
    catalog
        .topics()
        .iter()
        .map(|topic| {
            let claimed = counts.get(topic).copied().unwrap_or(0);
            TopicAvailability {
                topic: topic.clone(),
                available_slots: catalog.capacity().saturating_sub(claimed),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::topic::TOPICS;

    #[test]
    fn empty_store_leaves_every_slot_open() {
        let report = list_availability(&TopicCatalog::default(), &HashMap::new());
        assert_eq!(report.len(), 10);
        assert!(report.iter().all(|t| t.available_slots == 3));
        let order: Vec<&str> = report.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(order, TOPICS.to_vec());
    }

    #[test]
    fn overfilled_topics_never_go_negative() {
        let mut counts = HashMap::new();
        counts.insert(TOPICS[0].to_string(), 2);
        counts.insert(TOPICS[9].to_string(), 4);
        counts.insert("Retired topic".to_string(), 1);

        let report = list_availability(&TopicCatalog::default(), &counts);
        assert_eq!(report[0].available_slots, 1);
        assert_eq!(report[9].available_slots, 0);
        assert_eq!(report.len(), 10);
    }
}

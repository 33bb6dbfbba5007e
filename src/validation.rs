use std::collections::HashSet;

use crate::error::{AppError, AppResult};
use crate::models::{Member, ProposedGroup, TopicCatalog};

/// Validates that a string is not blank. Returns the trimmed string on success.
pub fn non_blank(value: Option<&str>, field: &str) -> AppResult<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        Err(AppError::Validation(format!("{} is required", field)))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Builds a [`ProposedGroup`] out of raw request fields. Topic must come from the catalog,
/// there must be at least one member, and a roll number may appear only once per group.
pub fn proposed_group(
    catalog: &TopicCatalog,
    topic: Option<&str>,
    members: &[(Option<&str>, Option<&str>)],
) -> AppResult<ProposedGroup> {
    let topic = non_blank(topic, "Topic")?;
    if !catalog.contains(&topic) {
        return Err(AppError::Validation(format!("Unknown topic: {}", topic)));
    }

    if members.is_empty() {
        return Err(AppError::Validation("At least one group member is required".into()));
    }

    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(members.len());
    for (name, roll_number) in members {
        let name = non_blank(*name, "Member name")?;
        let roll_number = non_blank(*roll_number, "Roll number")?;
        if !seen.insert(roll_number.clone()) {
            return Err(AppError::Validation(format!(
                "Roll number {} appears more than once in the group",
                roll_number
            )));
        }
        validated.push(Member { name, roll_number });
    }

    Ok(ProposedGroup { topic, members: validated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::topic::TOPICS;

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank(Some("  S2023001 "), "Roll number").unwrap(), "S2023001");
    }

    #[test]
    fn non_blank_rejects_missing_and_blank() {
        assert!(non_blank(None, "Roll number").is_err());
        assert!(non_blank(Some("   "), "Roll number").is_err());
    }

    #[test]
    fn accepts_catalog_topic_and_trims_members() {
        let group = proposed_group(
            &TopicCatalog::default(),
            Some(TOPICS[0]),
            &[(Some(" Asha "), Some("S1")), (Some("Ravi"), Some(" S2"))],
        )
        .unwrap();
        assert_eq!(group.topic, TOPICS[0]);
        assert_eq!(group.members[0].name, "Asha");
        assert_eq!(group.members[1].roll_number, "S2");
    }

    #[test]
    fn rejects_unknown_topic() {
        let err = proposed_group(&TopicCatalog::default(), Some("Topic 42"), &[(Some("A"), Some("S1"))]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown topic: Topic 42");
    }

    #[test]
    fn rejects_empty_member_list() {
        assert!(proposed_group(&TopicCatalog::default(), Some(TOPICS[1]), &[]).is_err());
    }

    #[test]
    fn rejects_blank_member_fields() {
        let catalog = TopicCatalog::default();
        assert!(proposed_group(&catalog, Some(TOPICS[1]), &[(Some(""), Some("S1"))]).is_err());
        assert!(proposed_group(&catalog, Some(TOPICS[1]), &[(Some("A"), None)]).is_err());
    }

    #[test]
    fn rejects_roll_number_repeated_within_group() {
        let err = proposed_group(
            &TopicCatalog::default(),
            Some(TOPICS[2]),
            &[(Some("A"), Some("S1")), (Some("B"), Some("S1"))],
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

use thiserror::Error;

use crate::models::{Group, GroupId, ProposedGroup};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Roll number {0} is already taken")]
    RollNumberTaken(String),

    #[error("Topic already selected by {capacity} groups")]
    TopicFull { topic: String, capacity: usize },
}

/// Decides whether a proposed group may be stored, given a snapshot of the stored groups.
///
/// Roll numbers are checked first, member by member in submission order, and the first clash
/// is reported. Topic capacity is only looked at once every member is clear.
pub fn evaluate<'a, I>(proposed: &ProposedGroup, existing: I, capacity: usize) -> Result<(), Rejection>
where
    I: IntoIterator<Item = &'a Group>,
    I::IntoIter: Clone,
{
    let existing = existing.into_iter();

    for member in &proposed.members {
        if existing.clone().any(|g| g.has_roll_number(&member.roll_number)) {
            return Err(Rejection::RollNumberTaken(member.roll_number.clone()));
        }
    }

    let claimed = existing.filter(|g| g.topic == proposed.topic).count();
    if claimed >= capacity {
        return Err(Rejection::TopicFull {
            topic: proposed.topic.clone(),
            capacity,
        });
    }

    Ok(())
}

/// Same rules as [`evaluate`], with the group being edited left out of the snapshot so its own
/// members and topic slot do not count against it.
pub fn evaluate_replacement(
    id: &GroupId,
    proposed: &ProposedGroup,
    existing: &[Group],
    capacity: usize,
) -> Result<(), Rejection> {
    evaluate(proposed, existing.iter().filter(|g| &g.id != id), capacity)
}

use std::collections::HashMap;

use crate::error::StoreResult;
use crate::models::{Group, GroupId};

pub mod memory;
pub mod mysql;

pub use memory::MemoryGroupStore;
pub use mysql::MySqlGroupStore;

/// Persistence for registered groups.
///
/// Implementations must refuse to hold the same roll number in two places and report it with
/// [`StoreError::DuplicateRollNumber`](crate::error::StoreError::DuplicateRollNumber).
#[allow(async_fn_in_trait)]
pub trait GroupStore {
    async fn list_all(&self) -> StoreResult<Vec<Group>>;

    async fn find_by_id(&self, id: &GroupId) -> StoreResult<Option<Group>>;

    async fn find_by_roll_number(&self, roll_number: &str) -> StoreResult<Option<Group>>;

    /// Number of stored groups per topic. Topics with no groups are absent.
    async fn topic_counts(&self) -> StoreResult<HashMap<String, usize>>;

    async fn insert(&self, group: &Group) -> StoreResult<()>;

    /// Overwrites topic and members of an existing group. Returns false if the id is unknown.
    async fn replace(&self, group: &Group) -> StoreResult<bool>;

    /// Returns false if the id is unknown.
    async fn delete(&self, id: &GroupId) -> StoreResult<bool>;
}

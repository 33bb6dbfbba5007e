// src/models/mod.rs

pub mod group;
pub mod topic;

pub use group::{Group, GroupId, Member, ProposedGroup};
pub use topic::{TopicAvailability, TopicCatalog};

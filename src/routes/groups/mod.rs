pub mod group_handlers;
pub mod group_models;

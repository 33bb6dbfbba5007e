pub mod groups;
pub mod routes;

pub use routes::groups_configure;

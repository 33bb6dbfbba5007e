use actix_web::web;

use super::groups::group_handlers;
use crate::store::GroupStore;

pub fn groups_configure<S: GroupStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/groups")
            .app_data(group_handlers::json_config())
            .route("", web::get().to(group_handlers::groups_get))
            .route("/", web::get().to(group_handlers::groups_get))
            .route("/create", web::post().to(group_handlers::create_group::<S>))
            .route("/all", web::get().to(group_handlers::get_all_groups::<S>))
            .route("/available-topics", web::get().to(group_handlers::get_available_topics::<S>))
            .route("/check-roll-number", web::post().to(group_handlers::check_roll_number::<S>))
            .route("/{id}", web::put().to(group_handlers::update_group::<S>))
            .route("/{id}", web::delete().to(group_handlers::delete_group::<S>))
    );
}

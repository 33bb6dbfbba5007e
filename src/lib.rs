//! Topic group registration service.
//!
//! Students register groups of members under one of a fixed list of topics. A topic takes at
//! most three groups and a roll number can belong to only one group in the whole system. An
//! administrator lists, edits and deletes groups.
//!
//! Every endpoint lives under `/api/groups`:
//!
//! | Method | Path                 | Success                      |
//! |--------|----------------------|------------------------------|
//! | POST   | `/create`            | 201 + created group          |
//! | GET    | `/all`               | 200 + every group            |
//! | GET    | `/available-topics`  | 200 + `{topic, availableSlots}` per topic |
//! | POST   | `/check-roll-number` | 200 + `{taken, message}`     |
//! | PUT    | `/{id}`              | 200 + updated group          |
//! | DELETE | `/{id}`              | 200 + `{message}`            |

use actix_cors::Cors;
use actix_web::{http::header, web};

pub mod admission;
pub mod availability;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

use service::GroupService;
use store::GroupStore;

/// Registers the shared service and every group route on an app.
pub fn app_config<S: GroupStore + 'static>(
    service: web::Data<GroupService<S>>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(service);
        routes::groups_configure::<S>(cfg);
    }
}

/// CORS policy for the browser client: the four verbs the API uses and JSON bodies.
/// Without a client url every origin is accepted.
pub fn cors(client_url: Option<&str>) -> Cors {
    let cors = match client_url {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allowed_methods(["GET", "POST", "PUT", "DELETE"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(60 * 60)
}

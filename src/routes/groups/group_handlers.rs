use actix_web::{error::InternalError, web, HttpResponse, Responder};
use log::info;

use super::group_models::{
    CheckRollNumberRequest, CheckRollNumberResponse,
    DeleteGroupResponse, GroupRequest,
};
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{GroupId, ProposedGroup, TopicCatalog};
use crate::service::{GroupService, RollNumberStatus};
use crate::store::GroupStore;
use crate::validation;

// Default handler for the groups root
pub async fn groups_get() -> impl Responder {
    HttpResponse::Ok().body("Hello, this is the Group Registration endpoint.")
}

/// Malformed JSON bodies answer 400 with the same `{message}` body as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            message: format!("Invalid request body: {}", err),
        });
        InternalError::from_response(err, response).into()
    })
}

fn to_proposed(catalog: &TopicCatalog, request: &GroupRequest) -> AppResult<ProposedGroup> {
    let members: Vec<(Option<&str>, Option<&str>)> = request
        .group_members
        .iter()
        .map(|m| (m.name.as_deref(), m.roll_number.as_deref()))
        .collect();
    validation::proposed_group(catalog, request.topic.as_deref(), &members)
}

// Ids that do not parse cannot belong to any group
fn parse_id(raw: &str) -> AppResult<GroupId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(raw.to_string()))
}

// Handler to register a new group
pub async fn create_group<S: GroupStore + 'static>(
    service: web::Data<GroupService<S>>,
    request: web::Json<GroupRequest>,
) -> AppResult<HttpResponse> {
    info!("Received request to create a group");
    let proposed = to_proposed(service.catalog(), &request)?;
    let group = service.register(proposed).await?;
    Ok(HttpResponse::Created().json(group))
}

// Handler to list every group
pub async fn get_all_groups<S: GroupStore + 'static>(
    service: web::Data<GroupService<S>>,
) -> AppResult<HttpResponse> {
    info!("Received request to list all groups");
    let groups = service.list_all().await?;
    Ok(HttpResponse::Ok().json(groups))
}

// Handler to report remaining slots per topic
pub async fn get_available_topics<S: GroupStore + 'static>(
    service: web::Data<GroupService<S>>,
) -> AppResult<HttpResponse> {
    info!("Received request for available topics");
    let topics = service.list_availability().await?;
    Ok(HttpResponse::Ok().json(topics))
}

// Check if a roll number is already registered
pub async fn check_roll_number<S: GroupStore + 'static>(
    service: web::Data<GroupService<S>>,
    request: web::Json<CheckRollNumberRequest>,
) -> AppResult<HttpResponse> {
    let roll_number = validation::non_blank(request.roll_number.as_deref(), "Roll number")?;
    info!("Received request to check roll number: {}", roll_number);

    let response = match service.check_roll_number(&roll_number).await? {
        RollNumberStatus::Taken => CheckRollNumberResponse {
            taken: true,
            message: format!("Roll number {} is already taken", roll_number),
        },
        RollNumberStatus::Available => CheckRollNumberResponse {
            taken: false,
            message: "Roll number is available".to_string(),
        },
    };
    Ok(HttpResponse::Ok().json(response))
}

// Handler to replace topic and members of a group
pub async fn update_group<S: GroupStore + 'static>(
    service: web::Data<GroupService<S>>,
    path: web::Path<String>,
    request: web::Json<GroupRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    info!("Received request to update group {}", id);
    let proposed = to_proposed(service.catalog(), &request)?;
    let group = service.replace(&id, proposed).await?;
    Ok(HttpResponse::Ok().json(group))
}

// Handler to delete a group
pub async fn delete_group<S: GroupStore + 'static>(
    service: web::Data<GroupService<S>>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    info!("Received request to delete group {}", id);
    service.delete_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteGroupResponse {
        message: "Group deleted".to_string(),
    }))
}

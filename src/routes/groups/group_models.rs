use serde::{Deserialize, Serialize};

// Fields are optional so a missing value is reported as a validation message
// instead of a deserialization error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub name: Option<String>,
    pub roll_number: Option<String>,
}

// create and update share one body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRequest {
    pub topic: Option<String>,
    #[serde(default)]
    pub group_members: Vec<MemberRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRollNumberRequest {
    pub roll_number: Option<String>,
}

#[derive(Serialize)]
pub struct CheckRollNumberResponse {
    pub taken: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct DeleteGroupResponse {
    pub message: String,
}

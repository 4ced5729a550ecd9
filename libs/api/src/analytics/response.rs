use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LogResp {
    pub success: bool,
}

#[derive(Serialize, ToSchema)]
pub struct DisabledResp {
    pub message: String,
}

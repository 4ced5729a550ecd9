use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Cache,
    Generated,
}

#[derive(Serialize, ToSchema)]
pub struct NightPlanResp {
    pub content: String,
    pub source: ContentSource,
}

#[derive(Serialize, ToSchema)]
pub struct TextResp {
    pub text: String,
}

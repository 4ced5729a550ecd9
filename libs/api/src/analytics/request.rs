use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogSearchRequest {
    pub search_term: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub filters_applied: Option<Value>,
    pub results_count: Option<i64>,
    pub session_id: Option<String>,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct LogInteractionRequest {
    pub interaction_type: Option<String>,
    pub session_id: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub event_details: Option<Value>,
}

use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNightPlanRequest {
    pub event_id: Option<String>,
}

/// Event data sent inline by the client.
#[derive(Deserialize, ToSchema, Default, Debug)]
pub struct EventDetails {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct EventGuideRequest {
    pub event: Option<EventDetails>,
}

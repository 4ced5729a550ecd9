use chrono::NaiveDate;
use entity::prelude::*;
use search::Clarification;
use serde::Serialize;
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

#[skip_serializing_none]
#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventResp {
    pub id: String,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub provincia: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
    pub verified: bool,
    pub night_plan: Option<String>,
}

impl From<EventEntity> for EventResp {
    fn from(value: EventEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            artist: value.artist,
            date: value.date,
            time: value.time,
            venue: value.venue,
            city: value.city,
            provincia: value.provincia,
            country: value.country,
            description: value.description,
            source_url: value.source_url,
            verified: value.verified,
            night_plan: value.night_plan,
        }
    }
}

/// Returned instead of events when the search term needs disambiguation.
#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClarificationResp {
    pub needs_clarification: bool,
    pub term: String,
    /// Values accepted by `preferredOption`.
    pub candidate_interpretations: Vec<String>,
}

impl From<Clarification> for ClarificationResp {
    fn from(value: Clarification) -> Self {
        Self {
            needs_clarification: true,
            term: value.term,
            candidate_interpretations: value
                .candidate_interpretations
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum GetEventsResp {
    Events(Vec<EventResp>),
    Clarification(ClarificationResp),
}

#[derive(Serialize, ToSchema)]
pub struct GetEventResp {
    pub event: Option<EventResp>,
}

#[derive(Serialize, ToSchema)]
pub struct GetEventsCountResp {
    pub total: u64,
}

use axum::{
    extract::{Path, Query, State},
    http::header,
    Json,
};
use search::SearchPlan;
use tracing::info;

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{today, ApiState};

use self::{
    request::GetEventsParam,
    response::{EventResp, GetEventResp, GetEventsCountResp, GetEventsResp},
};

const SHARED_CACHE: &str = "s-maxage=60, stale-while-revalidate";
const NO_STORE: &str = "no-store, max-age=0";

/// Search events
///
/// Upcoming events ascending by date, one per show. An ambiguous `search`
/// term without `preferredOption` returns a clarification object instead.
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Events ascending by date, or a ClarificationResp for an ambiguous term", body = [EventResp]),
        (status = 400, description = "Malformed date or unknown preferredOption")
    ),
    params(
        GetEventsParam
    )
)]
pub async fn get_events(
    State(state): State<ApiState>,
    Query(params): Query<GetEventsParam>,
) -> ApiResponse<impl axum::response::IntoResponse> {
    let plan = search::plan(&params.into(), today(), &state.config.search)?;

    let filter = match plan {
        SearchPlan::Run(filter) => filter,
        SearchPlan::Clarify(clarification) => {
            info!(task = "clarify search", term = clarification.term);
            return Ok((
                [(header::CACHE_CONTROL, SHARED_CACHE)],
                Json(GetEventsResp::Clarification(clarification.into())),
            ));
        }
    };

    let candidates = state
        .repo
        .event
        .find(&filter)
        .await
        .into_response("500-001")?;

    let events = search::select(&filter, candidates);

    let response = GetEventsResp::Events(
        events.into_iter().map(EventResp::from).collect(),
    );

    Ok(([(header::CACHE_CONTROL, SHARED_CACHE)], Json(response)))
}

/// Count upcoming events
#[utoipa::path(
    get,
    path = "/events/count",
    responses(
        (status = 200, description = "Number of events from today on", body = GetEventsCountResp)
    )
)]
pub async fn get_events_count(
    State(state): State<ApiState>,
) -> ApiResponse<impl axum::response::IntoResponse> {
    let total = state
        .repo
        .event
        .count_upcoming(today(), state.config.search.hide_incomplete)
        .await
        .into_response("500-002")?;

    Ok((
        [(header::CACHE_CONTROL, NO_STORE)],
        Json(GetEventsCountResp { total }),
    ))
}

/// Get an event
#[utoipa::path(
    get,
    path = "/events/{id}",
    responses(
        (status = 200, description = "The event, or null when unknown", body = GetEventResp)
    ),
    params(
        ("id", description = "event id"),
    )
)]
pub async fn get_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetEventResp>> {
    let event = state
        .repo
        .event
        .find_by_id(&id)
        .await
        .into_response("500-003")?;

    Ok(Json(GetEventResp {
        event: event.map(EventResp::from),
    }))
}

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::NaiveDate;
use gemini::GenerateContent;
use tracing::info;

pub mod request;

use crate::night_plan::response::TextResp;
use crate::response::{ApiResponse, IntoApiResponse};
use crate::{prompt, ApiError, ApiState};

use self::request::TripPlannerRequest;

/// Plan a trip around the events in a city
#[utoipa::path(
    post,
    path = "/trip-planner",
    request_body = TripPlannerRequest,
    responses(
        (status = 200, description = "Generated itinerary", body = TextResp),
        (status = 400, description = "Missing or invalid destination or dates")
    )
)]
pub async fn post_trip_planner(
    State(state): State<ApiState>,
    payload: Result<Json<TripPlannerRequest>, JsonRejection>,
) -> ApiResponse<Json<TextResp>> {
    let Json(body) = payload?;
    let (Some(destination), Some(start_date), Some(end_date)) = (
        present(body.destination),
        present(body.start_date),
        present(body.end_date),
    ) else {
        return Err(ApiError::from_code("400-003"));
    };

    let (start_date, end_date) = match (parse(&start_date), parse(&end_date)) {
        (Some(start), Some(end)) if start <= end => (start, end),
        _ => return Err(ApiError::from_code("400-004")),
    };

    let events = state
        .repo
        .event
        .find_in_city_between(&destination, start_date, end_date)
        .await
        .into_response("500-006")?;

    info!(task = "plan trip", destination, events = events.len());

    if events.is_empty() {
        return Ok(Json(TextResp {
            text: prompt::NO_TRIP_EVENTS.to_string(),
        }));
    }

    let prompt = prompt::trip_plan(&destination, start_date, end_date, &events);
    let text = state
        .gemini
        .generate_text(&prompt)
        .await
        .into_response("500-006")?;

    Ok(Json(TextResp { text }))
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

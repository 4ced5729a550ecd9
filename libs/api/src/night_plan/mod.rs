use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    Json,
};
use gemini::GenerateContent;
use tracing::info;

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{prompt, ApiError, ApiState};

use self::{
    request::{EventGuideRequest, GenerateNightPlanRequest},
    response::{ContentSource, NightPlanResp, TextResp},
};

/// Plan a night around a stored event
///
/// The first call generates the plan and stores it on the event; later
/// calls return the stored text.
#[utoipa::path(
    post,
    path = "/generate-night-plan",
    request_body = GenerateNightPlanRequest,
    responses(
        (status = 200, description = "Cached or freshly generated plan", body = NightPlanResp),
        (status = 400, description = "Missing eventId"),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn generate_night_plan(
    State(state): State<ApiState>,
    payload: Result<Json<GenerateNightPlanRequest>, JsonRejection>,
) -> ApiResponse<impl axum::response::IntoResponse> {
    let Json(body) = payload?;
    let Some(event_id) = body.event_id.filter(|id| !id.trim().is_empty())
    else {
        return Err(ApiError::from_code("400-001"));
    };

    let event = state
        .repo
        .event
        .find_by_id(&event_id)
        .await
        .into_response("500-003")?
        .ok_or_else(|| ApiError::from_code("404-001"))?;

    let response = match event.night_plan {
        Some(ref content) if !content.is_empty() => {
            info!(task = "night plan from cache", id = event_id);
            NightPlanResp {
                content: content.clone(),
                source: ContentSource::Cache,
            }
        }
        _ => {
            info!(task = "generate night plan", id = event_id);
            let content = state
                .gemini
                .generate_text(&prompt::night_plan(&event))
                .await
                .into_response("500-004")?;

            state
                .repo
                .event
                .save_night_plan(&event_id, &content)
                .await
                .into_response("500-004")?;

            NightPlanResp {
                content,
                source: ContentSource::Generated,
            }
        }
    };

    Ok(([(header::CACHE_CONTROL, "no-store, max-age=0")], Json(response)))
}

/// Plan a night around inline event data
#[utoipa::path(
    post,
    path = "/gemini",
    request_body = EventGuideRequest,
    responses(
        (status = 200, description = "Generated guide", body = TextResp),
        (status = 400, description = "Missing event")
    )
)]
pub async fn post_event_guide(
    State(state): State<ApiState>,
    payload: Result<Json<EventGuideRequest>, JsonRejection>,
) -> ApiResponse<Json<TextResp>> {
    let Json(body) = payload?;
    let Some(event) = body.event else {
        return Err(ApiError::from_code("400-002"));
    };

    let text = state
        .gemini
        .generate_text(&prompt::event_guide(&event))
        .await
        .into_response("500-005")?;

    Ok(Json(TextResp { text }))
}

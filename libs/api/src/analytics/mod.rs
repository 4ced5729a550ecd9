use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

pub mod request;
pub mod response;

use crate::clients::supabase;
use crate::response::ApiResponse;
use crate::{ApiError, ApiState};

use self::{
    request::{LogInteractionRequest, LogSearchRequest},
    response::{DisabledResp, LogResp},
};

/// One row of the `search_events` table.
#[derive(Serialize, Debug, PartialEq)]
pub struct SearchEventRow {
    pub search_term: Option<String>,
    pub filters_applied: Option<Value>,
    pub results_count: Option<i64>,
    pub session_id: String,
    pub interaction_type: String,
    pub status: &'static str,
    pub processing_time_ms: u64,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub referrer: Option<String>,
    pub geo: Geo,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Geo {
    pub city: Option<String>,
    pub region: Option<String>,
}

/// Request metadata copied into every row.
#[derive(Debug, PartialEq)]
struct Visitor {
    user_agent: Option<String>,
    country: Option<String>,
    referrer: Option<String>,
    geo: Geo,
}

impl Visitor {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        Self {
            user_agent: header("user-agent"),
            country: header("x-vercel-ip-country"),
            referrer: header("referer"),
            geo: Geo {
                city: header("x-vercel-ip-city"),
                region: header("x-vercel-ip-country-region"),
            },
        }
    }
}

fn disabled() -> Response {
    Json(DisabledResp {
        message: "Analytics disabled.".to_string(),
    })
    .into_response()
}

/// Failures of the sink are reported in the body, never as an error status.
async fn record(sink: &supabase::Client, row: SearchEventRow) -> Response {
    match sink.insert(&[row]).await {
        Ok(()) => {
            (StatusCode::CREATED, Json(LogResp { success: true }))
                .into_response()
        }
        Err(e) => {
            error!(task = "record analytics", error = e.to_string());
            Json(LogResp { success: false }).into_response()
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Log a search
#[utoipa::path(
    post,
    path = "/log-search",
    request_body = LogSearchRequest,
    responses(
        (status = 201, description = "Row stored", body = LogResp),
        (status = 200, description = "Analytics disabled or sink failure", body = LogResp),
        (status = 400, description = "Missing sessionId")
    )
)]
pub async fn log_search(
    State(state): State<ApiState>,
    headers: HeaderMap,
    payload: Result<Json<LogSearchRequest>, JsonRejection>,
) -> ApiResponse<Response> {
    let started = Instant::now();
    let Some(sink) = &state.analytics else {
        return Ok(disabled());
    };

    let Json(body) = payload?;
    let Some(session_id) = present(body.session_id) else {
        return Err(ApiError::from_code("400-005"));
    };

    let visitor = Visitor::from_headers(&headers);
    let row = SearchEventRow {
        search_term: body.search_term,
        filters_applied: body.filters_applied,
        results_count: body.results_count,
        session_id,
        interaction_type: "search".to_string(),
        status: "success",
        processing_time_ms: elapsed_ms(started),
        user_agent: visitor.user_agent,
        country: visitor.country,
        referrer: visitor.referrer,
        geo: visitor.geo,
    };

    Ok(record(sink, row).await)
}

/// Log a user interaction
#[utoipa::path(
    post,
    path = "/log-interaction",
    request_body = LogInteractionRequest,
    responses(
        (status = 201, description = "Row stored", body = LogResp),
        (status = 200, description = "Analytics disabled or sink failure", body = LogResp),
        (status = 400, description = "Missing interaction_type or session_id")
    )
)]
pub async fn log_interaction(
    State(state): State<ApiState>,
    headers: HeaderMap,
    payload: Result<Json<LogInteractionRequest>, JsonRejection>,
) -> ApiResponse<Response> {
    let started = Instant::now();
    let Some(sink) = &state.analytics else {
        return Ok(disabled());
    };

    let Json(body) = payload?;
    let (Some(interaction_type), Some(session_id)) =
        (present(body.interaction_type), present(body.session_id))
    else {
        return Err(ApiError::from_code("400-006"));
    };

    let visitor = Visitor::from_headers(&headers);
    let row = SearchEventRow {
        search_term: None,
        filters_applied: body.event_details,
        results_count: None,
        session_id,
        interaction_type,
        status: "success",
        processing_time_ms: elapsed_ms(started),
        user_agent: visitor.user_agent,
        country: visitor.country,
        referrer: visitor.referrer,
        geo: visitor.geo,
    };

    Ok(record(sink, row).await)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_visitor_from_headers() {
        // Arrange
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", "Mozilla/5.0".parse().unwrap());
        headers.insert("x-vercel-ip-country", "ES".parse().unwrap());
        headers.insert("x-vercel-ip-city", "Sevilla".parse().unwrap());

        // Act
        let visitor = Visitor::from_headers(&headers);

        // Assert
        assert_eq!(
            visitor,
            Visitor {
                user_agent: Some("Mozilla/5.0".to_string()),
                country: Some("ES".to_string()),
                referrer: None,
                geo: Geo {
                    city: Some("Sevilla".to_string()),
                    region: None,
                },
            }
        );
    }

    #[test]
    fn test_row_serializes_nested_geo() {
        let row = SearchEventRow {
            search_term: Some("bulerías".to_string()),
            filters_applied: None,
            results_count: Some(4),
            session_id: "s-1".to_string(),
            interaction_type: "search".to_string(),
            status: "success",
            processing_time_ms: 0,
            user_agent: None,
            country: None,
            referrer: None,
            geo: Geo {
                city: Some("Jerez".to_string()),
                region: None,
            },
        };

        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["geo"]["city"], "Jerez");
        assert_eq!(json["results_count"], 4);
        assert!(json["referrer"].is_null());
    }
}

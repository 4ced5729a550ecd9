use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use repository::Repository;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

use crate::clients::supabase;

pub use crate::config::Config;

pub mod analytics;
mod clients;
pub mod config;
pub mod event;
mod healthz;
pub mod night_plan;
mod not_found;
mod prompt;
mod response;
pub mod trip;
mod version;

#[derive(Debug)]
pub enum ApiError {
    ClientError(String),
    NotFound(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    repo: Repository,
    gemini: gemini::Models,
    /// `None` when no Supabase credentials are configured.
    analytics: Option<supabase::Client>,
    config: Arc<Config>,
}

#[derive(Clone, Debug)]
pub struct ApiSecrets {
    pub gemini_api_key: String,
    pub supabase: Option<SupabaseCredentials>,
}

#[derive(Clone, Debug)]
pub struct SupabaseCredentials {
    pub url: String,
    pub anon_key: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        event::get_events,
        event::get_events_count,
        event::get_event,
        night_plan::generate_night_plan,
        night_plan::post_event_guide,
        trip::post_trip_planner,
        analytics::log_search,
        analytics::log_interaction,
        healthz::get_health,
        version::get_version,
    ),
    components(schemas(
        event::response::EventResp,
        event::response::ClarificationResp,
        event::response::GetEventResp,
        event::response::GetEventsCountResp,
        night_plan::request::GenerateNightPlanRequest,
        night_plan::request::EventGuideRequest,
        night_plan::request::EventDetails,
        night_plan::response::NightPlanResp,
        night_plan::response::ContentSource,
        night_plan::response::TextResp,
        trip::request::TripPlannerRequest,
        analytics::request::LogSearchRequest,
        analytics::request::LogInteractionRequest,
        analytics::response::LogResp,
        analytics::response::DisabledResp,
        version::VersionResp,
    )),
    tags(
        (name = "duende", description = "Flamenco events search API")
    )
)]
struct ApiDoc;

pub fn serve(
    repository: Repository,
    secrets: ApiSecrets,
    config: Config,
) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    let gemini = gemini::Models::new(
        &secrets.gemini_api_key,
        &config.gemini.base_url,
        &config.gemini.model,
        Duration::from_secs(config.gemini.timeout_secs),
    )?;

    let analytics = match &secrets.supabase {
        Some(credentials) => Some(supabase::Client::new(
            &credentials.url,
            &credentials.anon_key,
            &config.analytics.table,
            Duration::from_secs(config.analytics.timeout_secs),
        )?),
        None => {
            warn!(task = "supabase is not configured, analytics disabled");
            None
        }
    };

    router(ApiState {
        repo: repository,
        gemini,
        analytics,
        config: Arc::new(config),
    })
}

fn router(state: ApiState) -> anyhow::Result<Router> {
    let origins = state
        .config
        .cors
        .origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid cors origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // events
    let event_router = Router::new()
        .route("/", get(event::get_events))
        .route("/count", get(event::get_events_count))
        .route("/:id", get(event::get_event))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // generated content
    let content_router = Router::new()
        .route("/generate-night-plan", post(night_plan::generate_night_plan))
        .route("/gemini", post(night_plan::post_event_guide))
        .route("/trip-planner", post(trip::post_trip_planner))
        .with_state(state.clone());

    // analytics
    let analytics_router = Router::new()
        .route("/log-search", post(analytics::log_search))
        .route("/log-interaction", post(analytics::log_interaction))
        .with_state(state);

    let router = Router::new()
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(
            RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi())
                .path("/rapidoc"),
        )
        .route("/healthz", get(healthz::get_health))
        .route("/version", get(version::get_version))
        .nest("/events", event_router)
        .merge(content_router)
        .merge(analytics_router)
        .layer(cors)
        .fallback(not_found::get_404);

    Ok(router)
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

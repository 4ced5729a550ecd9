use axum::{http::header, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct VersionResp {
    pub version: &'static str,
    pub timestamp: String,
}

/// Build version
#[utoipa::path(
    get,
    path = "/version",
    responses(
        (status = 200, description = "Crate version and server time", body = VersionResp)
    )
)]
pub(super) async fn get_version() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store, max-age=0")],
        Json(VersionResp {
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    )
}

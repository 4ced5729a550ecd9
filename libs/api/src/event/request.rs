use search::EventQuery;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetEventsParam {
    /// Free text, a known city or country, or an ambiguous term.
    pub search: Option<String>,
    pub artist: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// `YYYY-MM-DD`, defaults to today.
    pub date_from: Option<String>,
    /// `YYYY-MM-DD`, inclusive.
    pub date_to: Option<String>,
    /// `week` limits results to the next seven days.
    pub timeframe: Option<String>,
    /// One of `city`, `country`, `artist`, `text`.
    pub preferred_option: Option<String>,
}

impl From<GetEventsParam> for EventQuery {
    fn from(value: GetEventsParam) -> Self {
        Self {
            search: value.search,
            artist: value.artist,
            city: value.city,
            country: value.country,
            date_from: value.date_from,
            date_to: value.date_to,
            timeframe: value.timeframe,
            preferred_option: value.preferred_option,
        }
    }
}

use chrono::{Days, NaiveDate};

use crate::{
    config::{Interpretation, SearchConfig},
    text::{Field, TextQuery},
    QueryError,
};

const WEEK: Days = Days::new(7);

/// Raw search parameters as they arrive from the query string.
#[derive(Debug, Default, Clone)]
pub struct EventQuery {
    pub search: Option<String>,
    pub artist: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub timeframe: Option<String>,
    pub preferred_option: Option<String>,
}

/// Conjunction of predicates over the event collection. The store evaluates
/// everything except `text`, which [`crate::select`] applies afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    pub date_from: NaiveDate,
    pub date_to: Option<NaiveDate>,
    /// Each entry is matched against `city` or `provincia`.
    pub locations: Vec<String>,
    pub countries: Vec<String>,
    pub artists: Vec<String>,
    pub text: Option<TextQuery>,
    pub hide_incomplete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clarification {
    pub term: String,
    pub candidate_interpretations: Vec<Interpretation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    Run(EventFilter),
    Clarify(Clarification),
}

pub fn plan(
    query: &EventQuery,
    today: NaiveDate,
    config: &SearchConfig,
) -> Result<SearchPlan, QueryError> {
    let date_from = parse_date("dateFrom", present(&query.date_from))?;
    let date_to = parse_date("dateTo", present(&query.date_to))?;

    let date_to = match date_to {
        Some(date_to) => Some(date_to),
        None if present(&query.timeframe) == Some("week") => Some(today + WEEK),
        None => None,
    };

    let mut filter = EventFilter {
        date_from: date_from.unwrap_or(today),
        date_to,
        locations: present(&query.city).map(String::from).into_iter().collect(),
        countries: present(&query.country)
            .map(String::from)
            .into_iter()
            .collect(),
        artists: present(&query.artist).map(String::from).into_iter().collect(),
        text: None,
        hide_incomplete: config.hide_incomplete,
    };

    let Some(search) = present(&query.search) else {
        return Ok(SearchPlan::Run(filter));
    };

    let preferred = present(&query.preferred_option)
        .map(|option| {
            option.parse::<Interpretation>().map_err(|_| {
                QueryError::UnknownInterpretation(option.to_string())
            })
        })
        .transpose()?;

    let interpretation = match preferred {
        Some(interpretation) => interpretation,
        None => {
            if let Some(options) = config.ambiguity(search) {
                return Ok(SearchPlan::Clarify(Clarification {
                    term: search.to_string(),
                    candidate_interpretations: options.to_vec(),
                }));
            }
            classify(search, config)
        }
    };

    match interpretation {
        Interpretation::City => {
            let city = config.known_city(search).unwrap_or(search);
            filter.locations.push(city.to_string());
        }
        Interpretation::Country => {
            let country = config.known_country(search).unwrap_or(search);
            filter.countries.push(country.to_string());
        }
        Interpretation::Artist => {
            filter.text = TextQuery::new(search, &[Field::Artist]);
        }
        Interpretation::Text => {
            filter.text = TextQuery::new(search, &Field::SEARCHABLE);
        }
    }

    Ok(SearchPlan::Run(filter))
}

fn classify(search: &str, config: &SearchConfig) -> Interpretation {
    if config.known_city(search).is_some() {
        Interpretation::City
    } else if config.known_country(search).is_some() {
        Interpretation::Country
    } else {
        Interpretation::Text
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, QueryError> {
    value
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                QueryError::InvalidDate {
                    field,
                    value: value.to_string(),
                }
            })
        })
        .transpose()
}

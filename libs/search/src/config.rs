use std::collections::HashMap;

use serde::Deserialize;

use crate::text::fold;

/// How a bare search term should be applied to the event collection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Interpretation {
    City,
    Country,
    Artist,
    Text,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Hide scraped records without name, artist, time or venue.
    #[serde(default = "default_hide_incomplete")]
    pub hide_incomplete: bool,
    /// Terms that name more than one facet, e.g. a country that is also an
    /// artist's stage name.
    #[serde(default)]
    pub ambiguous: HashMap<String, Vec<Interpretation>>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
}

fn default_hide_incomplete() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hide_incomplete: default_hide_incomplete(),
            ambiguous: HashMap::from([
                (
                    "argentina".to_string(),
                    vec![Interpretation::Country, Interpretation::Artist],
                ),
                (
                    "granaino".to_string(),
                    vec![Interpretation::City, Interpretation::Artist],
                ),
            ]),
            cities: [
                "Sevilla", "Málaga", "Granada", "Cádiz", "Córdoba", "Huelva",
                "Jaén", "Almería", "Madrid", "Barcelona", "Jerez", "Ronda",
            ]
            .map(String::from)
            .to_vec(),
            countries: ["Argentina", "España", "Francia"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl SearchConfig {
    pub fn ambiguity(&self, term: &str) -> Option<&[Interpretation]> {
        let term = fold(term);
        self.ambiguous
            .iter()
            .find(|(key, _)| fold(key) == term)
            .map(|(_, options)| options.as_slice())
    }

    /// Canonical spelling of a known city or province.
    pub fn known_city(&self, term: &str) -> Option<&str> {
        find_folded(&self.cities, term)
    }

    pub fn known_country(&self, term: &str) -> Option<&str> {
        find_folded(&self.countries, term)
    }
}

fn find_folded<'a>(names: &'a [String], term: &str) -> Option<&'a str> {
    let term = fold(term);
    names
        .iter()
        .find(|name| fold(name) == term)
        .map(String::as_str)
}

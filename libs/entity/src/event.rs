use chrono::NaiveDate;

/// Values scrapers write when they could not read a field.
pub const PLACEHOLDERS: [&str; 2] = ["", "N/A"];

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Event {
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
    pub source_url: Option<String>,
    pub verified: bool,
    pub night_plan: Option<String>,
}

/// Two postings with the same key describe the same real-world show.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct IdentityKey {
    pub artist: String,
    pub date: NaiveDate,
    pub time: String,
}

impl Event {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            artist: self
                .artist
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            date: self.date,
            time: self.time.clone().unwrap_or_default(),
        }
    }

    pub fn has_source(&self) -> bool {
        self.source_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_identity_key_normalizes_artist() {
        // Arrange
        let a = Event {
            artist: Some("Mayte".to_string()),
            date: date("2025-08-05"),
            time: Some("21:00".to_string()),
            ..Default::default()
        };
        let b = Event {
            artist: Some("  mayte ".to_string()),
            ..a.clone()
        };

        // Act & Assert
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_identity_key_keeps_time_distinct() {
        let a = Event {
            artist: Some("Mayte".to_string()),
            date: date("2025-08-05"),
            time: Some("21:00".to_string()),
            ..Default::default()
        };
        let b = Event {
            time: Some("23:00".to_string()),
            ..a.clone()
        };

        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_has_source_ignores_blank_url() {
        let blank = Event {
            source_url: Some("  ".to_string()),
            ..Default::default()
        };
        let set = Event {
            source_url: Some("https://example.org".to_string()),
            ..Default::default()
        };

        assert!(!blank.has_source());
        assert!(set.has_source());
        assert!(!Event::default().has_source());
    }
}

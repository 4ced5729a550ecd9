use entity::prelude::*;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

const STOP_WORDS: [&str; 13] = [
    "a", "al", "con", "de", "del", "el", "en", "la", "las", "los", "un",
    "una", "y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Artist,
    Description,
    City,
    Provincia,
    Venue,
    Country,
}

impl Field {
    pub const SEARCHABLE: [Field; 7] = [
        Field::Name,
        Field::Artist,
        Field::Description,
        Field::City,
        Field::Provincia,
        Field::Venue,
        Field::Country,
    ];

    fn weight(self) -> f32 {
        match self {
            Field::Artist => 3.0,
            Field::Name => 2.0,
            _ => 1.0,
        }
    }

    fn value(self, event: &EventEntity) -> Option<&str> {
        match self {
            Field::Name => event.name.as_deref(),
            Field::Artist => event.artist.as_deref(),
            Field::Description => event.description.as_deref(),
            Field::City => event.city.as_deref(),
            Field::Provincia => event.provincia.as_deref(),
            Field::Venue => event.venue.as_deref(),
            Field::Country => event.country.as_deref(),
        }
    }
}

/// Tokenized free-text predicate. An event matches when any term matches a
/// token of one of the fields, exactly or within one edit.
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuery {
    terms: Vec<String>,
    fields: Vec<Field>,
}

impl TextQuery {
    pub fn new(raw: &str, fields: &[Field]) -> Option<Self> {
        let tokens = tokenize(raw);
        let meaningful: Vec<String> = tokens
            .iter()
            .filter(|token| !STOP_WORDS.contains(&token.as_str()))
            .cloned()
            .collect();
        let terms = if meaningful.is_empty() { tokens } else { meaningful };

        if terms.is_empty() {
            return None;
        }

        Some(Self {
            terms,
            fields: fields.to_vec(),
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Relevance of `event`: the best weighted match of each term, summed.
    /// `None` when no term matches anything.
    pub fn score(&self, event: &EventEntity) -> Option<f32> {
        let indexed: Vec<(Field, Vec<String>)> = self
            .fields
            .iter()
            .filter_map(|field| field.value(event).map(|v| (*field, tokenize(v))))
            .collect();

        let total: f32 = self
            .terms
            .iter()
            .map(|term| {
                indexed
                    .iter()
                    .flat_map(|(field, tokens)| {
                        tokens.iter().filter_map(move |token| {
                            quality(term, token).map(|q| q * field.weight())
                        })
                    })
                    .fold(0.0_f32, f32::max)
            })
            .sum();

        (total > 0.0).then_some(total)
    }
}

fn quality(term: &str, token: &str) -> Option<f32> {
    if term == token {
        return Some(1.0);
    }

    within_one_edit(term, token).then_some(0.5)
}

/// Trimmed, lowercased, with diacritics removed.
pub fn fold(s: &str) -> String {
    s.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

pub fn tokenize(s: &str) -> Vec<String> {
    fold(s)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Levenshtein distance of at most one.
pub fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    match long.len() - short.len() {
        0 => short.iter().zip(long).filter(|(x, y)| x != y).count() <= 1,
        1 => {
            let prefix = short
                .iter()
                .zip(long.iter())
                .take_while(|(x, y)| x == y)
                .count();
            short[prefix..] == long[prefix + 1..]
        }
        _ => false,
    }
}

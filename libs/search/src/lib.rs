use entity::prelude::*;
use tracing::debug;

pub mod config;
pub mod filter;
pub mod reconcile;
pub mod text;

pub use config::{Interpretation, SearchConfig};
pub use filter::{plan, Clarification, EventFilter, EventQuery, SearchPlan};
pub use reconcile::reconcile;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("{field} must be a date formatted as YYYY-MM-DD, got {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("unknown search interpretation: {0:?}")]
    UnknownInterpretation(String),
}

/// Applies the free-text part of `filter`, then collapses duplicate postings.
/// Candidates come from the store, which has already evaluated every other
/// predicate, `hide_incomplete` included.
pub fn select(
    filter: &EventFilter,
    candidates: Vec<EventEntity>,
) -> Vec<EventEntity> {
    let total = candidates.len();
    let matched: Vec<EventEntity> = candidates
        .into_iter()
        .filter(|event| match &filter.text {
            None => true,
            Some(text) => match text.score(event) {
                Some(score) => {
                    debug!(task = "text match", id = %event.id, score);
                    true
                }
                None => false,
            },
        })
        .collect();

    let matched_count = matched.len();
    let events = reconcile(matched);

    debug!(
        task = "select",
        candidates = total,
        matched = matched_count,
        returned = events.len()
    );

    events
}

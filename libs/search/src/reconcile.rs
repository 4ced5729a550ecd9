use std::{cmp::Ordering, collections::HashSet};

use entity::prelude::*;

/// Date ascending, then verified records first, then records with a source.
fn priority(a: &EventEntity, b: &EventEntity) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| b.verified.cmp(&a.verified))
        .then_with(|| b.has_source().cmp(&a.has_source()))
}

/// Keeps one record per identity key: the first one in priority order. Ties
/// beyond the priority order keep the input order.
pub fn reconcile(mut events: Vec<EventEntity>) -> Vec<EventEntity> {
    events.sort_by(priority);

    let mut seen = HashSet::new();
    let mut kept: Vec<EventEntity> = events
        .into_iter()
        .filter(|event| seen.insert(event.identity_key()))
        .collect();

    kept.sort_by_key(|event| event.date);
    kept
}

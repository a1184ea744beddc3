//! Winner selection.
//!
//! A spin draws uniformly from the options that did not win any of the last
//! [`RECENT_EXCLUSION_WINDOW`] spins. When that filter leaves nothing (small
//! wheels, or every option recently won) the draw falls back to the full list.

use crate::types::{HistoryEntry, WheelOption, RECENT_EXCLUSION_WINDOW};
use rand::Rng;
use std::collections::HashSet;

/// Ids of the options that won the most recent spins
pub fn recently_won(history: &[HistoryEntry]) -> HashSet<&str> {
    history
        .iter()
        .take(RECENT_EXCLUSION_WINDOW)
        .map(HistoryEntry::id)
        .collect()
}

/// Indices (into `options`) eligible for the next draw
pub fn candidate_pool(options: &[WheelOption], history: &[HistoryEntry]) -> Vec<usize> {
    let excluded = recently_won(history);
    let pool: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, o)| !excluded.contains(o.id.as_str()))
        .map(|(i, _)| i)
        .collect();

    if pool.is_empty() {
        (0..options.len()).collect()
    } else {
        pool
    }
}

/// Choose the winning option's index, or `None` for an empty wheel
pub fn select_winner<R: Rng>(
    options: &[WheelOption],
    history: &[HistoryEntry],
    rng: &mut R,
) -> Option<usize> {
    if options.is_empty() {
        return None;
    }

    let pool = candidate_pool(options, history);
    Some(pool[rng.random_range(0..pool.len())])
}

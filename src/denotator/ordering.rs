// Copyright 2025 Cowboy AI, LLC.

//! Total order on denotators: form, then name (anonymous first), then
//! coordinate. The frame coordinate never takes part in comparisons.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::Denotator;

impl PartialEq for Denotator {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Denotator {}

impl PartialOrd for Denotator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Denotator {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        self.form()
            .cmp(other.form())
            .then_with(|| self.name().cmp(&other.name()))
            .then_with(|| self.coordinate_arc().cmp(other.coordinate_arc()))
    }
}

impl Hash for Denotator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.form().hash(state);
        self.name().hash(state);
        self.coordinate_arc().hash(state);
    }
}

/// Sort and deduplicate Power content
pub(crate) fn canonicalize(mut factors: Vec<Denotator>) -> Vec<Denotator> {
    factors.sort();
    factors.dedup();
    factors
}

/// True when `factors` is strictly increasing
pub(crate) fn is_canonical(factors: &[Denotator]) -> bool {
    factors.windows(2).all(|pair| pair[0] < pair[1])
}

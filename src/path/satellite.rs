// Copyright 2025 Cowboy AI, LLC.

//! Satellite and anchor queries
//!
//! Objects stored in a Power or List slot may themselves own further
//! collections of objects ("satellites"). These queries relate such
//! objects using the form graph alone.

use std::collections::VecDeque;

use tracing::trace;

use super::DenotatorPath;
use crate::form::{Form, FormKind};

impl DenotatorPath {
    /// Path of the object enclosing this position whose parent is a Power
    /// or List, `None` when no collection lies above
    pub fn top_path(&self) -> Option<DenotatorPath> {
        (1..=self.len())
            .rev()
            .find(|&k| self.form_at(k - 1).is_some_and(Form::is_collection))
            .and_then(|k| self.prefix(k))
    }

    /// The collection holding this object
    pub fn anchor_powerset_path(&self) -> Option<DenotatorPath> {
        self.top_path()?.parent_path()
    }

    /// Top path of the object owning the collection that holds this object
    pub fn anchor_path(&self) -> Option<DenotatorPath> {
        self.anchor_powerset_path()?.top_path()
    }

    /// Strict prefixes ending on a Colimit form
    pub fn parent_colimit_paths(&self) -> Vec<DenotatorPath> {
        (0..self.len())
            .filter(|&k| self.form_at(k).is_some_and(|f| f.kind() == FormKind::Colimit))
            .filter_map(|k| self.prefix(k))
            .collect()
    }

    /// True when both paths pass through a shared Colimit and take
    /// different branches there
    pub fn in_conflicting_colimit_positions(&self, other: &DenotatorPath) -> bool {
        if self.base_form() != other.base_form() {
            return false;
        }
        self.indices()
            .iter()
            .zip(other.indices())
            .position(|(a, b)| a != b)
            .is_some_and(|k| self.form_at(k).is_some_and(|f| f.kind() == FormKind::Colimit))
    }

    /// True when `anchor` is the anchor path of this path
    pub fn is_direct_satellite_of(&self, anchor: &DenotatorPath) -> bool {
        self.anchor_path().as_ref() == Some(anchor)
    }

    /// True when `anchor` appears anywhere on the chain of anchors above
    /// this path
    pub fn is_satellite_of(&self, anchor: &DenotatorPath) -> bool {
        let mut current = self.anchor_path();
        while let Some(path) = current {
            if path == *anchor {
                return true;
            }
            current = path.anchor_path();
        }
        false
    }

    /// All Power and List positions below the end form, in path order
    ///
    /// The search is breadth first. It starts at the end form even when that
    /// is itself a collection, never descends through a nested collection,
    /// and never re-expands a form already on its own ancestor chain.
    pub fn powerset_paths(&self) -> Vec<DenotatorPath> {
        let Some(start) = self.end_form() else {
            return Vec::new();
        };
        let mut found = Vec::new();
        let mut queue = VecDeque::from([(self.clone(), vec![start.clone()])]);
        while let Some((path, chain)) = queue.pop_front() {
            let Some(form) = path.end_form() else {
                continue;
            };
            let children = match form.kind() {
                FormKind::Simple => 0,
                FormKind::Power | FormKind::List => 1,
                FormKind::Limit | FormKind::Colimit => form.form_count(),
            };
            for index in 0..children {
                let Ok(child) = path.child_path(index) else {
                    continue;
                };
                let Some(child_form) = child.end_form().cloned() else {
                    continue;
                };
                if child_form.is_collection() {
                    trace!(path = %child, "collection found");
                    found.push(child);
                } else if !chain.contains(&child_form) {
                    let mut chain = chain.clone();
                    chain.push(child_form);
                    queue.push_back((child, chain));
                }
            }
        }
        found.sort();
        found
    }

    /// The `k`-th entry of [`DenotatorPath::powerset_paths`]
    pub fn powerset_path(&self, k: usize) -> Option<DenotatorPath> {
        self.powerset_paths().into_iter().nth(k)
    }
}

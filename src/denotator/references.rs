// Copyright 2025 Cowboy AI, LLC.

//! Name references: resolution against a dictionary and dependency lookup

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::construct::form_mismatch;
use super::content::Content;
use super::Denotator;
use crate::dictionary::Dictionary;
use crate::errors::{DenotatorError, DenotatorResult};

struct Resolver<'a, D: Dictionary + ?Sized> {
    dictionary: &'a D,
    in_progress: Vec<String>,
    // keyed by node address; the source handle is kept alive so the key stays unique
    memo: HashMap<usize, (Denotator, Denotator)>,
    replaced: usize,
}

impl<D: Dictionary + ?Sized> Resolver<'_, D> {
    fn resolve(&mut self, denotator: &Denotator) -> DenotatorResult<Denotator> {
        if let Some((_, resolved)) = self.memo.get(&denotator.key()) {
            return Ok(resolved.clone());
        }
        let resolved = match denotator.raw_content() {
            Content::Reference => self.follow(denotator)?,
            Content::Simple(_) => denotator.clone(),
            _ => {
                let address = denotator.address().clone();
                let content = denotator.map_factors(|factor| {
                    let resolved = self.resolve(factor)?;
                    resolved.change_address(&address)
                })?;
                match content {
                    Some(content) => denotator.with_content(address, content),
                    None => denotator.clone(),
                }
            }
        };
        self.memo
            .insert(denotator.key(), (denotator.clone(), resolved.clone()));
        Ok(resolved)
    }

    fn follow(&mut self, reference: &Denotator) -> DenotatorResult<Denotator> {
        let name = reference.name().unwrap_or_default().to_string();
        if self.in_progress.contains(&name) {
            return Err(DenotatorError::CyclicReference(name));
        }
        let target = self
            .dictionary
            .lookup_denotator(&name)
            .ok_or_else(|| DenotatorError::UnresolvedReference(name.clone()))?;
        if !target.has_form(reference.form()) {
            return Err(form_mismatch(reference.form(), target.form()));
        }
        self.in_progress.push(name);
        let resolved = self.resolve(&target);
        self.in_progress.pop();
        self.replaced += 1;
        resolved
    }
}

impl Denotator {
    /// Replace every reference placeholder by the named denotator from
    /// `dictionary`
    ///
    /// Resolved denotators are moved onto the address of the node holding
    /// them. Returns `self` when there was nothing to resolve.
    pub fn resolve_references<D: Dictionary + ?Sized>(
        &self,
        dictionary: &D,
    ) -> DenotatorResult<Denotator> {
        let mut resolver = Resolver {
            dictionary,
            in_progress: Vec::new(),
            memo: HashMap::new(),
            replaced: 0,
        };
        let resolved = resolver.resolve(self)?;
        if resolver.replaced > 0 {
            debug!(
                form = %self.form(),
                references = resolver.replaced,
                "references resolved"
            );
        }
        Ok(resolved)
    }

    /// Named denotators strictly below `self`, depth first, each handle once
    ///
    /// Unresolved references are reported but not entered.
    pub fn dependencies(&self) -> Vec<Denotator> {
        let mut visited = HashSet::new();
        let mut found = Vec::new();
        let mut stack: Vec<&Denotator> = self.raw_content().factors().iter().rev().collect();
        while let Some(current) = stack.pop() {
            if !visited.insert(current.key()) {
                continue;
            }
            if current.name().is_some() {
                found.push(current.clone());
            }
            stack.extend(current.raw_content().factors().iter().rev());
        }
        found
    }
}

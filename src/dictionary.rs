// Copyright 2025 Cowboy AI, LLC.

//! Name lookup for forms and denotators
//!
//! Reference resolution and persisted paths only need to look names up.
//! [`Dictionary`] is that narrow seam; [`Schema`] answers for forms and the
//! in-memory [`Repository`] answers for both.

use indexmap::IndexMap;
use tracing::debug;

use crate::denotator::Denotator;
use crate::errors::{DenotatorError, DenotatorResult};
use crate::form::{Form, Schema};

/// Lookup of forms and named denotators
#[cfg_attr(test, mockall::automock)]
pub trait Dictionary {
    /// Form registered under `name`
    fn lookup_form(&self, name: &str) -> Option<Form>;

    /// Denotator registered under `name`
    fn lookup_denotator(&self, name: &str) -> Option<Denotator>;
}

impl Dictionary for Schema {
    fn lookup_form(&self, name: &str) -> Option<Form> {
        self.form(name).ok()
    }

    fn lookup_denotator(&self, _name: &str) -> Option<Denotator> {
        None
    }
}

/// In-memory store of named denotators over one schema
#[derive(Debug, Clone)]
pub struct Repository {
    schema: Schema,
    denotators: IndexMap<String, Denotator>,
}

impl Repository {
    /// Empty repository over `schema`
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            denotators: IndexMap::new(),
        }
    }

    /// The schema backing the repository
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Store a named denotator, returning the one it displaces
    ///
    /// Anonymous denotators and denotators of forms from another schema are
    /// rejected.
    pub fn register(&mut self, denotator: Denotator) -> DenotatorResult<Option<Denotator>> {
        let Some(name) = denotator.name().map(str::to_string) else {
            return Err(DenotatorError::AnonymousDenotator(
                denotator.form().name().to_string(),
            ));
        };
        let form = denotator.form();
        if !form.schema().ptr_eq(&self.schema) {
            return Err(DenotatorError::FormMismatch {
                expected: "a form of the repository schema".to_string(),
                found: form.name().to_string(),
            });
        }
        Ok(self.denotators.insert(name, denotator))
    }

    /// Denotator stored under `name`
    pub fn get(&self, name: &str) -> Option<&Denotator> {
        self.denotators.get(name)
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.denotators.keys().map(String::as_str)
    }

    /// Number of stored denotators
    pub fn len(&self) -> usize {
        self.denotators.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.denotators.is_empty()
    }

    /// Resolve the references of every stored denotator against the
    /// repository itself
    ///
    /// Nothing is replaced unless every denotator resolves.
    pub fn resolve_all(&mut self) -> DenotatorResult<()> {
        let resolved = self
            .denotators
            .iter()
            .map(|(name, denotator)| Ok((name.clone(), denotator.resolve_references(&*self)?)))
            .collect::<DenotatorResult<Vec<_>>>()?;
        debug!(denotators = resolved.len(), "repository resolved");
        self.denotators.extend(resolved);
        Ok(())
    }
}

impl Dictionary for Repository {
    fn lookup_form(&self, name: &str) -> Option<Form> {
        self.schema.lookup_form(name)
    }

    fn lookup_denotator(&self, name: &str) -> Option<Denotator> {
        self.denotators.get(name).cloned()
    }
}

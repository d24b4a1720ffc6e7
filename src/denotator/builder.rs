// Copyright 2025 Cowboy AI, LLC.

//! Mutable editing of Power and List content
//!
//! Published denotators are immutable and freely shared. Bulk edits go
//! through a [`CollectionBuilder`], which owns its factors and produces a
//! fresh denotator on [`CollectionBuilder::build`].

use super::construct::form_mismatch;
use super::content::Content;
use super::ordering::canonicalize;
use super::Denotator;
use crate::algebra::Module;
use crate::errors::{DenotatorError, DenotatorResult};
use crate::form::{Form, FormKind};

/// Owned, editable factor list of a Power or List denotator
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    name: Option<String>,
    form: Form,
    element_form: Form,
    address: Module,
    factors: Vec<Denotator>,
}

impl CollectionBuilder {
    /// Empty collection of `form` at `address`
    pub fn new(form: &Form, address: Module) -> DenotatorResult<Self> {
        let element_form = match form.kind() {
            FormKind::Power | FormKind::List => form.element_form(),
            _ => None,
        }
        .ok_or_else(|| {
            DenotatorError::kind_mismatch("collection builder", "Power or List", form.kind())
        })?;
        Ok(Self {
            name: None,
            form: form.clone(),
            element_form,
            address,
            factors: Vec::new(),
        })
    }

    /// Start from the factors of an existing Power or List denotator
    pub fn from_denotator(denotator: &Denotator) -> DenotatorResult<Self> {
        let mut builder = Self::new(denotator.form(), denotator.address().clone())?;
        builder.name = denotator.name().map(str::to_string);
        builder.factors = denotator.factors().to_vec();
        Ok(builder)
    }

    /// Set the name of the built denotator
    pub fn named(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    fn admit(&self, factor: &Denotator) -> DenotatorResult<Denotator> {
        if !factor.has_form(&self.element_form) {
            return Err(form_mismatch(&self.element_form, factor.form()));
        }
        // placeholders stay at the null address until resolution moves them
        if factor.is_reference() {
            return Ok(factor.clone());
        }
        factor.change_address(&self.address)
    }

    fn out_of_range(&self, index: usize) -> DenotatorError {
        DenotatorError::IndexOutOfRange {
            form: self.form.name().to_string(),
            index,
            count: self.factors.len(),
        }
    }

    /// Overwrite the factor at `index`
    pub fn set_factor(&mut self, index: usize, factor: &Denotator) -> DenotatorResult<()> {
        if index >= self.factors.len() {
            return Err(self.out_of_range(index));
        }
        self.factors[index] = self.admit(factor)?;
        Ok(())
    }

    /// Append a factor
    pub fn append_factor(&mut self, factor: &Denotator) -> DenotatorResult<()> {
        let factor = self.admit(factor)?;
        self.factors.push(factor);
        Ok(())
    }

    /// Insert a factor before `index`; `index` may equal the factor count
    pub fn insert_factor(&mut self, index: usize, factor: &Denotator) -> DenotatorResult<()> {
        if index > self.factors.len() {
            return Err(self.out_of_range(index));
        }
        let factor = self.admit(factor)?;
        self.factors.insert(index, factor);
        Ok(())
    }

    /// Remove and return the factor at `index`
    pub fn remove_factor(&mut self, index: usize) -> DenotatorResult<Denotator> {
        if index >= self.factors.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.factors.remove(index))
    }

    /// Replace all factors at once
    pub fn replace_factors(&mut self, factors: &[Denotator]) -> DenotatorResult<()> {
        let admitted = factors
            .iter()
            .map(|factor| self.admit(factor))
            .collect::<DenotatorResult<Vec<_>>>()?;
        self.factors = admitted;
        Ok(())
    }

    /// Number of factors collected so far
    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    /// Factors collected so far, in insertion order
    pub fn factors(&self) -> &[Denotator] {
        &self.factors
    }

    /// Freeze into a denotator; Power factors are sorted and deduplicated
    pub fn build(self) -> Denotator {
        let content = match self.form.kind() {
            FormKind::Power => Content::Power(canonicalize(self.factors)),
            _ => Content::List(self.factors),
        };
        Denotator::from_parts(self.name, self.form, self.address, content)
    }
}

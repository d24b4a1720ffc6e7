// Copyright 2025 Cowboy AI, LLC.

//! Denotators: addressed instances of forms
//!
//! A denotator is a value of a [`Form`] parameterized by an address module.
//! Its content is carried by a [`Coordinate`] (a Yoneda morphism) whose
//! domain is the address; evaluating the coordinate at an element of the
//! address (`at`) yields another denotator.
//!
//! Denotators are immutable and cheap to clone. Every transformation returns
//! the very same handle when nothing changed, so callers can detect untouched
//! subtrees with [`Denotator::ptr_eq`]. Bulk editing of Power and List
//! content goes through [`CollectionBuilder`] instead of mutating shared
//! values.

mod builder;
mod construct;
mod content;
mod evaluate;
mod navigate;
mod ordering;
mod references;
mod simple;
mod validate;

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use crate::algebra::Module;
use crate::errors::{DenotatorError, DenotatorResult};
use crate::form::Form;

pub use builder::CollectionBuilder;
pub use content::{Content, Coordinate, DenotatorKind};

struct Node {
    name: Option<String>,
    form: Form,
    coordinate: Arc<Coordinate>,
    frame: Arc<Coordinate>,
}

/// An addressed instance of a [`Form`]
#[derive(Clone)]
pub struct Denotator(Arc<Node>);

impl Denotator {
    pub(crate) fn from_parts(
        name: Option<String>,
        form: Form,
        address: Module,
        content: Content,
    ) -> Self {
        let coordinate = Arc::new(Coordinate::new(address, content));
        Denotator(Arc::new(Node {
            name,
            form,
            frame: Arc::clone(&coordinate),
            coordinate,
        }))
    }

    fn with_coordinates(&self, coordinate: Arc<Coordinate>, frame: Arc<Coordinate>) -> Self {
        Denotator(Arc::new(Node {
            name: self.0.name.clone(),
            form: self.0.form.clone(),
            coordinate,
            frame,
        }))
    }

    /// Same name, form and frame, new address and content
    ///
    /// An independent frame is kept as is; callers that move the address
    /// must move the frame too through `carry_frame`.
    pub(crate) fn with_content(&self, address: Module, content: Content) -> Self {
        if self.shares_frame() {
            return Self::from_parts(self.0.name.clone(), self.0.form.clone(), address, content);
        }
        self.with_coordinates(
            Arc::new(Coordinate::new(address, content)),
            Arc::clone(&self.0.frame),
        )
    }

    /// The frame as a denotator of its own
    pub(crate) fn template(&self) -> Self {
        self.with_coordinates(Arc::clone(&self.0.frame), Arc::clone(&self.0.frame))
    }

    /// `moved` with the frame of `self` carried along by `f`
    pub(crate) fn carry_frame<F>(&self, moved: Denotator, f: F) -> DenotatorResult<Denotator>
    where
        F: FnOnce(&Denotator) -> DenotatorResult<Denotator>,
    {
        if self.shares_frame() {
            return Ok(moved);
        }
        let frame = f(&self.template())?;
        Ok(moved.with_coordinates(
            Arc::clone(&moved.0.coordinate),
            Arc::clone(&frame.0.coordinate),
        ))
    }

    /// Content without the placeholder check
    pub(crate) fn raw_content(&self) -> &Content {
        &self.0.coordinate.content
    }

    pub(crate) fn key(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Content of a resolved denotator
    ///
    /// # Panics
    ///
    /// Panics on an unresolved reference: placeholders must be eliminated by
    /// `resolve_references` before any structural operation.
    pub(crate) fn content(&self) -> &Content {
        let content = self.raw_content();
        if matches!(content, Content::Reference) {
            panic!(
                "unresolved reference to '{}' used before resolve_references",
                self.name().unwrap_or("<anonymous>")
            );
        }
        content
    }

    /// Apply `f` to every factor
    ///
    /// Returns `None` when every factor came back as the same handle.
    pub(crate) fn map_factors<F>(&self, mut f: F) -> DenotatorResult<Option<Content>>
    where
        F: FnMut(&Denotator) -> DenotatorResult<Denotator>,
    {
        let content = self.content();
        let factors = content.factors();
        let mut changed = false;
        let mut mapped = Vec::with_capacity(factors.len());
        for factor in factors {
            let next = f(factor)?;
            changed |= !next.ptr_eq(factor);
            mapped.push(next);
        }
        Ok(changed.then(|| content.with_factors(mapped)))
    }

    /// True when both handles share the same node
    pub fn ptr_eq(&self, other: &Denotator) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Name, `None` for anonymous denotators
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Form of the denotator
    pub fn form(&self) -> &Form {
        &self.0.form
    }

    /// True when the denotator has form `form`
    pub fn has_form(&self, form: &Form) -> bool {
        self.0.form == *form
    }

    /// Structural kind
    pub fn kind(&self) -> DenotatorKind {
        self.raw_content().kind()
    }

    /// True for unresolved placeholders
    pub fn is_reference(&self) -> bool {
        self.kind() == DenotatorKind::Reference
    }

    /// Address module (domain of the coordinate)
    pub fn address(&self) -> &Module {
        self.content();
        &self.0.coordinate.address
    }

    /// True when the address is zero-dimensional
    pub fn is_null_addressed(&self) -> bool {
        self.address().is_null()
    }

    /// The coordinate
    pub fn coordinate(&self) -> &Coordinate {
        self.content();
        &self.0.coordinate
    }

    /// The frame coordinate
    ///
    /// Normally identical to the coordinate; it differs after
    /// [`Denotator::evaluate_coordinate`], which keeps the frame as a
    /// template.
    pub fn frame_coordinate(&self) -> &Coordinate {
        self.content();
        &self.0.frame
    }

    /// True when the frame coordinate differs from the coordinate
    pub fn has_independent_frame(&self) -> bool {
        !Arc::ptr_eq(&self.0.coordinate, &self.0.frame) && self.0.coordinate != self.0.frame
    }

    pub(crate) fn shares_frame(&self) -> bool {
        Arc::ptr_eq(&self.0.coordinate, &self.0.frame)
    }

    pub(crate) fn frame_arc(&self) -> &Arc<Coordinate> {
        &self.0.frame
    }

    pub(crate) fn coordinate_arc(&self) -> &Arc<Coordinate> {
        &self.0.coordinate
    }

    /// Shallow copy under another name, sharing content
    pub fn named_copy(&self, name: Option<&str>) -> Denotator {
        if self.name() == name {
            return self.clone();
        }
        Denotator(Arc::new(Node {
            name: name.map(str::to_string),
            form: self.0.form.clone(),
            coordinate: Arc::clone(&self.0.coordinate),
            frame: Arc::clone(&self.0.frame),
        }))
    }

    /// Number of factors: 0 for Simple, 1 for Colimit
    pub fn factor_count(&self) -> usize {
        self.content().factors().len()
    }

    /// Child denotators in order (the active factor for a Colimit)
    pub fn factors(&self) -> &[Denotator] {
        self.content().factors()
    }

    /// The `index`-th factor, without the singleton rule of [`Denotator::get`]
    ///
    /// For a Colimit only the active branch index is accepted.
    pub fn factor(&self, index: usize) -> DenotatorResult<Denotator> {
        match self.content() {
            Content::Colimit { index: active, factor } => {
                if index == *active {
                    Ok(factor.clone())
                } else {
                    Err(self.inactive_branch(index, *active))
                }
            }
            Content::Simple(_) => Err(DenotatorError::kind_mismatch(
                "factor",
                "Limit, Colimit, Power or List",
                self.kind(),
            )),
            content => content
                .factors()
                .get(index)
                .cloned()
                .ok_or_else(|| self.out_of_range(index)),
        }
    }

    /// Factor of a labelled Limit or Colimit sub-form
    pub fn factor_by_label(&self, label: &str) -> DenotatorResult<Denotator> {
        let index = self.form().label_index(label).ok_or_else(|| {
            DenotatorError::InvalidPath {
                base_form: self.form().name().to_string(),
                indices: Vec::new(),
                reason: format!("no sub-form labelled '{label}'"),
            }
        })?;
        self.factor(index)
    }

    /// Active branch of a Colimit
    pub fn colimit_index(&self) -> Option<usize> {
        match self.content() {
            Content::Colimit { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub(crate) fn out_of_range(&self, index: usize) -> DenotatorError {
        DenotatorError::IndexOutOfRange {
            form: self.form().name().to_string(),
            index,
            count: self.raw_content().factors().len(),
        }
    }

    pub(crate) fn inactive_branch(&self, requested: usize, active: usize) -> DenotatorError {
        DenotatorError::InactiveBranch {
            form: self.form().name().to_string(),
            requested,
            active,
        }
    }

    fn fmt_tree(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let name = self.name().unwrap_or("_");
        let content = self.raw_content();
        match content {
            Content::Reference => return writeln!(f, "{indent}{name}:{} -> ?", self.form()),
            Content::Simple(morphism) => {
                return writeln!(f, "{indent}{name}:{} = {morphism}", self.form())
            }
            Content::Colimit { index, .. } => {
                writeln!(f, "{indent}{name}:{} [{index}]", self.form())?
            }
            _ => writeln!(f, "{indent}{name}:{}", self.form())?,
        }
        for factor in content.factors() {
            factor.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Debug for Denotator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Denotator")
            .field("name", &self.0.name)
            .field("form", &self.0.form)
            .field("address", &self.0.coordinate.address)
            .field("content", &self.0.coordinate.content)
            .finish()
    }
}

impl Display for Denotator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

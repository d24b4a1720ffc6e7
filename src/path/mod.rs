// Copyright 2025 Cowboy AI, LLC.

//! DenotatorPath: schema-level addressing of sub-denotators
//!
//! A path is a base form plus a sequence of indices. It is resolved against
//! the form graph only, never against an instance:
//!
//! - at a Limit or Colimit the index selects a declared sub-form
//! - at a Power or List every index selects the element form
//! - once a Simple form is reached, the remaining indices select module
//!   components
//!
//! Paths are totally ordered: shorter paths first, equal lengths
//! lexicographically by index, then by base form.

mod persist;
mod satellite;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::algebra::Module;
use crate::errors::{DenotatorError, DenotatorResult};
use crate::form::{Form, FormKind};

pub use persist::PersistedPath;

/// What a prefix of the path designates
#[derive(Debug, Clone)]
enum Step {
    Form(Form),
    Component(Module),
}

/// Schema-level address of a sub-denotator
#[derive(Debug, Clone)]
pub struct DenotatorPath {
    base_form: Form,
    indices: Vec<usize>,
    // trail[k] is reached after the first k indices
    trail: Vec<Step>,
}

impl DenotatorPath {
    /// The empty path over `base_form`
    pub fn root(base_form: &Form) -> Self {
        Self {
            base_form: base_form.clone(),
            indices: Vec::new(),
            trail: vec![Step::Form(base_form.clone())],
        }
    }

    /// Resolve `indices` against `base_form`
    pub fn new(base_form: &Form, indices: &[usize]) -> DenotatorResult<Self> {
        indices
            .iter()
            .try_fold(Self::root(base_form), |path, &index| path.child_path(index))
    }

    fn invalid(&self, index: usize, reason: String) -> DenotatorError {
        let mut indices = self.indices.clone();
        indices.push(index);
        DenotatorError::InvalidPath {
            base_form: self.base_form.name().to_string(),
            indices,
            reason,
        }
    }

    fn step(&self, index: usize) -> DenotatorResult<Step> {
        match self.last_step() {
            Step::Form(form) => match form.kind() {
                FormKind::Simple => {
                    let module = form.module().cloned().unwrap_or_else(Module::null_address);
                    component(&module, index).ok_or_else(|| {
                        self.invalid(index, format!("module {module} has no component {index}"))
                    })
                }
                FormKind::Power | FormKind::List => form
                    .element_form()
                    .map(Step::Form)
                    .ok_or_else(|| self.invalid(index, format!("{form} has no element form"))),
                FormKind::Limit | FormKind::Colimit => {
                    form.get_form(index).map(Step::Form).ok_or_else(|| {
                        self.invalid(
                            index,
                            format!("{form} has {} sub-form(s)", form.form_count()),
                        )
                    })
                }
            },
            Step::Component(module) => component(module, index).ok_or_else(|| {
                self.invalid(index, format!("module {module} has no component {index}"))
            }),
        }
    }

    fn last_step(&self) -> &Step {
        // the trail always holds the base form
        &self.trail[self.trail.len() - 1]
    }

    /// Path extended by `index`
    pub fn child_path(&self, index: usize) -> DenotatorResult<DenotatorPath> {
        let step = self.step(index)?;
        trace!(path = %self, index, "path extended");
        let mut child = self.clone();
        child.indices.push(index);
        child.trail.push(step);
        Ok(child)
    }

    /// Path without its last index, `None` for the root
    pub fn parent_path(&self) -> Option<DenotatorPath> {
        self.prefix(self.len().checked_sub(1)?)
    }

    /// The first `len` indices of the path
    pub(crate) fn prefix(&self, len: usize) -> Option<DenotatorPath> {
        if len > self.len() {
            return None;
        }
        Some(Self {
            base_form: self.base_form.clone(),
            indices: self.indices[..len].to_vec(),
            trail: self.trail[..=len].to_vec(),
        })
    }

    /// Indices `from..to`, re-based on the form reached after `from` indices
    pub fn sub_path(&self, from: usize, to: usize) -> DenotatorResult<DenotatorPath> {
        if from > to || to > self.len() {
            return Err(DenotatorError::InvalidPath {
                base_form: self.base_form.name().to_string(),
                indices: self.indices.clone(),
                reason: format!("sub-path {from}..{to} is out of bounds"),
            });
        }
        match &self.trail[from] {
            Step::Form(form) => Self::new(form, &self.indices[from..to]),
            Step::Component(_) => Err(DenotatorError::InvalidPath {
                base_form: self.base_form.name().to_string(),
                indices: self.indices.clone(),
                reason: format!("position {from} lies inside a module"),
            }),
        }
    }

    /// Concatenation; `other` must start at this path's end form
    pub fn append(&self, other: &DenotatorPath) -> DenotatorResult<DenotatorPath> {
        if self.end_form() != Some(&other.base_form) {
            return Err(DenotatorError::InvalidPath {
                base_form: self.base_form.name().to_string(),
                indices: self.indices.clone(),
                reason: format!("cannot append a path over {}", other.base_form),
            });
        }
        other
            .indices
            .iter()
            .try_fold(self.clone(), |path, &index| path.child_path(index))
    }

    /// True when `prefix` has the same base form and its indices start this path
    pub fn starts_with(&self, prefix: &DenotatorPath) -> bool {
        self.base_form == prefix.base_form && self.indices.starts_with(&prefix.indices)
    }

    /// Last index, `None` for the root
    pub fn last_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True for the empty path
    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    /// The indices
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Form the path starts from
    pub fn base_form(&self) -> &Form {
        &self.base_form
    }

    /// Form reached by the path, `None` once it continues into a module
    pub fn end_form(&self) -> Option<&Form> {
        match self.last_step() {
            Step::Form(form) => Some(form),
            Step::Component(_) => None,
        }
    }

    /// Deepest form visited
    pub fn last_form(&self) -> &Form {
        self.trail
            .iter()
            .rev()
            .find_map(|step| match step {
                Step::Form(form) => Some(form),
                Step::Component(_) => None,
            })
            .unwrap_or(&self.base_form)
    }

    /// Module at the end of the path, when it ends on or inside a Simple form
    pub fn module(&self) -> Option<&Module> {
        match self.last_step() {
            Step::Form(form) => form.module(),
            Step::Component(module) => Some(module),
        }
    }

    /// Number of indices consumed before a Simple form was reached
    pub fn element_path_index(&self) -> Option<usize> {
        self.trail
            .iter()
            .position(|step| matches!(step, Step::Form(form) if form.is_simple()))
    }

    /// True when indices continue past a Simple form
    pub fn is_element_path(&self) -> bool {
        self.element_path_index().is_some_and(|k| k < self.len())
    }

    /// Form reached after the first `depth` indices
    pub(crate) fn form_at(&self, depth: usize) -> Option<&Form> {
        match self.trail.get(depth)? {
            Step::Form(form) => Some(form),
            Step::Component(_) => None,
        }
    }
}

fn component(module: &Module, index: usize) -> Option<Step> {
    module.component_module(index).map(Step::Component)
}

impl PartialEq for DenotatorPath {
    fn eq(&self, other: &Self) -> bool {
        self.indices == other.indices && self.base_form == other.base_form
    }
}

impl Eq for DenotatorPath {}

impl PartialOrd for DenotatorPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DenotatorPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.indices.cmp(&other.indices))
            .then_with(|| self.base_form.cmp(&other.base_form))
    }
}

impl Hash for DenotatorPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base_form.hash(state);
        self.indices.hash(state);
    }
}

impl Display for DenotatorPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.base_form, self.indices)
    }
}

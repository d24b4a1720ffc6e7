// Copyright 2025 Cowboy AI, LLC.

//! Forms: the schema layer
//!
//! A form describes the shape of a denotator and nothing else. There are
//! five kinds:
//!
//! - **Simple**: wraps exactly one [`Module`]
//! - **Limit**: ordered product of (optionally labelled) sub-forms
//! - **Colimit**: tagged union of (optionally labelled) sub-forms
//! - **Power**: finite set of denotators of one sub-form
//! - **List**: finite sequence of denotators of one sub-form
//!
//! Forms live in a [`Schema`], an arena filled by [`SchemaBuilder`] in two
//! passes (declare every name, then link bodies), so self- and mutually
//! referential forms never need a placeholder type. A [`Form`] is a cheap
//! handle into that arena and is compared nominally.

mod defaults;
mod schema;

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::algebra::Module;

pub use schema::{Schema, SchemaBuilder};

/// Position of a form inside its schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormId(usize);

impl FormId {
    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

/// The five structural kinds of forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormKind {
    /// Wraps a module
    Simple,
    /// Product
    Limit,
    /// Tagged union
    Colimit,
    /// Unordered, deduplicated collection
    Power,
    /// Ordered collection
    List,
}

impl FormKind {
    /// True for Power and List
    pub fn is_collection(self) -> bool {
        matches!(self, FormKind::Power | FormKind::List)
    }
}

impl Display for FormKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormKind::Simple => "Simple",
            FormKind::Limit => "Limit",
            FormKind::Colimit => "Colimit",
            FormKind::Power => "Power",
            FormKind::List => "List",
        };
        f.write_str(s)
    }
}

/// Linked body of a form
#[derive(Debug, Clone)]
pub(crate) enum FormBody {
    Simple(Module),
    Limit(Vec<FormId>, IndexMap<String, usize>),
    Colimit(Vec<FormId>, IndexMap<String, usize>),
    Power(FormId),
    List(FormId),
}

#[derive(Debug, Clone)]
pub(crate) struct FormDef {
    pub(crate) name: String,
    pub(crate) body: FormBody,
}

/// Handle to a form registered in a [`Schema`]
///
/// Cloning is cheap. Two handles are equal when they designate the same
/// registered form; the structure of the form is never compared.
#[derive(Clone)]
pub struct Form {
    schema: Schema,
    id: FormId,
}

impl Form {
    pub(crate) fn new(schema: Schema, id: FormId) -> Self {
        Self { schema, id }
    }

    fn def(&self) -> &FormDef {
        self.schema.def(self.id)
    }

    fn at(&self, id: FormId) -> Form {
        Form::new(self.schema.clone(), id)
    }

    /// Arena handle
    pub fn id(&self) -> FormId {
        self.id
    }

    /// Schema the form is registered in
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Registered name
    pub fn name(&self) -> &str {
        &self.def().name
    }

    /// Structural kind
    pub fn kind(&self) -> FormKind {
        match self.def().body {
            FormBody::Simple(_) => FormKind::Simple,
            FormBody::Limit(..) => FormKind::Limit,
            FormBody::Colimit(..) => FormKind::Colimit,
            FormBody::Power(_) => FormKind::Power,
            FormBody::List(_) => FormKind::List,
        }
    }

    /// Module of a simple form
    pub fn module(&self) -> Option<&Module> {
        match &self.def().body {
            FormBody::Simple(module) => Some(module),
            _ => None,
        }
    }

    /// Number of sub-forms
    ///
    /// Power and List forms always report one: their cardinality is a
    /// property of denotators, not of the schema.
    pub fn form_count(&self) -> usize {
        match &self.def().body {
            FormBody::Simple(_) => 0,
            FormBody::Limit(factors, _) | FormBody::Colimit(factors, _) => factors.len(),
            FormBody::Power(_) | FormBody::List(_) => 1,
        }
    }

    /// The `index`-th sub-form
    ///
    /// For Power and List forms every index designates the element form.
    pub fn get_form(&self, index: usize) -> Option<Form> {
        match &self.def().body {
            FormBody::Simple(_) => None,
            FormBody::Limit(factors, _) | FormBody::Colimit(factors, _) => {
                factors.get(index).map(|id| self.at(*id))
            }
            FormBody::Power(id) | FormBody::List(id) => Some(self.at(*id)),
        }
    }

    /// All sub-forms in declaration order
    pub fn forms(&self) -> Vec<Form> {
        (0..self.form_count()).filter_map(|i| self.get_form(i)).collect()
    }

    /// Element form of a Power or List
    pub fn element_form(&self) -> Option<Form> {
        match &self.def().body {
            FormBody::Power(id) | FormBody::List(id) => Some(self.at(*id)),
            _ => None,
        }
    }

    /// Index of a labelled Limit/Colimit sub-form
    pub fn label_index(&self, label: &str) -> Option<usize> {
        match &self.def().body {
            FormBody::Limit(_, labels) | FormBody::Colimit(_, labels) => labels.get(label).copied(),
            _ => None,
        }
    }

    /// Label of the `index`-th sub-form, if it has one
    pub fn label(&self, index: usize) -> Option<&str> {
        match &self.def().body {
            FormBody::Limit(_, labels) | FormBody::Colimit(_, labels) => labels
                .iter()
                .find(|(_, i)| **i == index)
                .map(|(label, _)| label.as_str()),
            _ => None,
        }
    }

    /// True for Simple forms
    pub fn is_simple(&self) -> bool {
        self.kind() == FormKind::Simple
    }

    /// True for Power and List forms
    pub fn is_collection(&self) -> bool {
        self.kind().is_collection()
    }
}

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.schema.ptr_eq(&other.schema)
    }
}

impl Eq for Form {}

impl PartialOrd for Form {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Form {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        self.name()
            .cmp(other.name())
            .then_with(|| self.kind().cmp(&other.kind()))
            .then_with(|| self.schema.serial().cmp(&other.schema.serial()))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Hash for Form {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.schema.serial().hash(state);
        self.id.hash(state);
    }
}

impl Debug for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Form({}: {})", self.name(), self.kind())
    }
}

impl Display for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared arena backing a [`Schema`]
#[derive(Debug)]
pub(crate) struct SchemaData {
    pub(crate) serial: u64,
    pub(crate) forms: Vec<FormDef>,
    pub(crate) index: IndexMap<String, FormId>,
}

impl SchemaData {
    pub(crate) fn into_schema(self) -> Schema {
        Schema::from_data(Arc::new(self))
    }
}

pub(crate) fn form_id(index: usize) -> FormId {
    FormId(index)
}

// Copyright 2025 Cowboy AI, LLC.

//! Schema arena and its two-pass builder

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use super::{form_id, Form, FormBody, FormDef, FormId, SchemaData};
use crate::algebra::Module;
use crate::errors::{DenotatorError, DenotatorResult};

/// A linked, immutable set of forms
///
/// Cloning shares the arena. Forms obtained from different schemas are
/// never equal, even when their names coincide.
#[derive(Debug, Clone)]
pub struct Schema {
    data: Arc<SchemaData>,
}

impl Schema {
    pub(crate) fn from_data(data: Arc<SchemaData>) -> Self {
        Self { data }
    }

    pub(crate) fn def(&self, id: FormId) -> &FormDef {
        &self.data.forms[id.index()]
    }

    pub(crate) fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Creation sequence number, unique within the process
    pub(crate) fn serial(&self) -> u64 {
        self.data.serial
    }

    /// Look up a form by name
    pub fn form(&self, name: &str) -> DenotatorResult<Form> {
        self.data
            .index
            .get(name)
            .map(|id| Form::new(self.clone(), *id))
            .ok_or_else(|| DenotatorError::UnknownForm(name.to_string()))
    }

    /// True when a form called `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.data.index.contains_key(name)
    }

    /// Number of registered forms
    pub fn len(&self) -> usize {
        self.data.forms.len()
    }

    /// True when the schema has no forms
    pub fn is_empty(&self) -> bool {
        self.data.forms.is_empty()
    }

    /// All forms in canonical order
    pub fn forms(&self) -> Vec<Form> {
        let mut forms: Vec<Form> = (0..self.len())
            .map(|i| Form::new(self.clone(), form_id(i)))
            .collect();
        forms.sort();
        forms
    }
}

#[derive(Debug, Clone)]
enum Declaration {
    Simple(Module),
    Limit(Vec<(Option<String>, String)>),
    Colimit(Vec<(Option<String>, String)>),
    Power(String),
    List(String),
}

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Collects form declarations and links them into a [`Schema`]
///
/// Sub-forms are referenced by name and may be declared later, which is
/// how recursive schemas are written:
///
/// ```rust
/// use cim_denotator::{Module, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .simple("Onset", Module::reals())
///     .limit("Node", ["Onset", "Satellites"])
///     .power("Satellites", "Node")
///     .build()
///     .unwrap();
/// assert_eq!(schema.len(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SchemaBuilder {
    declarations: IndexMap<String, Declaration>,
    duplicates: Vec<String>,
}

impl SchemaBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(mut self, name: &str, declaration: Declaration) -> Self {
        if self.declarations.contains_key(name) {
            self.duplicates.push(name.to_string());
        } else {
            self.declarations.insert(name.to_string(), declaration);
        }
        self
    }

    /// Declare a simple form over `module`
    pub fn simple(self, name: &str, module: Module) -> Self {
        self.declare(name, Declaration::Simple(module))
    }

    /// Declare a limit form over unlabelled sub-forms
    pub fn limit<'a>(self, name: &str, factors: impl IntoIterator<Item = &'a str>) -> Self {
        let factors = factors.into_iter().map(|f| (None, f.to_string())).collect();
        self.declare(name, Declaration::Limit(factors))
    }

    /// Declare a limit form over `(label, sub-form)` pairs
    pub fn labeled_limit<'a>(
        self,
        name: &str,
        factors: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let factors = factors
            .into_iter()
            .map(|(label, f)| (Some(label.to_string()), f.to_string()))
            .collect();
        self.declare(name, Declaration::Limit(factors))
    }

    /// Declare a colimit form over unlabelled branches
    pub fn colimit<'a>(self, name: &str, branches: impl IntoIterator<Item = &'a str>) -> Self {
        let branches = branches.into_iter().map(|f| (None, f.to_string())).collect();
        self.declare(name, Declaration::Colimit(branches))
    }

    /// Declare a colimit form over `(label, sub-form)` pairs
    pub fn labeled_colimit<'a>(
        self,
        name: &str,
        branches: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let branches = branches
            .into_iter()
            .map(|(label, f)| (Some(label.to_string()), f.to_string()))
            .collect();
        self.declare(name, Declaration::Colimit(branches))
    }

    /// Declare a power (set) form
    pub fn power(self, name: &str, element: &str) -> Self {
        self.declare(name, Declaration::Power(element.to_string()))
    }

    /// Declare a list form
    pub fn list(self, name: &str, element: &str) -> Self {
        self.declare(name, Declaration::List(element.to_string()))
    }

    /// Link every declaration and freeze the schema
    ///
    /// Fails on duplicate names, references to undeclared forms, modules
    /// over `Z/nZ` with `n < 2`, colimits without branches and repeated
    /// labels.
    pub fn build(self) -> DenotatorResult<Schema> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(DenotatorError::DuplicateForm(name));
        }

        let index: IndexMap<String, FormId> = self
            .declarations
            .keys()
            .enumerate()
            .map(|(i, name)| (name.clone(), form_id(i)))
            .collect();

        let resolve = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| DenotatorError::UnknownForm(name.to_string()))
        };

        let mut forms = Vec::with_capacity(self.declarations.len());
        for (name, declaration) in &self.declarations {
            let body = match declaration {
                Declaration::Simple(module) => {
                    if !module.is_valid() {
                        return Err(DenotatorError::InvalidForm {
                            name: name.clone(),
                            reason: format!("module {module} needs every modulus to be at least 2"),
                        });
                    }
                    FormBody::Simple(module.clone())
                }
                Declaration::Limit(factors) => {
                    let (ids, labels) = link_factors(name, factors, &resolve)?;
                    FormBody::Limit(ids, labels)
                }
                Declaration::Colimit(branches) => {
                    if branches.is_empty() {
                        return Err(DenotatorError::InvalidForm {
                            name: name.clone(),
                            reason: "a colimit needs at least one branch".to_string(),
                        });
                    }
                    let (ids, labels) = link_factors(name, branches, &resolve)?;
                    FormBody::Colimit(ids, labels)
                }
                Declaration::Power(element) => FormBody::Power(resolve(element.as_str())?),
                Declaration::List(element) => FormBody::List(resolve(element.as_str())?),
            };
            forms.push(FormDef {
                name: name.clone(),
                body,
            });
        }

        let serial = NEXT_SERIAL.fetch_add(1, Ordering::Relaxed);
        debug!(forms = forms.len(), serial, "schema linked");
        Ok(SchemaData {
            serial,
            forms,
            index,
        }
        .into_schema())
    }
}

fn link_factors(
    name: &str,
    factors: &[(Option<String>, String)],
    resolve: &impl Fn(&str) -> DenotatorResult<FormId>,
) -> DenotatorResult<(Vec<FormId>, IndexMap<String, usize>)> {
    let mut ids = Vec::with_capacity(factors.len());
    let mut labels = IndexMap::new();
    for (i, (label, form)) in factors.iter().enumerate() {
        ids.push(resolve(form.as_str())?);
        if let Some(label) = label {
            if labels.insert(label.clone(), i).is_some() {
                return Err(DenotatorError::InvalidForm {
                    name: name.to_string(),
                    reason: format!("label '{label}' is used twice"),
                });
            }
        }
    }
    Ok((ids, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormKind;

    #[test]
    fn forward_and_self_references_are_linked() {
        let schema = SchemaBuilder::new()
            .limit("Node", ["Onset", "Satellites"])
            .power("Satellites", "Node")
            .simple("Onset", Module::reals())
            .build()
            .unwrap();

        let node = schema.form("Node").unwrap();
        let satellites = node.get_form(1).unwrap();
        assert_eq!(satellites.kind(), FormKind::Power);
        assert_eq!(satellites.element_form(), Some(node));
    }

    #[test]
    fn unknown_sub_forms_are_rejected() {
        let err = SchemaBuilder::new()
            .power("Score", "Note")
            .build()
            .unwrap_err();
        assert_eq!(err, DenotatorError::UnknownForm("Note".to_string()));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = SchemaBuilder::new()
            .simple("Onset", Module::reals())
            .simple("Onset", Module::integers())
            .build()
            .unwrap_err();
        assert_eq!(err, DenotatorError::DuplicateForm("Onset".to_string()));
    }

    #[test]
    fn empty_colimits_and_repeated_labels_are_invalid() {
        let empty: [&str; 0] = [];
        let err = SchemaBuilder::new().colimit("Nothing", empty).build().unwrap_err();
        assert!(matches!(err, DenotatorError::InvalidForm { .. }));

        let err = SchemaBuilder::new()
            .simple("Onset", Module::reals())
            .labeled_limit("Pair", [("x", "Onset"), ("x", "Onset")])
            .build()
            .unwrap_err();
        assert!(matches!(err, DenotatorError::InvalidForm { .. }));
    }

    #[test]
    fn degenerate_moduli_are_rejected() {
        use crate::algebra::Ring;

        let err = SchemaBuilder::new()
            .simple("Residue", Module::ring(Ring::Modular(0)))
            .build()
            .unwrap_err();
        assert!(matches!(err, DenotatorError::InvalidForm { ref name, .. } if name == "Residue"));

        let err = SchemaBuilder::new()
            .simple("Pair", Module::product(vec![Module::reals(), Module::ring(Ring::Modular(1))]))
            .build()
            .unwrap_err();
        assert!(matches!(err, DenotatorError::InvalidForm { .. }));

        let schema = SchemaBuilder::new()
            .simple("PitchClass", Module::ring(Ring::Modular(12)))
            .build()
            .unwrap();
        let d = schema
            .form("PitchClass")
            .unwrap()
            .create_default_denotator()
            .unwrap();
        assert_eq!(d.sum(&d).unwrap().element().unwrap(), Module::ring(Ring::Modular(12)).zero());
    }

    #[test]
    fn forms_are_listed_in_canonical_order() {
        let schema = SchemaBuilder::new()
            .simple("Pitch", Module::integers())
            .simple("Onset", Module::reals())
            .limit("Note", ["Onset", "Pitch"])
            .build()
            .unwrap();
        let names: Vec<String> = schema.forms().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, vec!["Note", "Onset", "Pitch"]);
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Validated constructors and trusted factories
//!
//! The validated constructors check every factor against the declared
//! sub-form and the common address. Composite constructors take their
//! address from the first resolved factor; an empty collection lives at the
//! null address (use [`super::CollectionBuilder`] for other addresses).
//! The `*_unchecked` factories skip validation except for debug assertions
//! and are meant for bulk construction from trusted data.

use super::content::Content;
use super::ordering::canonicalize;
use super::Denotator;
use crate::algebra::{Module, ModuleElement, ModuleMorphism};
use crate::errors::{DenotatorError, DenotatorResult};
use crate::form::{Form, FormKind};

fn owned(name: Option<&str>) -> Option<String> {
    name.map(str::to_string)
}

fn require_kind(operation: &'static str, form: &Form, kind: FormKind) -> DenotatorResult<()> {
    if form.kind() == kind {
        Ok(())
    } else {
        Err(DenotatorError::kind_mismatch(operation, kind.to_string(), form.kind()))
    }
}

pub(crate) fn form_mismatch(expected: &Form, found: &Form) -> DenotatorError {
    DenotatorError::FormMismatch {
        expected: expected.name().to_string(),
        found: found.name().to_string(),
    }
}

pub(crate) fn address_mismatch(expected: &Module, found: &Module) -> DenotatorError {
    DenotatorError::AddressMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Common address of `factors`, skipping unresolved references
fn common_address<'a>(
    factors: impl IntoIterator<Item = &'a Denotator>,
) -> DenotatorResult<Module> {
    let mut address: Option<&Module> = None;
    for factor in factors {
        if factor.is_reference() {
            continue;
        }
        match address {
            None => address = Some(factor.address()),
            Some(expected) if expected != factor.address() => {
                return Err(address_mismatch(expected, factor.address()))
            }
            Some(_) => {}
        }
    }
    Ok(address.cloned().unwrap_or_else(Module::null_address))
}

fn check_factor_form(factor: &Denotator, expected: &Form) -> DenotatorResult<()> {
    if factor.has_form(expected) {
        Ok(())
    } else {
        Err(form_mismatch(expected, factor.form()))
    }
}

fn element_form(operation: &'static str, form: &Form, kind: FormKind) -> DenotatorResult<Form> {
    require_kind(operation, form, kind)?;
    form.element_form()
        .ok_or_else(|| DenotatorError::kind_mismatch(operation, kind.to_string(), form.kind()))
}

impl Denotator {
    /// Constant simple denotator at the null address
    ///
    /// `element` is cast into the form's module; elements that cannot be
    /// cast raise a domain error.
    pub fn simple(name: Option<&str>, form: &Form, element: ModuleElement) -> DenotatorResult<Self> {
        require_kind("simple", form, FormKind::Simple)?;
        let module = form
            .module()
            .ok_or_else(|| DenotatorError::kind_mismatch("simple", "Simple", form.kind()))?;
        let value = element.cast(module).ok_or_else(|| DenotatorError::Domain {
            form: form.name().to_string(),
            module: module.to_string(),
            content: element.to_string(),
        })?;
        let address = Module::null_address();
        let morphism = ModuleMorphism::constant(address.clone(), value);
        Ok(Self::from_parts(owned(name), form.clone(), address, Content::Simple(morphism)))
    }

    /// Simple denotator whose address is the domain of `morphism`
    pub fn simple_with_morphism(
        name: Option<&str>,
        form: &Form,
        morphism: ModuleMorphism,
    ) -> DenotatorResult<Self> {
        require_kind("simple_with_morphism", form, FormKind::Simple)?;
        let module = form.module().ok_or_else(|| {
            DenotatorError::kind_mismatch("simple_with_morphism", "Simple", form.kind())
        })?;
        if morphism.codomain() != *module {
            return Err(DenotatorError::Domain {
                form: form.name().to_string(),
                module: module.to_string(),
                content: morphism.to_string(),
            });
        }
        let address = morphism.domain();
        Ok(Self::from_parts(owned(name), form.clone(), address, Content::Simple(morphism)))
    }

    /// Limit denotator with one factor per sub-form
    pub fn limit(name: Option<&str>, form: &Form, factors: Vec<Denotator>) -> DenotatorResult<Self> {
        require_kind("limit", form, FormKind::Limit)?;
        if factors.len() != form.form_count() {
            return Err(DenotatorError::FactorCount {
                form: form.name().to_string(),
                expected: form.form_count(),
                found: factors.len(),
            });
        }
        for (factor, expected) in factors.iter().zip(form.forms()) {
            check_factor_form(factor, &expected)?;
        }
        let address = common_address(&factors)?;
        Ok(Self::from_parts(owned(name), form.clone(), address, Content::Limit(factors)))
    }

    /// Colimit denotator with branch `index` active
    pub fn colimit(
        name: Option<&str>,
        form: &Form,
        index: usize,
        factor: Denotator,
    ) -> DenotatorResult<Self> {
        require_kind("colimit", form, FormKind::Colimit)?;
        let branch = form.get_form(index).ok_or_else(|| DenotatorError::IndexOutOfRange {
            form: form.name().to_string(),
            index,
            count: form.form_count(),
        })?;
        check_factor_form(&factor, &branch)?;
        let address = common_address(std::iter::once(&factor))?;
        Ok(Self::from_parts(
            owned(name),
            form.clone(),
            address,
            Content::Colimit { index, factor },
        ))
    }

    /// Power denotator; factors are sorted and deduplicated
    pub fn power(name: Option<&str>, form: &Form, factors: Vec<Denotator>) -> DenotatorResult<Self> {
        let element = element_form("power", form, FormKind::Power)?;
        for factor in &factors {
            check_factor_form(factor, &element)?;
        }
        let address = common_address(&factors)?;
        Ok(Self::from_parts(
            owned(name),
            form.clone(),
            address,
            Content::Power(canonicalize(factors)),
        ))
    }

    /// List denotator; factor order is kept
    pub fn list(name: Option<&str>, form: &Form, factors: Vec<Denotator>) -> DenotatorResult<Self> {
        let element = element_form("list", form, FormKind::List)?;
        for factor in &factors {
            check_factor_form(factor, &element)?;
        }
        let address = common_address(&factors)?;
        Ok(Self::from_parts(owned(name), form.clone(), address, Content::List(factors)))
    }

    /// Placeholder for the denotator called `name`, to be replaced by
    /// [`Denotator::resolve_references`]
    pub fn reference(name: &str, form: &Form) -> Self {
        Self::from_parts(
            Some(name.to_string()),
            form.clone(),
            Module::null_address(),
            Content::Reference,
        )
    }

    /// Limit denotator without validation.
    pub fn limit_unchecked(
        name: Option<&str>,
        form: &Form,
        address: Module,
        factors: Vec<Denotator>,
    ) -> Self {
        debug_assert_eq!(form.kind(), FormKind::Limit);
        debug_assert_eq!(factors.len(), form.form_count());
        Self::from_parts(owned(name), form.clone(), address, Content::Limit(factors))
    }

    /// Colimit denotator without validation.
    pub fn colimit_unchecked(
        name: Option<&str>,
        form: &Form,
        address: Module,
        index: usize,
        factor: Denotator,
    ) -> Self {
        debug_assert_eq!(form.kind(), FormKind::Colimit);
        debug_assert!(index < form.form_count());
        Self::from_parts(
            owned(name),
            form.clone(),
            address,
            Content::Colimit { index, factor },
        )
    }

    /// Power denotator without validation. Factors must already be in
    /// canonical order.
    pub fn power_unchecked(
        name: Option<&str>,
        form: &Form,
        address: Module,
        factors: Vec<Denotator>,
    ) -> Self {
        debug_assert_eq!(form.kind(), FormKind::Power);
        debug_assert!(super::ordering::is_canonical(&factors));
        Self::from_parts(owned(name), form.clone(), address, Content::Power(factors))
    }

    /// List denotator without validation.
    pub fn list_unchecked(
        name: Option<&str>,
        form: &Form,
        address: Module,
        factors: Vec<Denotator>,
    ) -> Self {
        debug_assert_eq!(form.kind(), FormKind::List);
        Self::from_parts(owned(name), form.clone(), address, Content::List(factors))
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Module morphisms
//!
//! Morphisms are plain values: composition builds a new morphism instead of
//! a closure, so morphisms can be compared, ordered and serialized like any
//! other denotator content.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::element::ModuleElement;
use super::module::Module;
use super::ring::{Ring, Scalar};

/// Raised when a morphism is applied to an element outside its domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Mapping error: {element} is not an element of {domain}")]
pub struct MappingError {
    domain: Module,
    element: ModuleElement,
}

impl MappingError {
    /// Create a new mapping error
    pub fn new(domain: Module, element: ModuleElement) -> Self {
        Self { domain, element }
    }

    /// Domain the element was expected in
    pub fn domain(&self) -> &Module {
        &self.domain
    }

    /// The rejected element
    pub fn element(&self) -> &ModuleElement {
        &self.element
    }
}

/// A morphism between modules
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleMorphism {
    /// Maps everything to `value`
    Constant {
        /// Domain module
        domain: Module,
        /// The constant value
        value: ModuleElement,
    },
    /// Identity on a module
    Identity(Module),
    /// Projection onto one component
    Projection {
        /// Domain module
        domain: Module,
        /// Component index
        index: usize,
        /// Module of the component
        codomain: Module,
    },
    /// `x -> A x + b` between free modules over one ring
    Affine {
        /// Coefficient ring
        ring: Ring,
        /// Rank of the domain
        columns: usize,
        /// Row-major matrix, one row per codomain coordinate
        matrix: Vec<Vec<Scalar>>,
        /// Translation part
        shift: Vec<Scalar>,
    },
    /// Canonical inclusion of `domain` into `codomain` (`Z^n` into `R^n`)
    Embedding {
        /// Domain module
        domain: Module,
        /// Module the domain embeds into
        codomain: Module,
    },
    /// `outer ∘ inner`
    Composition {
        /// Applied first
        inner: Box<ModuleMorphism>,
        /// Applied second
        outer: Box<ModuleMorphism>,
    },
    /// Pointwise sum
    Sum(Box<ModuleMorphism>, Box<ModuleMorphism>),
    /// Pointwise difference
    Difference(Box<ModuleMorphism>, Box<ModuleMorphism>),
}

impl ModuleMorphism {
    /// Constant morphism on `domain`
    pub fn constant(domain: Module, value: ModuleElement) -> Self {
        ModuleMorphism::Constant { domain, value }
    }

    /// Identity on `module`
    pub fn identity(module: Module) -> Self {
        ModuleMorphism::Identity(module)
    }

    /// Projection onto the `index`-th component of `domain`
    pub fn projection(domain: Module, index: usize) -> Option<Self> {
        let codomain = domain.component_module(index)?;
        Some(ModuleMorphism::Projection {
            domain,
            index,
            codomain,
        })
    }

    /// Affine map `x -> matrix * x + shift` over `ring`
    ///
    /// Every row must have `columns` entries and `shift` one entry per row.
    pub fn affine(
        ring: Ring,
        columns: usize,
        matrix: Vec<Vec<Scalar>>,
        shift: Vec<Scalar>,
    ) -> Option<Self> {
        if matrix.len() != shift.len() || matrix.iter().any(|row| row.len() != columns) {
            return None;
        }
        let cast = |values: Vec<Scalar>| {
            values
                .into_iter()
                .map(|v| v.cast(ring))
                .collect::<Option<Vec<_>>>()
        };
        let matrix = matrix.into_iter().map(cast).collect::<Option<Vec<_>>>()?;
        let shift = cast(shift)?;
        Some(ModuleMorphism::Affine {
            ring,
            columns,
            matrix,
            shift,
        })
    }

    /// Translation `x -> x + shift` on `ring^shift.len()`
    pub fn translation(ring: Ring, shift: Vec<Scalar>) -> Option<Self> {
        let n = shift.len();
        let matrix = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { ring.one() } else { ring.zero() })
                    .collect()
            })
            .collect();
        Self::affine(ring, n, matrix, shift)
    }

    /// Canonical inclusion of `domain` into `codomain`
    ///
    /// `None` unless `domain` embeds into `codomain`; an embedding of a
    /// module into itself is its identity.
    pub fn embedding(domain: Module, codomain: Module) -> Option<Self> {
        if domain == codomain {
            return Some(ModuleMorphism::Identity(domain));
        }
        domain
            .embeds_into(&codomain)
            .then_some(ModuleMorphism::Embedding { domain, codomain })
    }

    /// Uniform scaling `x -> factor * x` on `ring^dim`
    pub fn scaling(ring: Ring, dim: usize, factor: Scalar) -> Option<Self> {
        let matrix = (0..dim)
            .map(|i| {
                (0..dim)
                    .map(|j| if i == j { factor } else { ring.zero() })
                    .collect()
            })
            .collect();
        Self::affine(ring, dim, matrix, vec![ring.zero(); dim])
    }

    /// Domain module
    pub fn domain(&self) -> Module {
        match self {
            ModuleMorphism::Constant { domain, .. } => domain.clone(),
            ModuleMorphism::Identity(module) => module.clone(),
            ModuleMorphism::Projection { domain, .. } => domain.clone(),
            ModuleMorphism::Affine { ring, columns, .. } => Module::free(*ring, *columns),
            ModuleMorphism::Embedding { domain, .. } => domain.clone(),
            ModuleMorphism::Composition { inner, .. } => inner.domain(),
            ModuleMorphism::Sum(a, _) | ModuleMorphism::Difference(a, _) => a.domain(),
        }
    }

    /// Codomain module
    pub fn codomain(&self) -> Module {
        match self {
            ModuleMorphism::Constant { value, .. } => value.module(),
            ModuleMorphism::Identity(module) => module.clone(),
            ModuleMorphism::Projection { codomain, .. } => codomain.clone(),
            ModuleMorphism::Affine { ring, shift, .. } => Module::free(*ring, shift.len()),
            ModuleMorphism::Embedding { codomain, .. } => codomain.clone(),
            ModuleMorphism::Composition { outer, .. } => outer.codomain(),
            ModuleMorphism::Sum(a, _) | ModuleMorphism::Difference(a, _) => a.codomain(),
        }
    }

    /// True for constant morphisms
    pub fn is_constant(&self) -> bool {
        matches!(self, ModuleMorphism::Constant { .. })
    }

    /// True for identities
    pub fn is_identity(&self) -> bool {
        matches!(self, ModuleMorphism::Identity(_))
    }

    /// The value of a constant morphism
    pub fn constant_value(&self) -> Option<&ModuleElement> {
        match self {
            ModuleMorphism::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Apply the morphism
    pub fn map(&self, element: &ModuleElement) -> Result<ModuleElement, MappingError> {
        let domain = self.domain();
        if !domain.contains(element) {
            return Err(MappingError::new(domain, element.clone()));
        }
        self.map_unchecked(element)
            .ok_or_else(|| MappingError::new(domain, element.clone()))
    }

    fn map_unchecked(&self, element: &ModuleElement) -> Option<ModuleElement> {
        match self {
            ModuleMorphism::Constant { value, .. } => Some(value.clone()),
            ModuleMorphism::Identity(_) => Some(element.clone()),
            ModuleMorphism::Projection { index, .. } => element.component(*index),
            ModuleMorphism::Affine {
                ring,
                matrix,
                shift,
                ..
            } => {
                let x = element.values()?;
                let values = matrix
                    .iter()
                    .zip(shift)
                    .map(|(row, b)| {
                        row.iter()
                            .zip(x)
                            .fold(*b, |acc, (a, v)| acc.add(a.mul(*v)))
                    })
                    .collect();
                Some(ModuleElement::Vector {
                    ring: *ring,
                    values,
                })
            }
            ModuleMorphism::Embedding { codomain, .. } => element.cast(codomain),
            ModuleMorphism::Composition { inner, outer } => {
                outer.map_unchecked(&inner.map_unchecked(element)?)
            }
            ModuleMorphism::Sum(a, b) => a.map_unchecked(element)?.sum(&b.map_unchecked(element)?),
            ModuleMorphism::Difference(a, b) => a
                .map_unchecked(element)?
                .difference(&b.map_unchecked(element)?),
        }
    }

    /// `self ∘ inner`, when the codomain of `inner` is the domain of `self`
    pub fn compose(&self, inner: &ModuleMorphism) -> Option<ModuleMorphism> {
        if inner.codomain() != self.domain() {
            return None;
        }
        let composed = match (self, inner) {
            (ModuleMorphism::Identity(_), _) => inner.clone(),
            (_, ModuleMorphism::Identity(_)) => self.clone(),
            (ModuleMorphism::Constant { value, .. }, _) => {
                ModuleMorphism::constant(inner.domain(), value.clone())
            }
            (_, ModuleMorphism::Constant { domain, value }) => {
                ModuleMorphism::constant(domain.clone(), self.map(value).ok()?)
            }
            _ => ModuleMorphism::Composition {
                inner: Box::new(inner.clone()),
                outer: Box::new(self.clone()),
            },
        };
        Some(composed)
    }

    /// Pointwise sum of two parallel morphisms
    pub fn sum(&self, other: &ModuleMorphism) -> Option<ModuleMorphism> {
        if !self.is_parallel_to(other) {
            return None;
        }
        match (self.constant_value(), other.constant_value()) {
            (Some(a), Some(b)) => Some(ModuleMorphism::constant(self.domain(), a.sum(b)?)),
            _ => Some(ModuleMorphism::Sum(
                Box::new(self.clone()),
                Box::new(other.clone()),
            )),
        }
    }

    /// Pointwise difference of two parallel morphisms
    pub fn difference(&self, other: &ModuleMorphism) -> Option<ModuleMorphism> {
        if !self.is_parallel_to(other) {
            return None;
        }
        match (self.constant_value(), other.constant_value()) {
            (Some(a), Some(b)) => Some(ModuleMorphism::constant(self.domain(), a.difference(b)?)),
            _ => Some(ModuleMorphism::Difference(
                Box::new(self.clone()),
                Box::new(other.clone()),
            )),
        }
    }

    /// Evaluate at `element`: the constant morphism on the same domain
    /// whose value is `self(element)`
    pub fn at(&self, element: &ModuleElement) -> Result<ModuleMorphism, MappingError> {
        let value = self.map(element)?;
        Ok(ModuleMorphism::constant(self.domain(), value))
    }

    /// Move the morphism onto another domain
    ///
    /// Constants move anywhere. Any other morphism moves onto a module that
    /// embeds into its domain by precomposing with the canonical embedding,
    /// so a morphism on `R` moves onto `Z`.
    pub fn change_domain(&self, domain: &Module) -> Option<ModuleMorphism> {
        if self.domain() == *domain {
            return Some(self.clone());
        }
        match self {
            ModuleMorphism::Constant { value, .. } => {
                Some(ModuleMorphism::constant(domain.clone(), value.clone()))
            }
            _ => self.compose(&ModuleMorphism::embedding(domain.clone(), self.domain())?),
        }
    }

    fn is_parallel_to(&self, other: &ModuleMorphism) -> bool {
        self.domain() == other.domain() && self.codomain() == other.codomain()
    }
}

impl Display for ModuleMorphism {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModuleMorphism::Constant { value, .. } => write!(f, "{value}"),
            ModuleMorphism::Identity(module) => write!(f, "id[{module}]"),
            ModuleMorphism::Projection { index, .. } => write!(f, "pr[{index}]"),
            ModuleMorphism::Affine { ring, columns, shift, .. } => {
                write!(f, "affine[{ring}^{columns} -> {ring}^{}]", shift.len())
            }
            ModuleMorphism::Embedding { domain, codomain } => write!(f, "in[{domain} -> {codomain}]"),
            ModuleMorphism::Composition { inner, outer } => write!(f, "{outer} . {inner}"),
            ModuleMorphism::Sum(a, b) => write!(f, "({a} + {b})"),
            ModuleMorphism::Difference(a, b) => write!(f, "({a} - {b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift_by(amount: f64) -> ModuleMorphism {
        ModuleMorphism::translation(Ring::Reals, vec![Scalar::Real(amount)]).unwrap()
    }

    #[test]
    fn affine_maps_apply_matrix_and_shift() {
        let m = ModuleMorphism::affine(
            Ring::Reals,
            2,
            vec![
                vec![Scalar::Real(1.0), Scalar::Real(2.0)],
                vec![Scalar::Real(0.0), Scalar::Real(1.0)],
            ],
            vec![Scalar::Real(1.0), Scalar::Real(0.0)],
        )
        .unwrap();
        let image = m.map(&ModuleElement::reals(&[3.0, 4.0])).unwrap();
        assert_eq!(image, ModuleElement::reals(&[12.0, 4.0]));
    }

    #[test]
    fn map_rejects_elements_outside_the_domain() {
        let err = shift_by(1.0).map(&ModuleElement::integer(1)).unwrap_err();
        assert_eq!(err.domain(), &Module::reals());
        assert_eq!(err.element(), &ModuleElement::integer(1));
    }

    #[test]
    fn compose_shortcuts_constants_and_identities() {
        let f = shift_by(2.0);
        let id = ModuleMorphism::identity(Module::reals());
        assert_eq!(f.compose(&id), Some(f.clone()));
        assert_eq!(id.compose(&f), Some(f.clone()));

        let c = ModuleMorphism::constant(Module::null_address(), ModuleElement::real(1.0));
        assert_eq!(
            f.compose(&c),
            Some(ModuleMorphism::constant(
                Module::null_address(),
                ModuleElement::real(3.0)
            ))
        );
        assert_eq!(c.compose(&f), None);

        let g = f.compose(&f).unwrap();
        assert_eq!(g.map(&ModuleElement::real(0.0)).unwrap(), ModuleElement::real(4.0));
    }

    #[test]
    fn evaluation_yields_a_constant_on_the_same_domain() {
        let f = shift_by(0.5);
        let at = f.at(&ModuleElement::real(1.0)).unwrap();
        assert_eq!(at, ModuleMorphism::constant(Module::reals(), ModuleElement::real(1.5)));
        assert_eq!(at.at(&ModuleElement::real(7.0)).unwrap(), at);
    }

    #[test]
    fn constants_change_domain_freely() {
        let c = ModuleMorphism::constant(Module::reals(), ModuleElement::integer(4));
        let moved = c.change_domain(&Module::free(Ring::Reals, 3)).unwrap();
        assert_eq!(moved.domain(), Module::free(Ring::Reals, 3));
    }

    #[test]
    fn change_domain_precomposes_the_embedding() {
        let moved = shift_by(1.0).change_domain(&Module::integers()).unwrap();
        assert_eq!(moved.domain(), Module::integers());
        assert_eq!(moved.codomain(), Module::reals());
        assert_eq!(moved.map(&ModuleElement::integer(2)).unwrap(), ModuleElement::real(3.0));

        assert!(shift_by(1.0).change_domain(&Module::free(Ring::Reals, 2)).is_none());
        let on_integers = ModuleMorphism::identity(Module::integers());
        assert!(on_integers.change_domain(&Module::reals()).is_none());
    }

    #[test]
    fn embedding_needs_an_inclusion() {
        assert_eq!(
            ModuleMorphism::embedding(Module::reals(), Module::reals()),
            Some(ModuleMorphism::identity(Module::reals()))
        );
        assert!(ModuleMorphism::embedding(Module::reals(), Module::integers()).is_none());
        let inclusion = ModuleMorphism::embedding(Module::integers(), Module::reals()).unwrap();
        assert_eq!(
            inclusion.map(&ModuleElement::integer(-4)).unwrap(),
            ModuleElement::real(-4.0)
        );
        assert_eq!(inclusion.to_string(), "in[Z -> R]");
    }

    #[test]
    fn sums_of_constants_stay_constant() {
        let a = ModuleMorphism::constant(Module::reals(), ModuleElement::real(1.0));
        let b = ModuleMorphism::constant(Module::reals(), ModuleElement::real(2.5));
        assert_eq!(a.sum(&b).unwrap().constant_value(), Some(&ModuleElement::real(3.5)));
        let mixed = a.difference(&shift_by(1.0)).unwrap();
        assert_eq!(mixed.map(&ModuleElement::real(1.0)).unwrap(), ModuleElement::real(-1.0));
    }
}

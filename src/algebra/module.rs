// Copyright 2025 Cowboy AI, LLC.

//! Modules: free modules over a ring and finite direct products

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::element::ModuleElement;
use super::ring::Ring;

/// A module over one of the coefficient rings
///
/// `Free { dim: 0, .. }` is the null module of its ring. Denotators whose
/// address is zero-dimensional are null-addressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Module {
    /// The free module `ring^dim`
    Free {
        /// Coefficient ring
        ring: Ring,
        /// Rank of the module
        dim: usize,
    },
    /// Direct product of heterogeneous modules
    Product(Vec<Module>),
}

impl Module {
    /// The free module `ring^dim`
    pub fn free(ring: Ring, dim: usize) -> Self {
        Module::Free { ring, dim }
    }

    /// The ring as a one-dimensional module over itself
    pub fn ring(ring: Ring) -> Self {
        Module::Free { ring, dim: 1 }
    }

    /// The zero-dimensional module over `ring`
    pub fn null(ring: Ring) -> Self {
        Module::Free { ring, dim: 0 }
    }

    /// Canonical address of constant denotators (`Z^0`)
    pub fn null_address() -> Self {
        Module::null(Ring::Integers)
    }

    /// Shorthand for `Z`
    pub fn integers() -> Self {
        Module::ring(Ring::Integers)
    }

    /// Shorthand for `R`
    pub fn reals() -> Self {
        Module::ring(Ring::Reals)
    }

    /// Direct product of the given modules
    pub fn product(factors: Vec<Module>) -> Self {
        Module::Product(factors)
    }

    /// Total rank
    pub fn dimension(&self) -> usize {
        match self {
            Module::Free { dim, .. } => *dim,
            Module::Product(factors) => factors.iter().map(Module::dimension).sum(),
        }
    }

    /// False when some coefficient ring is invalid (see [`Ring::is_valid`])
    pub fn is_valid(&self) -> bool {
        match self {
            Module::Free { ring, .. } => ring.is_valid(),
            Module::Product(factors) => factors.iter().all(Module::is_valid),
        }
    }

    /// True when the canonical ring embedding carries `self` into `other`
    ///
    /// Both modules need the same shape; every coefficient ring must embed
    /// into the matching one (see [`Ring::embeds_into`]).
    pub fn embeds_into(&self, other: &Module) -> bool {
        match (self, other) {
            (Module::Free { ring: a, dim: m }, Module::Free { ring: b, dim: n }) => {
                m == n && a.embeds_into(*b)
            }
            (Module::Product(xs), Module::Product(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x.embeds_into(y))
            }
            _ => false,
        }
    }

    /// True for zero-dimensional modules
    pub fn is_null(&self) -> bool {
        self.dimension() == 0
    }

    /// Coefficient ring, when the module has a single one
    pub fn coefficient_ring(&self) -> Option<Ring> {
        match self {
            Module::Free { ring, .. } => Some(*ring),
            Module::Product(factors) => {
                let mut rings = factors.iter().map(Module::coefficient_ring);
                let first = rings.next()??;
                rings.all(|r| r == Some(first)).then_some(first)
            }
        }
    }

    /// Number of components an element path can descend into
    ///
    /// A one-dimensional free module is atomic and has no components.
    pub fn component_count(&self) -> usize {
        match self {
            Module::Free { dim, .. } if *dim >= 2 => *dim,
            Module::Free { .. } => 0,
            Module::Product(factors) => factors.len(),
        }
    }

    /// Module of the `index`-th component
    pub fn component_module(&self, index: usize) -> Option<Module> {
        match self {
            Module::Free { ring, dim } if *dim >= 2 && index < *dim => Some(Module::ring(*ring)),
            Module::Free { .. } => None,
            Module::Product(factors) => factors.get(index).cloned(),
        }
    }

    /// Zero element
    pub fn zero(&self) -> ModuleElement {
        match self {
            Module::Free { ring, dim } => ModuleElement::Vector {
                ring: *ring,
                values: vec![ring.zero(); *dim],
            },
            Module::Product(factors) => {
                ModuleElement::Product(factors.iter().map(Module::zero).collect())
            }
        }
    }

    /// True when `element` is an element of this module
    pub fn contains(&self, element: &ModuleElement) -> bool {
        element.module() == *self
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Module::Free { ring, dim: 1 } => write!(f, "{ring}"),
            Module::Free { ring, dim } => write!(f, "{ring}^{dim}"),
            Module::Product(factors) => {
                let rendered = factors
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(" x ");
                write!(f, "({rendered})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_module_components() {
        let r3 = Module::free(Ring::Reals, 3);
        assert_eq!(r3.component_count(), 3);
        assert_eq!(r3.component_module(2), Some(Module::reals()));
        assert_eq!(r3.component_module(3), None);
        assert_eq!(Module::reals().component_count(), 0);
        assert_eq!(Module::reals().component_module(0), None);
    }

    #[test]
    fn product_modules_descend_into_factors() {
        let m = Module::product(vec![Module::integers(), Module::free(Ring::Reals, 2)]);
        assert_eq!(m.dimension(), 3);
        assert_eq!(m.component_count(), 2);
        assert_eq!(m.component_module(1), Some(Module::free(Ring::Reals, 2)));
        assert_eq!(m.coefficient_ring(), None);
        assert_eq!(m.to_string(), "(Z x R^2)");
    }

    #[test]
    fn modules_over_degenerate_rings_are_invalid() {
        assert!(Module::ring(Ring::Modular(12)).is_valid());
        assert!(!Module::ring(Ring::Modular(0)).is_valid());
        assert!(!Module::product(vec![Module::reals(), Module::null(Ring::Modular(1))]).is_valid());
    }

    #[test]
    fn embeddings_follow_the_shape() {
        assert!(Module::integers().embeds_into(&Module::reals()));
        assert!(Module::free(Ring::Integers, 2).embeds_into(&Module::free(Ring::Reals, 2)));
        assert!(!Module::integers().embeds_into(&Module::free(Ring::Reals, 2)));
        assert!(!Module::reals().embeds_into(&Module::integers()));
        let mixed = Module::product(vec![Module::integers(), Module::reals()]);
        assert!(mixed.embeds_into(&Module::product(vec![Module::reals(), Module::reals()])));
        assert!(!mixed.embeds_into(&Module::free(Ring::Reals, 2)));
    }

    #[test]
    fn null_modules() {
        assert!(Module::null_address().is_null());
        assert!(Module::product(vec![]).is_null());
        assert!(!Module::integers().is_null());
        assert!(Module::null_address().contains(&Module::null_address().zero()));
    }
}

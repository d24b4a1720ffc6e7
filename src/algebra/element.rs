// Copyright 2025 Cowboy AI, LLC.

//! Module elements

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::module::Module;
use super::ring::{Ring, Scalar};

/// An element of a [`Module`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleElement {
    /// Element of a free module; every value belongs to `ring`
    Vector {
        /// Coefficient ring
        ring: Ring,
        /// Coordinates
        values: Vec<Scalar>,
    },
    /// Element of a product module
    Product(Vec<ModuleElement>),
}

impl ModuleElement {
    /// An integer as an element of `Z`
    pub fn integer(value: i64) -> Self {
        ModuleElement::Vector {
            ring: Ring::Integers,
            values: vec![Scalar::Integer(value)],
        }
    }

    /// A real as an element of `R`
    pub fn real(value: f64) -> Self {
        ModuleElement::Vector {
            ring: Ring::Reals,
            values: vec![Scalar::Real(value)],
        }
    }

    /// A residue as an element of `Z/nZ`, `None` unless `modulus >= 2`
    pub fn modular(value: i64, modulus: u64) -> Option<Self> {
        let ring = Ring::Modular(modulus);
        let scalar = Scalar::Integer(value).cast(ring)?;
        Some(ModuleElement::Vector {
            ring,
            values: vec![scalar],
        })
    }

    /// A vector in `R^n`
    pub fn reals(values: &[f64]) -> Self {
        ModuleElement::Vector {
            ring: Ring::Reals,
            values: values.iter().copied().map(Scalar::Real).collect(),
        }
    }

    /// A vector in `Z^n`
    pub fn integers(values: &[i64]) -> Self {
        ModuleElement::Vector {
            ring: Ring::Integers,
            values: values.iter().copied().map(Scalar::Integer).collect(),
        }
    }

    /// A vector over `ring`, casting every value into it
    pub fn vector(ring: Ring, values: Vec<Scalar>) -> Option<Self> {
        if !ring.is_valid() {
            return None;
        }
        let values = values
            .into_iter()
            .map(|v| v.cast(ring))
            .collect::<Option<Vec<_>>>()?;
        Some(ModuleElement::Vector { ring, values })
    }

    /// Element of a product module
    pub fn product(factors: Vec<ModuleElement>) -> Self {
        ModuleElement::Product(factors)
    }

    /// Module this element lives in
    pub fn module(&self) -> Module {
        match self {
            ModuleElement::Vector { ring, values } => Module::free(*ring, values.len()),
            ModuleElement::Product(factors) => {
                Module::Product(factors.iter().map(ModuleElement::module).collect())
            }
        }
    }

    /// True if every coordinate is zero
    pub fn is_zero(&self) -> bool {
        *self == self.module().zero()
    }

    /// Sum of two elements of the same module
    pub fn sum(&self, other: &ModuleElement) -> Option<ModuleElement> {
        self.zip_with(other, Scalar::add)
    }

    /// Difference of two elements of the same module
    pub fn difference(&self, other: &ModuleElement) -> Option<ModuleElement> {
        self.zip_with(other, Scalar::sub)
    }

    /// Additive inverse
    pub fn negated(&self) -> ModuleElement {
        match self {
            ModuleElement::Vector { ring, values } => ModuleElement::Vector {
                ring: *ring,
                values: values.iter().map(|v| v.neg()).collect(),
            },
            ModuleElement::Product(factors) => {
                ModuleElement::Product(factors.iter().map(ModuleElement::negated).collect())
            }
        }
    }

    /// Convert into `module`, when the shapes agree and the rings embed
    pub fn cast(&self, module: &Module) -> Option<ModuleElement> {
        if self.module() == *module {
            return Some(self.clone());
        }
        match (self, module) {
            (ModuleElement::Vector { values, .. }, Module::Free { ring, dim })
                if values.len() == *dim =>
            {
                ModuleElement::vector(*ring, values.clone())
            }
            (ModuleElement::Product(factors), Module::Product(modules))
                if factors.len() == modules.len() =>
            {
                factors
                    .iter()
                    .zip(modules)
                    .map(|(e, m)| e.cast(m))
                    .collect::<Option<Vec<_>>>()
                    .map(ModuleElement::Product)
            }
            _ => None,
        }
    }

    /// The `index`-th component, see [`Module::component_module`]
    pub fn component(&self, index: usize) -> Option<ModuleElement> {
        match self {
            ModuleElement::Vector { ring, values } if values.len() >= 2 => {
                values.get(index).map(|v| ModuleElement::Vector {
                    ring: *ring,
                    values: vec![*v],
                })
            }
            ModuleElement::Vector { .. } => None,
            ModuleElement::Product(factors) => factors.get(index).cloned(),
        }
    }

    /// Coordinates of a free-module element
    pub fn values(&self) -> Option<&[Scalar]> {
        match self {
            ModuleElement::Vector { values, .. } => Some(values),
            ModuleElement::Product(_) => None,
        }
    }

    /// The single coordinate of a one-dimensional element
    pub fn scalar(&self) -> Option<Scalar> {
        match self.values() {
            Some([value]) => Some(*value),
            _ => None,
        }
    }

    fn zip_with(
        &self,
        other: &ModuleElement,
        op: fn(Scalar, Scalar) -> Scalar,
    ) -> Option<ModuleElement> {
        match (self, other) {
            (
                ModuleElement::Vector { ring, values: a },
                ModuleElement::Vector { ring: r, values: b },
            ) if ring == r && a.len() == b.len() => Some(ModuleElement::Vector {
                ring: *ring,
                values: a.iter().zip(b).map(|(x, y)| op(*x, *y)).collect(),
            }),
            (ModuleElement::Product(a), ModuleElement::Product(b)) if a.len() == b.len() => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.zip_with(y, op))
                .collect::<Option<Vec<_>>>()
                .map(ModuleElement::Product),
            _ => None,
        }
    }
}

impl Display for ModuleElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModuleElement::Vector { values, .. } if values.len() == 1 => write!(f, "{}", values[0]),
            ModuleElement::Vector { values, .. } => {
                let rendered = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
                write!(f, "({})", rendered.join(", "))
            }
            ModuleElement::Product(factors) => {
                let rendered = factors.iter().map(|v| v.to_string()).collect::<Vec<_>>();
                write!(f, "<{}>", rendered.join(", "))
            }
        }
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! # CIM Denotator
//!
//! Forms and denotators: a categorical data model for hierarchical,
//! addressed objects.
//!
//! - **Form**: the schema of a value. Simple forms wrap a module, Limits are
//!   products, Colimits are tagged unions, Powers are sets and Lists are
//!   sequences. Forms live in a [`Schema`] and are compared nominally.
//! - **Denotator**: an immutable, addressed instance of a form. Its content is
//!   a coordinate over an address module and can be evaluated at elements of
//!   that module.
//! - **DenotatorPath**: a schema-level address of a sub-denotator, with the
//!   satellite/anchor queries used to relate nested objects.
//!
//! ## Design Principles
//!
//! 1. **Nominal forms**: schemas are linked once, in two passes, so recursive
//!    forms need no placeholders
//! 2. **Structural sharing**: transformations return the same handle when
//!    nothing changed, observable through [`Denotator::ptr_eq`]
//! 3. **Explicit results**: every recoverable failure is a [`DenotatorError`];
//!    panics are reserved for broken invariants
//! 4. **Separate mutation**: Power and List content is edited through a
//!    [`CollectionBuilder`], never in place
//!
//! ```rust
//! use cim_denotator::{Denotator, Module, ModuleElement, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .simple("Onset", Module::reals())
//!     .power("Onsets", "Onset")
//!     .build()
//!     .unwrap();
//! let onset = schema.form("Onset").unwrap();
//! let onsets = schema.form("Onsets").unwrap();
//!
//! let a = Denotator::simple(None, &onset, ModuleElement::real(1.0)).unwrap();
//! let b = Denotator::simple(None, &onset, ModuleElement::real(0.0)).unwrap();
//! let set = Denotator::power(Some("onsets"), &onsets, vec![a, b]).unwrap();
//!
//! assert_eq!(set.element_at(&[0]).unwrap(), ModuleElement::real(0.0));
//! assert!(set.check());
//! ```

#![warn(missing_docs)]

pub mod algebra;
mod denotator;
mod dictionary;
mod errors;
mod form;
mod path;

// Re-export core types
pub use algebra::{MappingError, Module, ModuleElement, ModuleMorphism, Ring, Scalar};
pub use denotator::{CollectionBuilder, Content, Coordinate, Denotator, DenotatorKind};
pub use dictionary::{Dictionary, Repository};
pub use errors::{DenotatorError, DenotatorResult};
pub use form::{Form, FormId, FormKind, Schema, SchemaBuilder};
pub use path::{DenotatorPath, PersistedPath};

// Copyright 2025 Cowboy AI, LLC.

//! Module algebra consumed by forms and denotators
//!
//! The kernel only needs a narrow surface from the underlying algebra:
//! module membership, zero elements, sums and differences, casts, a total
//! order, component access, and morphisms that can be applied, composed and
//! evaluated. This module provides a compact reference implementation of
//! that surface over `Z`, `R` and `Z/nZ`.

pub mod element;
pub mod module;
pub mod morphism;
pub mod ring;

pub use element::ModuleElement;
pub use module::Module;
pub use morphism::{MappingError, ModuleMorphism};
pub use ring::{Ring, Scalar};

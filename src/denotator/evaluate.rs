// Copyright 2025 Cowboy AI, LLC.

//! Functorial evaluation and address changes

use std::sync::Arc;

use tracing::debug;

use super::content::Content;
use super::Denotator;
use crate::algebra::{Module, ModuleElement, ModuleMorphism};
use crate::errors::{DenotatorError, DenotatorResult};

fn incompatible(from: &Module, to: &Module) -> DenotatorError {
    debug!(%from, %to, "address change is impossible");
    DenotatorError::IncompatibleAddress {
        from: from.to_string(),
        to: to.to_string(),
    }
}

impl Denotator {
    /// Evaluate the coordinate at `element` of the address
    ///
    /// Null-addressed denotators are returned as is. Otherwise every simple
    /// coordinate below becomes the constant `morphism(element)` on the same
    /// address. Fails with a mapping error when `element` is not in the
    /// address module.
    pub fn at(&self, element: &ModuleElement) -> DenotatorResult<Denotator> {
        if self.is_null_addressed() {
            return Ok(self.clone());
        }
        let address = self.address();
        if !address.contains(element) {
            return Err(crate::algebra::MappingError::new(address.clone(), element.clone()).into());
        }
        self.evaluate_content(element)
    }

    fn evaluate_content(&self, element: &ModuleElement) -> DenotatorResult<Denotator> {
        match self.content() {
            Content::Simple(morphism) => {
                let evaluated = morphism.at(element)?;
                if evaluated == *morphism {
                    Ok(self.clone())
                } else {
                    Ok(self.with_content(self.address().clone(), Content::Simple(evaluated)))
                }
            }
            _ => match self.map_factors(|factor| factor.evaluate_content(element))? {
                Some(content) => Ok(self.with_content(self.address().clone(), content)),
                None => Ok(self.clone()),
            },
        }
    }

    /// Evaluate at the zero of the address
    ///
    /// # Panics
    ///
    /// Never fails on a well-formed denotator; a failure means the
    /// coordinate does not live on its own address and panics.
    pub fn at_null(&self) -> Denotator {
        let zero = self.address().zero();
        self.at(&zero).unwrap_or_else(|err| {
            panic!(
                "evaluation of {} at the zero of its address failed: {err}",
                self.form()
            )
        })
    }

    /// Evaluate the coordinate at `element`, keeping the frame coordinate
    ///
    /// The result carries the evaluated coordinate while its frame stays the
    /// template it was evaluated from.
    pub fn evaluate_coordinate(&self, element: &ModuleElement) -> DenotatorResult<Denotator> {
        let evaluated = self.at(element)?;
        if evaluated.ptr_eq(self) {
            return Ok(self.clone());
        }
        Ok(self.with_coordinates(
            Arc::clone(evaluated.coordinate_arc()),
            Arc::clone(self.frame_arc()),
        ))
    }

    /// Move the denotator onto `address`
    ///
    /// Constant coordinates move freely. Other coordinates move onto a
    /// module that embeds into the current address, such as `Z` into `R`,
    /// and otherwise fail with `IncompatibleAddress`. Returns the same
    /// handle when the address is unchanged. An independent frame moves
    /// along with the coordinate.
    pub fn change_address(&self, address: &Module) -> DenotatorResult<Denotator> {
        if self.address() == address {
            return Ok(self.clone());
        }
        let content = match self.content() {
            Content::Simple(morphism) => Content::Simple(
                morphism
                    .change_domain(address)
                    .ok_or_else(|| incompatible(self.address(), address))?,
            ),
            content => self
                .map_factors(|factor| factor.change_address(address))?
                .unwrap_or_else(|| content.clone()),
        };
        let moved = self.with_content(address.clone(), content);
        self.carry_frame(moved, |template| template.change_address(address))
    }

    /// Precompose every coordinate with `morphism`
    ///
    /// The codomain of `morphism` must be the current address; the result
    /// lives on its domain.
    pub fn change_address_by(&self, morphism: &ModuleMorphism) -> DenotatorResult<Denotator> {
        let address = self.address();
        if morphism.codomain() != *address {
            return Err(incompatible(address, &morphism.domain()));
        }
        if morphism.is_identity() {
            return Ok(self.clone());
        }
        let content = match self.content() {
            Content::Simple(coordinate) => Content::Simple(
                coordinate
                    .compose(morphism)
                    .ok_or_else(|| incompatible(address, &morphism.domain()))?,
            ),
            content => self
                .map_factors(|factor| factor.change_address_by(morphism))?
                .unwrap_or_else(|| content.clone()),
        };
        let moved = self.with_content(morphism.domain(), content);
        self.carry_frame(moved, |template| template.change_address_by(morphism))
    }

    /// Copy of the whole tree with no node shared with `self`
    pub fn deep_copy(&self) -> Denotator {
        let content = match self.raw_content() {
            Content::Simple(_) | Content::Reference => self.raw_content().clone(),
            content => content.with_factors(content.factors().iter().map(Denotator::deep_copy).collect()),
        };
        let copy = Denotator::from_parts(
            self.name().map(str::to_string),
            self.form().clone(),
            self.coordinate_arc().address.clone(),
            content,
        );
        if self.shares_frame() {
            copy
        } else {
            let frame = Arc::new((**self.frame_arc()).clone());
            copy.with_coordinates(Arc::clone(copy.coordinate_arc()), frame)
        }
    }
}

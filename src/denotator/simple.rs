// Copyright 2025 Cowboy AI, LLC.

//! Operations specific to simple denotators

use super::construct::{address_mismatch, form_mismatch};
use super::content::Content;
use super::Denotator;
use crate::algebra::{ModuleElement, ModuleMorphism};
use crate::errors::{DenotatorError, DenotatorResult};

impl Denotator {
    fn simple_morphism(&self, operation: &'static str) -> DenotatorResult<&ModuleMorphism> {
        match self.content() {
            Content::Simple(morphism) => Ok(morphism),
            _ => Err(DenotatorError::kind_mismatch(operation, "Simple", self.kind())),
        }
    }

    /// Element of a simple denotator: its coordinate at the zero of the
    /// address
    pub fn element(&self) -> DenotatorResult<ModuleElement> {
        let morphism = self.simple_morphism("element")?;
        Ok(morphism.map(&self.address().zero())?)
    }

    /// Coordinate morphism of a simple denotator
    pub fn module_morphism(&self) -> DenotatorResult<ModuleMorphism> {
        self.simple_morphism("module_morphism").cloned()
    }

    /// Pointwise sum with another simple denotator of the same form and address
    pub fn sum(&self, other: &Denotator) -> DenotatorResult<Denotator> {
        self.combine("sum", other, ModuleMorphism::sum)
    }

    /// Pointwise difference with another simple denotator of the same form and address
    pub fn difference(&self, other: &Denotator) -> DenotatorResult<Denotator> {
        self.combine("difference", other, ModuleMorphism::difference)
    }

    fn combine(
        &self,
        operation: &'static str,
        other: &Denotator,
        op: fn(&ModuleMorphism, &ModuleMorphism) -> Option<ModuleMorphism>,
    ) -> DenotatorResult<Denotator> {
        let left = self.simple_morphism(operation)?;
        let right = other.simple_morphism(operation)?;
        if !other.has_form(self.form()) {
            return Err(form_mismatch(self.form(), other.form()));
        }
        if other.address() != self.address() {
            return Err(address_mismatch(self.address(), other.address()));
        }
        let combined = op(left, right).ok_or_else(|| DenotatorError::Domain {
            form: self.form().name().to_string(),
            module: left.codomain().to_string(),
            content: right.to_string(),
        })?;
        Ok(self.with_content(self.address().clone(), Content::Simple(combined)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Module;
    use crate::form::SchemaBuilder;

    #[test]
    fn sum_and_difference_of_constants() {
        let schema = SchemaBuilder::new()
            .simple("Pitch", Module::integers())
            .simple("Onset", Module::reals())
            .build()
            .unwrap();
        let pitch = schema.form("Pitch").unwrap();
        let a = Denotator::simple(Some("a"), &pitch, ModuleElement::integer(60)).unwrap();
        let b = Denotator::simple(None, &pitch, ModuleElement::integer(7)).unwrap();

        let sum = a.sum(&b).unwrap();
        assert_eq!(sum.element().unwrap(), ModuleElement::integer(67));
        assert_eq!(sum.name(), Some("a"));
        assert_eq!(
            a.difference(&b).unwrap().element().unwrap(),
            ModuleElement::integer(53)
        );

        let onset = schema.form("Onset").unwrap();
        let o = Denotator::simple(None, &onset, ModuleElement::real(1.0)).unwrap();
        assert!(matches!(a.sum(&o), Err(DenotatorError::FormMismatch { .. })));
    }

    #[test]
    fn module_morphism_requires_a_simple_denotator() {
        let schema = SchemaBuilder::new()
            .simple("Pitch", Module::integers())
            .power("Chord", "Pitch")
            .build()
            .unwrap();
        let chord = Denotator::power(None, &schema.form("Chord").unwrap(), Vec::new()).unwrap();
        assert!(matches!(
            chord.module_morphism(),
            Err(DenotatorError::KindMismatch { operation: "module_morphism", .. })
        ));
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Default denotators

use super::{Form, FormBody, FormId};
use crate::algebra::{Module, ModuleMorphism};
use crate::denotator::Denotator;
use crate::errors::{DenotatorError, DenotatorResult};

impl Form {
    /// Canonical minimal instance of the form
    ///
    /// Simple forms give the zero constant at the null address, Limits build
    /// every factor, Colimits take their first buildable branch, and Power and
    /// List forms are empty. Fails with [`DenotatorError::CyclicForm`] when
    /// the form can only be instantiated through itself.
    pub fn create_default_denotator(&self) -> DenotatorResult<Denotator> {
        let mut stack = Vec::new();
        self.default_within(&mut stack)
    }

    fn default_within(&self, stack: &mut Vec<FormId>) -> DenotatorResult<Denotator> {
        if stack.contains(&self.id) {
            return Err(DenotatorError::CyclicForm(self.name().to_string()));
        }
        let address = Module::null_address();
        let denotator = match &self.def().body {
            FormBody::Simple(module) => {
                let zero = ModuleMorphism::constant(address, module.zero());
                Denotator::simple_with_morphism(None, self, zero)?
            }
            FormBody::Power(_) => Denotator::power_unchecked(None, self, address, Vec::new()),
            FormBody::List(_) => Denotator::list_unchecked(None, self, address, Vec::new()),
            FormBody::Limit(..) => {
                stack.push(self.id);
                let factors = self
                    .forms()
                    .iter()
                    .map(|form| form.default_within(stack))
                    .collect::<DenotatorResult<Vec<_>>>();
                stack.pop();
                Denotator::limit_unchecked(None, self, address, factors?)
            }
            FormBody::Colimit(..) => {
                stack.push(self.id);
                let branch = self
                    .forms()
                    .iter()
                    .enumerate()
                    .find_map(|(index, form)| form.default_within(stack).ok().map(|d| (index, d)));
                stack.pop();
                let (index, factor) =
                    branch.ok_or_else(|| DenotatorError::CyclicForm(self.name().to_string()))?;
                Denotator::colimit_unchecked(None, self, address, index, factor)
            }
        };
        Ok(denotator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::ModuleElement;
    use crate::form::SchemaBuilder;
    use test_case::test_case;

    fn schema() -> crate::form::Schema {
        SchemaBuilder::new()
            .simple("Onset", Module::reals())
            .limit("Node", ["Onset", "Satellites"])
            .power("Satellites", "Node")
            .colimit("Either", ["Loop", "Onset"])
            .limit("Loop", ["Either", "Onset"])
            .limit("Stuck", ["Stuck"])
            .build()
            .unwrap()
    }

    #[test_case("Onset" ; "simple")]
    #[test_case("Node" ; "limit through a power of itself")]
    #[test_case("Satellites" ; "power")]
    #[test_case("Either" ; "colimit skipping a cyclic branch")]
    #[test_case("Loop" ; "limit through a colimit")]
    fn defaults_are_valid(name: &str) {
        let form = schema().form(name).unwrap();
        let d = form.create_default_denotator().unwrap();
        assert!(d.has_form(&form));
        assert!(d.check());
        assert!(d.is_null_addressed());
    }

    #[test]
    fn simple_default_is_zero() {
        let onset = schema().form("Onset").unwrap();
        let d = onset.create_default_denotator().unwrap();
        assert_eq!(d.element().unwrap(), ModuleElement::real(0.0));
    }

    #[test]
    fn colimit_default_takes_the_first_buildable_branch() {
        let d = schema().form("Either").unwrap().create_default_denotator().unwrap();
        assert_eq!(d.colimit_index(), Some(1));
    }

    #[test]
    fn unbreakable_cycles_are_reported() {
        let err = schema()
            .form("Stuck")
            .unwrap()
            .create_default_denotator()
            .unwrap_err();
        assert_eq!(err, DenotatorError::CyclicForm("Stuck".to_string()));
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Path-addressed access and transformation
//!
//! A path is a sequence of factor indices, one per level. Limits take the
//! index of the sub-form, colimits accept only the active branch, and
//! collections take the factor position. A collection with exactly one
//! factor sends every index to that factor. Below a simple denotator the
//! remaining indices address module components, which only
//! [`Denotator::element_at`] and [`Denotator::module_morphism_at`] follow.

use tracing::trace;

use super::content::Content;
use super::construct::form_mismatch;
use super::Denotator;
use crate::algebra::{ModuleElement, ModuleMorphism};
use crate::errors::{DenotatorError, DenotatorResult};

impl Denotator {
    /// Position of the factor addressed by `index` at this level
    fn slot(&self, index: usize) -> DenotatorResult<usize> {
        match self.content() {
            Content::Simple(_) => Err(DenotatorError::PathTooLong {
                form: self.form().name().to_string(),
                remaining: 1,
            }),
            Content::Colimit { index: active, .. } => {
                if index == *active {
                    Ok(0)
                } else {
                    Err(self.inactive_branch(index, *active))
                }
            }
            Content::Power(factors) | Content::List(factors) if factors.len() == 1 => Ok(0),
            content => {
                if index < content.factors().len() {
                    Ok(index)
                } else {
                    Err(self.out_of_range(index))
                }
            }
        }
    }

    fn too_long(&self, path: &[usize]) -> DenotatorError {
        DenotatorError::PathTooLong {
            form: self.form().name().to_string(),
            remaining: path.len(),
        }
    }

    /// The denotator at `path`
    pub fn get(&self, path: &[usize]) -> DenotatorResult<Denotator> {
        let Some((&index, rest)) = path.split_first() else {
            return Ok(self.clone());
        };
        if let Content::Simple(_) = self.content() {
            return Err(self.too_long(path));
        }
        let slot = self.slot(index)?;
        trace!(form = %self.form(), index, slot, "path step");
        self.content().factors()[slot].get(rest)
    }

    /// Replace the denotator at `path` by `replacement`
    ///
    /// The replacement must have the form of the node it replaces and is
    /// moved onto that node's address. Untouched subtrees are shared, and
    /// `self` is returned when nothing changed. Power content is brought
    /// back into canonical order.
    pub fn replace(&self, path: &[usize], replacement: &Denotator) -> DenotatorResult<Denotator> {
        let Some((&index, rest)) = path.split_first() else {
            if !replacement.has_form(self.form()) {
                return Err(form_mismatch(self.form(), replacement.form()));
            }
            if replacement.ptr_eq(self) {
                return Ok(self.clone());
            }
            return replacement.change_address(self.address());
        };
        if let Content::Simple(_) = self.content() {
            return Err(self.too_long(path));
        }
        let slot = self.slot(index)?;
        let content = self.content();
        let old = &content.factors()[slot];
        let new = old.replace(rest, replacement)?;
        if new.ptr_eq(old) {
            return Ok(self.clone());
        }
        let mut factors = content.factors().to_vec();
        factors[slot] = new;
        Ok(self.with_content(self.address().clone(), content.with_factors(factors)))
    }

    /// Compose `morphism` after the simple coordinate at `path`
    ///
    /// `morphism` must be an endomorphism of the simple form's module.
    pub fn map(&self, path: &[usize], morphism: &ModuleMorphism) -> DenotatorResult<Denotator> {
        let target = self.get(path)?;
        let Content::Simple(coordinate) = target.content() else {
            return Err(DenotatorError::kind_mismatch("map", "Simple", target.kind()));
        };
        if morphism.is_identity() && morphism.domain() == coordinate.codomain() {
            return Ok(self.clone());
        }
        let module = coordinate.codomain();
        if morphism.codomain() != module {
            return Err(DenotatorError::Domain {
                form: target.form().name().to_string(),
                module: module.to_string(),
                content: morphism.to_string(),
            });
        }
        let mapped = morphism.compose(coordinate).ok_or_else(|| DenotatorError::Domain {
            form: target.form().name().to_string(),
            module: module.to_string(),
            content: morphism.to_string(),
        })?;
        let replacement = target.with_content(target.address().clone(), Content::Simple(mapped));
        self.replace(path, &replacement)
    }

    /// Walk `path` down to the first simple denotator
    ///
    /// Returns the simple denotator and the unconsumed indices.
    fn locate_simple<'p>(
        &self,
        operation: &'static str,
        path: &'p [usize],
    ) -> DenotatorResult<(Denotator, &'p [usize])> {
        let mut current = self.clone();
        let mut rest = path;
        loop {
            if let Content::Simple(_) = current.content() {
                return Ok((current, rest));
            }
            let Some((&index, tail)) = rest.split_first() else {
                return Err(DenotatorError::kind_mismatch(operation, "Simple", current.kind()));
            };
            let slot = current.slot(index)?;
            let next = current.content().factors()[slot].clone();
            current = next;
            rest = tail;
        }
    }

    /// Module element at `path`
    ///
    /// Indices left over after the simple denotator select components of
    /// its element, evaluated at the zero of the address.
    pub fn element_at(&self, path: &[usize]) -> DenotatorResult<ModuleElement> {
        let (simple, components) = self.locate_simple("element_at", path)?;
        let mut element = simple.element()?;
        for &index in components {
            let count = element.module().component_count();
            if count == 0 {
                return Err(simple.too_long(components));
            }
            element = element.component(index).ok_or_else(|| DenotatorError::IndexOutOfRange {
                form: simple.form().name().to_string(),
                index,
                count,
            })?;
        }
        Ok(element)
    }

    /// Module morphism at `path`, followed by component projections
    pub fn module_morphism_at(&self, path: &[usize]) -> DenotatorResult<ModuleMorphism> {
        let (simple, components) = self.locate_simple("module_morphism_at", path)?;
        let mut morphism = simple.module_morphism()?;
        for &index in components {
            let codomain = morphism.codomain();
            let count = codomain.component_count();
            if count == 0 {
                return Err(simple.too_long(components));
            }
            let projection = ModuleMorphism::projection(codomain, index).ok_or_else(|| {
                DenotatorError::IndexOutOfRange {
                    form: simple.form().name().to_string(),
                    index,
                    count,
                }
            })?;
            morphism = projection
                .compose(&morphism)
                .ok_or_else(|| simple.too_long(components))?;
        }
        Ok(morphism)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Module, Ring};
    use crate::form::{Schema, SchemaBuilder};
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        SchemaBuilder::new()
            .simple("Onset", Module::reals())
            .simple("Position", Module::free(Ring::Reals, 2))
            .limit("Note", ["Onset", "Position"])
            .colimit("Event", ["Note", "Onset"])
            .list("Melody", "Note")
            .build()
            .unwrap()
    }

    fn note(schema: &Schema, onset: f64) -> Denotator {
        let o = Denotator::simple(None, &schema.form("Onset").unwrap(), ModuleElement::real(onset))
            .unwrap();
        let p = Denotator::simple(
            None,
            &schema.form("Position").unwrap(),
            ModuleElement::reals(&[onset, 2.0 * onset]),
        )
        .unwrap();
        Denotator::limit(None, &schema.form("Note").unwrap(), vec![o, p]).unwrap()
    }

    fn melody(schema: &Schema, onsets: &[f64]) -> Denotator {
        let notes = onsets.iter().map(|o| note(schema, *o)).collect();
        Denotator::list(None, &schema.form("Melody").unwrap(), notes).unwrap()
    }

    #[test]
    fn get_descends_and_rejects_long_paths() {
        let schema = schema();
        let m = melody(&schema, &[0.0, 1.0]);
        assert_eq!(m.get(&[1, 0]).unwrap().element().unwrap(), ModuleElement::real(1.0));
        assert!(m.get(&[]).unwrap().ptr_eq(&m));
        assert!(matches!(
            m.get(&[1, 0, 0]),
            Err(DenotatorError::PathTooLong { remaining: 1, .. })
        ));
        assert!(matches!(
            m.get(&[2]),
            Err(DenotatorError::IndexOutOfRange { index: 2, count: 2, .. })
        ));
    }

    #[test]
    fn singleton_collections_accept_any_index() {
        let schema = schema();
        let m = melody(&schema, &[4.0]);
        let first = m.get(&[0]).unwrap();
        assert!(m.get(&[7]).unwrap().ptr_eq(&first));
        let replaced = m.replace(&[3, 0], &Denotator::simple(
            None,
            &schema.form("Onset").unwrap(),
            ModuleElement::real(5.0),
        ).unwrap()).unwrap();
        assert_eq!(replaced.element_at(&[0, 0]).unwrap(), ModuleElement::real(5.0));
    }

    #[test]
    fn colimits_only_follow_the_active_branch() {
        let schema = schema();
        let onset = Denotator::simple(None, &schema.form("Onset").unwrap(), ModuleElement::real(1.0))
            .unwrap();
        let event = Denotator::colimit(None, &schema.form("Event").unwrap(), 1, onset.clone()).unwrap();
        assert!(event.get(&[1]).unwrap().ptr_eq(&onset));
        assert!(matches!(
            event.get(&[0, 0]),
            Err(DenotatorError::InactiveBranch { requested: 0, active: 1, .. })
        ));
    }

    #[test]
    fn replace_shares_untouched_subtrees() {
        let schema = schema();
        let m = melody(&schema, &[0.0, 1.0]);
        let same = m.replace(&[0], &m.get(&[0]).unwrap()).unwrap();
        assert!(same.ptr_eq(&m));

        let replaced = m.replace(&[1], &note(&schema, 9.0)).unwrap();
        assert!(replaced.get(&[0]).unwrap().ptr_eq(&m.get(&[0]).unwrap()));
        assert_eq!(replaced.element_at(&[1, 0]).unwrap(), ModuleElement::real(9.0));

        let err = m
            .replace(&[1], &m.get(&[1, 0]).unwrap())
            .unwrap_err();
        assert!(matches!(err, DenotatorError::FormMismatch { .. }));
    }

    #[test]
    fn map_composes_after_the_simple_coordinate() {
        let schema = schema();
        let m = melody(&schema, &[0.0, 1.0]);
        let shift =
            ModuleMorphism::translation(Ring::Reals, vec![crate::Scalar::Real(0.5)]).unwrap();
        let mapped = m.map(&[1, 0], &shift).unwrap();
        assert_eq!(mapped.element_at(&[1, 0]).unwrap(), ModuleElement::real(1.5));
        assert!(mapped.get(&[0]).unwrap().ptr_eq(&m.get(&[0]).unwrap()));

        let err = m.map(&[1], &shift).unwrap_err();
        assert!(matches!(err, DenotatorError::KindMismatch { operation: "map", .. }));
    }

    #[test]
    fn element_paths_continue_into_module_components() {
        let schema = schema();
        let m = melody(&schema, &[0.0, 3.0]);
        assert_eq!(m.element_at(&[1, 1, 1]).unwrap(), ModuleElement::real(6.0));
        let projection = m.module_morphism_at(&[1, 1, 0]).unwrap();
        assert_eq!(projection.codomain(), Module::reals());
        assert_eq!(
            projection.map(&Module::null_address().zero()).unwrap(),
            ModuleElement::real(3.0)
        );
        assert!(matches!(
            m.element_at(&[1, 0, 0]),
            Err(DenotatorError::PathTooLong { .. })
        ));
        assert!(matches!(
            m.element_at(&[1, 1, 2]),
            Err(DenotatorError::IndexOutOfRange { index: 2, count: 2, .. })
        ));
        assert!(matches!(
            m.element_at(&[1]),
            Err(DenotatorError::KindMismatch { .. })
        ));
    }
}

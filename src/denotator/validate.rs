// Copyright 2025 Cowboy AI, LLC.

//! Structural self-check

use tracing::debug;

use super::construct::{address_mismatch, form_mismatch};
use super::content::Content;
use super::ordering::is_canonical;
use super::Denotator;
use crate::errors::{DenotatorError, DenotatorResult};

impl Denotator {
    /// Report the first violated invariant in the tree
    ///
    /// Safe to call on unresolved references, which are reported as
    /// [`DenotatorError::UnresolvedReference`].
    pub fn validate(&self) -> DenotatorResult<()> {
        let form = self.form();
        let content = self.raw_content();
        if let Content::Reference = content {
            return Err(DenotatorError::UnresolvedReference(
                self.name().unwrap_or("<anonymous>").to_string(),
            ));
        }
        if content.kind().form_kind() != Some(form.kind()) {
            return Err(DenotatorError::kind_mismatch(
                "validate",
                form.kind().to_string(),
                content.kind(),
            ));
        }

        let address = self.address();
        match content {
            Content::Simple(morphism) => {
                if morphism.domain() != *address {
                    return Err(address_mismatch(address, &morphism.domain()));
                }
                let Some(module) = form.module() else {
                    return Ok(());
                };
                if morphism.codomain() != *module {
                    return Err(DenotatorError::Domain {
                        form: form.name().to_string(),
                        module: module.to_string(),
                        content: morphism.to_string(),
                    });
                }
                return Ok(());
            }
            Content::Limit(factors) => {
                if factors.len() != form.form_count() {
                    return Err(DenotatorError::FactorCount {
                        form: form.name().to_string(),
                        expected: form.form_count(),
                        found: factors.len(),
                    });
                }
            }
            Content::Colimit { index, .. } => {
                if *index >= form.form_count() {
                    return Err(DenotatorError::IndexOutOfRange {
                        form: form.name().to_string(),
                        index: *index,
                        count: form.form_count(),
                    });
                }
            }
            Content::Power(factors) => {
                if !is_canonical(factors) {
                    return Err(DenotatorError::NotCanonical(form.name().to_string()));
                }
            }
            Content::List(_) | Content::Reference => {}
        }

        for (i, factor) in content.factors().iter().enumerate() {
            let expected = match content {
                Content::Limit(_) => form.get_form(i),
                Content::Colimit { index, .. } => form.get_form(*index),
                _ => form.element_form(),
            };
            if let Some(expected) = expected {
                if !factor.has_form(&expected) {
                    return Err(form_mismatch(&expected, factor.form()));
                }
            }
            factor.validate()?;
            if factor.address() != address {
                return Err(address_mismatch(address, factor.address()));
            }
        }
        Ok(())
    }

    /// True when [`Denotator::validate`] finds nothing wrong
    pub fn check(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                debug!(form = %self.form(), error = %err, "denotator failed validation");
                false
            }
        }
    }
}

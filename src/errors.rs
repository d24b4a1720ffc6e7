// Copyright 2025 Cowboy AI, LLC.

//! Error types for form and denotator operations

use thiserror::Error;

use crate::algebra::MappingError;

/// Errors that can occur while building schemas or working with denotators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DenotatorError {
    /// A path continued below a terminal (simple) denotator
    #[error("Path too long: {remaining} index(es) left below terminal form {form}")]
    PathTooLong {
        /// Name of the terminal form
        form: String,
        /// Number of indices that could not be consumed
        remaining: usize,
    },

    /// Index outside the factors of a node
    #[error("Index {index} out of range for {form} with {count} factor(s)")]
    IndexOutOfRange {
        /// Name of the form of the node being indexed
        form: String,
        /// Requested index
        index: usize,
        /// Number of available factors
        count: usize,
    },

    /// Addressed a colimit branch that is not the active one
    #[error("Branch {requested} of colimit {form} is not active (active branch is {active})")]
    InactiveBranch {
        /// Name of the colimit form
        form: String,
        /// Requested branch index
        requested: usize,
        /// Active branch index
        active: usize,
    },

    /// A denotator does not have the form required at its position
    #[error("Form mismatch: expected {expected}, found {found}")]
    FormMismatch {
        /// Expected form name
        expected: String,
        /// Form name that was supplied
        found: String,
    },

    /// Wrong number of factors for a limit
    #[error("Form {form} expects {expected} factor(s), found {found}")]
    FactorCount {
        /// Name of the limit form
        form: String,
        /// Number of declared sub-forms
        expected: usize,
        /// Number of supplied factors
        found: usize,
    },

    /// Power content is not sorted and deduplicated
    #[error("Power denotator of form {0} is not in canonical order")]
    NotCanonical(String),

    /// A dictionary only stores named denotators
    #[error("Cannot register an anonymous denotator of form {0}")]
    AnonymousDenotator(String),

    /// A factor lives at a different address than its parent
    #[error("Address mismatch: expected {expected}, found {found}")]
    AddressMismatch {
        /// Address of the parent
        expected: String,
        /// Address of the offending factor
        found: String,
    },

    /// An address change is structurally impossible
    #[error("Cannot change address from {from} to {to}")]
    IncompatibleAddress {
        /// Current address
        from: String,
        /// Requested address
        to: String,
    },

    /// Evaluation at an element outside the address module
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Simple content that does not belong to the form's module
    #[error("Domain error: {content} is not an element of {module} required by form {form}")]
    Domain {
        /// Name of the simple form
        form: String,
        /// Module declared by the form
        module: String,
        /// Offending content
        content: String,
    },

    /// Operation is not supported by this kind of denotator
    #[error("Operation {operation} requires a {expected} denotator, found {found}")]
    KindMismatch {
        /// Operation that was attempted
        operation: &'static str,
        /// Required kind
        expected: String,
        /// Actual kind
        found: String,
    },

    /// A name could not be found in the dictionary
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    /// Reference resolution re-entered a name that is being resolved
    #[error("Cyclic reference: {0}")]
    CyclicReference(String),

    /// A form has no finite default instance
    #[error("Form {0} has no finite default denotator")]
    CyclicForm(String),

    /// Form name not registered
    #[error("Unknown form: {0}")]
    UnknownForm(String),

    /// Form name registered twice
    #[error("Form already exists: {0}")]
    DuplicateForm(String),

    /// Form definition is malformed
    #[error("Invalid form {name}: {reason}")]
    InvalidForm {
        /// Name of the form
        name: String,
        /// Why the form is invalid
        reason: String,
    },

    /// Path indices do not follow the base form
    #[error("Invalid path {indices:?} over {base_form}: {reason}")]
    InvalidPath {
        /// Name of the base form
        base_form: String,
        /// Path indices
        indices: Vec<usize>,
        /// Why the path is invalid
        reason: String,
    },
}

/// Result type for denotator operations
pub type DenotatorResult<T> = Result<T, DenotatorError>;

impl DenotatorError {
    /// Check if this is a structural error raised while navigating or constructing
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DenotatorError::PathTooLong { .. }
                | DenotatorError::IndexOutOfRange { .. }
                | DenotatorError::InactiveBranch { .. }
                | DenotatorError::FormMismatch { .. }
                | DenotatorError::FactorCount { .. }
                | DenotatorError::NotCanonical(_)
                | DenotatorError::AddressMismatch { .. }
                | DenotatorError::IncompatibleAddress { .. }
                | DenotatorError::KindMismatch { .. }
                | DenotatorError::InvalidPath { .. }
        )
    }

    /// Check if this is a mapping error
    pub fn is_mapping_error(&self) -> bool {
        matches!(self, DenotatorError::Mapping(_))
    }

    /// Check if this is a domain error
    pub fn is_domain_error(&self) -> bool {
        matches!(self, DenotatorError::Domain { .. })
    }

    /// Check if this error comes from name resolution
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            DenotatorError::UnresolvedReference(_)
                | DenotatorError::CyclicReference(_)
                | DenotatorError::UnknownForm(_)
        )
    }

    pub(crate) fn kind_mismatch(
        operation: &'static str,
        expected: impl Into<String>,
        found: impl std::fmt::Display,
    ) -> Self {
        DenotatorError::KindMismatch {
            operation,
            expected: expected.into(),
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Module, ModuleElement, Ring};

    #[test]
    fn test_error_display_messages() {
        let err = DenotatorError::IndexOutOfRange {
            form: "Score".to_string(),
            index: 4,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Index 4 out of range for Score with 3 factor(s)"
        );

        let err = DenotatorError::InactiveBranch {
            form: "NoteOrRest".to_string(),
            requested: 0,
            active: 1,
        };
        assert_eq!(
            err.to_string(),
            "Branch 0 of colimit NoteOrRest is not active (active branch is 1)"
        );

        let err = DenotatorError::UnknownForm("Pitch".to_string());
        assert_eq!(err.to_string(), "Unknown form: Pitch");

        let err = DenotatorError::CyclicForm("Loop".to_string());
        assert_eq!(err.to_string(), "Form Loop has no finite default denotator");
    }

    #[test]
    fn test_error_classification() {
        let structural = DenotatorError::PathTooLong {
            form: "Onset".to_string(),
            remaining: 2,
        };
        assert!(structural.is_structural());
        assert!(!structural.is_mapping_error());

        let mapping: DenotatorError = MappingError::new(
            Module::free(Ring::Reals, 2),
            ModuleElement::integer(3),
        )
        .into();
        assert!(mapping.is_mapping_error());
        assert!(!mapping.is_structural());

        let domain = DenotatorError::Domain {
            form: "Onset".to_string(),
            module: "R".to_string(),
            content: "(1, 2)".to_string(),
        };
        assert!(domain.is_domain_error());

        assert!(DenotatorError::CyclicReference("x".to_string()).is_reference_error());
    }
}

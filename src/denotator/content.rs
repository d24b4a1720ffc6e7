// Copyright 2025 Cowboy AI, LLC.

//! Coordinates: the Yoneda morphisms carrying a denotator's content

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::Denotator;
use crate::algebra::{Module, ModuleMorphism};
use crate::form::FormKind;

/// Structural kind of a denotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DenotatorKind {
    /// Module-valued leaf
    Simple,
    /// Fixed heterogeneous product
    Limit,
    /// One active branch of a tagged union
    Colimit,
    /// Canonical set
    Power,
    /// Ordered sequence
    List,
    /// Unresolved placeholder, only valid until references are resolved
    Reference,
}

impl DenotatorKind {
    /// Form kind instantiated by this kind, `None` for references
    pub fn form_kind(self) -> Option<FormKind> {
        match self {
            DenotatorKind::Simple => Some(FormKind::Simple),
            DenotatorKind::Limit => Some(FormKind::Limit),
            DenotatorKind::Colimit => Some(FormKind::Colimit),
            DenotatorKind::Power => Some(FormKind::Power),
            DenotatorKind::List => Some(FormKind::List),
            DenotatorKind::Reference => None,
        }
    }
}

impl Display for DenotatorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            DenotatorKind::Simple => "Simple",
            DenotatorKind::Limit => "Limit",
            DenotatorKind::Colimit => "Colimit",
            DenotatorKind::Power => "Power",
            DenotatorKind::List => "List",
            DenotatorKind::Reference => "Reference",
        };
        f.write_str(s)
    }
}

/// Content of a coordinate, one variant per denotator kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Content {
    /// Morphism from the address into the form's module
    Simple(ModuleMorphism),
    /// One factor per declared sub-form
    Limit(Vec<Denotator>),
    /// Active branch and its factor
    Colimit {
        /// Index of the active branch
        index: usize,
        /// Denotator of the branch form
        factor: Denotator,
    },
    /// Sorted, deduplicated factors
    Power(Vec<Denotator>),
    /// Factors in insertion order
    List(Vec<Denotator>),
    /// Placeholder for a named denotator resolved later
    Reference,
}

impl Content {
    /// Kind of denotator carrying this content
    pub fn kind(&self) -> DenotatorKind {
        match self {
            Content::Simple(_) => DenotatorKind::Simple,
            Content::Limit(_) => DenotatorKind::Limit,
            Content::Colimit { .. } => DenotatorKind::Colimit,
            Content::Power(_) => DenotatorKind::Power,
            Content::List(_) => DenotatorKind::List,
            Content::Reference => DenotatorKind::Reference,
        }
    }

    /// Child denotators, in order
    pub fn factors(&self) -> &[Denotator] {
        match self {
            Content::Limit(factors) | Content::Power(factors) | Content::List(factors) => factors,
            Content::Colimit { factor, .. } => std::slice::from_ref(factor),
            Content::Simple(_) | Content::Reference => &[],
        }
    }

    /// Same shape with new factors (Simple and Reference are returned as is)
    pub(crate) fn with_factors(&self, factors: Vec<Denotator>) -> Content {
        match self {
            Content::Limit(_) => Content::Limit(factors),
            Content::Power(_) => Content::Power(super::ordering::canonicalize(factors)),
            Content::List(_) => Content::List(factors),
            Content::Colimit { index, factor } => Content::Colimit {
                index: *index,
                factor: factors.into_iter().next().unwrap_or_else(|| factor.clone()),
            },
            Content::Simple(_) | Content::Reference => self.clone(),
        }
    }
}

/// A Yoneda morphism: the address module together with the content it
/// parameterizes
///
/// `address` is the domain of the coordinate. For simple content it is
/// exactly the domain of the module morphism.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub(crate) address: Module,
    pub(crate) content: Content,
}

impl Coordinate {
    pub(crate) fn new(address: Module, content: Content) -> Self {
        Self { address, content }
    }

    /// Domain of the coordinate
    pub fn address(&self) -> &Module {
        &self.address
    }

    /// The parameterized content
    pub fn content(&self) -> &Content {
        &self.content
    }
}

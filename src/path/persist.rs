// Copyright 2025 Cowboy AI, LLC.

//! Persisted representation of paths

use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::DenotatorPath;
use crate::dictionary::Dictionary;
use crate::errors::{DenotatorError, DenotatorResult};

/// A path as stored outside the process: the base form by name plus the
/// indices
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PersistedPath {
    /// Name of the base form
    pub base_form: String,
    /// Path indices
    pub indices: Vec<usize>,
}

impl PersistedPath {
    /// JSON schema of the persisted form
    pub fn json_schema() -> RootSchema {
        schema_for!(PersistedPath)
    }

    /// Rebuild the path, looking the base form up in `dictionary`
    pub fn resolve<D: Dictionary + ?Sized>(&self, dictionary: &D) -> DenotatorResult<DenotatorPath> {
        let form = dictionary
            .lookup_form(&self.base_form)
            .ok_or_else(|| DenotatorError::UnknownForm(self.base_form.clone()))?;
        DenotatorPath::new(&form, &self.indices)
    }
}

impl DenotatorPath {
    /// Persisted representation
    pub fn to_persisted(&self) -> PersistedPath {
        PersistedPath {
            base_form: self.base_form().name().to_string(),
            indices: self.indices().to_vec(),
        }
    }
}

impl From<&DenotatorPath> for PersistedPath {
    fn from(path: &DenotatorPath) -> Self {
        path.to_persisted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Module;
    use crate::form::SchemaBuilder;

    #[test]
    fn persisted_paths_resolve_against_a_schema() {
        let schema = SchemaBuilder::new()
            .simple("Onset", Module::reals())
            .list("Line", "Onset")
            .build()
            .unwrap();
        let path = DenotatorPath::new(&schema.form("Line").unwrap(), &[4]).unwrap();
        let persisted = path.to_persisted();
        assert_eq!(persisted.base_form, "Line");
        assert_eq!(persisted.resolve(&schema).unwrap(), path);

        let unknown = PersistedPath {
            base_form: "Score".to_string(),
            indices: vec![0],
        };
        assert_eq!(
            unknown.resolve(&schema).unwrap_err(),
            DenotatorError::UnknownForm("Score".to_string())
        );
    }

    #[test]
    fn json_schema_names_both_fields() {
        let schema = serde_json::to_value(PersistedPath::json_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("base_form").is_some());
        assert!(properties.get("indices").is_some());
    }
}

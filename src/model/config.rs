//! Model configuration

use super::store::{ModelError, ModelResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_strict() -> bool {
    true
}

/// Construction parameters for a [`Model`](super::Model)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Namespace for unprefixed names; must be an absolute IRI
    pub base: String,

    /// Prefix -> namespace mappings, in declaration order
    #[serde(default)]
    pub prefixes: IndexMap<String, String>,

    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl ModelConfig {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            prefixes: IndexMap::new(),
            strict: true,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), namespace.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> ModelResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ModelError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> ModelResult<String> {
        serde_yaml::to_string(self).map_err(|e| ModelError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn test_from_yaml() {
        let config = ModelConfig::from_yaml(
            r#"
base: "http://qfield.net/example/ns#"
prefixes:
  dc: "http://purl.org/dc/elements/1.1/"
  foaf: "http://xmlns.com/foaf/0.1/"
"#,
        )
        .unwrap();

        assert_eq!(config.base, "http://qfield.net/example/ns#");
        assert!(config.strict);
        assert_eq!(
            config.prefixes.keys().collect::<Vec<_>>(),
            vec!["dc", "foaf"]
        );

        let model = Model::from_config(&config).unwrap();
        assert_eq!(
            model.expand_iri("foaf:name"),
            "http://xmlns.com/foaf/0.1/name"
        );
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ModelConfig::new("http://example.org/")
            .with_prefix("ex", "http://example.org/ns#")
            .with_strict(false);
        let parsed = ModelConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, config);
        assert!(!Model::from_config(&parsed).unwrap().use_strict());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            ModelConfig::from_yaml("prefixes: [1, 2"),
            Err(ModelError::Config(_))
        ));
    }
}

//! RDFS Model
//!
//! An in-memory object model for RDF/RDFS graphs: build, query and mutate
//! typed resources and their property bindings, then project the graph to and
//! from JSON-LD.
//!
//! # Components
//!
//! - [`namespace`]: prefix table and IRI expansion
//! - [`datatype`]: XML Schema datatypes and lexical ↔ native coercion
//! - [`model`]: resources, ordered multi-valued bindings, domain/range
//!   constraints and strict-mode inference
//! - [`jsonld`]: asynchronous load/save through a pluggable JSON-LD processor
//! - [`vocab`]: well-known RDF, RDFS, XSD and OWL IRIs
//!
//! ## Example Usage
//!
//! ```rust
//! use rdfs_model::{Model, Value};
//!
//! let mut model = Model::new("http://qfield.net/example/ns#").unwrap();
//!
//! // Classes and properties
//! let agent = model.define_class(Some("Agent"), None).unwrap();
//! model.define_property(agent, "name").unwrap();
//!
//! // Instances must be in the property's domain while strict mode is on
//! let alice = model.instantiate(agent, Some("alice")).unwrap();
//! model.set(alice, "name", "Alice").unwrap();
//!
//! let view = model.get("alice").unwrap();
//! assert!(view.has_value("name", "Alice"));
//! assert_eq!(view.get("name").unwrap().get().unwrap(), Some(&Value::from("Alice")));
//!
//! // Outside the domain: rejected in strict mode, inferred otherwise
//! let bob = model.rdfs_resource(Some("bob")).unwrap();
//! assert!(model.set(bob, "name", "Bob").is_err());
//! model.set_use_strict(false);
//! model.set(bob, "name", "Bob").unwrap();
//! assert!(model.is_instance_of(bob, agent));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod datatype;
pub mod jsonld;
pub mod model;
pub mod namespace;
pub mod vocab;

// Re-export main types for convenience
pub use datatype::{Datatype, DatatypeError, DatatypeResult, Native};

pub use jsonld::{to_ntriples, FlatDocument, JsonLdProcessor, ProcessorError, ProcessorResult};

pub use model::{
    BindingProperty, BindingView, Builtins, ConstraintRegistry, Exclude, Exclusions, Literal,
    Model, ModelConfig, ModelError, ModelResult, PropertyConstraints, Resource, ResourceId,
    ResourceRef, ResourceView, SaveOptions, Unwrapped, Value,
};

pub use namespace::{Namespace, NamespaceManager, PrefixError, PrefixResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "1.0.0");
    }
}

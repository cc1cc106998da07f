//! RDF/RDFS resource model
//!
//! This module implements the in-memory object model:
//! - Resources interned by IRI, or anonymous blank nodes, held in an arena
//!   and addressed by [`ResourceId`]
//! - Ordered multi-valued property bindings with language-aware equality
//! - RDFS domain/range constraints, enforced in strict mode and inferred in
//!   permissive mode
//! - Factories for classes, properties, datatypes and typed literals

pub mod binding;
pub mod config;
pub mod constraints;
pub mod exclude;
pub mod resource;
pub mod store;
pub mod types;
pub mod value;

// Re-export main types
pub use binding::BindingProperty;
pub use config::ModelConfig;
pub use constraints::{ConstraintRegistry, PropertyConstraints};
pub use exclude::{Exclude, Exclusions, SaveOptions};
pub use resource::{BindingView, Resource, ResourceView, Unwrapped};
pub use store::{Builtins, Model, ModelError, ModelResult};
pub use types::{ResourceId, ResourceRef};
pub use value::{Literal, Value};

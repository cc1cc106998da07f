//! Model → JSON-LD node objects
//!
//! Strings and untagged `xsd:string` literals are written as bare JSON
//! strings, finite numbers and booleans as bare JSON values. Everything else
//! becomes a value object carrying `@type` or `@language`. Every property
//! value is written inside an array, `rdf:type` included.

use crate::datatype::{Datatype, Native};
use crate::model::{BindingProperty, Exclusions, Literal, Model, Resource, ResourceId, Value};
use crate::vocab::IRI_XSD_STRING;
use rustc_hash::FxHashSet;
use serde_json::{json, Map, Number, Value as Json};

pub(crate) fn native_to_json(native: &Native) -> Json {
    match native {
        Native::String(s) => Json::String(s.clone()),
        Native::Boolean(b) => Json::Bool(*b),
        Native::Number(n) if native.datatype() == Datatype::Integer => json!(*n as i64),
        Native::Number(n) => match Number::from_f64(*n) {
            Some(number) => Json::Number(number),
            None => typed_value(native.to_lexical(), native_type_iri(native)),
        },
        Native::Date(_) => typed_value(native.to_lexical(), native_type_iri(native)),
    }
}

fn native_type_iri(native: &Native) -> &'static str {
    native.datatype().iri().unwrap_or(IRI_XSD_STRING)
}

fn typed_value(lexical: String, datatype: &str) -> Json {
    json!({ "@value": lexical, "@type": datatype })
}

pub(crate) fn literal_to_json(model: &Model, literal: &Literal) -> Json {
    if let Some(language) = literal.language() {
        return json!({ "@value": literal.lexical(), "@language": language });
    }
    if literal.datatype() == model.builtins().xsd_string {
        return Json::String(literal.lexical().to_string());
    }
    typed_value(literal.lexical().to_string(), &model.describe(literal.datatype()))
}

fn reference(model: &Model, id: ResourceId) -> Json {
    json!({ "@id": model.describe(id) })
}

/// Flat node: resource values are `@id` references
pub(crate) fn flat_node(model: &Model, record: &Resource) -> Json {
    let mut node = Map::new();
    node.insert("@id".to_string(), Json::String(model.describe(record.id())));
    for binding in record.bindings() {
        let values = binding
            .iter()
            .map(|value| match value {
                Value::Native(native) => native_to_json(native),
                Value::Literal(literal) => literal_to_json(model, literal),
                Value::Resource(id) => reference(model, *id),
            })
            .collect();
        node.insert(model.describe(binding.property()), Json::Array(values));
    }
    Json::Object(node)
}

/// Flat nodes for every non-transient resource that survives `exclusions`,
/// in arena order
pub(crate) fn encode_model(model: &Model, exclusions: &Exclusions) -> Vec<Json> {
    model
        .iter()
        .filter(|view| !exclusions.excludes(view))
        .map(|view| flat_node(model, view.record()))
        .collect()
}

/// Embeds reachable resources once; later occurrences are `@id` references.
/// Built-in terms are always referenced, never embedded.
struct Embedder<'a> {
    model: &'a Model,
    visited: FxHashSet<ResourceId>,
}

impl<'a> Embedder<'a> {
    fn new(model: &'a Model) -> Self {
        Self {
            model,
            visited: FxHashSet::default(),
        }
    }

    fn node(&mut self, id: ResourceId) -> Json {
        self.visited.insert(id);
        let Some(record) = self.model.resource(id).map(|view| view.record()) else {
            return reference(self.model, id);
        };

        let mut node = Map::new();
        node.insert("@id".to_string(), Json::String(self.model.describe(id)));
        for binding in record.bindings() {
            let values = self.values(binding);
            node.insert(self.model.describe(binding.property()), values);
        }
        Json::Object(node)
    }

    fn values(&mut self, binding: &BindingProperty) -> Json {
        Json::Array(binding.iter().map(|value| self.value(value)).collect())
    }

    fn value(&mut self, value: &Value) -> Json {
        match value {
            Value::Native(native) => native_to_json(native),
            Value::Literal(literal) => literal_to_json(self.model, literal),
            Value::Resource(id) if self.visited.contains(id) || self.model.is_builtin(*id) => {
                reference(self.model, *id)
            }
            Value::Resource(id) => self.node(*id),
        }
    }
}

pub(crate) fn resource_to_json(model: &Model, id: ResourceId) -> Json {
    Json::Array(vec![Embedder::new(model).node(id)])
}

pub(crate) fn binding_to_json(model: &Model, binding: &BindingProperty) -> Json {
    Embedder::new(model).values(binding)
}

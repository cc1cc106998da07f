//! JSON-LD node objects → model
//!
//! Decoding runs in two passes so that nodes may reference each other in any
//! order: every described subject is interned first, then bindings are
//! attached. Blank node labels are scoped to one decode. Constraint checks
//! are not applied; the document is taken as it is.
//!
//! The whole document is checked before the first resource is interned, so a
//! rejected document leaves the model untouched.

use crate::datatype::{Datatype, Native};
use crate::model::{Literal, Model, ModelError, ModelResult, ResourceId, ResourceRef, Value};
use crate::namespace::is_blank_label;
use crate::vocab::IRI_XSD_STRING;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value as Json};
use tracing::{debug, info};

type Node = Map<String, Json>;

pub(crate) struct Decoder<'m> {
    model: &'m mut Model,
    /// Blank labels seen in this document
    blanks: FxHashMap<String, ResourceId>,
    /// Resources created by this decode
    created: Vec<ResourceId>,
    /// Properties used by this decode
    properties: Vec<ResourceId>,
}

impl<'m> Decoder<'m> {
    pub(crate) fn new(model: &'m mut Model) -> Self {
        Self {
            model,
            blanks: FxHashMap::default(),
            created: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Decode a flat node array; returns the container listing its nodes
    pub(crate) fn decode(mut self, nodes: &[Json]) -> ModelResult<ResourceId> {
        for node in nodes {
            check_node(as_node(node)?)?;
        }

        let mut top = Vec::with_capacity(nodes.len());
        for node in nodes {
            let node = as_node(node)?;
            top.push(self.subject(node)?);
        }
        for (node, subject) in nodes.iter().zip(&top) {
            self.bindings(*subject, as_node(node)?)?;
        }

        let b = *self.model.builtins();
        for id in &self.created {
            if self.model.binding(*id, b.rdf_type).is_none() {
                self.model.push_type(*id, b.rdfs_resource);
            }
        }
        for property in &self.properties {
            self.model.adopt_declared_constraints(*property);
        }

        let container = self.model.create_blank();
        self.model.mark_transient(container);
        self.model.push_type(container, b.rdfs_container);
        for subject in &top {
            self.model
                .push_unique(container, b.rdfs_member, Value::Resource(*subject));
        }

        info!(
            "Loaded {} nodes ({} new resources)",
            top.len(),
            self.created.len()
        );
        Ok(container)
    }

    /// Intern (or mint) the subject of a node object
    fn subject(&mut self, node: &Node) -> ModelResult<ResourceId> {
        match node.get("@id") {
            Some(Json::String(id)) => Ok(self.reference(id)?.0),
            Some(other) => Err(ModelError::InvalidDocument(format!(
                "@id must be a string, found {}",
                other
            ))),
            None => {
                let id = self.model.create_blank();
                self.created.push(id);
                Ok(id)
            }
        }
    }

    /// Resolve an `@id` value; true if the resource was created
    fn reference(&mut self, id: &str) -> ModelResult<(ResourceId, bool)> {
        if is_blank_label(id) {
            if let Some(existing) = self.blanks.get(id) {
                return Ok((*existing, false));
            }
            let blank = self.model.create_blank();
            self.blanks.insert(id.to_string(), blank);
            self.created.push(blank);
            return Ok((blank, true));
        }

        let (resource, created) = self.model.resolve_named(id)?;
        if created {
            self.created.push(resource);
        }
        Ok((resource, created))
    }

    fn bindings(&mut self, subject: ResourceId, node: &Node) -> ModelResult<()> {
        for (key, value) in node {
            match key.as_str() {
                "@type" => {
                    for class in as_array(value) {
                        let class = class.as_str().ok_or_else(|| {
                            ModelError::InvalidDocument(format!("@type must be a string, found {}", class))
                        })?;
                        let (class, _) = self.reference(class)?;
                        self.model.push_type(subject, class);
                    }
                }
                key if key.starts_with('@') => {}
                key => {
                    let property = self.model.resolve_property(ResourceRef::Name(key))?;
                    if !self.properties.contains(&property) {
                        self.properties.push(property);
                    }
                    for item in as_array(value) {
                        let item = self.value(item)?;
                        self.bind(subject, property, item);
                    }
                }
            }
        }
        Ok(())
    }

    /// Bind unless an identical value is already present
    fn bind(&mut self, subject: ResourceId, property: ResourceId, value: Value) {
        let present = self
            .model
            .binding(subject, property)
            .is_some_and(|b| b.values().contains(&value));
        if !present {
            self.model.push(subject, property, value);
        }
    }

    fn value(&mut self, value: &Json) -> ModelResult<Value> {
        match value {
            Json::String(s) => Ok(Value::from(s.as_str())),
            Json::Bool(b) => Ok(Value::from(*b)),
            Json::Number(_) => Ok(Value::Native(json_native(value)?)),
            Json::Object(object) => {
                if let Some(raw) = object.get("@value") {
                    return self.literal(raw, object);
                }
                if let Some(items) = object.get("@list") {
                    return self.list(items);
                }
                let id = self.subject(object)?;
                if object.keys().any(|k| k != "@id") {
                    self.bindings(id, object)?;
                }
                Ok(Value::Resource(id))
            }
            other => Err(ModelError::InvalidDocument(format!(
                "unsupported value {}",
                other
            ))),
        }
    }

    fn literal(&mut self, raw: &Json, object: &Node) -> ModelResult<Value> {
        let lexical = match raw {
            Json::String(s) => s.clone(),
            Json::Number(_) | Json::Bool(_) => json_native(raw)?.to_lexical(),
            other => {
                return Err(ModelError::InvalidDocument(format!(
                    "@value must be a scalar, found {}",
                    other
                )))
            }
        };

        if let Some(language) = object.get("@language").and_then(Json::as_str) {
            let b = self.model.builtins();
            return Ok(Value::Literal(Literal::new(
                lexical,
                b.rdf_lang_string,
                Datatype::LangString,
                Some(language.to_lowercase()),
            )));
        }

        let Some(datatype) = object.get("@type").and_then(Json::as_str) else {
            return match raw {
                Json::String(_) => Ok(Value::from(lexical)),
                _ => Ok(Value::Native(json_native(raw)?)),
            };
        };

        let (datatype, created) = self.reference(datatype)?;
        if created {
            self.model.push_type(datatype, self.model.builtins().rdfs_datatype);
        }
        if self.model.describe(datatype) == IRI_XSD_STRING {
            return Ok(Value::from(lexical));
        }
        let kind = self.model.datatype_kind(datatype);
        Ok(Value::Literal(Literal::new(lexical, datatype, kind, None)))
    }

    /// Build an rdf:first/rdf:rest chain ending in rdf:nil
    fn list(&mut self, items: &Json) -> ModelResult<Value> {
        let values = as_array(items)
            .map(|item| self.value(item))
            .collect::<ModelResult<Vec<_>>>()?;

        let b = *self.model.builtins();
        let mut rest = b.rdf_nil;
        for value in values.into_iter().rev() {
            let cell = self.model.create_blank();
            self.created.push(cell);
            self.model.push_type(cell, b.rdf_list);
            self.model.push(cell, b.rdf_first, value);
            self.model.push(cell, b.rdf_rest, Value::Resource(rest));
            rest = cell;
        }
        debug!("Decoded list head {}", self.model.describe(rest));
        Ok(Value::Resource(rest))
    }
}

fn invalid(message: String) -> ModelError {
    ModelError::InvalidDocument(message)
}

/// Reject everything the decoder would fail on, without touching the model
fn check_node(node: &Node) -> ModelResult<()> {
    match node.get("@id") {
        None | Some(Json::String(_)) => {}
        Some(other) => return Err(invalid(format!("@id must be a string, found {}", other))),
    }
    for (key, value) in node {
        match key.as_str() {
            "@type" => {
                if let Some(class) = as_array(value).find(|class| !class.is_string()) {
                    return Err(invalid(format!("@type must be a string, found {}", class)));
                }
            }
            key if key.starts_with('@') => {}
            key if is_blank_label(key) => {
                return Err(ModelError::InvalidReference(format!(
                    "blank node label {} used as a property",
                    key
                )))
            }
            _ => as_array(value).try_for_each(check_value)?,
        }
    }
    Ok(())
}

fn check_value(value: &Json) -> ModelResult<()> {
    match value {
        Json::String(_) | Json::Bool(_) => Ok(()),
        Json::Number(_) => json_native(value).map(|_| ()),
        Json::Object(object) => {
            if let Some(raw) = object.get("@value") {
                return match raw {
                    Json::String(_) | Json::Bool(_) | Json::Number(_) => json_native(raw).map(|_| ()),
                    other => Err(invalid(format!("@value must be a scalar, found {}", other))),
                };
            }
            if let Some(items) = object.get("@list") {
                return as_array(items).try_for_each(check_value);
            }
            check_node(object)
        }
        other => Err(invalid(format!("unsupported value {}", other))),
    }
}

fn as_node(value: &Json) -> ModelResult<&Node> {
    value
        .as_object()
        .ok_or_else(|| ModelError::InvalidDocument(format!("expected a node object, found {}", value)))
}

fn as_array(value: &Json) -> impl Iterator<Item = &Json> {
    match value {
        Json::Array(items) => items.iter(),
        single => std::slice::from_ref(single).iter(),
    }
}

fn json_native(value: &Json) -> ModelResult<Native> {
    match value {
        Json::Bool(b) => Ok(Native::Boolean(*b)),
        Json::Number(n) => n
            .as_f64()
            .map(Native::Number)
            .ok_or_else(|| ModelError::InvalidDocument(format!("unrepresentable number {}", n))),
        Json::String(s) => Ok(Native::String(s.clone())),
        other => Err(ModelError::InvalidDocument(format!("not a scalar: {}", other))),
    }
}

//! Resource records and read-only views
//!
//! A [`Resource`] is the arena record: optional IRI plus bindings keyed by
//! property id in first-bound order. [`ResourceView`] and [`BindingView`]
//! pair a record with its model so names can be resolved and values rendered.

use super::binding::BindingProperty;
use super::store::{Model, ModelResult};
use super::types::{ResourceId, ResourceRef};
use super::value::Value;
use crate::datatype::Native;
use crate::jsonld::encode;
use indexmap::IndexMap;
use std::fmt;
use std::ops::Deref;

/// A graph node
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    id: ResourceId,
    iri: Option<String>,
    bindings: IndexMap<ResourceId, BindingProperty>,
}

impl Resource {
    pub(crate) fn named(id: ResourceId, iri: impl Into<String>) -> Self {
        Self {
            id,
            iri: Some(iri.into()),
            bindings: IndexMap::new(),
        }
    }

    pub(crate) fn blank(id: ResourceId) -> Self {
        Self {
            id,
            iri: None,
            bindings: IndexMap::new(),
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    pub fn is_blank(&self) -> bool {
        self.iri.is_none()
    }

    /// The binding for `property`, if any value is bound
    pub fn binding(&self, property: ResourceId) -> Option<&BindingProperty> {
        self.bindings.get(&property).filter(|b| !b.is_empty())
    }

    /// Non-empty bindings in first-bound order
    pub fn bindings(&self) -> impl Iterator<Item = &BindingProperty> {
        self.bindings.values().filter(|b| !b.is_empty())
    }

    pub(crate) fn binding_entry(&mut self, property: ResourceId) -> &mut BindingProperty {
        self.bindings
            .entry(property)
            .or_insert_with(|| BindingProperty::new(property))
    }

    pub(crate) fn remove_binding(&mut self, property: ResourceId) -> bool {
        self.bindings
            .shift_remove(&property)
            .is_some_and(|b| !b.is_empty())
    }

    /// Remove the first matching value, dropping the binding once empty
    pub(crate) fn remove_value(&mut self, property: ResourceId, value: &Value) -> bool {
        let Some(binding) = self.bindings.get_mut(&property) else {
            return false;
        };
        let removed = binding.remove(value);
        if binding.is_empty() {
            self.bindings.shift_remove(&property);
        }
        removed
    }
}

/// Read-only view of a resource within its model
#[derive(Clone, Copy)]
pub struct ResourceView<'a> {
    model: &'a Model,
    resource: &'a Resource,
}

impl<'a> ResourceView<'a> {
    pub(crate) fn new(model: &'a Model, resource: &'a Resource) -> Self {
        Self { model, resource }
    }

    pub fn id(&self) -> ResourceId {
        self.resource.id()
    }

    pub fn iri(&self) -> Option<&'a str> {
        self.resource.iri()
    }

    pub fn is_blank(&self) -> bool {
        self.resource.is_blank()
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn record(&self) -> &'a Resource {
        self.resource
    }

    /// True if any value is bound for `property`
    pub fn has<'p>(&self, property: impl Into<ResourceRef<'p>>) -> bool {
        self.get(property).is_some()
    }

    /// True if a value matching `value` is bound for `property`
    pub fn has_value<'p>(&self, property: impl Into<ResourceRef<'p>>, value: impl Into<Value>) -> bool {
        self.get(property).is_some_and(|b| b.has(&value.into()))
    }

    /// The binding for `property`, or `None` when unbound
    pub fn get<'p>(&self, property: impl Into<ResourceRef<'p>>) -> Option<BindingView<'a>> {
        let property = self.model.lookup_ref(property.into())?;
        self.resource
            .binding(property)
            .map(|binding| BindingView::new(self.model, binding))
    }

    /// Direct rdf:type values
    pub fn types(&self) -> Vec<ResourceId> {
        self.resource
            .binding(self.model.builtins().rdf_type)
            .map(|b| b.iter().filter_map(Value::as_resource).collect())
            .unwrap_or_default()
    }

    /// True if this resource is an instance of `class`, following
    /// rdfs:subClassOf
    pub fn is_instance_of(&self, class: ResourceId) -> bool {
        self.model.is_instance_of(self.id(), class)
    }

    /// Bindings in first-bound order
    pub fn bindings(&self) -> impl Iterator<Item = BindingView<'a>> + 'a {
        let model = self.model;
        self.resource
            .bindings()
            .map(move |binding| BindingView::new(model, binding))
    }

    pub fn some<F>(&self, mut f: F) -> bool
    where
        F: FnMut(BindingView<'a>) -> bool,
    {
        self.bindings().any(|b| f(b))
    }

    pub fn every<F>(&self, mut f: F) -> bool
    where
        F: FnMut(BindingView<'a>) -> bool,
    {
        self.bindings().all(|b| f(b))
    }

    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(BindingView<'a>),
    {
        self.bindings().for_each(f)
    }

    /// The native value of a single, valid `rdf:value`; the resource itself
    /// otherwise
    pub fn value_of(&self) -> Unwrapped<'a> {
        let wrapped = self
            .resource
            .binding(self.model.builtins().rdf_value)
            .and_then(|b| match b.values() {
                [Value::Native(native)] => Some(native.clone()),
                [Value::Literal(literal)] => literal.checked_value().ok(),
                _ => None,
            });
        match wrapped {
            Some(native) => Unwrapped::Native(native),
            None => Unwrapped::Resource(*self),
        }
    }

    /// JSON-LD node array for this resource and every resource it reaches
    pub fn to_json(&self) -> serde_json::Value {
        encode::resource_to_json(self.model, self.id())
    }
}

impl PartialEq for ResourceView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.id() == other.id()
    }
}

impl fmt::Debug for ResourceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceView")
            .field("id", &self.id())
            .field("iri", &self.iri())
            .finish()
    }
}

impl fmt::Display for ResourceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iri() {
            Some(iri) => write!(f, "Resource <{}>", iri),
            None => write!(f, "Resource"),
        }
    }
}

/// Read-only view of a binding within its model
#[derive(Clone, Copy)]
pub struct BindingView<'a> {
    model: &'a Model,
    binding: &'a BindingProperty,
}

impl<'a> BindingView<'a> {
    pub(crate) fn new(model: &'a Model, binding: &'a BindingProperty) -> Self {
        Self { model, binding }
    }

    pub fn binding(&self) -> &'a BindingProperty {
        self.binding
    }

    /// The bound property as a resource view
    pub fn property_view(&self) -> Option<ResourceView<'a>> {
        self.model.resource(self.binding.property())
    }

    /// The first resource entry identified by `key`
    pub fn get_named<'p>(&self, key: impl Into<ResourceRef<'p>>) -> Option<&'a Value> {
        let id = self.model.lookup_ref(key.into())?;
        self.binding.find_resource(id)
    }

    /// The entry at `index` as a resource view, when it is a resource
    pub fn resource_at(&self, index: usize) -> Option<ResourceView<'a>> {
        self.binding
            .get_at(index)
            .and_then(Value::as_resource)
            .and_then(|id| self.model.resource(id))
    }

    /// The sole entry's own value when exactly one entry is bound, the
    /// binding itself otherwise
    pub fn value_of(&self) -> ModelResult<Unwrapped<'a>> {
        let [single] = self.binding.values() else {
            return Ok(Unwrapped::Binding(*self));
        };
        match single {
            Value::Native(native) => Ok(Unwrapped::Native(native.clone())),
            Value::Literal(literal) => Ok(Unwrapped::Native(literal.value()?)),
            Value::Resource(id) => match self.model.resource(*id) {
                Some(view) => Ok(view.value_of()),
                None => Ok(Unwrapped::Binding(*self)),
            },
        }
    }

    /// JSON-LD array of the bound values
    pub fn to_json(&self) -> serde_json::Value {
        encode::binding_to_json(self.model, self.binding)
    }
}

impl Deref for BindingView<'_> {
    type Target = BindingProperty;

    fn deref(&self) -> &Self::Target {
        self.binding
    }
}

impl fmt::Debug for BindingView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingView")
            .field("property", &self.model.describe(self.binding.property()))
            .field("values", &self.binding.values())
            .finish()
    }
}

impl fmt::Display for BindingView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model.resource(self.binding.property()).and_then(|p| p.iri()) {
            Some(iri) => write!(f, "BindingProperty <{}> [", iri)?,
            None => write!(f, "BindingProperty {} [", self.model.describe(self.binding.property()))?,
        }
        for (i, value) in self.binding.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value.as_resource().and_then(|id| self.model.resource(id)) {
                Some(view) => write!(f, "{}", view)?,
                None => write!(f, "{}", value)?,
            }
        }
        write!(f, "]")
    }
}

/// Result of unwrapping a resource or binding to its value
#[derive(Debug, Clone)]
pub enum Unwrapped<'a> {
    Native(Native),
    Resource(ResourceView<'a>),
    Binding(BindingView<'a>),
}

impl<'a> Unwrapped<'a> {
    pub fn as_native(&self) -> Option<&Native> {
        match self {
            Unwrapped::Native(native) => Some(native),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<ResourceView<'a>> {
        match self {
            Unwrapped::Resource(view) => Some(*view),
            _ => None,
        }
    }

    pub fn as_binding(&self) -> Option<BindingView<'a>> {
        match self {
            Unwrapped::Binding(view) => Some(*view),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_record_bindings() {
        let mut r = Resource::named(ResourceId(10), "http://example.org/r");
        assert_eq!(r.iri(), Some("http://example.org/r"));
        assert!(!r.is_blank());

        r.binding_entry(ResourceId(1)).push(Value::from("a"));
        r.binding_entry(ResourceId(2)).push(Value::from("b"));
        r.binding_entry(ResourceId(1)).push(Value::from("c"));

        let order: Vec<_> = r.bindings().map(|b| b.property()).collect();
        assert_eq!(order, vec![ResourceId(1), ResourceId(2)]);
        assert_eq!(r.binding(ResourceId(1)).map(|b| b.size()), Some(2));
    }

    #[test]
    fn test_remove_value_prunes_empty_binding() {
        let mut r = Resource::blank(ResourceId(3));
        r.binding_entry(ResourceId(1)).push(Value::from(1));

        assert!(!r.remove_value(ResourceId(1), &Value::from(2)));
        assert!(r.remove_value(ResourceId(1), &Value::from(1)));
        assert!(r.binding(ResourceId(1)).is_none());
        assert_eq!(r.bindings().count(), 0);
        assert!(!r.remove_binding(ResourceId(1)));
    }
}

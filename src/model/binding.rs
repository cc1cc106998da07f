//! Ordered multi-valued property bindings

use super::store::{ModelError, ModelResult};
use super::types::ResourceId;
use super::value::Value;

/// The values bound to one (subject, property) pair, in insertion order.
///
/// Duplicates are allowed. Lookups and removal use [`Value::matches`].
#[derive(Debug, Clone, PartialEq)]
pub struct BindingProperty {
    property: ResourceId,
    values: Vec<Value>,
}

impl BindingProperty {
    pub(crate) fn new(property: ResourceId) -> Self {
        Self {
            property,
            values: Vec::new(),
        }
    }

    pub fn property(&self) -> ResourceId {
        self.property
    }

    /// Number of bound values
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if any bound value matches `query`
    pub fn has(&self, query: &Value) -> bool {
        self.values.iter().any(|v| v.matches(query))
    }

    /// The sole bound value.
    ///
    /// Returns `Ok(None)` when nothing is bound and
    /// [`ModelError::AmbiguousValue`] when more than one value is.
    pub fn get(&self) -> ModelResult<Option<&Value>> {
        match self.values.as_slice() {
            [] => Ok(None),
            [single] => Ok(Some(single)),
            values => Err(ModelError::AmbiguousValue {
                property: self.property,
                count: values.len(),
            }),
        }
    }

    /// The value at `index` in insertion order, whatever its kind
    pub fn get_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The first resource entry with identity `id`
    pub fn find_resource(&self, id: ResourceId) -> Option<&Value> {
        self.values.iter().find(|v| v.as_resource() == Some(id))
    }

    /// True on the first value for which `f` returns true
    pub fn some<F>(&self, f: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        self.values.iter().any(f)
    }

    /// False on the first value for which `f` returns false
    pub fn every<F>(&self, f: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        self.values.iter().all(f)
    }

    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&Value),
    {
        self.values.iter().for_each(f)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Remove every value; nothing is bound afterwards
    pub(crate) fn clear(&mut self) -> bool {
        self.values.clear();
        true
    }

    /// Remove the first value matching `query`
    pub(crate) fn remove(&mut self, query: &Value) -> bool {
        match self.values.iter().position(|v| v.matches(query)) {
            Some(pos) => {
                self.values.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a BindingProperty {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::Datatype;
    use crate::model::value::Literal;

    fn binding(values: Vec<Value>) -> BindingProperty {
        let mut b = BindingProperty::new(ResourceId(1));
        for v in values {
            b.push(v);
        }
        b
    }

    fn lang(text: &str, tag: &str) -> Value {
        Literal::new(text, ResourceId(9), Datatype::LangString, Some(tag.to_string())).into()
    }

    #[test]
    fn test_insertion_order() {
        let b = binding(vec![Value::from("v1"), Value::from(2), Value::Resource(ResourceId(5))]);

        let mut seen = Vec::new();
        b.for_each(|v| seen.push(v.clone()));
        assert_eq!(seen, b.values());
        assert_eq!(b.get_at(0), Some(&Value::from("v1")));
        assert_eq!(b.get_at(2), Some(&Value::Resource(ResourceId(5))));
        assert_eq!(b.get_at(3), None);
    }

    #[test]
    fn test_get_single_and_ambiguous() {
        assert_eq!(binding(vec![]).get().unwrap(), None);
        assert_eq!(binding(vec![Value::from(1)]).get().unwrap(), Some(&Value::from(1)));

        let err = binding(vec![Value::from(1), Value::from(2)]).get().unwrap_err();
        assert!(matches!(err, ModelError::AmbiguousValue { count: 2, .. }));
    }

    #[test]
    fn test_duplicates_coexist() {
        let mut b = binding(vec![Value::from("a"), Value::from("a")]);
        assert_eq!(b.size(), 2);
        assert!(b.remove(&Value::from("a")));
        assert_eq!(b.size(), 1);
        assert!(b.has(&Value::from("a")));
    }

    #[test]
    fn test_find_resource() {
        let b = binding(vec![Value::from(5), Value::Resource(ResourceId(5))]);
        assert_eq!(b.find_resource(ResourceId(5)), Some(&Value::Resource(ResourceId(5))));
        assert_eq!(b.find_resource(ResourceId(6)), None);
    }

    #[test]
    fn test_some_and_every_short_circuit() {
        let b = binding(vec![Value::from(1), Value::from(2), Value::from(3)]);

        let mut calls = 0;
        assert!(b.some(|v| {
            calls += 1;
            v.matches(&Value::from(2))
        }));
        assert_eq!(calls, 2);

        let mut calls = 0;
        assert!(!b.every(|v| {
            calls += 1;
            !v.matches(&Value::from(1))
        }));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_language_agnostic_delete() {
        let mut b = binding(vec![lang("x", "en-us"), lang("x", "en-ca"), lang("x", "en-au")]);

        assert!(b.has(&Value::from("x")));
        assert!(!b.has(&lang("x", "en-bg")));

        assert!(b.remove(&lang("x", "en-ca")));
        assert_eq!(b.values(), &[lang("x", "en-us"), lang("x", "en-au")]);

        assert!(b.remove(&Value::from("x")));
        assert!(b.has(&Value::from("x")));
        assert!(b.remove(&Value::from("x")));
        assert!(!b.has(&Value::from("x")));
        assert!(!b.remove(&Value::from("x")));
    }

    #[test]
    fn test_clear() {
        let mut b = binding(vec![Value::from(1), Value::from(2)]);
        assert!(b.clear());
        assert!(b.is_empty());
    }
}

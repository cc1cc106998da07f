//! Core type definitions for the resource model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a resource within one model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

impl ResourceId {
    pub fn new(id: u64) -> Self {
        ResourceId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({})", self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId(id)
    }
}

/// A reference to a resource: a name to expand and intern, or an id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef<'a> {
    Name(&'a str),
    Id(ResourceId),
}

impl<'a> From<&'a str> for ResourceRef<'a> {
    fn from(name: &'a str) -> Self {
        ResourceRef::Name(name)
    }
}

impl<'a> From<&'a String> for ResourceRef<'a> {
    fn from(name: &'a String) -> Self {
        ResourceRef::Name(name.as_str())
    }
}

impl From<ResourceId> for ResourceRef<'_> {
    fn from(id: ResourceId) -> Self {
        ResourceRef::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id() {
        let id = ResourceId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(id.to_string(), "ResourceId(42)");
        assert_eq!(ResourceId::from(42), id);
        assert!(ResourceId(1) < ResourceId(2));
    }

    #[test]
    fn test_resource_ref_conversions() {
        assert_eq!(ResourceRef::from("rdf:type"), ResourceRef::Name("rdf:type"));
        assert_eq!(ResourceRef::from(ResourceId(3)), ResourceRef::Id(ResourceId(3)));
    }
}

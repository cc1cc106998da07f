//! RDFS domain/range constraints and strict-mode inference
//!
//! Every property used by the model has a registry entry. A property first
//! used without declaration gets an implicit `rdfs:Resource` domain, which
//! the first explicit domain replaces.
//!
//! In strict mode a `set` whose subject is outside every declared domain, or
//! whose value is outside every declared range, fails before anything is
//! bound. In permissive mode the subject (or resource value) gains the first
//! declared domain (or class range) as an `rdf:type` instead. Literal values
//! cannot acquire a type, so a range failure on them always fails.

use super::store::{Builtins, Model, ModelError, ModelResult};
use super::types::{ResourceId, ResourceRef};
use super::value::Value;
use crate::datatype::Datatype;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

/// Declared domains and ranges of one property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyConstraints {
    domains: Vec<ResourceId>,
    ranges: Vec<ResourceId>,
    implicit_domain: bool,
}

impl PropertyConstraints {
    pub fn domains(&self) -> &[ResourceId] {
        &self.domains
    }

    pub fn ranges(&self) -> &[ResourceId] {
        &self.ranges
    }

    /// True while the domain is the implicit `rdfs:Resource`
    pub fn has_implicit_domain(&self) -> bool {
        self.implicit_domain
    }
}

/// Constraint registry: property -> constraints
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    entries: FxHashMap<ResourceId, PropertyConstraints>,
}

impl ConstraintRegistry {
    pub fn get(&self, property: ResourceId) -> Option<&PropertyConstraints> {
        self.entries.get(&property)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert_implicit(&mut self, property: ResourceId, resource_class: ResourceId) {
        self.entries.entry(property).or_insert_with(|| PropertyConstraints {
            domains: vec![resource_class],
            ranges: Vec::new(),
            implicit_domain: true,
        });
    }

    /// Add a domain; true if it replaced the implicit one
    pub(crate) fn add_domain(&mut self, property: ResourceId, domain: ResourceId) -> bool {
        let entry = self.entries.entry(property).or_default();
        let replaced = entry.implicit_domain;
        if replaced {
            entry.domains.clear();
            entry.implicit_domain = false;
        }
        if !entry.domains.contains(&domain) {
            entry.domains.push(domain);
        }
        replaced
    }

    pub(crate) fn add_range(&mut self, property: ResourceId, range: ResourceId) {
        let entry = self.entries.entry(property).or_default();
        if !entry.ranges.contains(&range) {
            entry.ranges.push(range);
        }
    }
}

impl Model {
    /// Declare a class, optionally as a subclass of `super_class`.
    ///
    /// `None` creates a blank class.
    pub fn define_class<'a>(
        &mut self,
        name: Option<&str>,
        super_class: Option<ResourceRef<'a>>,
    ) -> ModelResult<ResourceId> {
        let Builtins {
            rdfs_class,
            rdfs_sub_class_of,
            ..
        } = *self.builtins();

        let class = match name {
            Some(name) => self.resolve_named(name)?.0,
            None => self.create_blank(),
        };
        self.push_type(class, rdfs_class);

        if let Some(super_class) = super_class {
            let (super_class, _) = self.resolve(super_class)?;
            self.ensure_class(super_class);
            self.push_unique(class, rdfs_sub_class_of, Value::Resource(super_class));
        }
        Ok(class)
    }

    /// Register `domain` as a domain class of `property`
    pub fn define_property<'a, 'b>(
        &mut self,
        domain: impl Into<ResourceRef<'a>>,
        property: impl Into<ResourceRef<'b>>,
    ) -> ModelResult<ResourceId> {
        self.define_property_with_range(domain, property, &[])
    }

    /// Register `domain` as a domain class of `property` and each of
    /// `ranges` as one of its ranges. Binds nothing on the domain itself.
    pub fn define_property_with_range<'a, 'b>(
        &mut self,
        domain: impl Into<ResourceRef<'a>>,
        property: impl Into<ResourceRef<'b>>,
        ranges: &[ResourceRef<'_>],
    ) -> ModelResult<ResourceId> {
        let Builtins {
            rdfs_domain,
            rdfs_range,
            rdfs_resource,
            ..
        } = *self.builtins();

        let (domain, _) = self.resolve(domain.into())?;
        self.ensure_class(domain);
        let ranges = ranges
            .iter()
            .map(|range| self.resolve(*range).map(|(id, _)| id))
            .collect::<ModelResult<Vec<_>>>()?;
        let property = self.resolve_property(property.into())?;

        if self.constraints.add_domain(property, domain) {
            self.remove_value(property, rdfs_domain, &Value::Resource(rdfs_resource));
        }
        self.push_unique(property, rdfs_domain, Value::Resource(domain));

        for range in ranges {
            if !self.is_datatype(range) {
                self.ensure_class(range);
            }
            self.constraints.add_range(property, range);
            self.push_unique(property, rdfs_range, Value::Resource(range));
        }

        debug!(
            "Defined property {} on {}",
            self.describe(property),
            self.describe(domain)
        );
        Ok(property)
    }

    /// Register the rdfs:domain/rdfs:range bindings of a loaded property
    pub(crate) fn adopt_declared_constraints(&mut self, property: ResourceId) {
        let Builtins {
            rdfs_domain,
            rdfs_range,
            rdfs_resource,
            ..
        } = *self.builtins();
        let declared = |binding: ResourceId| -> Vec<ResourceId> {
            self.binding(property, binding)
                .map(|b| b.iter().filter_map(Value::as_resource).collect())
                .unwrap_or_default()
        };
        let domains = declared(rdfs_domain);
        let ranges = declared(rdfs_range);

        for domain in domains {
            if domain == rdfs_resource {
                self.constraints.insert_implicit(property, domain);
            } else {
                self.constraints.add_domain(property, domain);
            }
        }
        for range in ranges {
            self.constraints.add_range(property, range);
        }
    }

    /// Type a resource rdfs:Class unless it already is a class or datatype
    fn ensure_class(&mut self, id: ResourceId) {
        let Builtins {
            rdfs_class,
            rdfs_datatype,
            ..
        } = *self.builtins();
        if !self.has_type(id, rdfs_class) && !self.has_type(id, rdfs_datatype) {
            self.push_type(id, rdfs_class);
        }
    }

    /// True if `subject` is an instance of `class` through rdf:type and
    /// transitive rdfs:subClassOf. Everything is an rdfs:Resource.
    pub fn is_instance_of(&self, subject: ResourceId, class: ResourceId) -> bool {
        let Builtins {
            rdf_type,
            rdfs_resource,
            rdfs_sub_class_of,
            ..
        } = *self.builtins();
        if class == rdfs_resource {
            return true;
        }

        let mut pending: Vec<ResourceId> = self
            .binding(subject, rdf_type)
            .map(|b| b.iter().filter_map(Value::as_resource).collect())
            .unwrap_or_default();
        let mut visited = FxHashSet::default();

        while let Some(current) = pending.pop() {
            if current == class {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(supers) = self.binding(current, rdfs_sub_class_of) {
                pending.extend(supers.iter().filter_map(Value::as_resource));
            }
        }
        false
    }

    /// True for well-known datatypes and resources typed rdfs:Datatype
    pub fn is_datatype(&self, id: ResourceId) -> bool {
        self.datatype_kind(id) != Datatype::Custom
            || self.is_instance_of(id, self.builtins().rdfs_datatype)
    }

    /// True if `value` satisfies the range `range`
    pub fn range_admits(&self, range: ResourceId, value: &Value) -> bool {
        let Builtins {
            rdfs_resource,
            rdfs_literal,
            ..
        } = *self.builtins();
        if range == rdfs_resource {
            return true;
        }
        if range == rdfs_literal {
            return !value.is_resource();
        }

        if self.is_datatype(range) {
            let kind = self.datatype_kind(range);
            return match value {
                Value::Resource(_) => false,
                Value::Native(native) => kind != Datatype::Custom && kind.admits(native),
                Value::Literal(literal) => {
                    if kind == Datatype::Custom || literal.kind() == Datatype::Custom {
                        literal.datatype() == range
                    } else {
                        literal.kind().is_derived_from(kind)
                    }
                }
            };
        }

        match value {
            Value::Resource(id) => self.is_instance_of(*id, range),
            _ => false,
        }
    }

    /// Check a pending `set`, returning the rdf:type bindings to infer
    pub(crate) fn check_constraints(
        &self,
        subject: ResourceId,
        property: ResourceId,
        values: &[Value],
    ) -> ModelResult<Vec<(ResourceId, ResourceId)>> {
        let Some(constraints) = self.constraints.get(property) else {
            return Ok(Vec::new());
        };
        let mut inferred = Vec::new();

        let domains = constraints.domains();
        if !domains.is_empty() && !domains.iter().any(|d| self.is_instance_of(subject, *d)) {
            if self.use_strict() {
                warn!(
                    "Domain violation: {} on {}",
                    self.describe(property),
                    self.describe(subject)
                );
                return Err(ModelError::DomainViolation {
                    subject: self.describe(subject),
                    property: self.describe(property),
                });
            }
            inferred.push((subject, domains[0]));
        }

        let ranges = constraints.ranges();
        if ranges.is_empty() {
            return Ok(inferred);
        }
        for value in values {
            if ranges.iter().any(|r| self.range_admits(*r, value)) {
                continue;
            }
            let class_range = ranges
                .iter()
                .copied()
                .find(|r| *r != self.builtins().rdfs_literal && !self.is_datatype(*r));
            match (self.use_strict(), value, class_range) {
                (false, Value::Resource(id), Some(class)) => inferred.push((*id, class)),
                _ => {
                    let shown = match value {
                        Value::Resource(id) => self.describe(*id),
                        other => other.to_string(),
                    };
                    warn!("Range violation: {} on {}", shown, self.describe(property));
                    return Err(ModelError::RangeViolation {
                        value: shown,
                        property: self.describe(property),
                    });
                }
            }
        }
        Ok(inferred)
    }
}

//! In-memory resource store
//!
//! The [`Model`] owns every resource in an arena indexed by [`ResourceId`].
//! Named resources are interned by expanded IRI, so two lookups of the same
//! name always yield the same id. Blank resources live in the arena only.

use super::binding::BindingProperty;
use super::config::ModelConfig;
use super::constraints::ConstraintRegistry;
use super::exclude::Exclusions;
use super::resource::{Resource, ResourceView};
use super::types::{ResourceId, ResourceRef};
use super::value::{Literal, Value};
use crate::datatype::{Datatype, DatatypeError};
use crate::jsonld::{FlatDocument, JsonLdProcessor, ProcessorError};
use crate::namespace::{is_blank_label, NamespaceManager, PrefixError};
use crate::vocab::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during model operations
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Ambiguous value: {count} values bound to {property}")]
    AmbiguousValue { property: ResourceId, count: usize },

    #[error("Domain violation: {subject} is not in the domain of {property}")]
    DomainViolation { subject: String, property: String },

    #[error("Range violation: {value} is not in the range of {property}")]
    RangeViolation { value: String, property: String },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    #[error(transparent)]
    Datatype(#[from] DatatypeError),

    #[error(transparent)]
    Namespace(#[from] PrefixError),

    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Ids of the bootstrap terms the model itself relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtins {
    pub rdf_type: ResourceId,
    pub rdf_property: ResourceId,
    pub rdf_value: ResourceId,
    pub rdf_first: ResourceId,
    pub rdf_rest: ResourceId,
    pub rdf_nil: ResourceId,
    pub rdf_list: ResourceId,
    pub rdf_lang_string: ResourceId,
    pub rdf_html: ResourceId,
    pub rdf_xml_literal: ResourceId,
    pub rdfs_resource: ResourceId,
    pub rdfs_class: ResourceId,
    pub rdfs_datatype: ResourceId,
    pub rdfs_literal: ResourceId,
    pub rdfs_sub_class_of: ResourceId,
    pub rdfs_domain: ResourceId,
    pub rdfs_range: ResourceId,
    pub rdfs_member: ResourceId,
    pub rdfs_container: ResourceId,
    pub xsd_string: ResourceId,
}

impl Builtins {
    fn resolve(index: &FxHashMap<String, ResourceId>) -> ModelResult<Self> {
        let id = |iri: &str| {
            index
                .get(iri)
                .copied()
                .ok_or_else(|| ModelError::UnknownResource(iri.to_string()))
        };

        Ok(Self {
            rdf_type: id(IRI_RDF_TYPE)?,
            rdf_property: id(IRI_RDF_PROPERTY)?,
            rdf_value: id(IRI_RDF_VALUE)?,
            rdf_first: id(IRI_RDF_FIRST)?,
            rdf_rest: id(IRI_RDF_REST)?,
            rdf_nil: id(IRI_RDF_NIL)?,
            rdf_list: id(IRI_RDF_LIST)?,
            rdf_lang_string: id(IRI_RDF_LANGSTRING)?,
            rdf_html: id(IRI_RDF_HTML)?,
            rdf_xml_literal: id(IRI_RDF_XMLLITERAL)?,
            rdfs_resource: id(IRI_RDFS_RESOURCE)?,
            rdfs_class: id(IRI_RDFS_CLASS)?,
            rdfs_datatype: id(IRI_RDFS_DATATYPE)?,
            rdfs_literal: id(IRI_RDFS_LITERAL)?,
            rdfs_sub_class_of: id(IRI_RDFS_SUBCLASSOF)?,
            rdfs_domain: id(IRI_RDFS_DOMAIN)?,
            rdfs_range: id(IRI_RDFS_RANGE)?,
            rdfs_member: id(IRI_RDFS_MEMBER)?,
            rdfs_container: id(IRI_RDFS_CONTAINER)?,
            xsd_string: id(IRI_XSD_STRING)?,
        })
    }
}

/// The resource graph
pub struct Model {
    /// Prefix table and base namespace
    namespaces: NamespaceManager,

    /// Resource arena, indexed by ResourceId
    resources: Vec<Resource>,

    /// Interning table: expanded IRI -> ResourceId
    index: FxHashMap<String, ResourceId>,

    /// Domain/range constraints per property
    pub(crate) constraints: ConstraintRegistry,

    /// Strict-mode flag
    strict: bool,

    builtins: Builtins,

    /// Well-known datatype -> datatype resource
    datatypes: FxHashMap<Datatype, ResourceId>,

    /// Load containers, hidden from iteration and serialization
    transient: FxHashSet<ResourceId>,

    /// Aliases bound by `extend`
    aliases: FxHashMap<String, ResourceId>,

    /// JSON-LD collaborator used by load/save
    pub(crate) processor: Arc<dyn JsonLdProcessor>,
}

impl Model {
    /// Create a model resolving unprefixed names against `base`
    pub fn new(base: &str) -> ModelResult<Self> {
        Self::with_prefixes(base, std::iter::empty::<(String, String)>())
    }

    /// Create a model with a prefix table
    pub fn with_prefixes<I, P, N>(base: &str, prefixes: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<String>,
        N: Into<String>,
    {
        let mut namespaces = NamespaceManager::new(base)?;
        for (prefix, namespace) in prefixes {
            namespaces.add_prefix(prefix, namespace);
        }

        let mut resources = Vec::with_capacity(BUILTIN_TERMS.len());
        let mut index = FxHashMap::default();
        for term in BUILTIN_TERMS {
            let id = ResourceId::new(resources.len() as u64);
            resources.push(Resource::named(id, term.iri));
            index.insert(term.iri.to_string(), id);
        }

        let builtins = Builtins::resolve(&index)?;
        let mut datatypes = FxHashMap::default();
        for dt in Datatype::KNOWN {
            if let Some(id) = dt.iri().and_then(|iri| index.get(iri)) {
                datatypes.insert(dt, *id);
            }
        }

        let mut model = Self {
            namespaces,
            resources,
            index,
            constraints: ConstraintRegistry::default(),
            strict: true,
            builtins,
            datatypes,
            transient: FxHashSet::default(),
            aliases: FxHashMap::default(),
            processor: Arc::new(FlatDocument),
        };

        for term in BUILTIN_TERMS {
            let subject = model.require(term.iri)?;
            let class = model.require(term.class)?;
            model.push_type(subject, class);
        }
        for (sub, sup) in BUILTIN_SUBCLASS_AXIOMS {
            let sub = model.require(sub)?;
            let sup = model.require(sup)?;
            model.push_unique(sub, builtins.rdfs_sub_class_of, Value::Resource(sup));
        }

        debug!(
            "Created model with base {} and {} built-in terms",
            model.namespaces.base(),
            BUILTIN_TERMS.len()
        );
        Ok(model)
    }

    /// Create a model from configuration
    pub fn from_config(config: &ModelConfig) -> ModelResult<Self> {
        let mut model = Self::with_prefixes(
            &config.base,
            config.prefixes.iter().map(|(p, n)| (p.clone(), n.clone())),
        )?;
        model.strict = config.strict;
        Ok(model)
    }

    /// Replace the JSON-LD collaborator
    pub fn with_processor(mut self, processor: Arc<dyn JsonLdProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.namespaces.add_prefix(prefix, namespace);
    }

    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Expand a name to a full IRI
    pub fn expand_iri(&self, name: &str) -> String {
        self.namespaces.expand(name)
    }

    pub fn use_strict(&self) -> bool {
        self.strict
    }

    /// Toggle strict mode. Already bound data is not revalidated.
    pub fn set_use_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Declared domains and ranges per property
    pub fn constraints(&self) -> &ConstraintRegistry {
        &self.constraints
    }

    /// Number of bootstrap terms interned at construction
    pub fn builtin_count(&self) -> usize {
        BUILTIN_TERMS.len()
    }

    pub fn is_builtin(&self, id: ResourceId) -> bool {
        id.index() < BUILTIN_TERMS.len()
    }

    pub fn is_transient(&self, id: ResourceId) -> bool {
        self.transient.contains(&id)
    }

    /// Number of resources in the arena, blank ones included
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Id of an interned resource, without creating it
    pub fn lookup(&self, name: &str) -> Option<ResourceId> {
        if is_blank_label(name) {
            return None;
        }
        self.index.get(&self.expand_iri(name)).copied()
    }

    pub(crate) fn lookup_ref(&self, reference: ResourceRef<'_>) -> Option<ResourceId> {
        match reference {
            ResourceRef::Name(name) => self.lookup(name),
            ResourceRef::Id(id) => self.record(id).map(|_| id),
        }
    }

    /// The interned resource named `name`
    pub fn get(&self, name: &str) -> Option<ResourceView<'_>> {
        self.lookup(name).and_then(|id| self.resource(id))
    }

    pub fn resource(&self, id: ResourceId) -> Option<ResourceView<'_>> {
        self.record(id).map(|record| ResourceView::new(self, record))
    }

    pub(crate) fn record(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.index())
    }

    /// All non-transient resources in arena order
    pub fn iter(&self) -> impl Iterator<Item = ResourceView<'_>> {
        self.resources
            .iter()
            .filter(|r| !self.transient.contains(&r.id()))
            .map(|r| ResourceView::new(self, r))
    }

    /// Visit every interned resource not matched by `exclusions`
    pub fn for_each<F>(&self, exclusions: &Exclusions, mut callback: F)
    where
        F: FnMut(ResourceView<'_>),
    {
        self.iter()
            .filter(|view| !view.is_blank())
            .filter(|view| !exclusions.excludes(view))
            .for_each(|view| callback(view));
    }

    /// IRI of a named resource, `_:b<n>` for a blank one
    pub fn describe(&self, id: ResourceId) -> String {
        match self.record(id).and_then(Resource::iri) {
            Some(iri) => iri.to_string(),
            None => format!("_:b{}", id.as_u64()),
        }
    }

    /// Bind aliases for already interned IRIs; returns the number bound
    pub fn extend<I, K, A>(&mut self, aliases: I) -> usize
    where
        I: IntoIterator<Item = (K, A)>,
        K: AsRef<str>,
        A: Into<String>,
    {
        let mut bound = 0;
        for (name, alias) in aliases {
            if let Some(id) = self.lookup(name.as_ref()) {
                self.aliases.insert(alias.into(), id);
                bound += 1;
            }
        }
        bound
    }

    pub fn alias(&self, alias: &str) -> Option<ResourceId> {
        self.aliases.get(alias).copied()
    }

    /// Datatype resource for a well-known datatype
    pub fn datatype_id(&self, datatype: Datatype) -> Option<ResourceId> {
        self.datatypes.get(&datatype).copied()
    }

    /// Well-known datatype of a resource, `Custom` otherwise
    pub fn datatype_kind(&self, id: ResourceId) -> Datatype {
        self.record(id)
            .and_then(Resource::iri)
            .map_or(Datatype::Custom, Datatype::from_iri)
    }

    // ---- interning ----

    fn require(&self, iri: &str) -> ModelResult<ResourceId> {
        self.index
            .get(iri)
            .copied()
            .ok_or_else(|| ModelError::UnknownResource(iri.to_string()))
    }

    /// Get or create the resource with an expanded IRI; true if created
    pub(crate) fn intern(&mut self, iri: &str) -> (ResourceId, bool) {
        if let Some(id) = self.index.get(iri) {
            return (*id, false);
        }
        let id = ResourceId::new(self.resources.len() as u64);
        self.resources.push(Resource::named(id, iri));
        self.index.insert(iri.to_string(), id);
        (id, true)
    }

    pub(crate) fn create_blank(&mut self) -> ResourceId {
        let id = ResourceId::new(self.resources.len() as u64);
        self.resources.push(Resource::blank(id));
        id
    }

    pub(crate) fn mark_transient(&mut self, id: ResourceId) {
        self.transient.insert(id);
    }

    /// Expand and intern a name; blank labels are rejected
    pub(crate) fn resolve_named(&mut self, name: &str) -> ModelResult<(ResourceId, bool)> {
        if is_blank_label(name) {
            return Err(ModelError::InvalidReference(format!(
                "blank node label {} used as a named reference",
                name
            )));
        }
        let iri = self.expand_iri(name);
        Ok(self.intern(&iri))
    }

    pub(crate) fn resolve(&mut self, reference: ResourceRef<'_>) -> ModelResult<(ResourceId, bool)> {
        match reference {
            ResourceRef::Name(name) => self.resolve_named(name),
            ResourceRef::Id(id) => {
                self.require_id(id)?;
                Ok((id, false))
            }
        }
    }

    pub(crate) fn require_id(&self, id: ResourceId) -> ModelResult<()> {
        match self.record(id) {
            Some(_) => Ok(()),
            None => Err(ModelError::UnknownResource(id.to_string())),
        }
    }

    /// Resolve a class reference, typing a new resource as rdfs:Class
    fn resolve_class(&mut self, class: ResourceRef<'_>) -> ModelResult<ResourceId> {
        let (class, created) = self.resolve(class)?;
        if created {
            self.push_type(class, self.builtins.rdfs_class);
        }
        Ok(class)
    }

    /// Resolve a property reference, scaffolding it on first use
    pub(crate) fn resolve_property(&mut self, property: ResourceRef<'_>) -> ModelResult<ResourceId> {
        let (property, created) = self.resolve(property)?;
        if created {
            self.scaffold_property(property);
        }
        Ok(property)
    }

    fn scaffold_property(&mut self, property: ResourceId) {
        let Builtins {
            rdf_property,
            rdfs_domain,
            rdfs_resource,
            ..
        } = self.builtins;
        self.push_type(property, rdf_property);
        self.push_unique(property, rdfs_domain, Value::Resource(rdfs_resource));
        self.constraints.insert_implicit(property, rdfs_resource);
        debug!("Implicitly declared property {}", self.describe(property));
    }

    // ---- raw binding access ----

    pub(crate) fn push(&mut self, subject: ResourceId, property: ResourceId, value: Value) {
        if let Some(record) = self.resources.get_mut(subject.index()) {
            record.binding_entry(property).push(value);
        }
    }

    /// Push unless a matching value is already bound; true if pushed
    pub(crate) fn push_unique(&mut self, subject: ResourceId, property: ResourceId, value: Value) -> bool {
        let bound = self
            .record(subject)
            .and_then(|r| r.binding(property))
            .is_some_and(|b| b.has(&value));
        if !bound {
            self.push(subject, property, value);
        }
        !bound
    }

    pub(crate) fn push_type(&mut self, subject: ResourceId, class: ResourceId) {
        self.push_unique(subject, self.builtins.rdf_type, Value::Resource(class));
    }

    pub(crate) fn binding(&self, subject: ResourceId, property: ResourceId) -> Option<&BindingProperty> {
        self.record(subject).and_then(|r| r.binding(property))
    }

    /// True if `subject` has `class` among its direct rdf:type values
    pub(crate) fn has_type(&self, subject: ResourceId, class: ResourceId) -> bool {
        self.binding(subject, self.builtins.rdf_type)
            .and_then(|b| b.find_resource(class))
            .is_some()
    }

    pub(crate) fn remove_value(&mut self, subject: ResourceId, property: ResourceId, value: &Value) -> bool {
        let Some(record) = self.resources.get_mut(subject.index()) else {
            return false;
        };
        record.remove_value(property, value)
    }

    // ---- factories ----

    /// Mint an instance of `class`: interned when named, blank otherwise.
    ///
    /// An already interned resource gains the type if it lacks it.
    pub fn instantiate<'a>(
        &mut self,
        class: impl Into<ResourceRef<'a>>,
        name: Option<&str>,
    ) -> ModelResult<ResourceId> {
        let class = self.resolve_class(class.into())?;
        let subject = match name {
            Some(name) => self.resolve_named(name)?.0,
            None => self.create_blank(),
        };
        self.push_type(subject, class);
        Ok(subject)
    }

    /// Get or create a plain resource, typed rdfs:Resource on creation
    pub fn rdfs_resource(&mut self, name: Option<&str>) -> ModelResult<ResourceId> {
        let (subject, created) = match name {
            Some(name) => self.resolve_named(name)?,
            None => (self.create_blank(), true),
        };
        if created {
            self.push_type(subject, self.builtins.rdfs_resource);
        }
        Ok(subject)
    }

    pub fn rdfs_class(&mut self, name: Option<&str>) -> ModelResult<ResourceId> {
        self.instantiate(self.builtins.rdfs_class, name)
    }

    pub fn rdfs_datatype(&mut self, name: Option<&str>) -> ModelResult<ResourceId> {
        self.instantiate(self.builtins.rdfs_datatype, name)
    }

    pub fn rdf_list(&mut self, name: Option<&str>) -> ModelResult<ResourceId> {
        self.instantiate(self.builtins.rdf_list, name)
    }

    /// Get or create a property. New properties get an implicit
    /// `rdfs:domain rdfs:Resource`.
    pub fn rdf_property(&mut self, name: Option<&str>) -> ModelResult<ResourceId> {
        match name {
            Some(name) => self.resolve_property(ResourceRef::Name(name)),
            None => {
                let property = self.create_blank();
                self.scaffold_property(property);
                Ok(property)
            }
        }
    }

    /// A typed literal; `xsd:string` when no datatype is given
    pub fn rdfs_literal<'a>(
        &mut self,
        lexical: &str,
        datatype: Option<ResourceRef<'a>>,
    ) -> ModelResult<Literal> {
        let datatype = match datatype {
            Some(datatype) => {
                let (id, created) = self.resolve(datatype)?;
                if created {
                    self.push_type(id, self.builtins.rdfs_datatype);
                }
                id
            }
            None => self.builtins.xsd_string,
        };

        let kind = self.datatype_kind(datatype);
        if kind == Datatype::LangString {
            return self.rdf_lang_string(lexical);
        }
        Ok(Literal::new(lexical, datatype, kind, None))
    }

    /// A language-tagged string from `text@tag`; the tag is lowercased
    pub fn rdf_lang_string(&self, tagged: &str) -> ModelResult<Literal> {
        match tagged.rsplit_once('@') {
            Some((text, tag)) if !tag.is_empty() => Ok(Literal::new(
                text,
                self.builtins.rdf_lang_string,
                Datatype::LangString,
                Some(tag.to_lowercase()),
            )),
            _ => Err(ModelError::InvalidLiteral(format!(
                "{:?} has no language tag",
                tagged
            ))),
        }
    }

    pub fn rdf_html(&self, lexical: &str) -> Literal {
        Literal::new(lexical, self.builtins.rdf_html, Datatype::Html, None)
    }

    pub fn rdf_xml_literal(&self, lexical: &str) -> Literal {
        Literal::new(lexical, self.builtins.rdf_xml_literal, Datatype::XmlLiteral, None)
    }

    /// A blank resource wrapping a literal value: `rdf:value` holds the
    /// literal, `rdf:type` the datatype and every extra class
    pub fn literal_resource<'a>(
        &mut self,
        lexical: &str,
        datatype: impl Into<ResourceRef<'a>>,
        extra_classes: &[ResourceRef<'a>],
    ) -> ModelResult<ResourceId> {
        let literal = self.rdfs_literal(lexical, Some(datatype.into()))?;
        let classes = extra_classes
            .iter()
            .map(|class| self.resolve_class(*class))
            .collect::<ModelResult<Vec<_>>>()?;

        let subject = self.create_blank();
        self.push_type(subject, literal.datatype());
        for class in classes {
            self.push_type(subject, class);
        }
        self.push(subject, self.builtins.rdf_value, Value::Literal(literal));
        Ok(subject)
    }

    // ---- mutation ----

    /// Append a value to a binding
    pub fn set<'a>(
        &mut self,
        subject: ResourceId,
        property: impl Into<ResourceRef<'a>>,
        value: impl Into<Value>,
    ) -> ModelResult<&mut Self> {
        self.set_all(subject, property, [value])
    }

    /// Append values in order. Every value is validated before any is bound.
    pub fn set_all<'a, I, V>(
        &mut self,
        subject: ResourceId,
        property: impl Into<ResourceRef<'a>>,
        values: I,
    ) -> ModelResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.require_id(subject)?;
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        for value in &values {
            if let Value::Resource(id) = value {
                self.require_id(*id)?;
            }
        }

        let property = self.resolve_property(property.into())?;
        let inferred = self.check_constraints(subject, property, &values)?;
        for (resource, class) in inferred {
            debug!(
                "Inferred {} rdf:type {}",
                self.describe(resource),
                self.describe(class)
            );
            self.push_type(resource, class);
        }
        for value in values {
            self.push(subject, property, value);
        }
        Ok(self)
    }

    /// Remove the whole binding; false if nothing was bound
    pub fn delete<'a>(&mut self, subject: ResourceId, property: impl Into<ResourceRef<'a>>) -> bool {
        let Some(property) = self.lookup_ref(property.into()) else {
            return false;
        };
        match self.resources.get_mut(subject.index()) {
            Some(record) => record.remove_binding(property),
            None => false,
        }
    }

    /// Remove the first value matching `value`; true if one was removed
    pub fn delete_value<'a>(
        &mut self,
        subject: ResourceId,
        property: impl Into<ResourceRef<'a>>,
        value: impl Into<Value>,
    ) -> bool {
        match self.lookup_ref(property.into()) {
            Some(property) => self.remove_value(subject, property, &value.into()),
            None => false,
        }
    }

    /// Remove every value of a binding; nothing is bound afterwards
    pub fn clear<'a>(&mut self, subject: ResourceId, property: impl Into<ResourceRef<'a>>) -> bool {
        self.delete(subject, property);
        true
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("base", &self.namespaces.base())
            .field("resources", &self.resources.len())
            .field("strict", &self.strict)
            .finish()
    }
}

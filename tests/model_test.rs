use rdfs_model::vocab::{BUILTIN_TERMS, IRI_RDFS_DOMAIN, IRI_RDFS_RESOURCE, IRI_RDF_TYPE};
use rdfs_model::{
    Exclude, Exclusions, Model, ModelConfig, ModelError, Native, ResourceId, ResourceRef, Value,
};

const BASE: &str = "http://qfield.net/example/ns#";

fn model() -> Model {
    Model::with_prefixes(
        BASE,
        [
            ("dc", "http://purl.org/dc/elements/1.1/"),
            ("foaf", "http://xmlns.com/foaf/0.1/"),
        ],
    )
    .unwrap()
}

#[test]
fn test_builtins_are_interned() {
    let model = model();
    assert_eq!(model.builtin_count(), BUILTIN_TERMS.len());
    assert_eq!(model.len(), BUILTIN_TERMS.len());
    for term in BUILTIN_TERMS {
        let id = model.lookup(term.iri).unwrap();
        assert!(model.is_builtin(id));
    }
    assert_eq!(model.lookup("rdf:type"), model.lookup(IRI_RDF_TYPE));
}

#[test]
fn test_expand_is_idempotent() {
    let model = model();
    for name in ["foaf:name", "thing", "http://example.org/x", "dc:title", "a b", "a b:c"] {
        let once = model.expand_iri(name);
        assert_eq!(model.expand_iri(&once), once);
    }
    assert_eq!(model.expand_iri("thing"), format!("{}thing", BASE));
}

#[test]
fn test_names_are_interned_once() {
    let mut model = model();
    let a = model.rdfs_resource(Some("foaf:Person")).unwrap();
    let b = model
        .rdfs_resource(Some("http://xmlns.com/foaf/0.1/Person"))
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(model.resource(a).unwrap().types().len(), 1);

    let blank = model.rdfs_resource(None).unwrap();
    assert!(model.resource(blank).unwrap().is_blank());
    assert_ne!(model.rdfs_resource(None).unwrap(), blank);
}

#[test]
fn test_blank_labels_cannot_be_used_as_names() {
    let mut model = model();
    assert!(matches!(
        model.rdfs_resource(Some("_:b1")),
        Err(ModelError::InvalidReference(_))
    ));
}

#[test]
fn test_strict_domain() {
    let mut model = model();
    let agent = model.define_class(Some("Agent"), None).unwrap();
    model.define_property(agent, "foaf:name").unwrap();

    let alice = model.instantiate(agent, Some("alice")).unwrap();
    model.set(alice, "foaf:name", "Alice").unwrap();

    let rock = model.rdfs_resource(Some("rock")).unwrap();
    let err = model.set(rock, "foaf:name", "Rock").unwrap_err();
    assert!(matches!(err, ModelError::DomainViolation { .. }));
    // Nothing was bound
    assert!(!model.resource(rock).unwrap().has("foaf:name"));
    assert!(!model.is_instance_of(rock, agent));
}

#[test]
fn test_permissive_domain_inference() {
    let mut model = model();
    let agent = model.define_class(Some("Agent"), None).unwrap();
    let robot = model.define_class(Some("Robot"), None).unwrap();
    model.define_property(agent, "foaf:name").unwrap();
    model.define_property(robot, "foaf:name").unwrap();
    model.set_use_strict(false);

    let rock = model.rdfs_resource(Some("rock")).unwrap();
    model.set(rock, "foaf:name", "Rock").unwrap();
    // The first declared domain is inferred
    assert!(model.is_instance_of(rock, agent));
    assert!(!model.is_instance_of(rock, robot));
    assert!(model.resource(rock).unwrap().has_value("foaf:name", "Rock"));
}

#[test]
fn test_subclass_satisfies_domain() {
    let mut model = model();
    let agent = model.define_class(Some("Agent"), None).unwrap();
    let person = model
        .define_class(Some("Person"), Some(ResourceRef::Id(agent)))
        .unwrap();
    model.define_property(agent, "foaf:name").unwrap();

    let bob = model.instantiate(person, Some("bob")).unwrap();
    model.set(bob, "foaf:name", "Bob").unwrap();
    assert!(model.is_instance_of(bob, agent));
}

#[test]
fn test_class_range() {
    let mut model = model();
    let agent = model.define_class(Some("Agent"), None).unwrap();
    model
        .define_property_with_range(agent, "foaf:knows", &[ResourceRef::Id(agent)])
        .unwrap();

    let alice = model.instantiate(agent, Some("alice")).unwrap();
    let bob = model.instantiate(agent, Some("bob")).unwrap();
    let rock = model.rdfs_resource(Some("rock")).unwrap();

    model.set(alice, "foaf:knows", bob).unwrap();
    assert!(matches!(
        model.set(alice, "foaf:knows", rock),
        Err(ModelError::RangeViolation { .. })
    ));
    assert!(matches!(
        model.set(alice, "foaf:knows", "bob"),
        Err(ModelError::RangeViolation { .. })
    ));

    model.set_use_strict(false);
    model.set(alice, "foaf:knows", rock).unwrap();
    assert!(model.is_instance_of(rock, agent));
}

#[test]
fn test_datatype_range() {
    let mut model = model();
    let agent = model.define_class(Some("Agent"), None).unwrap();
    model
        .define_property_with_range(agent, "age", &["xsd:integer".into()])
        .unwrap();
    let alice = model.instantiate(agent, Some("alice")).unwrap();

    model.set(alice, "age", 30).unwrap();
    let typed = model.rdfs_literal("31", Some("xsd:int".into())).unwrap();
    model.set(alice, "age", typed).unwrap();

    // Literal range failures are errors in either mode
    model.set_use_strict(false);
    assert!(matches!(
        model.set(alice, "age", "thirty"),
        Err(ModelError::RangeViolation { .. })
    ));
    assert!(matches!(
        model.set(alice, "age", 30.5),
        Err(ModelError::RangeViolation { .. })
    ));
    assert_eq!(model.resource(alice).unwrap().get("age").unwrap().size(), 2);
}

#[test]
fn test_set_all_is_atomic() {
    let mut model = model();
    let agent = model.define_class(Some("Agent"), None).unwrap();
    model
        .define_property_with_range(agent, "age", &["xsd:integer".into()])
        .unwrap();
    let alice = model.instantiate(agent, Some("alice")).unwrap();

    let values: Vec<Value> = vec![1.into(), "two".into(), 3.into()];
    assert!(model.set_all(alice, "age", values).is_err());
    assert!(!model.resource(alice).unwrap().has("age"));
}

#[test]
fn test_implicit_domain_is_replaced() {
    let mut model = model();
    let nick = model.rdf_property(Some("foaf:nick")).unwrap();
    let resource_class = model.lookup(IRI_RDFS_RESOURCE).unwrap();

    let domains = |model: &Model| -> Vec<Value> {
        model
            .resource(nick)
            .unwrap()
            .get(IRI_RDFS_DOMAIN)
            .map(|b| b.values().to_vec())
            .unwrap_or_default()
    };
    assert_eq!(domains(&model), vec![Value::Resource(resource_class)]);
    assert!(model.constraints().get(nick).unwrap().has_implicit_domain());

    let agent = model.define_class(Some("Agent"), None).unwrap();
    model.define_property(agent, "foaf:nick").unwrap();
    assert_eq!(domains(&model), vec![Value::Resource(agent)]);
    assert_eq!(model.constraints().get(nick).unwrap().domains(), &[agent]);
}

#[test]
fn test_builtin_properties_are_unconstrained() {
    let mut model = model();
    let rdf_type = model.lookup(IRI_RDF_TYPE).unwrap();
    assert!(model.constraints().get(rdf_type).is_none());

    let thing = model.rdfs_resource(Some("thing")).unwrap();
    let label = model.rdfs_resource(Some("label")).unwrap();
    model.set(thing, "rdfs:label", "A thing").unwrap();
    model.set(thing, "rdfs:seeAlso", label).unwrap();
}

#[test]
fn test_for_each_exclusions() {
    let mut model = model();
    model.rdfs_resource(Some("one")).unwrap();
    model.rdfs_resource(Some("two")).unwrap();
    model.rdfs_resource(None).unwrap();

    let mut named = Vec::new();
    model.for_each(&Exclusions::default(), |view| {
        named.push(view.iri().unwrap_or_default().to_string())
    });
    assert_eq!(named, vec![format!("{}one", BASE), format!("{}two", BASE)]);

    let mut count = 0;
    model.for_each(&Exclusions::none(), |_| count += 1);
    assert_eq!(count, BUILTIN_TERMS.len() + 2);

    let exclusions = Exclusions::default()
        .with(Exclude::pattern("one$").unwrap())
        .with(Exclude::predicate(|view| view.iri().is_none()));
    let mut named = Vec::new();
    model.for_each(&exclusions, |view| named.push(view.id()));
    assert_eq!(named, vec![model.lookup("two").unwrap()]);
}

#[test]
fn test_extend_aliases() {
    let mut model = model();
    model.rdfs_resource(Some("thing")).unwrap();
    let bound = model.extend([("thing", "Thing"), ("missing", "Missing")]);
    assert_eq!(bound, 1);
    assert_eq!(model.alias("Thing"), model.lookup("thing"));
    assert_eq!(model.alias("Missing"), None);
}

#[test]
fn test_long_literal_range() {
    let mut model = model();
    let long = model
        .rdfs_literal("9999999999999999", Some("xsd:long".into()))
        .unwrap();
    let err = long.value().unwrap_err();
    assert!(err.is_range_error());

    let one = model.rdfs_literal("1", Some("xsd:long".into())).unwrap();
    assert_eq!(one.value().unwrap(), Native::Number(1.0));
}

#[test]
fn test_lang_string_requires_tag() {
    let model = model();
    assert!(model.rdf_lang_string("hello@en").is_ok());
    assert!(matches!(
        model.rdf_lang_string("hello"),
        Err(ModelError::InvalidLiteral(_))
    ));
}

#[test]
fn test_unknown_subject() {
    let mut model = model();
    let missing = ResourceId::new(model.len() as u64 + 100);
    assert!(matches!(
        model.set(missing, "dc:title", "x"),
        Err(ModelError::UnknownResource(_))
    ));
}

#[test]
fn test_from_config() {
    let config = ModelConfig::from_yaml(
        r#"
base: "http://qfield.net/example/ns#"
prefixes:
  dc: "http://purl.org/dc/elements/1.1/"
strict: false
"#,
    )
    .unwrap();
    let mut model = Model::from_config(&config).unwrap();
    assert!(!model.use_strict());

    let agent = model.define_class(Some("Agent"), None).unwrap();
    model.define_property(agent, "dc:creator").unwrap();
    let r = model.rdfs_resource(Some("doc")).unwrap();
    model.set(r, "dc:creator", "Qfield").unwrap();
    assert!(model.is_instance_of(r, agent));
}

#[test]
fn test_constructors_agree() {
    let plain = Model::new(BASE).unwrap();
    let prefixed = Model::with_prefixes(BASE, [("dc", "http://purl.org/dc/elements/1.1/")]).unwrap();
    let configured = Model::from_config(
        &ModelConfig::new(BASE).with_prefix("dc", "http://purl.org/dc/elements/1.1/"),
    )
    .unwrap();

    for model in [&plain, &prefixed, &configured] {
        assert!(model.use_strict());
        assert_eq!(model.expand_iri("thing"), format!("{}thing", BASE));
        assert_eq!(model.expand_iri("owl:Thing"), "http://www.w3.org/2002/07/owl#Thing");
    }
    assert_eq!(plain.expand_iri("dc:title"), "dc:title");
    assert_eq!(prefixed.expand_iri("dc:title"), "http://purl.org/dc/elements/1.1/title");
    assert_eq!(configured.expand_iri("dc:title"), prefixed.expand_iri("dc:title"));
}

#[test]
fn test_relative_base_is_rejected() {
    assert!(matches!(
        Model::new("relative/base#"),
        Err(ModelError::Namespace(_))
    ));
}

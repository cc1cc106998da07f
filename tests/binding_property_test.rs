use rdfs_model::vocab::IRI_RDF_TYPE;
use rdfs_model::{Model, ModelError, Native, Value};

const BASE: &str = "http://qfield.net/example/ns#";

fn model() -> Model {
    Model::with_prefixes(BASE, [("dc", "http://purl.org/dc/elements/1.1/")]).unwrap()
}

#[test]
fn test_binding_reports_property() {
    let mut model = model();
    let r = model.rdfs_resource(None).unwrap();

    let view = model.resource(r).unwrap();
    let types = view.get(IRI_RDF_TYPE).unwrap();
    assert_eq!(types.size(), 1);

    let property = types.property_view().unwrap();
    assert_eq!(property.iri(), Some(IRI_RDF_TYPE));
    assert_eq!(property.to_string(), format!("Resource <{}>", IRI_RDF_TYPE));
}

#[test]
fn test_values_keep_insertion_order() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    model.set(r, "dc:creator", "Qfield").unwrap();
    model
        .set(r, "dc:creator", "Q-field")
        .unwrap()
        .set_all(r, "dc:creator", ["qfield.net", "q-field.net"])
        .unwrap();

    let view = model.resource(r).unwrap();
    let creators = view.get("dc:creator").unwrap();
    let mut seen = Vec::new();
    creators.for_each(|value| seen.push(value.to_string()));

    assert_eq!(seen, vec!["Qfield", "Q-field", "qfield.net", "q-field.net"]);
    assert_eq!(creators.size(), 4);
}

#[test]
fn test_has_language_asymmetry() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    let tagged = model.rdf_lang_string("q-field@en-us").unwrap();
    model.set(r, "dc:creator", "Qfield").unwrap();
    model.set(r, "dc:creator", tagged).unwrap();

    let view = model.resource(r).unwrap();
    let creators = view.get("dc:creator").unwrap();
    assert!(!creators.has(&Value::from("Q-field")));
    assert!(creators.has(&Value::from("Qfield")));
    // An untagged query ignores the stored tag
    assert!(creators.has(&Value::from("q-field")));
    assert!(!creators.has(&model.rdf_lang_string("q-field@en-gb").unwrap().into()));
    assert!(creators.has(&model.rdf_lang_string("q-field@EN-US").unwrap().into()));
}

#[test]
fn test_has_resource() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    let format = model.rdfs_class(Some("text/javascript")).unwrap();
    let other = model.rdfs_resource(None).unwrap();
    model.set(r, "dc:format", format).unwrap();

    let view = model.resource(r).unwrap();
    let formats = view.get("dc:format").unwrap();
    assert!(formats.has(&Value::Resource(format)));
    assert!(!formats.has(&Value::Resource(other)));
}

#[test]
fn test_get_single_and_ambiguous() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    model.set(r, "dc:creator", "Qfield").unwrap();

    {
        let view = model.resource(r).unwrap();
        let creators = view.get("dc:creator").unwrap();
        assert_eq!(creators.get().unwrap(), Some(&Value::from("Qfield")));
    }

    model.set(r, "dc:creator", "Q-field").unwrap();
    let view = model.resource(r).unwrap();
    let creators = view.get("dc:creator").unwrap();
    assert!(matches!(
        creators.get(),
        Err(ModelError::AmbiguousValue { count: 2, .. })
    ));
}

#[test]
fn test_get_named_and_indexed() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    let format = model.rdfs_class(Some("text/javascript")).unwrap();
    model.set(r, "dc:format", format).unwrap();
    model.set(r, "dc:format", "text/javascript").unwrap();
    model.set(r, "dc:format", "application/ld+json").unwrap();

    let view = model.resource(r).unwrap();
    let formats = view.get("dc:format").unwrap();
    assert_eq!(formats.get_named("text/javascript"), Some(&Value::Resource(format)));
    assert_eq!(formats.get_at(0), Some(&Value::Resource(format)));
    assert_eq!(formats.get_at(1), Some(&Value::from("text/javascript")));
    assert_eq!(formats.get_at(2), Some(&Value::from("application/ld+json")));
    assert_eq!(formats.get_at(3), None);
    assert_eq!(formats.resource_at(0).unwrap().id(), format);
    assert!(formats.resource_at(1).is_none());
}

#[test]
fn test_delete_all_values() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    model
        .set_all(r, "dc:format", ["text/javascript", "application/ld+json"])
        .unwrap();

    assert!(model.delete(r, "dc:format"));
    assert!(!model.resource(r).unwrap().has("dc:format"));
    assert!(!model.delete(r, "dc:format"));
}

#[test]
fn test_delete_language_agnostic() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    let us = model.rdf_lang_string("color@en-us").unwrap();
    let ca = model.rdf_lang_string("color@en-ca").unwrap();
    let au = model.rdf_lang_string("colour@en-au").unwrap();
    model.set_all(r, "dc:subject", [us, ca, au]).unwrap();

    // Untagged delete removes the first entry with that text
    assert!(model.delete_value(r, "dc:subject", "color"));
    let remaining: Vec<_> = model
        .resource(r)
        .unwrap()
        .get("dc:subject")
        .unwrap()
        .iter()
        .filter_map(|v| v.language().map(str::to_string))
        .collect();
    assert_eq!(remaining, vec!["en-ca", "en-au"]);

    // Tagged delete needs the tag to match
    let bg = model.rdf_lang_string("colour@en-bg").unwrap();
    assert!(!model.delete_value(r, "dc:subject", bg));
    let au = model.rdf_lang_string("colour@en-au").unwrap();
    assert!(model.delete_value(r, "dc:subject", au));
}

#[test]
fn test_some_and_every() {
    let mut model = model();
    let r = model.rdfs_resource(Some("measurements")).unwrap();
    model.set_all(r, "reading", [1, 2, 3]).unwrap();

    let view = model.resource(r).unwrap();
    let readings = view.get("reading").unwrap();
    let number = |v: &Value| match v.as_native() {
        Some(Native::Number(n)) => *n,
        _ => f64::NAN,
    };
    assert!(readings.every(|v| number(v) > 0.0));
    assert!(readings.some(|v| number(v) == 2.0));
    assert!(!readings.some(|v| number(v) > 3.0));
}

#[test]
fn test_display() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    model.set_all(r, "dc:creator", ["a", "b"]).unwrap();

    let view = model.resource(r).unwrap();
    assert_eq!(
        view.get("dc:creator").unwrap().to_string(),
        "BindingProperty <http://purl.org/dc/elements/1.1/creator> [a, b]"
    );
}

#[test]
fn test_language_variants_removed_one_by_one() {
    let mut model = model();
    let r = model.rdfs_resource(Some("this-example")).unwrap();
    for tag in ["en-us", "en-ca", "en-au"] {
        let literal = model.rdf_lang_string(&format!("x@{}", tag)).unwrap();
        model.set(r, "dc:title", literal).unwrap();
    }
    let has_x = |model: &Model| model.resource(r).unwrap().has_value("dc:title", "x");

    let bg = model.rdf_lang_string("x@en-bg").unwrap();
    assert!(!model.resource(r).unwrap().has_value("dc:title", bg));

    let ca = model.rdf_lang_string("x@en-ca").unwrap();
    assert!(model.delete_value(r, "dc:title", ca));
    assert_eq!(model.resource(r).unwrap().get("dc:title").unwrap().size(), 2);
    assert!(has_x(&model));

    assert!(model.delete_value(r, "dc:title", "x"));
    assert!(has_x(&model));
    assert!(model.delete_value(r, "dc:title", "x"));
    assert!(!has_x(&model));
    assert!(!model.delete_value(r, "dc:title", "x"));
}

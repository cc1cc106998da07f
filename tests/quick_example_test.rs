use rdfs_model::vocab::{IRI_OWL, IRI_RDFS_CLASS, IRI_RDFS_MEMBER, IRI_RDF_TYPE};
use rdfs_model::{to_ntriples, Model, Native, Value};
use serde_json::json;

const BASE: &str = "http://qfield.net/example/ns#";

fn model() -> Model {
    Model::with_prefixes(
        BASE,
        [("owl", IRI_OWL), ("dc", "http://purl.org/dc/elements/1.1/")],
    )
    .unwrap()
}

#[test]
fn test_resource_to_statements() {
    let mut model = model();
    let owl_thing = model.rdfs_class(Some("owl:Thing")).unwrap();
    let project = model.instantiate(owl_thing, Some("rdfs-js")).unwrap();
    model.set(project, "dc:creator", "Qfield").unwrap();

    let doc = model.resource(project).unwrap().to_json();
    let statements = to_ntriples(&doc).unwrap();

    let expected = [
        format!(
            "<http://www.w3.org/2002/07/owl#Thing> <{}> <{}> .",
            IRI_RDF_TYPE, IRI_RDFS_CLASS
        ),
        format!(
            "<{}rdfs-js> <{}> <http://www.w3.org/2002/07/owl#Thing> .",
            BASE, IRI_RDF_TYPE
        ),
        format!(
            "<{}rdfs-js> <http://purl.org/dc/elements/1.1/creator> \"Qfield\" .",
            BASE
        ),
    ];
    assert_eq!(statements.len(), expected.len());
    for line in &expected {
        assert!(statements.contains(line), "missing {}", line);
    }
}

#[tokio::test]
async fn test_statements_to_model() {
    let mut model = model();
    let doc = json!([
        {
            "@id": "http://qfield.net/example/ns#rdfs-js",
            "@type": ["http://www.w3.org/2002/07/owl#Thing"],
            "http://purl.org/dc/elements/1.1/creator": [{"@value": "Qfield"}]
        },
        {
            "@id": "http://www.w3.org/2002/07/owl#Thing",
            "@type": [IRI_RDFS_CLASS]
        }
    ]);

    let container = model.load(doc).await.unwrap();
    let container = model.resource(container).unwrap();
    let members = container.get(IRI_RDFS_MEMBER).unwrap();
    let project = members
        .get_named("rdfs-js")
        .and_then(Value::as_resource)
        .and_then(|id| model.resource(id))
        .unwrap();

    let creator = project.get("dc:creator").unwrap().value_of().unwrap();
    assert_eq!(creator.as_native(), Some(&Native::String("Qfield".into())));

    let owl_thing = model.lookup("owl:Thing").unwrap();
    let types = project.get(IRI_RDF_TYPE).unwrap();
    assert!(types.has(&Value::Resource(owl_thing)));

    let thing = types.get_named("owl:Thing").and_then(Value::as_resource).unwrap();
    let class = model.lookup(IRI_RDFS_CLASS).unwrap();
    assert!(model.resource(thing).unwrap().has_value(IRI_RDF_TYPE, class));
}

//! Quick tour of the model
//!
//! Builds a small vocabulary, shows strict and permissive `set`, then saves
//! the graph as JSON-LD, reloads it into a second model and prints the
//! N-Triples lowering.

use rdfs_model::vocab::IRI_OWL;
use rdfs_model::{to_ntriples, Model, ModelConfig, SaveOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== RDFS Model Quick Example ===\n");

    let config = ModelConfig::new("http://qfield.net/example/ns#")
        .with_prefix("owl", IRI_OWL)
        .with_prefix("dc", "http://purl.org/dc/elements/1.1/");
    let mut model = Model::from_config(&config)?;

    // 1. Vocabulary
    println!("1. Defining classes and properties");
    let owl_thing = model.rdfs_class(Some("owl:Thing"))?;
    let project_class = model.define_class(Some("Project"), Some(owl_thing.into()))?;
    model.define_property(project_class, "dc:creator")?;
    println!("   ✓ Project ⊑ owl:Thing, dc:creator on Project\n");

    // 2. Instances
    println!("2. Creating instances");
    let project = model.instantiate(project_class, Some("rdfs-js"))?;
    model.set(project, "dc:creator", "Qfield")?;
    let tagged = model.rdf_lang_string("RDFS object model@en")?;
    model.set(project, "dc:title", tagged)?;
    if let Some(view) = model.resource(project) {
        println!("   {}", view);
        for binding in view.bindings() {
            println!("     {}", binding);
        }
    }
    println!();

    // 3. Strict mode
    println!("3. Strict vs permissive");
    let note = model.rdfs_resource(Some("note"))?;
    match model.set(note, "dc:creator", "Someone") {
        Ok(_) => println!("   unexpected: strict set succeeded"),
        Err(e) => println!("   strict: {}", e),
    }
    model.set_use_strict(false);
    model.set(note, "dc:creator", "Someone")?;
    println!(
        "   permissive: note is a Project now? {}\n",
        model.is_instance_of(note, project_class)
    );

    // 4. Save and reload
    println!("4. Saving and reloading");
    let doc = model.save(&SaveOptions::default()).await?;
    println!("{}", serde_json::to_string_pretty(&doc)?);

    let mut copy = Model::from_config(&config)?;
    let container = copy.load(doc.clone()).await?;
    let loaded = copy
        .resource(container)
        .and_then(|c| c.get(rdfs_model::vocab::IRI_RDFS_MEMBER))
        .map(|members| members.size())
        .unwrap_or_default();
    println!("   ✓ Reloaded {} nodes\n", loaded);

    // 5. Statements
    println!("5. N-Triples");
    for line in to_ntriples(&doc)? {
        println!("   {}", line);
    }

    Ok(())
}

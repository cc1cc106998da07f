//! JSON-LD projection of the model
//!
//! `load` and `save` are the only asynchronous operations: they cross into a
//! [`JsonLdProcessor`], which turns documents into flat node arrays and back.
//! The model itself never parses other RDF syntaxes.

mod decode;
pub(crate) mod encode;
pub mod processor;
pub mod statements;

pub use processor::{FlatDocument, JsonLdProcessor, ProcessorError, ProcessorResult};
pub use statements::to_ntriples;

use crate::model::{Model, ModelError, ModelResult, ResourceId, ResourceView, SaveOptions};
use decode::Decoder;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

impl Model {
    /// Load a document, merging it into this model.
    ///
    /// Returns a transient blank container whose `rdfs:member` values are
    /// the document's top-level nodes.
    pub async fn load(&mut self, document: Value) -> ModelResult<ResourceId> {
        let processor = Arc::clone(&self.processor);
        let nodes = processor.flatten(document).await?;
        Decoder::new(self).decode(&nodes)
    }

    /// [`Model::load`] with the outcome handed to `callback`
    pub async fn load_with<F, T>(&mut self, document: Value, callback: F) -> T
    where
        F: for<'m> FnOnce(ModelResult<ResourceView<'m>>) -> T,
    {
        match self.load(document).await {
            Ok(container) => callback(
                self.resource(container)
                    .ok_or_else(|| ModelError::UnknownResource(container.to_string())),
            ),
            Err(e) => callback(Err(e)),
        }
    }

    /// Serialize every resource not excluded by `options`
    pub async fn save(&self, options: &SaveOptions) -> ModelResult<Value> {
        let nodes = encode::encode_model(self, &options.exclude);
        info!("Saving {} nodes", nodes.len());
        let processor = Arc::clone(&self.processor);
        Ok(processor.finalize(nodes).await?)
    }

    /// [`Model::save`] with the outcome handed to `callback`
    pub async fn save_with<F, T>(&self, options: &SaveOptions, callback: F) -> T
    where
        F: FnOnce(ModelResult<Value>) -> T,
    {
        callback(self.save(options).await)
    }
}

//! JSON-LD processor seam
//!
//! The model reads and writes flat node arrays. Turning arbitrary JSON-LD
//! (contexts, compaction, framing) into that shape, and back, belongs to a
//! [`JsonLdProcessor`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Processor errors
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Document that is not a node, node array or @graph wrapper
    #[error("Invalid JSON-LD document: {0}")]
    InvalidDocument(String),

    /// Failure reported by the processor implementation
    #[error("JSON-LD processor error: {0}")]
    Processor(String),
}

pub type ProcessorResult<T> = Result<T, ProcessorError>;

/// Converts documents to and from flat node arrays
#[async_trait]
pub trait JsonLdProcessor: Send + Sync {
    /// Turn an input document into a flat array of node objects
    async fn flatten(&self, document: Value) -> ProcessorResult<Vec<Value>>;

    /// Turn an emitted node array into the output document
    async fn finalize(&self, nodes: Vec<Value>) -> ProcessorResult<Value>;
}

/// Processor for documents that are already expanded and flat
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatDocument;

impl FlatDocument {
    fn collect(value: Value, nodes: &mut Vec<Value>) -> ProcessorResult<()> {
        match value {
            Value::Array(items) => {
                for item in items {
                    Self::collect(item, nodes)?;
                }
                Ok(())
            }
            Value::Object(mut map) => match map.remove("@graph") {
                Some(graph) => Self::collect(graph, nodes),
                None => {
                    nodes.push(Value::Object(map));
                    Ok(())
                }
            },
            other => Err(ProcessorError::InvalidDocument(format!(
                "expected a node object, found {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl JsonLdProcessor for FlatDocument {
    async fn flatten(&self, document: Value) -> ProcessorResult<Vec<Value>> {
        let mut nodes = Vec::new();
        Self::collect(document, &mut nodes)?;
        Ok(nodes)
    }

    async fn finalize(&self, nodes: Vec<Value>) -> ProcessorResult<Value> {
        Ok(Value::Array(nodes))
    }
}

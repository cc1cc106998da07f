//! Lower emitted JSON-LD node arrays to N-Triples lines
//!
//! Uses oxrdf terms for IRI, blank node and literal validation and
//! formatting. Lines are deduplicated and keep document order.

use crate::datatype::Native;
use crate::model::{ModelError, ModelResult};
use crate::vocab::{IRI_RDF_FIRST, IRI_RDF_NIL, IRI_RDF_REST, IRI_RDF_TYPE};
use oxrdf::{BlankNode, Literal, NamedNode, Subject, Term, Triple};
use rustc_hash::FxHashSet;
use serde_json::{Map, Value as Json};

fn invalid(message: impl Into<String>) -> ModelError {
    ModelError::InvalidDocument(message.into())
}

fn named(iri: &str) -> ModelResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| invalid(format!("{}: {}", iri, e)))
}

fn node_ref(id: &str) -> ModelResult<Subject> {
    match id.strip_prefix("_:") {
        Some(label) => BlankNode::new(label)
            .map(Subject::from)
            .map_err(|e| invalid(format!("{}: {}", id, e))),
        None => named(id).map(Subject::from),
    }
}

fn subject_term(subject: Subject) -> Term {
    Term::from(subject)
}

fn native_literal(native: &Native) -> ModelResult<Literal> {
    match native {
        Native::String(s) => Ok(Literal::new_simple_literal(s)),
        other => {
            let datatype = other
                .datatype()
                .iri()
                .ok_or_else(|| invalid("native value without datatype"))?;
            Ok(Literal::new_typed_literal(other.to_lexical(), named(datatype)?))
        }
    }
}

fn scalar_native(value: &Json) -> ModelResult<Native> {
    match value {
        Json::String(s) => Ok(Native::String(s.clone())),
        Json::Bool(b) => Ok(Native::Boolean(*b)),
        Json::Number(n) => n
            .as_f64()
            .map(Native::Number)
            .ok_or_else(|| invalid(format!("unrepresentable number {}", n))),
        other => Err(invalid(format!("not a scalar: {}", other))),
    }
}

struct Lowering {
    lines: Vec<String>,
    seen: FxHashSet<String>,
    next_list_cell: usize,
}

impl Lowering {
    fn emit(&mut self, subject: Subject, predicate: NamedNode, object: Term) {
        let line = format!("{} .", Triple::new(subject, predicate, object));
        if self.seen.insert(line.clone()) {
            self.lines.push(line);
        }
    }

    fn node(&mut self, node: &Map<String, Json>) -> ModelResult<Subject> {
        let subject = match node.get("@id").and_then(Json::as_str) {
            Some(id) => node_ref(id)?,
            None => Subject::from(BlankNode::default()),
        };

        for (key, value) in node {
            let values = match value {
                Json::Array(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            };
            match key.as_str() {
                "@type" => {
                    for class in values {
                        let class = class
                            .as_str()
                            .ok_or_else(|| invalid("@type must be a string"))?;
                        let object = subject_term(node_ref(class)?);
                        self.emit(subject.clone(), named(IRI_RDF_TYPE)?, object);
                    }
                }
                key if key.starts_with('@') => {}
                key => {
                    let predicate = named(key)?;
                    for value in values {
                        let object = self.object(value)?;
                        self.emit(subject.clone(), predicate.clone(), object);
                    }
                }
            }
        }
        Ok(subject)
    }

    fn object(&mut self, value: &Json) -> ModelResult<Term> {
        let Json::Object(object) = value else {
            return native_literal(&scalar_native(value)?).map(Term::from);
        };

        if let Some(raw) = object.get("@value") {
            let native = scalar_native(raw)?;
            let lexical = match &native {
                Native::String(s) => s.clone(),
                other => other.to_lexical(),
            };
            if let Some(language) = object.get("@language").and_then(Json::as_str) {
                return Literal::new_language_tagged_literal(lexical, language.to_lowercase())
                    .map(Term::from)
                    .map_err(|e| invalid(format!("{}: {}", language, e)));
            }
            return match object.get("@type").and_then(Json::as_str) {
                Some(datatype) => Ok(Literal::new_typed_literal(lexical, named(datatype)?).into()),
                None => native_literal(&native).map(Term::from),
            };
        }

        if let Some(items) = object.get("@list") {
            return self.list(items);
        }

        if object.keys().any(|k| k != "@id") {
            return self.node(object).map(subject_term);
        }
        match object.get("@id").and_then(Json::as_str) {
            Some(id) => node_ref(id).map(subject_term),
            None => Ok(BlankNode::default().into()),
        }
    }

    fn list(&mut self, items: &Json) -> ModelResult<Term> {
        let items = match items {
            Json::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        let mut objects = Vec::with_capacity(items.len());
        for item in items {
            objects.push(self.object(item)?);
        }

        let mut rest: Term = named(IRI_RDF_NIL)?.into();
        for object in objects.into_iter().rev() {
            self.next_list_cell += 1;
            let cell = BlankNode::new(format!("l{}", self.next_list_cell))
                .map_err(|e| invalid(e.to_string()))?;
            self.emit(cell.clone().into(), named(IRI_RDF_FIRST)?, object);
            self.emit(cell.clone().into(), named(IRI_RDF_REST)?, rest);
            rest = cell.into();
        }
        Ok(rest)
    }
}

/// N-Triples lines for a flat or embedded node document
pub fn to_ntriples(document: &Json) -> ModelResult<Vec<String>> {
    let nodes = match document {
        Json::Array(nodes) => nodes.as_slice(),
        Json::Object(map) => match map.get("@graph") {
            Some(Json::Array(nodes)) => nodes.as_slice(),
            _ => std::slice::from_ref(document),
        },
        other => return Err(invalid(format!("expected a node array, found {}", other))),
    };

    let mut lowering = Lowering {
        lines: Vec::new(),
        seen: FxHashSet::default(),
        next_list_cell: 0,
    };
    for node in nodes {
        let node = node
            .as_object()
            .ok_or_else(|| invalid(format!("expected a node object, found {}", node)))?;
        lowering.node(node)?;
    }
    Ok(lowering.lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_forms() {
        let doc = json!([{
            "@id": "http://example.org/a",
            "@type": ["http://example.org/C"],
            "http://example.org/p": [
                "x",
                0,
                0.1,
                true,
                {"@value": "chat", "@language": "FR"},
                {"@value": "1", "@type": "http://www.w3.org/2001/XMLSchema#long"},
                {"@id": "_:b3"}
            ]
        }]);
        let lines = to_ntriples(&doc).unwrap();
        let s = "<http://example.org/a>";
        let p = "<http://example.org/p>";

        assert_eq!(lines[0], format!("{} <{}> <http://example.org/C> .", s, IRI_RDF_TYPE));
        assert!(lines.contains(&format!("{} {} \"x\" .", s, p)));
        assert!(lines.contains(&format!(
            "{} {} \"0\"^^<http://www.w3.org/2001/XMLSchema#integer> .",
            s, p
        )));
        assert!(lines.contains(&format!(
            "{} {} \"1.0E-1\"^^<http://www.w3.org/2001/XMLSchema#double> .",
            s, p
        )));
        assert!(lines.contains(&format!(
            "{} {} \"true\"^^<http://www.w3.org/2001/XMLSchema#boolean> .",
            s, p
        )));
        assert!(lines.contains(&format!("{} {} \"chat\"@fr .", s, p)));
        assert!(lines.contains(&format!("{} {} _:b3 .", s, p)));
    }

    #[test]
    fn test_duplicates_removed() {
        let doc = json!([
            {"@id": "http://example.org/a", "http://example.org/p": ["x", "x"]},
            {"@id": "http://example.org/a", "http://example.org/p": "x"}
        ]);
        assert_eq!(to_ntriples(&doc).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_relative_iris() {
        let doc = json!([{"@id": "relative", "http://example.org/p": "x"}]);
        assert!(matches!(to_ntriples(&doc), Err(ModelError::InvalidDocument(_))));
    }
}

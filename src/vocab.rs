//! Well-known RDF, RDFS, XSD and OWL IRIs
//!
//! The model bootstraps itself from [`BUILTIN_TERMS`]: every entry is interned
//! at construction time and typed with its declared class. The number of
//! entries is the model's built-in term count, which `Exclude::BuiltIn`
//! filters out of iteration and serialization.

pub const IRI_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const IRI_RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const IRI_XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const IRI_OWL: &str = "http://www.w3.org/2002/07/owl#";

// rdf:
pub const IRI_RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const IRI_RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
pub const IRI_RDF_STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
pub const IRI_RDF_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
pub const IRI_RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub const IRI_RDF_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
pub const IRI_RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
pub const IRI_RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const IRI_RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const IRI_RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub const IRI_RDF_LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
pub const IRI_RDF_BAG: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag";
pub const IRI_RDF_SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";
pub const IRI_RDF_ALT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt";
pub const IRI_RDF_LANGSTRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
pub const IRI_RDF_HTML: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML";
pub const IRI_RDF_XMLLITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

// rdfs:
pub const IRI_RDFS_RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
pub const IRI_RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
pub const IRI_RDFS_LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
pub const IRI_RDFS_DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
pub const IRI_RDFS_CONTAINER: &str = "http://www.w3.org/2000/01/rdf-schema#Container";
pub const IRI_RDFS_CONTAINER_MEMBERSHIP_PROPERTY: &str =
    "http://www.w3.org/2000/01/rdf-schema#ContainerMembershipProperty";
pub const IRI_RDFS_SUBCLASSOF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const IRI_RDFS_SUBPROPERTYOF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
pub const IRI_RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const IRI_RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
pub const IRI_RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const IRI_RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const IRI_RDFS_MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";
pub const IRI_RDFS_SEEALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
pub const IRI_RDFS_ISDEFINEDBY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";

// xsd:
pub const IRI_XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const IRI_XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const IRI_XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const IRI_XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const IRI_XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const IRI_XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const IRI_XSD_NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
pub const IRI_XSD_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
pub const IRI_XSD_LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
pub const IRI_XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const IRI_XSD_SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
pub const IRI_XSD_BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
pub const IRI_XSD_NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
pub const IRI_XSD_UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
pub const IRI_XSD_UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
pub const IRI_XSD_UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
pub const IRI_XSD_UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
pub const IRI_XSD_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
pub const IRI_XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const IRI_XSD_DATETIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const IRI_XSD_DATETIMESTAMP: &str = "http://www.w3.org/2001/XMLSchema#dateTimeStamp";
pub const IRI_XSD_TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
pub const IRI_XSD_DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
pub const IRI_XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
pub const IRI_XSD_HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
pub const IRI_XSD_BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";
pub const IRI_XSD_NORMALIZED_STRING: &str = "http://www.w3.org/2001/XMLSchema#normalizedString";
pub const IRI_XSD_TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
pub const IRI_XSD_LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#language";

// owl: extension points, not bootstrapped
pub const IRI_OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const IRI_OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
pub const IRI_OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
pub const IRI_OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";

/// A bootstrap vocabulary entry: the term and the class it is an instance of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTerm {
    pub iri: &'static str,
    pub class: &'static str,
}

const fn term(iri: &'static str, class: &'static str) -> BuiltinTerm {
    BuiltinTerm { iri, class }
}

/// Terms pre-interned by every model, in interning order
pub const BUILTIN_TERMS: &[BuiltinTerm] = &[
    // classes
    term(IRI_RDFS_RESOURCE, IRI_RDFS_CLASS),
    term(IRI_RDFS_CLASS, IRI_RDFS_CLASS),
    term(IRI_RDFS_LITERAL, IRI_RDFS_CLASS),
    term(IRI_RDFS_DATATYPE, IRI_RDFS_CLASS),
    term(IRI_RDFS_CONTAINER, IRI_RDFS_CLASS),
    term(IRI_RDFS_CONTAINER_MEMBERSHIP_PROPERTY, IRI_RDFS_CLASS),
    term(IRI_RDF_PROPERTY, IRI_RDFS_CLASS),
    term(IRI_RDF_STATEMENT, IRI_RDFS_CLASS),
    term(IRI_RDF_LIST, IRI_RDFS_CLASS),
    term(IRI_RDF_BAG, IRI_RDFS_CLASS),
    term(IRI_RDF_SEQ, IRI_RDFS_CLASS),
    term(IRI_RDF_ALT, IRI_RDFS_CLASS),
    // properties
    term(IRI_RDF_TYPE, IRI_RDF_PROPERTY),
    term(IRI_RDF_SUBJECT, IRI_RDF_PROPERTY),
    term(IRI_RDF_PREDICATE, IRI_RDF_PROPERTY),
    term(IRI_RDF_OBJECT, IRI_RDF_PROPERTY),
    term(IRI_RDF_VALUE, IRI_RDF_PROPERTY),
    term(IRI_RDF_FIRST, IRI_RDF_PROPERTY),
    term(IRI_RDF_REST, IRI_RDF_PROPERTY),
    term(IRI_RDFS_SUBCLASSOF, IRI_RDF_PROPERTY),
    term(IRI_RDFS_SUBPROPERTYOF, IRI_RDF_PROPERTY),
    term(IRI_RDFS_DOMAIN, IRI_RDF_PROPERTY),
    term(IRI_RDFS_RANGE, IRI_RDF_PROPERTY),
    term(IRI_RDFS_LABEL, IRI_RDF_PROPERTY),
    term(IRI_RDFS_COMMENT, IRI_RDF_PROPERTY),
    term(IRI_RDFS_MEMBER, IRI_RDF_PROPERTY),
    term(IRI_RDFS_SEEALSO, IRI_RDF_PROPERTY),
    term(IRI_RDFS_ISDEFINEDBY, IRI_RDF_PROPERTY),
    // individuals
    term(IRI_RDF_NIL, IRI_RDF_LIST),
    // rdf datatypes
    term(IRI_RDF_LANGSTRING, IRI_RDFS_DATATYPE),
    term(IRI_RDF_HTML, IRI_RDFS_DATATYPE),
    term(IRI_RDF_XMLLITERAL, IRI_RDFS_DATATYPE),
    // xsd datatypes
    term(IRI_XSD_STRING, IRI_RDFS_DATATYPE),
    term(IRI_XSD_BOOLEAN, IRI_RDFS_DATATYPE),
    term(IRI_XSD_DECIMAL, IRI_RDFS_DATATYPE),
    term(IRI_XSD_FLOAT, IRI_RDFS_DATATYPE),
    term(IRI_XSD_DOUBLE, IRI_RDFS_DATATYPE),
    term(IRI_XSD_INTEGER, IRI_RDFS_DATATYPE),
    term(IRI_XSD_NON_POSITIVE_INTEGER, IRI_RDFS_DATATYPE),
    term(IRI_XSD_NEGATIVE_INTEGER, IRI_RDFS_DATATYPE),
    term(IRI_XSD_LONG, IRI_RDFS_DATATYPE),
    term(IRI_XSD_INT, IRI_RDFS_DATATYPE),
    term(IRI_XSD_SHORT, IRI_RDFS_DATATYPE),
    term(IRI_XSD_BYTE, IRI_RDFS_DATATYPE),
    term(IRI_XSD_NON_NEGATIVE_INTEGER, IRI_RDFS_DATATYPE),
    term(IRI_XSD_UNSIGNED_LONG, IRI_RDFS_DATATYPE),
    term(IRI_XSD_UNSIGNED_INT, IRI_RDFS_DATATYPE),
    term(IRI_XSD_UNSIGNED_SHORT, IRI_RDFS_DATATYPE),
    term(IRI_XSD_UNSIGNED_BYTE, IRI_RDFS_DATATYPE),
    term(IRI_XSD_POSITIVE_INTEGER, IRI_RDFS_DATATYPE),
    term(IRI_XSD_DATE, IRI_RDFS_DATATYPE),
    term(IRI_XSD_DATETIME, IRI_RDFS_DATATYPE),
    term(IRI_XSD_DATETIMESTAMP, IRI_RDFS_DATATYPE),
    term(IRI_XSD_TIME, IRI_RDFS_DATATYPE),
    term(IRI_XSD_DURATION, IRI_RDFS_DATATYPE),
    term(IRI_XSD_ANY_URI, IRI_RDFS_DATATYPE),
    term(IRI_XSD_HEX_BINARY, IRI_RDFS_DATATYPE),
    term(IRI_XSD_BASE64_BINARY, IRI_RDFS_DATATYPE),
    term(IRI_XSD_NORMALIZED_STRING, IRI_RDFS_DATATYPE),
    term(IRI_XSD_TOKEN, IRI_RDFS_DATATYPE),
    term(IRI_XSD_LANGUAGE, IRI_RDFS_DATATYPE),
];

/// Subclass axioms bound at bootstrap (subclass, superclass)
pub const BUILTIN_SUBCLASS_AXIOMS: &[(&str, &str)] = &[
    (IRI_RDFS_DATATYPE, IRI_RDFS_CLASS),
    (IRI_RDFS_CONTAINER_MEMBERSHIP_PROPERTY, IRI_RDF_PROPERTY),
    (IRI_RDF_BAG, IRI_RDFS_CONTAINER),
    (IRI_RDF_SEQ, IRI_RDFS_CONTAINER),
    (IRI_RDF_ALT, IRI_RDFS_CONTAINER),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_terms_are_unique() {
        let unique: HashSet<_> = BUILTIN_TERMS.iter().map(|t| t.iri).collect();
        assert_eq!(unique.len(), BUILTIN_TERMS.len());
    }

    #[test]
    fn test_builtin_classes_are_builtin_terms() {
        let terms: HashSet<_> = BUILTIN_TERMS.iter().map(|t| t.iri).collect();
        for t in BUILTIN_TERMS {
            assert!(terms.contains(t.class), "{} is not a built-in term", t.class);
        }
        for (sub, sup) in BUILTIN_SUBCLASS_AXIOMS {
            assert!(terms.contains(sub) && terms.contains(sup));
        }
    }

    #[test]
    fn test_namespaces() {
        assert!(IRI_RDF_TYPE.starts_with(IRI_RDF));
        assert!(IRI_RDFS_MEMBER.starts_with(IRI_RDFS));
        assert!(IRI_XSD_DATETIMESTAMP.starts_with(IRI_XSD));
        assert!(IRI_OWL_THING.starts_with(IRI_OWL));
    }
}

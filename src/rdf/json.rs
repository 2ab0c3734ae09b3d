//! RDF/JSON (`application/rdf+json`) codec
//!
//! ```json
//! { "http://s": { "http://p": [ { "type": "literal", "value": "v" } ] } }
//! ```
//! Blank-node subjects are keyed as `_:label`. Blank-node values carry the
//! same prefix, but a bare label is accepted on input.

use super::{
    BlankNode, Databank, Literal, NamedNode, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
};
use crate::error::{RdfError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MEDIA_TYPE: &str = "application/rdf+json";

const BNODE_PREFIX: &str = "_:";

type Document = BTreeMap<String, BTreeMap<String, Vec<JsonValue>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonValue {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
    },
    Bnode {
        value: String,
    },
}

fn named_node(iri: String) -> Result<NamedNode> {
    NamedNode::new(iri).map_err(|e| RdfError::InvalidTerm(e.to_string()).into())
}

fn blank_node(label: &str) -> Result<BlankNode> {
    let label = label.strip_prefix(BNODE_PREFIX).unwrap_or(label);
    BlankNode::new(label).map_err(|e| RdfError::InvalidTerm(e.to_string()).into())
}

fn subject_from_key(key: &str) -> Result<Subject> {
    if key.starts_with(BNODE_PREFIX) {
        Ok(blank_node(key)?.into())
    } else {
        Ok(named_node(key.to_string())?.into())
    }
}

fn subject_key(subject: SubjectRef<'_>) -> String {
    match subject {
        SubjectRef::NamedNode(node) => node.as_str().to_string(),
        SubjectRef::BlankNode(node) => format!("{}{}", BNODE_PREFIX, node.as_str()),
    }
}

impl TryFrom<JsonValue> for Term {
    type Error = crate::error::Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        let term = match value {
            JsonValue::Uri { value } => named_node(value)?.into(),
            JsonValue::Bnode { value } => blank_node(&value)?.into(),
            JsonValue::Literal {
                value,
                lang: Some(lang),
                ..
            } => Literal::new_language_tagged_literal(value, lang)
                .map_err(|e| RdfError::InvalidTerm(e.to_string()))?
                .into(),
            JsonValue::Literal {
                value,
                datatype: Some(datatype),
                ..
            } => Literal::new_typed_literal(value, named_node(datatype)?).into(),
            JsonValue::Literal { value, .. } => Literal::new_simple_literal(value).into(),
        };
        Ok(term)
    }
}

impl From<TermRef<'_>> for JsonValue {
    fn from(term: TermRef<'_>) -> Self {
        match term {
            TermRef::NamedNode(node) => JsonValue::Uri {
                value: node.as_str().to_string(),
            },
            TermRef::BlankNode(node) => JsonValue::Bnode {
                value: format!("{}{}", BNODE_PREFIX, node.as_str()),
            },
            TermRef::Literal(literal) => JsonValue::Literal {
                value: literal.value().to_string(),
                lang: literal.language().map(str::to_string),
                datatype: (!literal.is_plain()).then(|| literal.datatype().as_str().to_string()),
            },
        }
    }
}

/// Parse an RDF/JSON document into a new databank
pub fn parse(body: &str) -> Result<Databank> {
    let document: Document =
        serde_json::from_str(body).map_err(|e| RdfError::ParseFailed(e.to_string()))?;

    let mut bank = Databank::new();
    for (subject, predicates) in document {
        let subject = subject_from_key(&subject)?;
        for (predicate, objects) in predicates {
            let predicate = named_node(predicate)?;
            for object in objects {
                bank.add(Triple::new(
                    subject.clone(),
                    predicate.clone(),
                    Term::try_from(object)?,
                ));
            }
        }
    }
    Ok(bank)
}

/// Serialize the whole databank as an RDF/JSON document
pub fn to_string(bank: &Databank) -> Result<String> {
    let mut document = Document::new();
    for TripleRef {
        subject,
        predicate,
        object,
    } in bank.iter()
    {
        document
            .entry(subject_key(subject))
            .or_default()
            .entry(predicate.as_str().to_string())
            .or_default()
            .push(object.into());
    }
    serde_json::to_string(&document).map_err(|e| RdfError::SerializeFailed(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rdf::{iri, literal, vocab};

    #[test]
    fn test_parse_all_value_kinds() {
        let body = r#"{
            "http://ex/artifact": {
                "http://www.w3.org/2002/07/owl#versionIRI": [
                    { "type": "uri", "value": "http://ex/artifact/version/1" }
                ]
            },
            "_:r1": {
                "http://www.w3.org/2000/01/rdf-schema#label": [
                    { "type": "literal", "value": "Name", "lang": "en" },
                    { "type": "literal", "value": "Name", "datatype": "http://www.w3.org/2001/XMLSchema#string" },
                    { "type": "literal", "value": "3", "datatype": "http://www.w3.org/2001/XMLSchema#int" }
                ],
                "http://www.w3.org/2002/07/owl#onProperty": [
                    { "type": "bnode", "value": "_:p1" }
                ]
            }
        }"#;

        let bank = parse(body).unwrap();
        assert_eq!(bank.len(), 5);
        assert!(bank.contains(&Triple::new(
            iri("http://ex/artifact"),
            vocab::OWL_VERSION_IRI,
            iri("http://ex/artifact/version/1"),
        )));
        let r1 = BlankNode::new_unchecked("r1");
        assert!(bank.contains(&Triple::new(r1.clone(), vocab::RDFS_LABEL, literal("Name"))));
        assert!(bank.contains(&Triple::new(
            r1.clone(),
            vocab::RDFS_LABEL,
            Literal::new_language_tagged_literal_unchecked("Name", "en"),
        )));
        assert!(bank.contains(&Triple::new(
            r1.clone(),
            vocab::RDFS_LABEL,
            Literal::new_typed_literal("3", vocab::XSD_INT),
        )));
        assert!(bank.contains(&Triple::new(
            r1,
            vocab::OWL_ON_PROPERTY,
            BlankNode::new_unchecked("p1"),
        )));
    }

    #[test]
    fn test_bnode_value_without_prefix_stays_blank() {
        let body = r#"{ "http://ex/s": { "http://ex/p": [ { "type": "bnode", "value": "b1" } ] } }"#;
        let bank = parse(body).unwrap();
        let expected = Triple::new(iri("http://ex/s"), iri("http://ex/p"), BlankNode::new_unchecked("b1"));
        assert!(bank.contains(&expected));

        let body = to_string(&bank).unwrap();
        assert!(body.contains(r#"{"type":"bnode","value":"_:b1"}"#));
        assert_eq!(parse(&body).unwrap(), bank);
    }

    #[test]
    fn test_serialize_then_parse_preserves_databank() {
        let mut bank = Databank::new();
        bank.add(Triple::new(iri(vocab::TEMP_OBJECT), vocab::RDFS_LABEL, literal("hello")));
        bank.add(Triple::new(
            iri(vocab::TEMP_ARTIFACT),
            vocab::PODD_HAS_TOP_OBJECT,
            iri(vocab::TEMP_OBJECT),
        ));
        bank.add(Triple::new(
            BlankNode::new_unchecked("b0"),
            vocab::RDF_TYPE,
            vocab::OWL_RESTRICTION,
        ));
        bank.add(Triple::new(
            iri(vocab::TEMP_OBJECT),
            vocab::PODD_WEIGHT,
            Literal::new_typed_literal("4", vocab::XSD_INT),
        ));

        let body = to_string(&bank).unwrap();
        assert!(body.contains(r#""type":"uri""#));
        assert!(body.contains(r#""_:b0""#));
        assert!(body.contains(r#""datatype":"http://www.w3.org/2001/XMLSchema#int""#));
        assert!(!body.contains("XMLSchema#string"));
        assert_eq!(parse(&body).unwrap(), bank);
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let body = r#"{ "http://s": { "http://p": [ { "type": "quoted", "value": "x" } ] } }"#;
        let err = parse(body).unwrap_err();
        assert!(matches!(err, Error::Rdf(RdfError::ParseFailed(_))));
    }

    #[test]
    fn test_parse_rejects_invalid_iri() {
        let body = r#"{ "not an iri": { "http://p": [ { "type": "literal", "value": "x" } ] } }"#;
        assert!(matches!(
            parse(body),
            Err(Error::Rdf(RdfError::InvalidTerm(_)))
        ));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("{}").unwrap().is_empty());
        assert_eq!(to_string(&Databank::new()).unwrap(), "{}");
    }
}

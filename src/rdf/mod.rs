//! In-memory RDF model
//!
//! Terms and triples come from `oxrdf`. On top of them sit the `Databank`
//! triple set, a where/optional pattern query, and the RDF/JSON codec used
//! on the wire.

pub mod databank;
pub mod json;
pub mod query;
pub mod vocab;

pub use databank::Databank;
pub use oxrdf::{
    BlankNode, Literal, NamedNode, NamedNodeRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
};
pub use query::{var, Bindings, PatternTerm, Query};

/// IRI node for triples built locally. IRIs arriving from the server are
/// checked by the codec instead.
pub fn iri(iri: impl Into<String>) -> NamedNode {
    NamedNode::new_unchecked(iri)
}

/// Plain string literal
pub fn literal(value: impl Into<String>) -> Literal {
    Literal::new_simple_literal(value)
}

/// String views of a term, as the form layer needs them
pub trait TermExt {
    /// The IRI, the blank node id or the literal's lexical form
    fn value(&self) -> &str;

    fn as_iri(&self) -> Option<&str>;
}

impl TermExt for Term {
    fn value(&self) -> &str {
        match self {
            Term::NamedNode(node) => node.as_str(),
            Term::BlankNode(node) => node.as_str(),
            Term::Literal(literal) => literal.value(),
        }
    }

    fn as_iri(&self) -> Option<&str> {
        match self {
            Term::NamedNode(node) => Some(node.as_str()),
            _ => None,
        }
    }
}

#![allow(dead_code)]

use podd_edit::error::{Error, TransportError};
use podd_edit::rdf::{
    iri, json, literal, vocab, BlankNode, Databank, Literal, NamedNode, NamedNodeRef, Subject,
    SubjectRef, Term, TermRef, Triple,
};
use podd_edit::service::{PoddService, SearchRequest, SubmitTarget};
use std::sync::Mutex;

pub const PROJECT: &str = "http://purl.org/podd/ns/poddScience#Project";
pub const HAS_NAME: &str = "http://purl.org/podd/ns/poddScience#hasName";
pub const ARTIFACT: &str = "http://purl.org/podd/artifact/42";
pub const TOP: &str = "http://purl.org/podd/object/42/top";

pub fn version(n: usize) -> String {
    format!("{}/version/{}", ARTIFACT, n)
}

/// In-memory PODD server: stores submitted triples with permanent IRIs and
/// a bumped version, and answers artifact requests with the stored copy.
pub struct MockServer {
    pub metadata: Databank,
    pub stored: Mutex<Option<Databank>>,
    pub submissions: Mutex<Vec<(SubmitTarget, String)>>,
    pub search_results: Databank,
    pub fail_submit: bool,
    /// Artifact requests fail once a submission has been stored
    pub fail_refetch: bool,
    pub omit_version: bool,
}

impl MockServer {
    pub fn new(metadata: Databank) -> Self {
        Self {
            metadata,
            stored: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
            search_results: Databank::new(),
            fail_submit: false,
            fail_refetch: false,
            omit_version: false,
        }
    }

    pub fn submissions(&self) -> Vec<(SubmitTarget, String)> {
        self.submissions.lock().unwrap().clone()
    }

    fn version_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

fn permanent(node: NamedNodeRef<'_>) -> NamedNode {
    match node.as_str() {
        vocab::TEMP_ARTIFACT => iri(ARTIFACT),
        vocab::TEMP_OBJECT => iri(TOP),
        _ => node.into_owned(),
    }
}

fn permanent_subject(subject: SubjectRef<'_>) -> Subject {
    match subject {
        SubjectRef::NamedNode(node) => permanent(node).into(),
        other => other.into_owned(),
    }
}

fn permanent_object(object: TermRef<'_>) -> Term {
    match object {
        TermRef::NamedNode(node) => permanent(node).into(),
        other => other.into_owned(),
    }
}

fn unavailable(url: &str) -> Error {
    Error::Transport(TransportError::Status {
        url: url.to_string(),
        status: 503,
        body: String::new(),
    })
}

#[async_trait::async_trait]
impl PoddService for MockServer {
    async fn get_metadata(&self, object_type_uri: &str) -> Result<Databank, Error> {
        if object_type_uri != PROJECT {
            return Err(unavailable("/metadata"));
        }
        Ok(self.metadata.clone())
    }

    async fn get_artifact(&self, artifact_iri: &str) -> Result<Databank, Error> {
        if artifact_iri != ARTIFACT || (self.fail_refetch && self.version_count() > 0) {
            return Err(unavailable("/artifact/base"));
        }
        self.stored
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| unavailable("/artifact/base"))
    }

    async fn search(&self, _request: &SearchRequest) -> Result<Databank, Error> {
        Ok(self.search_results.clone())
    }

    async fn submit(&self, target: &SubmitTarget, body: String) -> Result<Databank, Error> {
        if self.fail_submit {
            return Err(unavailable("/artifact/new"));
        }
        let submitted = json::parse(&body)?;
        self.submissions
            .lock()
            .unwrap()
            .push((target.clone(), body));

        let mut stored: Databank = submitted
            .iter()
            .filter(|t| t.predicate != vocab::OWL_VERSION_IRI)
            .map(|t| {
                Triple::new(
                    permanent_subject(t.subject),
                    t.predicate.into_owned(),
                    permanent_object(t.object),
                )
            })
            .collect();
        stored.add(Triple::new(
            iri(ARTIFACT),
            vocab::OWL_VERSION_IRI,
            iri(version(self.version_count())),
        ));
        *self.stored.lock().unwrap() = Some(stored);

        let mut confirmation = Databank::new();
        if !self.omit_version {
            confirmation.add(Triple::new(
                iri(ARTIFACT),
                vocab::OWL_VERSION_IRI,
                iri(version(self.version_count())),
            ));
        }
        confirmation.add(Triple::new(iri(ARTIFACT), vocab::PODD_HAS_TOP_OBJECT, iri(TOP)));
        Ok(confirmation)
    }
}

/// Schema with one short-text, exactly-one property `HAS_NAME` on `PROJECT`
pub fn name_schema() -> Databank {
    let class = iri(PROJECT);
    let restriction = BlankNode::new_unchecked("r1");
    let property = iri(HAS_NAME);
    vec![
        Triple::new(class.clone(), vocab::RDF_TYPE, vocab::OWL_CLASS),
        Triple::new(class, vocab::RDFS_SUB_CLASS_OF, restriction.clone()),
        Triple::new(restriction.clone(), vocab::RDF_TYPE, vocab::OWL_RESTRICTION),
        Triple::new(restriction, vocab::OWL_ON_PROPERTY, property.clone()),
        Triple::new(property.clone(), vocab::RDFS_LABEL, literal("Name")),
        Triple::new(property.clone(), vocab::PODD_HAS_DISPLAY_TYPE, vocab::DISPLAY_SHORT_TEXT),
        Triple::new(property.clone(), vocab::PODD_HAS_CARDINALITY, vocab::CARD_EXACTLY_ONE),
        Triple::new(
            property,
            vocab::PODD_WEIGHT,
            Literal::new_typed_literal("1", vocab::XSD_INT),
        ),
    ]
    .into_iter()
    .collect()
}

pub fn mentions_placeholder(bank: &Databank) -> bool {
    bank.iter().any(|t| {
        [TermRef::from(t.subject), t.object].into_iter().any(|term| {
            matches!(term, TermRef::NamedNode(node) if vocab::is_temporary(node.as_str()))
        })
    })
}

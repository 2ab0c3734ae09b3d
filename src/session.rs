//! Editing session state
//!
//! `Identity` holds the current artifact, version, parent and object
//! references. The synchronizer owns one per session and snapshots it when
//! a submission starts.

use crate::rdf::vocab;
use crate::rdf::{iri, var, Databank, TermExt};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// Identifiers of an artifact as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OntologyId {
    pub artifact_iri: String,
    pub version_iri: String,
    pub parent_uri: Option<String>,
    pub object_uri: Option<String>,
}

/// Current identity of the artifact and object being edited
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub artifact_iri: Option<String>,
    pub version_iri: Option<String>,
    pub parent_uri: Option<String>,
    pub object_uri: Option<String>,
    /// RDF class of the object being edited
    pub object_type_uri: String,
}

impl Identity {
    pub fn new(object_type_uri: impl Into<String>) -> Self {
        Self {
            object_type_uri: object_type_uri.into(),
            ..Default::default()
        }
    }

    /// Artifact IRI, or the artifact placeholder until the server assigns one
    pub fn current_artifact_iri(&self) -> &str {
        self.artifact_iri.as_deref().unwrap_or(vocab::TEMP_ARTIFACT)
    }

    /// Object URI, or the object placeholder until the server assigns one
    pub fn current_object_uri(&self) -> &str {
        self.object_uri.as_deref().unwrap_or(vocab::TEMP_OBJECT)
    }

    /// True until the artifact has been stored on the server
    pub fn is_new_artifact(&self) -> bool {
        vocab::is_temporary(self.current_artifact_iri())
    }

    /// Replace the identity with what the server reported
    pub fn update(&mut self, id: &OntologyId) {
        self.artifact_iri = Some(id.artifact_iri.clone());
        self.version_iri = Some(id.version_iri.clone());
        self.parent_uri = id.parent_uri.clone();
        self.object_uri = id.object_uri.clone();
    }
}

/// Extract artifact identifiers from a databank.
///
/// One entry per `?artifact owl:versionIRI ?version` statement; callers use
/// the first. The object is resolved against the prior `identity`:
///
/// - with no parent known and a placeholder object, the artifact is taken
///   to be newly created and both parent and object become its
///   `artifactHasTopObject` target;
/// - otherwise the object is the one linked from the known parent and typed
///   with the identity's object type.
///
/// The branch depends on identity state from before the call, so a stale
/// identity resolves the wrong object.
pub fn extract_ontology_id(databank: &Databank, identity: &Identity) -> Vec<OntologyId> {
    let bindings = databank
        .query()
        .matching(var("artifact"), vocab::OWL_VERSION_IRI, var("version"))
        .select();

    let bootstrap = identity.parent_uri.is_none()
        && vocab::is_temporary(identity.current_object_uri());

    let mut ids = Vec::with_capacity(bindings.len());
    for binding in &bindings {
        let artifact = &binding["artifact"];
        let mut id = OntologyId {
            artifact_iri: artifact.value().to_string(),
            version_iri: binding["version"].value().to_string(),
            parent_uri: None,
            object_uri: None,
        };

        if bootstrap {
            let tops = databank
                .query()
                .matching(artifact, vocab::PODD_HAS_TOP_OBJECT, var("top"))
                .select();
            if tops.len() > 1 {
                warn!(
                    "more than one top object statement for {}, using the first",
                    id.artifact_iri
                );
            }
            if let Some(top) = tops.first() {
                id.parent_uri = Some(top["top"].value().to_string());
                id.object_uri = Some(top["top"].value().to_string());
            }
        } else {
            id.parent_uri = identity.parent_uri.clone();
            id.object_uri = identity.object_uri.clone();
            if let Some(parent) = &identity.parent_uri {
                let children = databank
                    .query()
                    .matching(iri(parent.as_str()), var("property"), var("object"))
                    .matching(
                        var("object"),
                        vocab::RDF_TYPE,
                        iri(identity.object_type_uri.as_str()),
                    )
                    .select();
                if children.len() > 1 {
                    warn!(
                        "more than one {} object linked from {}, using the first",
                        identity.object_type_uri, parent
                    );
                }
                if let Some(child) = children.first() {
                    id.object_uri = Some(child["object"].value().to_string());
                }
            }
        }

        ids.push(id);
    }

    if ids.len() > 1 {
        warn!(
            "more than one version IRI statement found ({}), using the first",
            ids.len()
        );
    }

    ids
}

/// Label of the artifact's top object
pub fn project_title(databank: &Databank) -> Option<String> {
    let titles = databank
        .query()
        .matching(var("artifact"), vocab::PODD_HAS_TOP_OBJECT, var("top"))
        .matching(var("top"), vocab::RDFS_LABEL, var("title"))
        .select();
    if titles.len() > 1 {
        warn!("more than one project title found");
    }
    titles.first().map(|b| b["title"].value().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Error,
}

/// Entry in the user-visible message list
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub at: DateTime<Utc>,
    pub level: MessageLevel,
    pub text: String,
}

/// User-visible message list, in arrival order
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Info, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Error, text.into());
    }

    fn push(&mut self, level: MessageLevel, text: String) {
        self.messages.push(Message {
            at: Utc::now(),
            level,
            text,
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn errors(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.level == MessageLevel::Error)
    }

    /// Take all messages, leaving the log empty
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{literal, Triple};

    const ARTIFACT: &str = "http://purl.org/podd/artifact/1";
    const VERSION: &str = "http://purl.org/podd/artifact/1/version/1";
    const TOP: &str = "http://purl.org/podd/object/top";
    const PROJECT: &str = "http://purl.org/podd/ns/poddScience#Project";

    fn confirmation() -> Databank {
        let mut bank = Databank::new();
        bank.add(Triple::new(
            iri(ARTIFACT),
            vocab::OWL_VERSION_IRI,
            iri(VERSION),
        ));
        bank.add(Triple::new(
            iri(ARTIFACT),
            vocab::PODD_HAS_TOP_OBJECT,
            iri(TOP),
        ));
        bank
    }

    #[test]
    fn test_placeholders_until_known() {
        let identity = Identity::new(PROJECT);
        assert_eq!(identity.current_artifact_iri(), vocab::TEMP_ARTIFACT);
        assert_eq!(identity.current_object_uri(), vocab::TEMP_OBJECT);
        assert!(identity.is_new_artifact());
    }

    #[test]
    fn test_extract_bootstraps_top_object_for_new_artifact() {
        let ids = extract_ontology_id(&confirmation(), &Identity::new(PROJECT));
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].artifact_iri, ARTIFACT);
        assert_eq!(ids[0].version_iri, VERSION);
        assert_eq!(ids[0].parent_uri.as_deref(), Some(TOP));
        assert_eq!(ids[0].object_uri.as_deref(), Some(TOP));
    }

    #[test]
    fn test_extract_looks_up_child_of_known_parent() {
        let child = "http://purl.org/podd/object/child";
        let child_type = "http://purl.org/podd/ns/poddScience#Investigation";
        let mut bank = confirmation();
        bank.add(Triple::new(
            iri(TOP),
            iri("http://purl.org/podd/ns/poddScience#hasInvestigation"),
            iri(child),
        ));
        bank.add(Triple::new(
            iri(child),
            vocab::RDF_TYPE,
            iri(child_type),
        ));

        let identity = Identity {
            parent_uri: Some(TOP.to_string()),
            ..Identity::new(child_type)
        };
        let ids = extract_ontology_id(&bank, &identity);
        assert_eq!(ids[0].parent_uri.as_deref(), Some(TOP));
        assert_eq!(ids[0].object_uri.as_deref(), Some(child));
    }

    #[test]
    fn test_extract_keeps_known_object_when_lookup_finds_nothing() {
        let identity = Identity {
            object_uri: Some(TOP.to_string()),
            ..Identity::new(PROJECT)
        };
        let ids = extract_ontology_id(&confirmation(), &identity);
        assert_eq!(ids[0].parent_uri, None);
        assert_eq!(ids[0].object_uri.as_deref(), Some(TOP));
    }

    #[test]
    fn test_extract_duplicate_top_objects_uses_first() {
        let other = "http://purl.org/podd/object/another";
        let mut bank = confirmation();
        bank.add(Triple::new(iri(ARTIFACT), vocab::PODD_HAS_TOP_OBJECT, iri(other)));

        let ids = extract_ontology_id(&bank, &Identity::new(PROJECT));
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].parent_uri.as_deref(), Some(other));
        assert_eq!(ids[0].object_uri.as_deref(), Some(other));
        assert_eq!(extract_ontology_id(&bank, &Identity::new(PROJECT)), ids);
    }

    #[test]
    fn test_extract_multiple_versions_reports_all() {
        let mut bank = confirmation();
        bank.add(Triple::new(
            iri(ARTIFACT),
            vocab::OWL_VERSION_IRI,
            iri("http://purl.org/podd/artifact/1/version/2"),
        ));
        let ids = extract_ontology_id(&bank, &Identity::new(PROJECT));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_extract_without_version_is_empty() {
        let mut bank = Databank::new();
        bank.add(Triple::new(
            iri(ARTIFACT),
            vocab::PODD_HAS_TOP_OBJECT,
            iri(TOP),
        ));
        assert!(extract_ontology_id(&bank, &Identity::new(PROJECT)).is_empty());
    }

    #[test]
    fn test_identity_update() {
        let mut identity = Identity::new(PROJECT);
        identity.update(&extract_ontology_id(&confirmation(), &identity)[0]);
        assert_eq!(identity.current_artifact_iri(), ARTIFACT);
        assert_eq!(identity.version_iri.as_deref(), Some(VERSION));
        assert_eq!(identity.current_object_uri(), TOP);
        assert!(!identity.is_new_artifact());
    }

    #[test]
    fn test_project_title() {
        let mut bank = confirmation();
        assert_eq!(project_title(&bank), None);
        bank.add(Triple::new(
            iri(TOP),
            vocab::RDFS_LABEL,
            literal("Growth trial"),
        ));
        assert_eq!(project_title(&bank).as_deref(), Some("Growth trial"));
    }

    #[test]
    fn test_message_log() {
        let mut log = MessageLog::new();
        log.info("Retrieved artifact");
        log.error("Failed to store artifact");
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.errors().count(), 1);
        let drained = log.drain();
        assert_eq!(drained[1].level, MessageLevel::Error);
        assert!(log.is_empty());
    }
}

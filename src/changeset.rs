//! Local triple changesets
//!
//! A changeset records one field edit as old triples to drop and new triples
//! to add. Batches are applied in two phases so that an addition made by one
//! changeset is never undone by the pending removal of another.

use crate::rdf::vocab;
use crate::rdf::{iri, literal, Databank, Triple};
use tracing::debug;

/// One field edit against a databank
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Changeset {
    /// New objects have nothing to remove, so `old_triples` are skipped
    pub is_new: bool,
    pub object_uri: String,
    pub new_triples: Vec<Triple>,
    pub old_triples: Vec<Triple>,
}

impl Changeset {
    pub fn is_empty(&self) -> bool {
        self.new_triples.is_empty() && self.old_triples.is_empty()
    }
}

/// Apply a batch of changesets to `databank`.
///
/// All removals (from changesets that are not new) happen before any
/// addition, each phase in sequence order. Removing a triple that is not
/// present is a no-op.
pub fn apply_changesets(changesets: &[Changeset], databank: &mut Databank) {
    for changeset in changesets.iter().filter(|c| !c.is_new) {
        for old in &changeset.old_triples {
            debug!("remove old triple: {}", old);
            databank.remove(old);
        }
    }
    for changeset in changesets {
        for new in &changeset.new_triples {
            debug!("add new triple: {}", new);
            databank.add(new.clone());
        }
    }
}

/// Changeset for a short-text style field, with plain string literal values.
///
/// Produces one old and one new triple when the value changed, and an empty
/// changeset when it did not.
pub fn build_field_changeset(
    object_uri: &str,
    property_uri: &str,
    old_value: &str,
    new_value: &str,
    is_new: bool,
) -> Changeset {
    let mut changeset = Changeset {
        is_new,
        object_uri: object_uri.to_string(),
        ..Default::default()
    };
    if old_value == new_value {
        debug!(
            "no change for property={} value={}",
            property_uri, old_value
        );
        return changeset;
    }

    let subject = iri(object_uri);
    let predicate = iri(property_uri);
    changeset.old_triples.push(Triple::new(
        subject.clone(),
        predicate.clone(),
        literal(old_value),
    ));
    changeset
        .new_triples
        .push(Triple::new(subject, predicate, literal(new_value)));

    debug!(
        "update property {} from {:?} to {:?} (is_new={})",
        property_uri, old_value, new_value, is_new
    );
    changeset
}

/// Changeset for a field whose values are IRIs (drop-down, autocomplete).
///
/// An empty old value has no triple to remove; an empty new value clears the
/// field without adding anything.
pub fn build_uri_changeset(
    object_uri: &str,
    property_uri: &str,
    old_value: &str,
    new_value: &str,
    is_new: bool,
) -> Changeset {
    let mut changeset = Changeset {
        is_new,
        object_uri: object_uri.to_string(),
        ..Default::default()
    };
    if old_value == new_value {
        return changeset;
    }

    let subject = iri(object_uri);
    let predicate = iri(property_uri);
    if !old_value.is_empty() {
        changeset.old_triples.push(Triple::new(
            subject.clone(),
            predicate.clone(),
            iri(old_value),
        ));
    }
    if !new_value.is_empty() {
        changeset
            .new_triples
            .push(Triple::new(subject, predicate, iri(new_value)));
    }
    changeset
}

/// Add the triples that declare a brand new top object of a new artifact
pub fn initialise_new_top_object(
    databank: &mut Databank,
    artifact_uri: &str,
    object_uri: &str,
    imports: &[String],
) {
    let artifact = iri(artifact_uri);
    databank.add(Triple::new(artifact.clone(), vocab::RDF_TYPE, vocab::OWL_ONTOLOGY));
    databank.add(Triple::new(
        artifact.clone(),
        vocab::PODD_HAS_TOP_OBJECT,
        iri(object_uri),
    ));
    for import in imports {
        databank.add(Triple::new(artifact.clone(), vocab::OWL_IMPORTS, iri(import.as_str())));
    }
}

/// Link a new, non-top object to its parent
pub fn initialise_new_object(
    databank: &mut Databank,
    parent_uri: &str,
    parent_predicate_uri: &str,
    object_uri: &str,
) {
    databank.add(Triple::new(
        iri(parent_uri),
        iri(parent_predicate_uri),
        iri(object_uri),
    ));
}

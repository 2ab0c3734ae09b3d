//! Databank synchronization with the PODD server
//!
//! The submit pipeline runs in a fixed order: serialize, submit, update
//! identity from the confirmation, wipe and reload the artifact, return.
//! The caller only sees success after the reload, so no placeholder URI
//! survives a successful submission.

use crate::error::{Error, Result, SyncError};
use crate::form::search::{parse_search_results, SearchResult};
use crate::rdf::{json, var, Databank, TripleRef};
use crate::service::{PoddService, SearchRequest, SubmitTarget};
use crate::session::{extract_ontology_id, Identity, MessageLog, OntologyId};
use tracing::{debug, info, warn};

/// Keeps one artifact databank in step with the server
pub struct Synchronizer<S: PoddService> {
    service: S,
    identity: Identity,
    messages: MessageLog,
}

impl<S: PoddService> Synchronizer<S> {
    pub fn new(service: S, identity: Identity) -> Self {
        Self {
            service,
            identity,
            messages: MessageLog::new(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fetch property metadata for the session's object type into `schema`
    pub async fn load_schema(&mut self, schema: &mut Databank) -> Result<()> {
        let object_type = self.identity.object_type_uri.clone();
        debug!("loading metadata for {}", object_type);
        match self.service.get_metadata(&object_type).await {
            Ok(bank) => {
                schema.load(bank.iter().map(TripleRef::into_owned));
                info!("schema databank size = {}", schema.len());
                Ok(())
            }
            Err(e) => {
                warn!("metadata request failed: {}", e.context());
                self.messages
                    .error(format!("Failed to load metadata for {}: {}", object_type, e));
                Err(e)
            }
        }
    }

    /// Replace `databank` with the server's current copy of the artifact and
    /// refresh the session identity from it.
    ///
    /// Nothing changes if the request fails.
    pub async fn get_artifact(&mut self, artifact_iri: &str, databank: &mut Databank) -> Result<OntologyId> {
        let fetched = match self.service.get_artifact(artifact_iri).await {
            Ok(bank) => bank,
            Err(e) => {
                warn!("artifact request failed: {}", e.context());
                self.messages
                    .error(format!("Failed to retrieve artifact {}: {}", artifact_iri, e));
                return Err(e);
            }
        };

        let id = match first_id(&fetched, &self.identity) {
            Ok(id) => id,
            Err(e) => {
                self.messages
                    .error(format!("Failed to retrieve artifact {}: {}", artifact_iri, e));
                return Err(e);
            }
        };

        databank.remove_matching(var("subject"), var("predicate"));
        databank.load(fetched.iter().map(TripleRef::into_owned));
        info!("loaded artifact databank with size {}", databank.len());

        self.identity.update(&id);
        self.messages
            .info(format!("Retrieved artifact version: {}", id.version_iri));
        Ok(id)
    }

    /// Submit the full databank, adopt the server-assigned identity and
    /// reload the artifact.
    ///
    /// The body and identity are taken when the call starts. On failure the
    /// error is logged to the message list and returned; identity and
    /// databank are untouched and nothing is retried.
    pub async fn submit_and_reconcile(&mut self, databank: &mut Databank) -> Result<OntologyId> {
        let snapshot = self.identity.clone();
        let body = json::to_string(databank)?;
        let target = SubmitTarget::for_identity(&snapshot);
        debug!("submitting {} triples to {:?}", databank.len(), target);

        let confirmation = match self.service.submit(&target, body).await {
            Ok(bank) => bank,
            Err(e) => {
                warn!("submission failed: {}", e.context());
                self.messages.error(format!("Failed to store artifact: {}", e));
                return Err(e);
            }
        };

        let id = match first_id(&confirmation, &snapshot) {
            Ok(id) => id,
            Err(e) => {
                self.messages.error(format!("Failed to store artifact: {}", e));
                return Err(e);
            }
        };
        self.identity.update(&id);
        self.messages.info(format!(
            "Successfully edited artifact {} ({})",
            id.artifact_iri, id.version_iri
        ));

        // reload so every placeholder URI is replaced by its permanent one
        self.get_artifact(&id.artifact_iri, databank).await
    }

    /// Look up (label, URI) pairs for autocomplete
    pub async fn search(&mut self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        debug!(
            "searching {:?} in {:?} for {:?}",
            request.artifact_uri, request.search_types, request.term
        );
        match self.service.search(request).await {
            Ok(bank) => {
                let results = parse_search_results(&bank);
                debug!("{} search results", results.len());
                Ok(results)
            }
            Err(e) => {
                warn!("search failed: {}", e.context());
                self.messages.error(format!("Search failed: {}", e));
                Err(e)
            }
        }
    }
}

fn first_id(bank: &Databank, identity: &Identity) -> Result<OntologyId> {
    extract_ontology_id(bank, identity)
        .into_iter()
        .next()
        .ok_or(Error::Sync(SyncError::MissingOntologyId))
}

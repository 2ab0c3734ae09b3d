//! PODD web service abstraction
//!
//! The synchronizer talks to the server only through `PoddService`, so the
//! HTTP implementation can be swapped for an in-memory one in tests.

pub mod http;

use crate::error::Error;
use crate::rdf::Databank;
use crate::session::Identity;

/// Where a submission goes: a new artifact or an edit of an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Edit {
        artifact_iri: String,
        version_iri: Option<String>,
        object_uri: String,
    },
}

impl SubmitTarget {
    /// Route by artifact IRI: placeholders create, anything else edits
    pub fn for_identity(identity: &Identity) -> Self {
        if identity.is_new_artifact() {
            SubmitTarget::Create
        } else {
            SubmitTarget::Edit {
                artifact_iri: identity.current_artifact_iri().to_string(),
                version_iri: identity.version_iri.clone(),
                object_uri: identity.current_object_uri().to_string(),
            }
        }
    }
}

/// Autocomplete lookup against the search service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub artifact_uri: Option<String>,
    pub search_types: Vec<String>,
}

/// The PODD endpoints used by the editor. Every call returns the response
/// body parsed into a fresh databank.
#[async_trait::async_trait]
pub trait PoddService: Send + Sync {
    /// `GET /metadata?objecttypeuri=`
    async fn get_metadata(&self, object_type_uri: &str) -> Result<Databank, Error>;

    /// `GET /artifact/base?artifacturi=`
    async fn get_artifact(&self, artifact_iri: &str) -> Result<Databank, Error>;

    /// `GET /search?searchterm=&artifacturi=&searchtypes=`
    async fn search(&self, request: &SearchRequest) -> Result<Databank, Error>;

    /// `POST /artifact/new` or `POST /artifact/edit` with an RDF/JSON body
    async fn submit(&self, target: &SubmitTarget, body: String) -> Result<Databank, Error>;
}

pub mod changeset;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod rdf;
pub mod service;
pub mod session;
pub mod sync;

pub use changeset::{apply_changesets, build_field_changeset, Changeset};
pub use error::{Error, Result};
pub use rdf::{Databank, Term, Triple};
pub use session::{extract_ontology_id, Identity, OntologyId};
pub use sync::Synchronizer;

//! Vocabulary IRIs used by the PODD schemas and artifacts

use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::NamedNodeRef;

pub const RDF_TYPE: NamedNodeRef<'_> = rdf::TYPE;
pub const RDFS_LABEL: NamedNodeRef<'_> = rdfs::LABEL;
pub const RDFS_SUB_CLASS_OF: NamedNodeRef<'_> = rdfs::SUB_CLASS_OF;

pub const OWL_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
pub const OWL_ONTOLOGY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
pub const OWL_RESTRICTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Restriction");
pub const OWL_ON_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onProperty");
pub const OWL_ALL_VALUES_FROM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#allValuesFrom");
pub const OWL_VERSION_IRI: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionIRI");
pub const OWL_IMPORTS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#imports");
pub const OWL_THING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");

pub const XSD_STRING: NamedNodeRef<'_> = xsd::STRING;
pub const XSD_INT: NamedNodeRef<'_> = xsd::INT;

// poddBase
pub const PODD_HAS_TOP_OBJECT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#artifactHasTopObject");
pub const PODD_HAS_DISPLAY_TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#hasDisplayType");
pub const PODD_HAS_CARDINALITY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#hasCardinality");
pub const PODD_WEIGHT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#weight");

pub const CARD_EXACTLY_ONE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#Cardinality_Exactly_One");
pub const CARD_ONE_OR_MANY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#Cardinality_One_Or_Many");
pub const CARD_ZERO_OR_MANY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#Cardinality_Zero_Or_Many");

pub const DISPLAY_LONG_TEXT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#DisplayType_LongText");
pub const DISPLAY_SHORT_TEXT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#DisplayType_ShortText");
pub const DISPLAY_CHECK_BOX: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#DisplayType_CheckBox");
pub const DISPLAY_DROP_DOWN: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#DisplayType_DropDownList");
pub const DISPLAY_AUTO_COMPLETE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#DisplayType_AutoComplete");
pub const DISPLAY_TABLE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/podd/ns/poddBase#DisplayType_Table");

/// Placeholder IRIs recognised by the server and replaced on first submission
pub const TEMP_PREFIX: &str = "urn:temp:uuid:";
pub const TEMP_ARTIFACT: &str = "urn:temp:uuid:artifact";
pub const TEMP_OBJECT: &str = "urn:temp:uuid:object";

/// Ontologies a new top object imports when no configuration overrides them
pub const DEFAULT_IMPORTS: &[&str] = &[
    "http://purl.org/podd/ns/version/dcTerms/1",
    "http://purl.org/podd/ns/version/foaf/1",
    "http://purl.org/podd/ns/version/poddUser/1",
    "http://purl.org/podd/ns/version/poddBase/1",
    "http://purl.org/podd/ns/version/poddScience/1",
    "http://purl.org/podd/ns/version/poddPlant/1",
];

pub fn is_temporary(iri: &str) -> bool {
    iri.starts_with(TEMP_PREFIX)
}

//! Value choices for drop-down and autocomplete fields

use crate::rdf::vocab;
use crate::rdf::{iri, var, Databank, TermExt};
use serde::Serialize;

/// A label/URI pair offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub label: String,
    pub value: String,
}

/// Read `?uri rdfs:label ?label` pairs from a search service response
pub fn parse_search_results(bank: &Databank) -> Vec<SearchResult> {
    bank.query()
        .matching(var("uri"), vocab::RDFS_LABEL, var("label"))
        .select()
        .iter()
        .map(|b| SearchResult {
            label: b["label"].value().to_string(),
            value: b["uri"].value().to_string(),
        })
        .collect()
}

/// Types to search when completing values of `property_uri`: `owl:Thing`
/// plus the `owl:allValuesFrom` range of each restriction on the property
pub fn autocomplete_search_types(schema: &Databank, property_uri: &str) -> Vec<String> {
    let mut types = vec![vocab::OWL_THING.as_str().to_string()];
    let ranges = schema
        .query()
        .matching(var("restriction"), vocab::OWL_ON_PROPERTY, iri(property_uri))
        .matching(var("restriction"), vocab::OWL_ALL_VALUES_FROM, var("range"))
        .select();
    for range in ranges {
        let range = range["range"].value().to_string();
        if !types.contains(&range) {
            types.push(range);
        }
    }
    types
}

/// Options for a drop-down: every instance of the property's range classes
/// found in the schema, labelled when the schema has a label.
pub fn drop_down_options(schema: &Databank, property_uri: &str) -> Vec<SearchResult> {
    let bindings = schema
        .query()
        .matching(var("restriction"), vocab::OWL_ON_PROPERTY, iri(property_uri))
        .matching(var("restriction"), vocab::OWL_ALL_VALUES_FROM, var("class"))
        .matching(var("value"), vocab::RDF_TYPE, var("class"))
        .optional(var("value"), vocab::RDFS_LABEL, var("label"))
        .select();

    let mut options: Vec<SearchResult> = Vec::new();
    for binding in &bindings {
        let value = binding["value"].value().to_string();
        if options.iter().any(|o| o.value == value) {
            continue;
        }
        let label = binding
            .get("label")
            .map(|l| l.value().to_string())
            .unwrap_or_else(|| value.clone());
        options.push(SearchResult { label, value });
    }
    options
}

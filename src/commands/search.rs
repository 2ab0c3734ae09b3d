use super::{connect, print_messages};
use crate::config::Config;
use crate::rdf::vocab;
use crate::service::SearchRequest;
use anyhow::{Context, Result};

/// Query the search service and print `label <uri>` lines
pub async fn search_command(
    config: &Config,
    term: &str,
    search_types: &[String],
    artifact_iri: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut sync = connect(config, vocab::OWL_THING.as_str())?;
    let search_types = if search_types.is_empty() {
        vec![vocab::OWL_THING.as_str().to_string()]
    } else {
        search_types.to_vec()
    };
    let request = SearchRequest {
        term: term.to_string(),
        artifact_uri: artifact_iri.map(str::to_string),
        search_types,
    };

    let searched = sync.search(&request).await;
    print_messages(sync.messages());
    let results = searched.context("Search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Results ({})", results.len());
        for result in &results {
            println!("  {} <{}>", result.label, result.value);
        }
    }
    Ok(())
}

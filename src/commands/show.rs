use super::{connect, print_messages};
use crate::config::Config;
use crate::form::build_form;
use crate::rdf::{vocab, Databank};
use crate::session::project_title;
use anyhow::{Context, Result};
use colored::Colorize;

/// Fetch the schema (and artifact, if given) and print the resulting form
pub async fn show_command(
    config: &Config,
    object_type_uri: &str,
    artifact_iri: Option<&str>,
) -> Result<()> {
    let mut sync = connect(config, object_type_uri)?;
    let mut schema = Databank::new();
    let mut artifact = Databank::new();

    let loaded = async {
        sync.load_schema(&mut schema).await?;
        if let Some(iri) = artifact_iri {
            sync.get_artifact(iri, &mut artifact).await?;
        }
        Ok::<_, crate::Error>(())
    }
    .await;
    print_messages(sync.messages());
    loaded.context("Failed to load form data")?;

    if let Some(title) = project_title(&artifact) {
        println!("{}", title.bold());
    }
    let form = build_form(&schema, &artifact, sync.identity());
    print!("{}", form);
    for message in &form.messages {
        eprintln!("{}", message.yellow());
    }

    Ok(())
}

/// Fetch an artifact and print its triples as sorted N-Triples
pub async fn dump_command(config: &Config, artifact_iri: &str) -> Result<()> {
    let mut sync = connect(config, vocab::OWL_THING.as_str())?;
    let mut artifact = Databank::new();

    let fetched = sync.get_artifact(artifact_iri, &mut artifact).await;
    print_messages(sync.messages());
    fetched.with_context(|| format!("Failed to retrieve artifact {}", artifact_iri))?;

    print!("{}", artifact.to_ntriples());
    Ok(())
}

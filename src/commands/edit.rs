use super::{connect, print_messages};
use crate::changeset::{apply_changesets, initialise_new_top_object};
use crate::config::Config;
use crate::form::build_form;
use crate::rdf::{iri, vocab, Databank, NamedNode, Triple};
use anyhow::{Context, Result};
use colored::Colorize;

/// Set field values on an object and submit the artifact.
///
/// Without `artifact_iri` a new artifact is created with the object as its
/// top object. Each assignment names a property by URI or label.
pub async fn edit_command(
    config: &Config,
    object_type_uri: &str,
    artifact_iri: Option<&str>,
    assignments: &[(String, String)],
) -> Result<()> {
    let object_type = NamedNode::new(object_type_uri)
        .with_context(|| format!("Invalid object type IRI '{}'", object_type_uri))?;
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
    if let Err(e) = loaded {
        print_messages(sync.messages());
        return Err(e).context("Failed to load form data");
    }

    if artifact_iri.is_none() {
        let identity = sync.identity();
        initialise_new_top_object(
            &mut artifact,
            identity.current_artifact_iri(),
            identity.current_object_uri(),
            &config.artifact.imports,
        );
        artifact.add(Triple::new(
            iri(identity.current_object_uri()),
            vocab::RDF_TYPE,
            object_type,
        ));
    }

    let mut form = build_form(&schema, &artifact, sync.identity());
    let object_uri = form.object_uri.clone();
    let mut changesets = Vec::new();
    for (property, value) in assignments {
        let field = form
            .field_mut(property)
            .with_context(|| format!("No field for property '{}'", property))?;
        if !field.is_editable() {
            anyhow::bail!("Field '{}' cannot be edited", field.property.label);
        }
        let changeset = field.edit(&object_uri, value);
        if !changeset.is_empty() {
            changesets.push(changeset);
        }
    }

    if changesets.is_empty() && artifact_iri.is_some() {
        println!("No changes to submit");
        return Ok(());
    }

    apply_changesets(&changesets, &mut artifact);

    let submitted = sync.submit_and_reconcile(&mut artifact).await;
    print_messages(sync.messages());
    let id = submitted.context("Failed to submit artifact")?;

    println!("{} {}", "Artifact:".bold(), id.artifact_iri);
    println!("{} {}", "Version: ".bold(), id.version_iri);
    if let Some(object) = &id.object_uri {
        println!("{} {}", "Object:  ".bold(), object);
    }
    print!("{}", build_form(&schema, &artifact, sync.identity()));

    Ok(())
}

/// Split a `property=value` command-line assignment
pub fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((property, value)) if !property.trim().is_empty() => {
            Ok((property.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected PROPERTY=VALUE, got '{}'", raw)),
    }
}
